//! 이벤트 구독자와 소비 루프
//!
//! 컨슈머 그룹에 참여해 메시지를 **한 번에 하나씩** 읽고, 핸들러 처리가 끝난 뒤에
//! 다음 메시지를 읽습니다. 오프셋은 자동 커밋되므로 기본 전달 보장은 at-most-once입니다.
//!
//! ## 실패 정책
//!
//! | 상황 | 동작 |
//! |------|------|
//! | 핸들러 실패 | `HandlerFailurePolicy`에 따라 폐기(기본) 또는 재시도 후 폐기 |
//! | 읽기 실패 | 로그 후 계속 (`read_error_backoff`만큼 대기, 기본 0) |
//! | 종료 토큰 취소 | 진행 중인 읽기를 중단하고 루프 종료 |
//!
//! 어떤 에러도 루프를 중단시키지 않습니다.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use rdkafka::ClientConfig;
use rdkafka::Message;
use rdkafka::consumer::{Consumer, StreamConsumer};
use tokio_util::sync::CancellationToken;

use super::MessagingError;
use crate::domain::events::UserEvent;

/// 소스에서 읽은 메시지 한 건
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub key: Option<Vec<u8>>,
    pub payload: Option<Vec<u8>>,
    pub partition: i32,
    pub offset: i64,
}

/// 메시지 공급원
///
/// `next_message`는 취소 안전(cancel-safe)해야 합니다. 종료 시 future가 drop될 수 있습니다.
#[async_trait]
pub trait MessageSource: Send {
    async fn next_message(&mut self) -> Result<InboundMessage, MessagingError>;
}

/// 메시지 처리기
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, key: &[u8], value: &[u8]) -> Result<(), MessagingError>;
}

/// 핸들러 실패 시 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlerFailurePolicy {
    /// 로그 후 즉시 폐기 (at-most-once)
    #[default]
    Discard,
    /// `retries`회 추가 시도 후 폐기
    Retry { retries: u32, backoff: Duration },
}

impl HandlerFailurePolicy {
    pub fn from_retries(retries: u32, backoff: Duration) -> Self {
        if retries == 0 {
            HandlerFailurePolicy::Discard
        } else {
            HandlerFailurePolicy::Retry { retries, backoff }
        }
    }

    fn max_attempts(&self) -> u32 {
        match self {
            HandlerFailurePolicy::Discard => 1,
            HandlerFailurePolicy::Retry { retries, .. } => retries.saturating_add(1),
        }
    }

    fn backoff(&self) -> Duration {
        match self {
            HandlerFailurePolicy::Discard => Duration::ZERO,
            HandlerFailurePolicy::Retry { backoff, .. } => *backoff,
        }
    }
}

/// 소비 루프 정책
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsumerPolicy {
    pub on_handler_error: HandlerFailurePolicy,
    pub read_error_backoff: Duration,
}

/// 루프 종료 시 반환되는 처리 통계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsumerStats {
    /// 핸들러가 성공한 메시지 수
    pub processed: u64,
    /// 정책에 따라 폐기된 메시지 수
    pub failed: u64,
    /// 읽기 실패 횟수
    pub read_errors: u64,
}

/// 종료 토큰이 취소될 때까지 메시지를 읽고 처리합니다.
///
/// ```rust,ignore
/// let shutdown = CancellationToken::new();
/// let stats = run_consume_loop(&mut subscriber, &UserEventLogger, &policy, shutdown.clone()).await;
/// ```
pub async fn run_consume_loop<S, H>(
    source: &mut S,
    handler: &H,
    policy: &ConsumerPolicy,
    shutdown: CancellationToken,
) -> ConsumerStats
where
    S: MessageSource + ?Sized,
    H: MessageHandler + ?Sized,
{
    let mut stats = ConsumerStats::default();

    loop {
        let next = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            next = source.next_message() => next,
        };

        match next {
            Ok(message) => {
                if dispatch(handler, &message, &policy.on_handler_error, &shutdown).await {
                    stats.processed += 1;
                } else {
                    stats.failed += 1;
                }
            }
            Err(e) => {
                stats.read_errors += 1;
                error!("❌ failed to read message: {}", e);

                if !policy.read_error_backoff.is_zero() && !pause(policy.read_error_backoff, &shutdown).await {
                    break;
                }
            }
        }
    }

    info!(
        "🛑 consumer loop stopped (processed={}, failed={}, read_errors={})",
        stats.processed, stats.failed, stats.read_errors
    );
    stats
}

/// 메시지 한 건을 정책에 따라 처리합니다. 성공하면 `true`.
async fn dispatch<H>(
    handler: &H,
    message: &InboundMessage,
    policy: &HandlerFailurePolicy,
    shutdown: &CancellationToken,
) -> bool
where
    H: MessageHandler + ?Sized,
{
    let key = message.key.as_deref().unwrap_or_default();
    let value = message.payload.as_deref().unwrap_or_default();
    let max_attempts = policy.max_attempts();

    for attempt in 1..=max_attempts {
        match handler.handle(key, value).await {
            Ok(()) => {
                debug!("message processed (partition={}, offset={})", message.partition, message.offset);
                return true;
            }
            Err(e) if attempt < max_attempts => {
                warn!(
                    "⚠️ failed to process message (partition={}, offset={}, attempt {}/{}): {}",
                    message.partition, message.offset, attempt, max_attempts, e
                );
                if !pause(policy.backoff(), shutdown).await {
                    break;
                }
            }
            Err(e) => {
                error!(
                    "❌ failed to process message (partition={}, offset={}), discarding: {}",
                    message.partition, message.offset, e
                );
            }
        }
    }

    false
}

/// 주어진 시간만큼 대기합니다. 대기 중 종료되면 `false`.
async fn pause(duration: Duration, shutdown: &CancellationToken) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

/// Kafka 컨슈머 그룹 구독자
pub struct KafkaSubscriber {
    consumer: StreamConsumer,
}

impl KafkaSubscriber {
    /// 컨슈머를 만들고 토픽을 구독합니다.
    ///
    /// 새 그룹은 가장 이른 오프셋부터 읽고, 오프셋은 자동 커밋됩니다.
    pub fn new(brokers: &str, topic: &str, group_id: &str) -> Result<Self, MessagingError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", "earliest")
            .create()?;

        consumer.subscribe(&[topic])?;

        info!("✅ Kafka subscriber initialized (topic={}, group={})", topic, group_id);

        Ok(Self { consumer })
    }

    /// 종료 토큰이 취소될 때까지 소비합니다.
    pub async fn consume<H>(&mut self, shutdown: CancellationToken, handler: &H, policy: &ConsumerPolicy) -> ConsumerStats
    where
        H: MessageHandler + ?Sized,
    {
        run_consume_loop(self, handler, policy, shutdown).await
    }
}

#[async_trait]
impl MessageSource for KafkaSubscriber {
    async fn next_message(&mut self) -> Result<InboundMessage, MessagingError> {
        let message = self
            .consumer
            .recv()
            .await
            .map_err(|e| MessagingError::Consume(e.to_string()))?;

        Ok(InboundMessage {
            key: message.key().map(<[u8]>::to_vec),
            payload: message.payload().map(<[u8]>::to_vec),
            partition: message.partition(),
            offset: message.offset(),
        })
    }
}

/// 사용자 이벤트를 디코딩해 로그로 남기는 기본 핸들러
pub struct UserEventLogger;

#[async_trait]
impl MessageHandler for UserEventLogger {
    async fn handle(&self, key: &[u8], value: &[u8]) -> Result<(), MessagingError> {
        let event: UserEvent =
            serde_json::from_slice(value).map_err(|e| MessagingError::Decode(e.to_string()))?;

        info!(
            "📨 Processing event: {} (key={}, user_id={})",
            event.action.as_str(),
            String::from_utf8_lossy(key),
            event.user.id_string().unwrap_or_default()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::domain::events::UserEvent;
    use crate::test_support::valid_user;

    /// 준비된 결과를 순서대로 돌려주고, 다 쓰면 종료 토큰을 취소한 뒤 영원히 대기하는 소스
    struct ScriptedSource {
        script: VecDeque<Result<InboundMessage, MessagingError>>,
        shutdown: CancellationToken,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<InboundMessage, MessagingError>>, shutdown: CancellationToken) -> Self {
            Self { script: script.into(), shutdown }
        }
    }

    #[async_trait]
    impl MessageSource for ScriptedSource {
        async fn next_message(&mut self) -> Result<InboundMessage, MessagingError> {
            match self.script.pop_front() {
                Some(next) => next,
                None => {
                    self.shutdown.cancel();
                    std::future::pending().await
                }
            }
        }
    }

    /// `fail_first`회 실패한 뒤 성공하는 핸들러
    struct FlakyHandler {
        fail_first: u32,
        calls: AtomicU32,
        seen: Mutex<Vec<Vec<u8>>>,
    }

    impl FlakyHandler {
        fn new(fail_first: u32) -> Self {
            Self { fail_first, calls: AtomicU32::new(0), seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl MessageHandler for FlakyHandler {
        async fn handle(&self, key: &[u8], _value: &[u8]) -> Result<(), MessagingError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(key.to_vec());
            if call < self.fail_first {
                return Err(MessagingError::Handler("boom".to_string()));
            }
            Ok(())
        }
    }

    fn message(key: &str, payload: &[u8], offset: i64) -> InboundMessage {
        InboundMessage {
            key: Some(key.as_bytes().to_vec()),
            payload: Some(payload.to_vec()),
            partition: 0,
            offset,
        }
    }

    fn event_bytes() -> Vec<u8> {
        serde_json::to_vec(&UserEvent::created(valid_user("Rob"))).unwrap()
    }

    #[actix_web::test]
    async fn test_handler_failure_is_discarded_and_loop_continues() {
        let shutdown = CancellationToken::new();
        let mut source = ScriptedSource::new(
            vec![Ok(message("a", b"{}", 0)), Ok(message("b", b"{}", 1)), Ok(message("c", b"{}", 2))],
            shutdown.clone(),
        );
        let handler = FlakyHandler::new(1);

        let stats = run_consume_loop(&mut source, &handler, &ConsumerPolicy::default(), shutdown).await;

        assert_eq!(stats, ConsumerStats { processed: 2, failed: 1, read_errors: 0 });
        assert_eq!(handler.calls.load(Ordering::SeqCst), 3);
        assert_eq!(*handler.seen.lock().unwrap(), vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[actix_web::test]
    async fn test_read_errors_are_logged_and_skipped() {
        let shutdown = CancellationToken::new();
        let mut source = ScriptedSource::new(
            vec![
                Err(MessagingError::Consume("broker down".to_string())),
                Err(MessagingError::Consume("broker down".to_string())),
                Ok(message("a", b"{}", 0)),
            ],
            shutdown.clone(),
        );
        let handler = FlakyHandler::new(0);

        let stats = run_consume_loop(&mut source, &handler, &ConsumerPolicy::default(), shutdown).await;

        assert_eq!(stats, ConsumerStats { processed: 1, failed: 0, read_errors: 2 });
    }

    #[actix_web::test]
    async fn test_retry_policy_reattempts_before_discarding() {
        let shutdown = CancellationToken::new();
        let mut source = ScriptedSource::new(vec![Ok(message("a", b"{}", 0))], shutdown.clone());
        let handler = FlakyHandler::new(2);
        let policy = ConsumerPolicy {
            on_handler_error: HandlerFailurePolicy::Retry { retries: 2, backoff: Duration::from_millis(1) },
            read_error_backoff: Duration::ZERO,
        };

        let stats = run_consume_loop(&mut source, &handler, &policy, shutdown).await;

        assert_eq!(stats.processed, 1);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 3);
    }

    #[actix_web::test]
    async fn test_retry_policy_gives_up_after_max_attempts() {
        let shutdown = CancellationToken::new();
        let mut source = ScriptedSource::new(vec![Ok(message("a", b"{}", 0))], shutdown.clone());
        let handler = FlakyHandler::new(u32::MAX);
        let policy = ConsumerPolicy {
            on_handler_error: HandlerFailurePolicy::from_retries(1, Duration::ZERO),
            read_error_backoff: Duration::ZERO,
        };

        let stats = run_consume_loop(&mut source, &handler, &policy, shutdown).await;

        assert_eq!(stats.failed, 1);
        assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
    }

    #[actix_web::test]
    async fn test_cancellation_unblocks_pending_read() {
        let shutdown = CancellationToken::new();
        let mut source = ScriptedSource::new(vec![], CancellationToken::new());
        let handler = FlakyHandler::new(0);

        let canceller = shutdown.clone();
        actix_web::rt::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let stats = tokio::time::timeout(
            Duration::from_secs(2),
            run_consume_loop(&mut source, &handler, &ConsumerPolicy::default(), shutdown),
        )
        .await
        .expect("loop should stop once cancelled");

        assert_eq!(stats, ConsumerStats::default());
    }

    #[test]
    fn test_zero_retries_means_discard() {
        assert_eq!(HandlerFailurePolicy::from_retries(0, Duration::from_secs(1)), HandlerFailurePolicy::Discard);
        assert_eq!(HandlerFailurePolicy::Discard.max_attempts(), 1);
    }

    #[actix_web::test]
    async fn test_user_event_logger_accepts_envelope() {
        assert!(UserEventLogger.handle(b"id-1", &event_bytes()).await.is_ok());
    }

    #[actix_web::test]
    async fn test_user_event_logger_rejects_garbage() {
        let result = UserEventLogger.handle(b"id-1", b"not json").await;
        assert!(matches!(result, Err(MessagingError::Decode(_))));
    }

    #[actix_web::test]
    async fn test_logger_failure_does_not_stop_the_loop() {
        let shutdown = CancellationToken::new();
        let mut source = ScriptedSource::new(
            vec![Ok(message("a", b"garbage", 0)), Ok(message("b", &event_bytes(), 1))],
            shutdown.clone(),
        );

        let stats = run_consume_loop(&mut source, &UserEventLogger, &ConsumerPolicy::default(), shutdown).await;

        assert_eq!(stats, ConsumerStats { processed: 1, failed: 1, read_errors: 0 });
    }
}
