//! 이벤트 발행자
//!
//! 커밋된 쓰기 한 건당 메시지 한 건을 **동기적으로** 발행합니다.
//! `publish`는 브로커의 전달 확인(acks=1, 리더 기록)을 받은 뒤에야 반환합니다.

use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use rdkafka::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};

use super::MessagingError;

/// 이벤트 발행 계약
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// 키와 페이로드로 메시지 한 건을 발행하고 전달 확인을 기다립니다.
    async fn publish(&self, key: &str, payload: &[u8]) -> Result<(), MessagingError>;

    /// 대기 중인 전달을 모두 flush하고 발행자를 닫습니다.
    async fn close(&self);
}

/// Kafka 발행자
///
/// ## 설정
///
/// | librdkafka 속성 | 값 | 의미 |
/// |-----------------|----|------|
/// | `acks` | `1` | 파티션 리더 기록 확인 |
/// | `retries` | `0` | 재시도는 호출자 책임 |
/// | `linger.ms` | `0` | 배치 대기 없이 즉시 전송 |
/// | `message.timeout.ms` | `KAFKA_PUBLISH_TIMEOUT_MS` | 전달 확인 최대 대기 |
#[derive(Clone)]
pub struct KafkaPublisher {
    producer: FutureProducer,
    topic: String,
    delivery_timeout: Duration,
}

impl KafkaPublisher {
    pub fn new(brokers: &str, topic: &str, delivery_timeout: Duration) -> Result<Self, MessagingError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("acks", "1")
            .set("retries", "0")
            .set("linger.ms", "0")
            .set("message.timeout.ms", delivery_timeout.as_millis().to_string())
            .create()?;

        info!("✅ Kafka publisher initialized (brokers={}, topic={})", brokers, topic);

        Ok(Self {
            producer,
            topic: topic.to_string(),
            delivery_timeout,
        })
    }
}

#[async_trait]
impl EventPublisher for KafkaPublisher {
    async fn publish(&self, key: &str, payload: &[u8]) -> Result<(), MessagingError> {
        let record = FutureRecord::to(&self.topic).key(key).payload(payload);

        self.producer
            .send(record, self.delivery_timeout)
            .await
            .map(|_| ())
            .map_err(|(e, _)| MessagingError::Produce(e.to_string()))
    }

    async fn close(&self) {
        let producer = self.producer.clone();
        let timeout = self.delivery_timeout;

        match tokio::task::spawn_blocking(move || producer.flush(timeout)).await {
            Ok(Ok(())) => info!("🔌 Kafka publisher flushed and closed"),
            Ok(Err(e)) => warn!("⚠️ Kafka publisher flush failed: {}", e),
            Err(e) => warn!("⚠️ Kafka publisher flush task failed: {}", e),
        }
    }
}
