//! Kafka 메시징 설정 모듈
//!
//! 이벤트 발행(Producer)과 구독(Consumer)에 필요한 설정을 환경 변수에서 읽어옵니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export KAFKA_BROKERS="kafka:9092"
//! export KAFKA_TOPIC="user-events"
//! export KAFKA_GROUP_ID="user-subscriber-group"
//!
//! # 핸들러 실패 정책: 0이면 즉시 폐기(at-most-once), N>0이면 N회까지 재시도
//! export KAFKA_HANDLER_RETRIES=0
//! export KAFKA_HANDLER_RETRY_BACKOFF_MS=100
//!
//! # 읽기 실패 후 대기 시간 (0 = 대기 없음)
//! export KAFKA_READ_ERROR_BACKOFF_MS=0
//! ```

use std::env;
use std::time::Duration;

use super::data_config::{env_flag, env_or};
use crate::messaging::subscriber::{ConsumerPolicy, HandlerFailurePolicy};

/// Kafka 연결 및 토픽 설정
pub struct KafkaConfig;

impl KafkaConfig {
    /// 부트스트랩 브로커 목록 (`KAFKA_BROKERS`, 기본값: "kafka:9092")
    pub fn brokers() -> String {
        env::var("KAFKA_BROKERS").unwrap_or_else(|_| "kafka:9092".to_string())
    }

    /// 사용자 이벤트 토픽 (`KAFKA_TOPIC`, 기본값: "user-events")
    pub fn topic() -> String {
        env::var("KAFKA_TOPIC").unwrap_or_else(|_| "user-events".to_string())
    }

    /// 컨슈머 그룹 ID (`KAFKA_GROUP_ID`, 기본값: "user-subscriber-group")
    pub fn group_id() -> String {
        env::var("KAFKA_GROUP_ID").unwrap_or_else(|_| "user-subscriber-group".to_string())
    }

    /// 발행 시 브로커 확인 응답을 기다리는 최대 시간 (`KAFKA_PUBLISH_TIMEOUT_MS`, 기본값: 10초)
    pub fn publish_timeout() -> Duration {
        Duration::from_millis(env_or("KAFKA_PUBLISH_TIMEOUT_MS", 10_000))
    }

    /// 백그라운드 컨슈머 기동 여부 (`KAFKA_CONSUMER_ENABLED`, 기본값: true)
    pub fn consumer_enabled() -> bool {
        env_flag("KAFKA_CONSUMER_ENABLED", true)
    }

    /// 컨슈머 루프 정책
    ///
    /// `KAFKA_HANDLER_RETRIES`가 0이면 `Discard`, 그 외에는 `Retry`를 사용합니다.
    pub fn consumer_policy() -> ConsumerPolicy {
        let retries: u32 = env_or("KAFKA_HANDLER_RETRIES", 0);
        let backoff = Duration::from_millis(env_or("KAFKA_HANDLER_RETRY_BACKOFF_MS", 100));

        ConsumerPolicy {
            on_handler_error: HandlerFailurePolicy::from_retries(retries, backoff),
            read_error_backoff: Duration::from_millis(env_or("KAFKA_READ_ERROR_BACKOFF_MS", 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kafka_config_defaults() {
        if env::var("KAFKA_BROKERS").is_err() {
            assert_eq!(KafkaConfig::brokers(), "kafka:9092");
        }
        if env::var("KAFKA_TOPIC").is_err() {
            assert_eq!(KafkaConfig::topic(), "user-events");
        }
        if env::var("KAFKA_GROUP_ID").is_err() {
            assert_eq!(KafkaConfig::group_id(), "user-subscriber-group");
        }
    }

    #[test]
    fn test_default_consumer_policy_is_discard_without_backoff() {
        if env::var("KAFKA_HANDLER_RETRIES").is_err() && env::var("KAFKA_READ_ERROR_BACKOFF_MS").is_err() {
            let policy = KafkaConfig::consumer_policy();
            assert_eq!(policy.on_handler_error, HandlerFailurePolicy::Discard);
            assert_eq!(policy.read_error_backoff, Duration::ZERO);
        }
    }
}
