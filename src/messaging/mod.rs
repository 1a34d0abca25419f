//! # Messaging Module
//!
//! Kafka 기반 이벤트 발행/구독 계층입니다.
//!
//! ## 모듈 구성
//!
//! - [`publisher`] - `EventPublisher` 계약과 `KafkaPublisher` (acks=1, 동기 발행)
//! - [`subscriber`] - `MessageSource`/`MessageHandler` 계약, 소비 루프, `KafkaSubscriber`
//!
//! ## 흐름
//!
//! ```text
//! UserService ──publish(key=user_id)──▶ [user-events] ──▶ KafkaSubscriber ──▶ MessageHandler
//! ```

pub mod publisher;
pub mod subscriber;

use rdkafka::error::KafkaError;
use thiserror::Error;

pub use publisher::{EventPublisher, KafkaPublisher};
pub use subscriber::{
    ConsumerPolicy, ConsumerStats, HandlerFailurePolicy, InboundMessage, KafkaSubscriber,
    MessageHandler, MessageSource, UserEventLogger, run_consume_loop,
};

/// 메시징 계층 에러
#[derive(Error, Debug)]
pub enum MessagingError {
    /// 클라이언트 생성/설정 실패
    #[error("Kafka client error: {0}")]
    Client(String),

    /// 발행 실패 (브로커 거부, 전달 타임아웃 등)
    #[error("Message production error: {0}")]
    Produce(String),

    /// 메시지 읽기 실패
    #[error("Message consumption error: {0}")]
    Consume(String),

    /// 페이로드 디코딩 실패
    #[error("Message decode error: {0}")]
    Decode(String),

    /// 핸들러 처리 실패
    #[error("Message handler error: {0}")]
    Handler(String),
}

impl From<KafkaError> for MessagingError {
    fn from(e: KafkaError) -> Self {
        MessagingError::Client(e.to_string())
    }
}
