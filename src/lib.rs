//! 사용자 온보딩 서비스
//!
//! 사용자 레코드를 검증하고 PostgreSQL에 저장한 뒤,
//! 생성 이벤트를 Kafka 토픽으로 발행하는 서비스입니다.
//! 같은 토픽을 구독하는 컨슈머 루프도 함께 제공합니다.
//!
//! # Features
//!
//! - **검증**: 필드 순서대로 평가하여 첫 번째 위반만 보고
//! - **PostgreSQL**: 주소/국적은 JSONB 컬럼에 저장, 쿼리 타임아웃 적용
//! - **Kafka 발행**: acks=1 동기 발행, 사용자 ID를 메시지 키로 사용
//! - **Kafka 구독**: at-most-once 소비 루프, 종료 토큰으로 취소
//! - **페이징**: 잘못된 값은 에러 대신 기본값으로 대체
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 헬스체크
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 추출 / 상태 코드
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   UserService   │ ← 검증 → 저장 → 발행
//! └─────────────────┘
//!      │        │
//!      ▼        ▼
//! ┌─────────┐ ┌──────────┐        ┌────────────────┐
//! │UserStore│ │Publisher │──────▶ │ KafkaSubscriber│
//! │(Postgres│ │ (Kafka)  │ topic  │ (consume loop) │
//! └─────────┘ └──────────┘        └────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use user_onboarding_service::messaging::KafkaPublisher;
//! use user_onboarding_service::repositories::users::PgUserRepository;
//! use user_onboarding_service::services::users::UserService;
//!
//! let service = UserService::new(
//!     Arc::new(PgUserRepository::new(pool, query_timeout)),
//!     Arc::new(KafkaPublisher::new("localhost:9092", "user-events", publish_timeout)?),
//! );
//! let created = service.onboard_user(user).await?;
//! ```

pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod messaging;
pub mod repositories;
pub mod routes;
pub mod services;

#[cfg(test)]
mod test_support;
