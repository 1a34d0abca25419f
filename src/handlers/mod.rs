//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! Spring Framework의 Controller 레이어와 같은 역할입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   UserService - 검증 / 저장 / 이벤트 발행           ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   UserStore (Postgres) / EventPublisher (Kafka)  ← Infrastructure
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 핸들러는 얇게 유지합니다. 요청 추출과 상태 코드 결정만 하고,
//! 비즈니스 규칙은 서비스 계층에 둡니다. 에러는 `AppError`로 반환하면
//! `ResponseError` 구현이 공통 에러 본문으로 변환합니다.

pub mod users;
