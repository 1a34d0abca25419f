//! # Core Module
//!
//! 서비스 전반에서 공유하는 핵심 기능을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입 정의
//! - **HTTP 통합**: Actix-Web ResponseError 구현, `{status, title, detail}` 응답
//! - **ErrorContext**: 외부 에러를 `AppError`로 변환하는 확장 trait

pub mod errors;

pub use errors::{AppError, AppResult, ErrorBody, ErrorContext};
