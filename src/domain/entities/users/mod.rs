//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티와 검증 규칙을 정의하는 모듈입니다.
//!
//! # 주요 구성 요소
//!
//! - [`user`] - `User`, `Address`, `UserStatus`
//! - [`codes`] - 호칭/직함/ISO 국가 코드 정규 조회 테이블
//! - [`validation`] - 고정 순서 첫 번째 위반 보고 검증기
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{User, validate_user};
//!
//! let user: User = serde_json::from_slice(&body)?;
//! validate_user(&user)?;
//! ```

pub mod codes;
pub mod user;
pub mod validation;

pub use codes::{Salutation, Title, is_iso_alpha2};
pub use user::{Address, User, UserStatus};
pub use validation::validate_user;
