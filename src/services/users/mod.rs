//! 사용자 온보딩 서비스 모듈
//!
//! 검증, 저장, 이벤트 발행을 하나의 파이프라인으로 묶습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let service = UserService::new(store, publisher);
//! let created = service.onboard_user(user).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
