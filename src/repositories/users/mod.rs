//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! [`PgUserRepository`](user_repo::PgUserRepository)가 [`UserStore`](user_repo::UserStore)
//! 계약을 PostgreSQL 위에서 구현합니다.

pub mod user_repo;

pub use user_repo::{PgUserRepository, USER_NOT_FOUND, UserStore};
