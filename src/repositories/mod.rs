//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소 계약(`UserStore`)과 PostgreSQL 구현을 제공합니다.
//!
//! # Features
//!
//! - `sqlx::PgPool` 기반 비동기 쿼리
//! - JSONB 컬럼을 통한 주소/국적 저장
//! - 쿼리 단위 타임아웃
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::{PgUserRepository, UserStore};
//!
//! let repo: Arc<dyn UserStore> = Arc::new(PgUserRepository::new(pool, timeout));
//! let user = repo.get_by_id("6f1c2b1e-7c7e-4b8e-9a3a-0d4f6b2d9c11").await?;
//! ```

pub mod users;
