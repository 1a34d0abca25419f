//! 사용자 API 응답 DTO

pub mod user_list_response;

pub use user_list_response::{ListMeta, UserListResponse};
