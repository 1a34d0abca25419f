//! 사용자 API 요청 DTO
//!
//! 생성 요청 본문은 엔티티 [`User`](crate::domain::entities::users::User)를 그대로 사용하며,
//! 이 모듈은 목록 조회용 쿼리 파라미터 해석을 담당합니다.

pub mod paging_params;

pub use paging_params::{
    DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_LIMIT, PagingParams, RawPagingQuery, SortField, SortOrder,
};
