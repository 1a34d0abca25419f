//! 사용자 목록 응답 DTO
//!
//! `GET /api/v1/users` 응답의 `{meta, data}` 봉투입니다.
//! `meta`는 실제 쿼리에 적용된 페이징 값을 담습니다.

use serde::{Deserialize, Serialize};

use crate::domain::dto::users::request::{PagingParams, SortField, SortOrder};
use crate::domain::entities::users::User;

/// 목록 응답 메타데이터
///
/// 클라이언트가 보낸 원본 값이 아니라 **해석된** 페이징 값을 그대로 돌려줍니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListMeta {
    pub count: usize,
    pub offset: i64,
    pub limit: i64,
    pub sort: SortField,
    pub order: SortOrder,
}

/// 사용자 목록 응답 DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub meta: ListMeta,
    pub data: Vec<User>,
}

impl UserListResponse {
    pub fn new(params: PagingParams, data: Vec<User>) -> Self {
        Self {
            meta: ListMeta {
                count: data.len(),
                offset: params.offset,
                limit: params.limit,
                sort: params.sort,
                order: params.order,
            },
            data,
        }
    }
}
