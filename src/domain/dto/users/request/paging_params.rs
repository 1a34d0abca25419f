//! 목록 조회 페이징 파라미터
//!
//! 쿼리 문자열의 `offset`, `limit`, `sort`, `order`를 해석하는 **유일한** 경로입니다.
//! 핸들러는 이미 해석된 `PagingParams`만 받고, 저장소는 닫힌 열거형만 받습니다.
//!
//! | 파라미터 | 허용 값 | 해석 실패 시 |
//! |----------|---------|--------------|
//! | `offset` | 0 이상의 정수 | 0 |
//! | `limit` | 1..=1000 | 100 (최대값이 아니라 기본값) |
//! | `sort` | `created_at`, `updated_at` | `created_at` |
//! | `order` | `ASC`, `DESC` (대소문자 무관) | `ASC` |

use std::future::{Ready, ready};

use actix_web::{Error, FromRequest, HttpRequest, web};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OFFSET: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// 정렬 기준 컬럼
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// SQL `ORDER BY`에 들어가는 컬럼 이름
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "created_at" => Some(SortField::CreatedAt),
            "updated_at" => Some(SortField::UpdatedAt),
            _ => None,
        }
    }
}

/// 정렬 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "ASC" => Some(SortOrder::Asc),
            "DESC" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// 쿼리 문자열 원본 값
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPagingQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl RawPagingQuery {
    /// 쿼리 쌍을 그대로 읽어 키별 첫 번째 값만 보관합니다.
    pub fn from_query_string(query: &str) -> Self {
        let pairs = web::Query::<Vec<(String, String)>>::from_query(query)
            .map(|q| q.into_inner())
            .unwrap_or_default();

        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "offset" => &mut raw.offset,
                "limit" => &mut raw.limit,
                "sort" => &mut raw.sort,
                "order" => &mut raw.order,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        raw
    }
}

/// 해석이 끝난 페이징 파라미터
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagingParams {
    pub offset: i64,
    pub limit: i64,
    pub sort: SortField,
    pub order: SortOrder,
}

impl Default for PagingParams {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
            sort: SortField::default(),
            order: SortOrder::default(),
        }
    }
}

impl PagingParams {
    /// 원본 값을 해석합니다. 어떤 입력도 실패하지 않고 기본값으로 대체됩니다.
    pub fn resolve(raw: &RawPagingQuery) -> Self {
        let offset = raw
            .offset
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v >= 0)
            .unwrap_or(DEFAULT_OFFSET);

        let limit = raw
            .limit
            .as_deref()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| (1..=MAX_LIMIT).contains(v))
            .unwrap_or(DEFAULT_LIMIT);

        let sort = raw
            .sort
            .as_deref()
            .and_then(SortField::from_code)
            .unwrap_or_default();

        let order = raw
            .order
            .as_deref()
            .and_then(SortOrder::from_code)
            .unwrap_or_default();

        Self { offset, limit, sort, order }
    }

    /// 쿼리 문자열에서 바로 해석합니다.
    ///
    /// 키가 반복되면 첫 번째 값을 사용하며, 한 파라미터의 실패가 다른 파라미터에 영향을 주지 않습니다.
    pub fn from_query_string(query: &str) -> Self {
        Self::resolve(&RawPagingQuery::from_query_string(query))
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 해석은 실패하지 않으므로 추출도 항상 성공합니다.
impl FromRequest for PagingParams {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(Self::from_query_string(req.query_string())))
    }
}
