//! # Application Error Handling System
//!
//! 온보딩 서비스 전역에서 사용하는 통합 에러 처리 시스템입니다.
//! Spring Framework의 `@ExceptionHandler`와 글로벌 에러 처리 메커니즘을
//! Rust의 타입 시스템과 결합하여 일관된 에러 응답을 제공합니다.
//!
//! ## 설계 철학
//!
//! ### 1. 계층화된 에러 분류
//! - **입력 계층**: 요청 본문 파싱 실패, 필드 검증 실패
//! - **저장소 계층**: PostgreSQL 연산 실패, 리소스 없음
//! - **메시징 계층**: Kafka 발행 실패 (부분 성공 상태)
//!
//! ### 2. 자동 HTTP 응답 변환
//! - **ResponseError 구현**: Actix-Web과 완전 통합
//! - **일관된 응답 형식**: 모든 에러가 `{status, title, detail}` 형태
//! - **내부 정보 보호**: 5xx 에러의 원본 메시지는 로그에만 기록
//!
//! ## Spring과의 비교
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `@ExceptionHandler` | `ResponseError::error_response()` |
//! | `ProblemDetail` | `ErrorBody { status, title, detail }` |
//! | `@ResponseStatus` | `ResponseError::status_code()` |
//! | Custom Exception | `AppError` 열거형 변형 |
//!
//! ## 사용 패턴
//!
//! ### 서비스 계층에서의 에러 처리
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! impl UserService {
//!     async fn onboard_user(&self, user: User) -> Result<User, AppError> {
//!         validate_user(&user)?;                 // 400 Validation Error
//!         let created = self.store.create(user).await?; // 500 Database Error
//!         self.publish_created(&created).await?; // 500 Kafka Error
//!         Ok(created)
//!     }
//! }
//! ```
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | title |
//! |----------|-------------|-------|
//! | `ValidationError` | 400 Bad Request | Validation Error |
//! | `InvalidRequest` | 400 Bad Request | Invalid Request |
//! | `NotFound` | 404 Not Found | Not Found |
//! | `DatabaseError` | 500 Internal Server Error | Database Error |
//! | `PublishError` | 500 Internal Server Error | Kafka Error |
//! | `ServiceUnavailable` | 503 Service Unavailable | Service Unavailable |
//! | `InternalError` | 500 Internal Server Error | Internal Server Error |

use actix_web::http::StatusCode;
use log::error;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 온보딩 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 구현하여
/// HTTP 응답으로 자동 변환됩니다.
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// // sqlx 에러 변환
/// sqlx::query("SELECT 1").execute(&pool).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
///
/// // Kafka 발행 실패 (사용자는 이미 저장됨)
/// publisher.publish(&id, &payload).await
///     .map_err(|reason| AppError::PublishError { user_id: id.clone(), reason: reason.to_string() })?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    ///
    /// PostgreSQL 연산 실패, 쿼리 타임아웃, 행 디코딩 실패 등을 나타냅니다.
    /// 원본 메시지는 서버 로그에만 남고, 클라이언트에는 일반화된 문구가 전달됩니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 필드 검증 에러
    ///
    /// 위반된 첫 번째 규칙을 그대로 담습니다. 400 Bad Request로 응답됩니다.
    ///
    /// # 예제
    /// ```rust,ignore
    /// return Err(AppError::ValidationError(
    ///     "first_name must be between 2 and 100 characters".to_string()
    /// ));
    /// ```
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 요청 본문이나 경로를 해석할 수 없는 경우
    ///
    /// JSON 문법 오류, 타입 불일치 등 검증 단계 이전의 실패입니다.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// 리소스 찾을 수 없음 에러
    ///
    /// 존재하지 않는 사용자 ID, 형식이 잘못된 ID 모두 여기에 해당합니다.
    #[error("Not found: {0}")]
    NotFound(String),

    /// 이벤트 발행 실패
    ///
    /// 사용자 레코드는 이미 커밋되었지만 이벤트 발행이 실패한 부분 성공 상태입니다.
    /// 응답 detail에 생성된 사용자 ID를 포함하여 클라이언트가 상태를 확인할 수 있게 합니다.
    #[error("Publish error for user {user_id}: {reason}")]
    PublishError { user_id: String, reason: String },

    /// 의존 시스템이 응답하지 않는 경우 (readiness 실패)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// 내부 서버 에러
    ///
    /// 직렬화 실패 등 예상하지 못한 시스템 오류입니다.
    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// 모든 에러 응답의 JSON 본문
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

impl AppError {
    /// 응답 본문에 들어갈 제목
    pub fn title(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "Database Error",
            AppError::ValidationError(_) => "Validation Error",
            AppError::InvalidRequest(_) => "Invalid Request",
            AppError::NotFound(_) => "Not Found",
            AppError::PublishError { .. } => "Kafka Error",
            AppError::ServiceUnavailable(_) => "Service Unavailable",
            AppError::InternalError(_) => "Internal Server Error",
        }
    }

    /// 클라이언트에 노출해도 되는 상세 메시지
    ///
    /// 저장소/내부 에러의 원본 메시지는 노출하지 않습니다.
    pub fn detail(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::InvalidRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ServiceUnavailable(msg) => msg.clone(),
            AppError::DatabaseError(_) => "failed to process request against the user store".to_string(),
            AppError::PublishError { user_id, .. } => {
                format!("user {} was created but the user creation event could not be emitted", user_id)
            }
            AppError::InternalError(_) => "an unexpected error occurred".to_string(),
        }
    }

    /// `{status, title, detail}` 본문으로 변환합니다.
    pub fn to_body(&self) -> ErrorBody {
        use actix_web::ResponseError;

        ErrorBody {
            status: self.status_code().as_u16(),
            title: self.title().to_string(),
            detail: self.detail(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// # 응답 형식
    ///
    /// ```json
    /// {
    ///   "status": 400,
    ///   "title": "Validation Error",
    ///   "detail": "first_name must be between 2 and 100 characters"
    /// }
    /// ```
    ///
    /// # 로깅
    ///
    /// 5xx 에러는 원본 메시지를 `error!`로 기록하고,
    /// 클라이언트에는 `detail()`의 일반화된 문구만 전달합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            error!("❌ {} ({}): {}", self.title(), status.as_u16(), self);
        }

        actix_web::HttpResponse::build(status).json(self.to_body())
    }
}

/// 편의성을 위한 Result 타입 별칭
///
/// ```rust,ignore
/// use crate::core::errors::AppResult;
///
/// async fn get_user(id: &str) -> AppResult<User> {
///     // 구현...
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// # 예제
///
/// ```rust,ignore
/// use crate::core::errors::{AppError, ErrorContext};
///
/// let payload = serde_json::to_vec(&event)
///     .context("failed to marshal event")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}
