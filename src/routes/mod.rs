//! API 라우트 설정 모듈
//!
//! 사용자 온보딩 API와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Routes
//!
//! | 메서드 | 경로 | 핸들러 |
//! |--------|------|--------|
//! | `GET` | `/health` | [`health_check`] |
//! | `GET` | `/health/ready` | [`readiness_check`] |
//! | `POST` | `/api/v1/users` | `handlers::users::create_user` |
//! | `GET` | `/api/v1/users` | `handlers::users::list_users` |
//! | `GET` | `/api/v1/users/{user_id}` | `handlers::users::get_user` |
//! | `POST` | `/api/v1/users/{user_id}/offboard` | `handlers::users::offboard_user` |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(user_service))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{HttpRequest, HttpResponse, error, get, web};
use log::debug;
use serde_json::json;

use crate::core::errors::AppError;
use crate::handlers;
use crate::services::users::UserService;

const UNPARSEABLE_BODY: &str = "request body could not be parsed";

/// 모든 라우트를 설정합니다
///
/// 추출기 에러 핸들러도 함께 등록하여, 잘못된 본문/경로도
/// `{status, title, detail}` 형태로 응답되도록 합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));

    // Health check endpoints
    cfg.service(health_check).service(readiness_check);

    configure_user_routes(cfg);
}

/// 사용자 온보딩 라우트를 설정합니다
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/users -H "Content-Type: application/json" -d @user.json
/// curl "http://localhost:8080/api/v1/users?offset=0&limit=20&sort=updated_at&order=DESC"
/// curl http://localhost:8080/api/v1/users/0b4f3c1e-6a8e-4f55-9d3a-2a1d6d7f9b10
/// curl -X POST http://localhost:8080/api/v1/users/0b4f3c1e-6a8e-4f55-9d3a-2a1d6d7f9b10/offboard
/// ```
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(handlers::users::create_user)
            .service(handlers::users::list_users)
            .service(handlers::users::get_user)
            .service(handlers::users::offboard_user),
    );
}

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected request body: {}", err);
    AppError::InvalidRequest(UNPARSEABLE_BODY.to_string()).into()
}

fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected path parameters: {}", err);
    AppError::InvalidRequest(err.to_string()).into()
}

/// 서비스 생존 여부를 확인하는 헬스체크 엔드포인트
///
/// 의존성을 확인하지 않으며 프로세스가 요청을 받을 수 있으면 항상 200입니다.
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "user_onboarding_service",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z"
/// }
/// ```
#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// 저장소 연결까지 확인하는 준비 상태 엔드포인트
///
/// 저장소가 응답하지 않으면 503 `Service Unavailable`을 반환합니다.
#[get("/health/ready")]
async fn readiness_check(service: web::Data<UserService>) -> Result<HttpResponse, AppError> {
    service.readiness().await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "ready",
        "checks": { "store": "ok" },
    })))
}
