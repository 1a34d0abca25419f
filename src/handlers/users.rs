//! # User Onboarding HTTP Handlers
//!
//! 사용자 온보딩 API 엔드포인트를 처리하는 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/users` | 사용자 온보딩 (검증 → 저장 → 이벤트 발행) | 201 Created |
//! | `GET` | `/api/v1/users` | 사용자 목록 (`offset`, `limit`, `sort`, `order`) | 200 OK |
//! | `GET` | `/api/v1/users/{user_id}` | 사용자 조회 | 200 OK |
//! | `POST` | `/api/v1/users/{user_id}/offboard` | 사용자 오프보딩 | 204 No Content |
//!
//! ## Spring Boot와의 비교
//!
//! ```java
//! @PostMapping
//! public ResponseEntity<User> createUser(@RequestBody User user) {
//!     return ResponseEntity.status(HttpStatus.CREATED).body(userService.onboard(user));
//! }
//!
//! @GetMapping
//! public ResponseEntity<UserListResponse> listUsers(@ModelAttribute PagingParams paging) { ... }
//! ```
//!
//! Rust에서는 `web::Data<UserService>`가 `@Autowired`를, `PagingParams` 추출기가
//! `@ModelAttribute` 바인딩을 대신합니다.
//!
//! ## 에러 응답
//!
//! 모든 실패는 `AppError`의 `ResponseError` 구현을 통해 같은 모양으로 응답됩니다.
//!
//! ```json
//! { "status": 400, "title": "Validation Error", "detail": "last_name must be between 2 and 100 characters" }
//! ```

use actix_web::{HttpResponse, get, post, web};
use log::debug;

use crate::core::errors::AppError;
use crate::domain::dto::users::request::PagingParams;
use crate::domain::entities::users::User;
use crate::services::users::UserService;

/// 새 사용자 온보딩
///
/// 검증 실패 시 저장소와 발행자는 호출되지 않습니다. 저장 후 발행만 실패한 경우
/// 500 `Kafka Error`로 응답하며, `detail`에 생성된 사용자 ID가 포함됩니다.
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/users \
///   -H "Content-Type: application/json" \
///   -d '{"first_name":"Rob","last_name":"Smith","birth_date":"1990-05-17", ...}'
/// ```
#[post("")]
pub async fn create_user(
    service: web::Data<UserService>,
    payload: web::Json<User>,
) -> Result<HttpResponse, AppError> {
    let user = service.onboard_user(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(user))
}

/// 사용자 목록 조회
///
/// 잘못된 페이징 값은 에러가 아니라 기본값으로 대체되며,
/// 응답의 `meta`에는 실제 적용된 값이 담깁니다.
#[get("")]
pub async fn list_users(
    service: web::Data<UserService>,
    paging: PagingParams,
) -> Result<HttpResponse, AppError> {
    debug!("Listing users with {:?}", paging);
    let response = service.list_users(paging).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[get("/{user_id}")]
pub async fn get_user(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = service.get_user(&user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

/// 사용자 오프보딩
///
/// 행은 삭제되지 않고 상태만 `OFFBOARDED`로 바뀝니다.
#[post("/{user_id}/offboard")]
pub async fn offboard_user(
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.offboard_user(&user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use crate::core::errors::ErrorBody;
    use crate::routes::configure_all_routes;
    use crate::services::users::UserService;
    use crate::test_support::{InMemoryUserStore, RecordingPublisher, valid_user};

    fn fixtures() -> (UserService, Arc<InMemoryUserStore>, Arc<RecordingPublisher>) {
        let store = Arc::new(InMemoryUserStore::default());
        let publisher = Arc::new(RecordingPublisher::default());
        (UserService::new(store.clone(), publisher.clone()), store, publisher)
    }

    macro_rules! app {
        ($service:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($service))
                    .configure(configure_all_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_user_returns_created_user() {
        let (service, _, publisher) = fixtures();
        let app = app!(service);

        let req = test::TestRequest::post().uri("/api/v1/users").set_json(valid_user("Rob")).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["first_name"], "Rob");
        assert_eq!(body["status"], "ACTIVE");
        assert_eq!(publisher.published()[0].0, body["id"].as_str().unwrap());
    }

    #[actix_web::test]
    async fn test_create_user_reports_first_violation() {
        let (service, store, _) = fixtures();
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "first_name": "John" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.status, 400);
        assert_eq!(body.title, "Validation Error");
        assert_eq!(body.detail, "last_name must be between 2 and 100 characters");
        assert_eq!(store.create_calls(), 0);
    }

    #[actix_web::test]
    async fn test_create_user_ignores_client_supplied_store_fields() {
        let (service, store, _) = fixtures();
        let app = app!(service);
        let mut payload = serde_json::to_value(valid_user("Rob")).unwrap();
        payload["id"] = json!("");
        payload["created_at"] = json!("");
        payload["status"] = json!("active");

        let req = test::TestRequest::post().uri("/api/v1/users").set_json(&payload).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert_eq!(body["status"], "ACTIVE");
        assert_eq!(store.create_calls(), 1);
    }

    #[actix_web::test]
    async fn test_null_nationalities_is_validation_error() {
        let (service, store, _) = fixtures();
        let app = app!(service);
        let mut payload = serde_json::to_value(valid_user("Rob")).unwrap();
        payload["nationalities"] = Value::Null;

        let req = test::TestRequest::post().uri("/api/v1/users").set_json(&payload).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.title, "Validation Error");
        assert_eq!(body.detail, "at least one nationality is required");
        assert_eq!(store.create_calls(), 0);
    }

    #[actix_web::test]
    async fn test_malformed_body_is_invalid_request() {
        let (service, _, _) = fixtures();
        let app = app!(service);

        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.title, "Invalid Request");
        assert_eq!(body.detail, "request body could not be parsed");
    }

    #[actix_web::test]
    async fn test_publish_failure_is_kafka_error_with_user_id() {
        let (service, store, publisher) = fixtures();
        publisher.fail_publishes(true);
        let app = app!(service);

        let req = test::TestRequest::post().uri("/api/v1/users").set_json(valid_user("Rob")).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.title, "Kafka Error");
        assert_eq!(store.create_calls(), 1);

        let list = test::TestRequest::get().uri("/api/v1/users").to_request();
        let listed: Value = test::call_and_read_body_json(&app, list).await;
        let id = listed["data"][0]["id"].as_str().unwrap();
        assert!(body.detail.contains(id));
    }

    #[actix_web::test]
    async fn test_store_failure_is_database_error() {
        let (service, store, _) = fixtures();
        store.fail_writes(true);
        let app = app!(service);

        let req = test::TestRequest::post().uri("/api/v1/users").set_json(valid_user("Rob")).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.title, "Database Error");
    }

    #[actix_web::test]
    async fn test_list_users_applies_paging_fallbacks() {
        let (service, _, _) = fixtures();
        for name in ["Rob", "Ann"] {
            service.onboard_user(valid_user(name)).await.unwrap();
        }
        let app = app!(service);

        let req = test::TestRequest::get()
            .uri("/api/v1/users?offset=-3&limit=5000&sort=name&order=desc")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["meta"], json!({ "count": 2, "offset": 0, "limit": 100, "sort": "created_at", "order": "DESC" }));
        assert_eq!(body["data"][0]["first_name"], "Ann");
    }

    #[actix_web::test]
    async fn test_get_unknown_user_is_not_found() {
        let (service, _, _) = fixtures();
        let app = app!(service);

        let req = test::TestRequest::get().uri("/api/v1/users/not-a-uuid").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.detail, "user does not exist");
    }

    #[actix_web::test]
    async fn test_offboard_then_fetch_shows_offboarded_status() {
        let (service, _, _) = fixtures();
        let id = service.onboard_user(valid_user("Rob")).await.unwrap().id_string().unwrap();
        let app = app!(service);

        let req = test::TestRequest::post().uri(&format!("/api/v1/users/{id}/offboard")).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri(&format!("/api/v1/users/{id}")).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "OFFBOARDED");
    }
}
