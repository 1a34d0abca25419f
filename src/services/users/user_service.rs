//! # 사용자 온보딩 서비스 구현
//!
//! 검증 → 저장 → 이벤트 발행으로 이어지는 온보딩 파이프라인과
//! 목록/단건 조회, 오프보딩을 담당합니다.
//!
//! ```text
//! ┌──────────────┐   validate   ┌──────────────┐  create   ┌──────────────┐
//! │  User (JSON) │ ───────────▶ │ UserService  │ ────────▶ │  UserStore   │
//! └──────────────┘              └──────────────┘           └──────────────┘
//!                                      │ publish(key = user id)
//!                                      ▼
//!                               ┌──────────────┐
//!                               │EventPublisher│
//!                               └──────────────┘
//! ```
//!
//! ## 부분 성공
//!
//! 저장은 성공했지만 발행이 실패하면 `AppError::PublishError`를 반환합니다.
//! 저장된 행은 롤백하지 않으며, 에러에 사용자 ID가 담깁니다.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};

use crate::{
    core::errors::{AppError, AppResult, ErrorContext},
    domain::{
        dto::users::{request::PagingParams, response::UserListResponse},
        entities::users::{User, validate_user},
        events::UserEvent,
    },
    messaging::EventPublisher,
    repositories::users::UserStore,
};

/// 사용자 온보딩 비즈니스 로직 서비스
///
/// 저장소와 발행자는 트레이트 객체로 주입됩니다. 애플리케이션에서는
/// `web::Data<UserService>`로 공유하고, 테스트에서는 인메모리 구현을 주입합니다.
///
/// ```rust,ignore
/// let service = UserService::new(
///     Arc::new(PgUserRepository::new(pool, query_timeout)),
///     Arc::new(KafkaPublisher::new(&brokers, &topic, publish_timeout)?),
/// );
/// let created = service.onboard_user(user).await?;
/// ```
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { store, publisher }
    }

    /// 새 사용자를 온보딩합니다.
    ///
    /// # 처리 과정
    ///
    /// 1. **검증**: 첫 번째 위반만 `ValidationError`로 보고, 저장소는 호출하지 않음
    /// 2. **저장**: 저장소가 ID와 타임스탬프를 부여
    /// 3. **발행**: `{action: "USER_CREATED", user}`를 사용자 ID 키로 동기 발행
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 저장소가 반환한 사용자
    /// * `Err(AppError::ValidationError)` - 검증 실패
    /// * `Err(AppError::DatabaseError)` - 저장 실패 (발행하지 않음)
    /// * `Err(AppError::InternalError)` - 이벤트 직렬화 실패
    /// * `Err(AppError::PublishError)` - 저장 성공, 발행 실패
    pub async fn onboard_user(&self, user: User) -> AppResult<User> {
        let start_time = Instant::now();

        validate_user(&user)?;

        let created = self.store.create(user).await?;
        let user_id = created
            .id_string()
            .ok_or_else(|| AppError::InternalError("store returned a user without an id".to_string()))?;

        debug!("User persisted: {} ({:?})", user_id, start_time.elapsed());

        let payload = serde_json::to_vec(&UserEvent::created(created.clone())).context("failed to marshal event")?;

        if let Err(e) = self.publisher.publish(&user_id, &payload).await {
            warn!("⚠️ failed to emit user creation event for {}: {}", user_id, e);
            return Err(AppError::PublishError {
                user_id,
                reason: e.to_string(),
            });
        }

        info!("✅ User onboarded: {} (took {:?})", user_id, start_time.elapsed());
        Ok(created)
    }

    /// 해석된 페이징 값으로 사용자 목록을 조회합니다.
    pub async fn list_users(&self, params: PagingParams) -> AppResult<UserListResponse> {
        let users = self.store.get_all(&params).await?;
        Ok(UserListResponse::new(params, users))
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.store.get_by_id(id).await
    }

    /// 사용자를 오프보딩 상태로 전환합니다. 이미 오프보딩된 사용자도 성공합니다.
    pub async fn offboard_user(&self, id: &str) -> AppResult<()> {
        self.store.offboard(id).await?;
        info!("👋 User offboarded: {}", id);
        Ok(())
    }

    /// 저장소 연결 상태 확인
    pub async fn readiness(&self) -> AppResult<()> {
        self.store
            .ping()
            .await
            .map_err(|_| AppError::ServiceUnavailable("user store is not reachable".to_string()))
    }
}
