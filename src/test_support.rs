//! 테스트 전용 픽스처와 인메모리 구현

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::request::{PagingParams, SortField, SortOrder};
use crate::domain::entities::users::{Address, User, UserStatus};
use crate::messaging::{EventPublisher, MessagingError};
use crate::repositories::users::{USER_NOT_FOUND, UserStore};

/// 모든 검증 규칙을 통과하는 사용자
pub fn valid_user(first_name: &str) -> User {
    User {
        first_name: first_name.to_string(),
        last_name: "Smith".to_string(),
        birth_date: "1990-05-17".to_string(),
        birth_city: "Berlin".to_string(),
        birth_country: "DE".to_string(),
        nationalities: vec!["DE".to_string(), "US".to_string()],
        address: Address {
            address_line1: "Invalidenstraße 117".to_string(),
            postcode: "10115".to_string(),
            city: "Berlin".to_string(),
            country: "DE".to_string(),
            ..Address::default()
        },
        ..User::default()
    }
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    create_calls: AtomicUsize,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryUserStore {
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool, message: &str) -> AppResult<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(message.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, mut user: User) -> AppResult<User> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_writes, "failed to create user")?;

        let mut users = self.users.lock().unwrap();
        // 삽입 순서가 곧 생성 시각 순서가 되도록 간격을 둔다
        let now = Utc::now() + Duration::milliseconds(users.len() as i64);
        user.id = Some(Uuid::new_v4());
        user.created_at = Some(now);
        user.updated_at = Some(now);
        user.status = Some(UserStatus::Active);
        users.push(user.clone());
        Ok(user)
    }

    async fn get_all(&self, params: &PagingParams) -> AppResult<Vec<User>> {
        self.check(&self.fail_reads, "failed to fetch users")?;

        let mut users = self.users.lock().unwrap().clone();
        users.sort_by_key(|u| match params.sort {
            SortField::CreatedAt => u.created_at,
            SortField::UpdatedAt => u.updated_at,
        });
        if params.order == SortOrder::Desc {
            users.reverse();
        }

        Ok(users
            .into_iter()
            .skip(params.offset.max(0) as usize)
            .take(params.limit.max(0) as usize)
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<User> {
        self.check(&self.fail_reads, "failed to fetch user")?;

        let id = Uuid::parse_str(id).map_err(|_| AppError::NotFound(USER_NOT_FOUND.to_string()))?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == Some(id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    async fn offboard(&self, id: &str) -> AppResult<()> {
        self.check(&self.fail_writes, "failed to offboard user")?;

        let id = Uuid::parse_str(id).map_err(|_| AppError::NotFound(USER_NOT_FOUND.to_string()))?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == Some(id))
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;
        user.status = Some(UserStatus::Offboarded);
        user.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.check(&self.fail_reads, "ping failed")
    }
}

#[derive(Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<(String, Vec<u8>)>>,
    fail: AtomicBool,
}

impl RecordingPublisher {
    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.published.lock().unwrap().clone()
    }

    pub fn fail_publishes(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, key: &str, payload: &[u8]) -> Result<(), MessagingError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MessagingError::Produce("broker unavailable".to_string()));
        }
        self.published.lock().unwrap().push((key.to_string(), payload.to_vec()));
        Ok(())
    }

    async fn close(&self) {}
}
