//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! PostgreSQL `users` 테이블을 `sqlx::PgPool` 위에서 다루며,
//! 국적 목록과 주소는 JSONB 컬럼에 구조화된 값으로 저장합니다.
//!
//! ## 특징
//!
//! - **트레이트 경계**: 서비스는 `dyn UserStore`에만 의존 (테스트에서 인메모리 구현 주입)
//! - **쿼리 타임아웃**: 모든 호출은 `DB_QUERY_TIMEOUT_SECS` 안에 끝나거나 `DatabaseError`
//! - **소프트 삭제**: 사용자는 물리적으로 삭제되지 않고 `OFFBOARDED` 상태로만 전이
//! - **안전한 정렬**: `ORDER BY` 절은 닫힌 열거형에서만 만들어짐

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::users::request::PagingParams;
use crate::domain::entities::users::{Address, User, UserStatus};

/// 사용자 없음 응답 문구
pub const USER_NOT_FOUND: &str = "user does not exist";

const USER_COLUMNS: &str = "id, created_at, updated_at, first_name, last_name, salutation, title, \
     birth_date, birth_city, birth_country, birth_name, nationalities, address, postal_address, status";

const INSERT_USER: &str = "INSERT INTO users (\
     first_name, last_name, salutation, title, birth_date, birth_city, birth_country, birth_name, \
     nationalities, address, postal_address, status) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9::JSONB, $10::JSONB, $11::JSONB, $12) \
     RETURNING id, created_at, updated_at";

const OFFBOARD_USER: &str = "UPDATE users SET status = $1, updated_at = NOW() WHERE id = $2";

/// 사용자 저장소 계약
///
/// 구현체는 여러 요청 컨텍스트에서 동시에 호출되어도 안전해야 합니다.
///
/// | 메서드 | 성공 | 실패 |
/// |--------|------|------|
/// | `create` | ID/타임스탬프가 채워진 사용자 | `DatabaseError` |
/// | `get_all` | 정렬·페이징된 사용자 목록 | `DatabaseError` |
/// | `get_by_id` | 사용자 | `NotFound`, `DatabaseError` |
/// | `offboard` | `()` | `NotFound`, `DatabaseError` |
/// | `ping` | `()` | `DatabaseError` |
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;

    async fn get_all(&self, params: &PagingParams) -> AppResult<Vec<User>>;

    async fn get_by_id(&self, id: &str) -> AppResult<User>;

    async fn offboard(&self, id: &str) -> AppResult<()>;

    async fn ping(&self) -> AppResult<()>;
}

/// `users` 테이블 한 행
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    first_name: String,
    last_name: String,
    salutation: Option<String>,
    title: Option<String>,
    birth_date: NaiveDate,
    birth_city: String,
    birth_country: String,
    birth_name: Option<String>,
    nationalities: Option<Json<Vec<String>>>,
    address: Json<Address>,
    postal_address: Option<Json<Address>>,
    status: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: Some(row.id),
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
            first_name: row.first_name,
            last_name: row.last_name,
            salutation: row.salutation,
            title: row.title,
            birth_date: row.birth_date.format("%Y-%m-%d").to_string(),
            birth_city: row.birth_city,
            birth_country: row.birth_country,
            birth_name: row.birth_name,
            nationalities: row.nationalities.map(|Json(v)| v).unwrap_or_default(),
            address: row.address.0,
            postal_address: row.postal_address.map(|Json(a)| a),
            status: UserStatus::from_code(&row.status),
        }
    }
}

#[derive(Debug, FromRow)]
struct InsertedRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// PostgreSQL 사용자 리포지토리
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = PgUserRepository::new(database.pool().clone(), DatabaseConfig::query_timeout());
///
/// let created = repo.create(user).await?;
/// let same = repo.get_by_id(&created.id_string().unwrap()).await?;
/// repo.offboard(&created.id_string().unwrap()).await?;
/// ```
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self { pool, query_timeout }
    }

    /// 쿼리 실행을 타임아웃으로 감싸고 에러를 `DatabaseError`로 변환합니다.
    ///
    /// 호출 측 future가 drop되면 진행 중인 쿼리도 함께 취소됩니다.
    async fn bounded<T, F>(&self, operation: &str, query: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AppError::DatabaseError(format!("{}: {}", operation, e))),
            Err(_) => Err(AppError::DatabaseError(format!(
                "{}: timed out after {:?}",
                operation, self.query_timeout
            ))),
        }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut user = normalize_optional_fields(user);

        let birth_date = user.parsed_birth_date().ok_or_else(|| {
            AppError::ValidationError("birth_date must be in YYYY-MM-DD format".to_string())
        })?;

        let inserted = self
            .bounded(
                "failed to create user",
                sqlx::query_as::<_, InsertedRow>(INSERT_USER)
                    .bind(&user.first_name)
                    .bind(&user.last_name)
                    .bind(user.salutation.as_deref())
                    .bind(user.title.as_deref())
                    .bind(birth_date)
                    .bind(&user.birth_city)
                    .bind(&user.birth_country)
                    .bind(user.birth_name.as_deref())
                    .bind(Json(&user.nationalities))
                    .bind(Json(&user.address))
                    .bind(user.postal_address.as_ref().map(Json))
                    .bind(UserStatus::Active.as_str())
                    .fetch_one(&self.pool),
            )
            .await?;

        user.id = Some(inserted.id);
        user.created_at = Some(inserted.created_at);
        user.updated_at = Some(inserted.updated_at);
        user.status = Some(UserStatus::Active);

        Ok(user)
    }

    async fn get_all(&self, params: &PagingParams) -> AppResult<Vec<User>> {
        let sql = list_query(params);

        let rows = self
            .bounded(
                "failed to fetch users",
                sqlx::query_as::<_, UserRow>(&sql)
                    .bind(params.limit)
                    .bind(params.offset)
                    .fetch_all(&self.pool),
            )
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<User> {
        let Some(uuid) = parse_user_id(id) else {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        };

        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = self
            .bounded(
                "failed to fetch user",
                sqlx::query_as::<_, UserRow>(&sql)
                    .bind(uuid)
                    .fetch_optional(&self.pool),
            )
            .await?;

        row.map(User::from)
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    async fn offboard(&self, id: &str) -> AppResult<()> {
        let Some(uuid) = parse_user_id(id) else {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        };

        let result = self
            .bounded(
                "failed to offboard user",
                sqlx::query(OFFBOARD_USER)
                    .bind(UserStatus::Offboarded.as_str())
                    .bind(uuid)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
        }

        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.bounded("database ping failed", sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }
}

/// 목록 조회 SQL
///
/// 정렬 컬럼과 방향은 닫힌 열거형에서만 오므로 문자열 결합이 안전합니다.
/// 같은 정렬 값을 가진 행의 순서를 고정하기 위해 `id`를 보조 정렬 키로 사용합니다.
fn list_query(params: &PagingParams) -> String {
    format!(
        "SELECT {} FROM users ORDER BY {} {}, id {} LIMIT $1 OFFSET $2",
        USER_COLUMNS,
        params.sort.column(),
        params.order.as_sql(),
        params.order.as_sql(),
    )
}

/// 잘 구성된 UUID가 아니면 존재할 수 없는 ID입니다.
fn parse_user_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

/// 빈 문자열로 들어온 선택 필드를 `None`으로 정규화합니다.
fn normalize_optional_fields(mut user: User) -> User {
    fn non_empty(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty())
    }

    user.salutation = non_empty(user.salutation);
    user.title = non_empty(user.title);
    user.birth_name = non_empty(user.birth_name);
    user.address.address_line2 = non_empty(user.address.address_line2);
    user.address.state = non_empty(user.address.state);
    if let Some(postal) = user.postal_address.as_mut() {
        postal.address_line2 = non_empty(postal.address_line2.take());
        postal.state = non_empty(postal.state.take());
    }

    user
}
