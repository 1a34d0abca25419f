//! User Entity Implementation
//!
//! 온보딩 대상 사용자 엔티티의 핵심 구현체입니다.
//! 주소(`Address`)는 별도 행이 아니라 JSON 값으로 저장되는 값 객체입니다.
//!
//! 필드 수준 규칙은 `validator` derive 속성으로 선언되며,
//! 규칙 평가 순서와 첫 번째 위반 보고는 [`super::validation`]이 담당합니다.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::codes::{Salutation, Title, is_iso_alpha2};

/// 우편번호 패턴: 영숫자로 시작하고, ASCII 공백/하이픈 포함 최대 10자
pub static POSTCODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9 \t\n\r\x0B\x0C\-]{0,8}[a-zA-Z0-9]?$").expect("postcode pattern"));

/// 생년월일 와이어 포맷
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// 사용자 생명주기 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Offboarded,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Offboarded => "OFFBOARDED",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ACTIVE" => Some(UserStatus::Active),
            "OFFBOARDED" => Some(UserStatus::Offboarded),
            _ => None,
        }
    }
}

/// 주소 값 객체
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Address {
    #[validate(length(min = 1, max = 100, message = "address_line1 must be between 1 and 100 characters"))]
    pub address_line1: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "address_line2 must be at most 100 characters"))]
    pub address_line2: Option<String>,

    #[validate(regex(path = *POSTCODE_REGEX, message = "postcode must match the required pattern"))]
    pub postcode: String,

    #[validate(length(min = 1, max = 85, message = "city must be between 1 and 85 characters"))]
    pub city: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 50, message = "state must be at most 50 characters"))]
    pub state: Option<String>,

    #[validate(custom(function = "validate_country"))]
    pub country: String,
}

/// 사용자 엔티티
///
/// 요청 본문, 저장소 행, 이벤트 페이로드 모두 이 구조체를 사용합니다.
/// 저장소가 부여하는 값(`id`, 타임스탬프, `status`)은 생성 요청에서 무시됩니다.
///
/// JSON에서 누락된 필드는 빈 값으로 역직렬화되어,
/// 파싱 단계가 아니라 검증 단계에서 위반 규칙이 보고됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct User {
    /// 저장소가 부여한 UUID
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,

    #[validate(length(min = 2, max = 100, message = "first_name must be between 2 and 100 characters"))]
    pub first_name: String,

    #[validate(length(min = 2, max = 100, message = "last_name must be between 2 and 100 characters"))]
    pub last_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_salutation"))]
    pub salutation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,

    /// `YYYY-MM-DD`
    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: String,

    #[validate(length(min = 1, max = 85, message = "birth_city must be between 1 and 85 characters"))]
    pub birth_city: String,

    #[validate(custom(function = "validate_birth_country"))]
    pub birth_country: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "birth_name must be at most 100 characters"))]
    pub birth_name: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    #[validate(length(min = 1, message = "at least one nationality is required"))]
    #[validate(custom(function = "validate_nationalities"))]
    pub nationalities: Vec<String>,

    #[serde(deserialize_with = "null_as_default")]
    #[validate(nested)]
    pub address: Address,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub postal_address: Option<Address>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub status: Option<UserStatus>,
}

impl User {
    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }

    /// 생년월일을 날짜로 해석합니다. 검증을 통과한 사용자에 대해서만 `Some`을 보장합니다.
    pub fn parsed_birth_date(&self) -> Option<NaiveDate> {
        parse_birth_date(&self.birth_date)
    }

    /// 오프보딩된 사용자인지 확인
    pub fn is_offboarded(&self) -> bool {
        matches!(self.status, Some(UserStatus::Offboarded))
    }
}

/// 엄격한 `YYYY-MM-DD` 파싱 (자릿수 고정)
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !shape_ok {
        return None;
    }

    NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT).ok()
}

/// 저장소가 부여하는 필드용 역직렬화.
/// 해석할 수 없는 값(빈 문자열, 알 수 없는 상태 코드 등)은 없는 값으로 취급합니다.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// `null`을 기본값으로 바꿔 파싱 대신 검증 단계에서 규칙이 보고되게 합니다.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn validate_salutation(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Salutation::from_code(value).is_some() {
        return Ok(());
    }
    Err(ValidationError::new("salutation").with_message("invalid salutation".into()))
}

fn validate_title(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Title::from_code(value).is_some() {
        return Ok(());
    }
    Err(ValidationError::new("title").with_message("invalid title".into()))
}

fn validate_birth_date(value: &str) -> Result<(), ValidationError> {
    match parse_birth_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("birth_date")
            .with_message("birth_date must be in YYYY-MM-DD format".into())),
    }
}

fn validate_country(value: &str) -> Result<(), ValidationError> {
    if is_iso_alpha2(value) {
        return Ok(());
    }
    Err(ValidationError::new("country").with_message("invalid country code".into()))
}

fn validate_birth_country(value: &str) -> Result<(), ValidationError> {
    if is_iso_alpha2(value) {
        return Ok(());
    }
    Err(ValidationError::new("birth_country").with_message("invalid birth_country code".into()))
}

fn validate_nationalities(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|code| is_iso_alpha2(code)) {
        return Ok(());
    }
    Err(ValidationError::new("nationalities").with_message("invalid nationality code".into()))
}
