//! 사용자 검증기
//!
//! `validator` derive가 수집한 모든 위반 중에서 **고정된 필드 순서상 첫 번째 위반**만
//! `AppError::ValidationError`로 보고합니다. 같은 입력은 항상 같은 결과를 냅니다.
//!
//! 주소 내부의 위반은 필드 이름을 접두어로 붙입니다.
//! (`address: city must be between 1 and 85 characters`,
//! `postal_address: postcode must match the required pattern`)

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::user::User;
use crate::core::errors::{AppError, AppResult};

/// 사용자 필드 평가 순서
const USER_FIELD_ORDER: [&str; 11] = [
    "first_name",
    "last_name",
    "salutation",
    "title",
    "birth_date",
    "birth_city",
    "birth_country",
    "birth_name",
    "nationalities",
    "address",
    "postal_address",
];

/// 주소 필드 평가 순서
const ADDRESS_FIELD_ORDER: [&str; 6] = [
    "address_line1",
    "address_line2",
    "postcode",
    "city",
    "state",
    "country",
];

/// 사용자를 검증합니다. 부수 효과가 없습니다.
///
/// # 예제
///
/// ```rust,ignore
/// let mut user = User::default();
/// user.first_name = "John".to_string();
///
/// let err = validate_user(&user).unwrap_err();
/// // Validation error: last_name must be between 2 and 100 characters
/// ```
pub fn validate_user(user: &User) -> AppResult<()> {
    match user.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(AppError::ValidationError(first_violation(&errors))),
    }
}

fn first_violation(errors: &ValidationErrors) -> String {
    let map = errors.errors();

    for field in USER_FIELD_ORDER {
        if let Some(kind) = map.get(field) {
            return describe(field, kind);
        }
    }

    // 순서표에 없는 필드의 위반 (스키마 수준 규칙 등)
    first_in_order(errors, &[])
}

fn first_in_order(errors: &ValidationErrors, order: &[&str]) -> String {
    let map = errors.errors();

    for field in order {
        if let Some(kind) = map.get(*field) {
            return describe(field, kind);
        }
    }

    let mut remaining: Vec<_> = map.iter().collect();
    remaining.sort_by(|a, b| a.0.cmp(b.0));

    match remaining.first() {
        Some((field, kind)) => describe(field, kind),
        None => "invalid user".to_string(),
    }
}

fn describe(field: &str, kind: &ValidationErrorsKind) -> String {
    match kind {
        ValidationErrorsKind::Field(list) => list
            .first()
            .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| format!("{} is invalid", field)),
        ValidationErrorsKind::Struct(nested) => {
            format!("{}: {}", field, first_in_order(nested, &ADDRESS_FIELD_ORDER))
        }
        ValidationErrorsKind::List(_) => format!("{} is invalid", field),
    }
}
