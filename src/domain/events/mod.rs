//! # Domain Events
//!
//! 사용자 생성 시 메시지 스트림으로 발행되는 이벤트 엔벨로프입니다.
//!
//! ```json
//! { "action": "USER_CREATED", "user": { "id": "…", "first_name": "Rob", … } }
//! ```
//!
//! 메시지 키는 항상 사용자 ID이며, 같은 사용자의 이벤트는 같은 파티션으로 전달됩니다.

use serde::{Deserialize, Serialize};

use crate::domain::entities::users::User;

/// 이벤트 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    UserCreated,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventAction::UserCreated => "USER_CREATED",
        }
    }
}

/// 사용자 이벤트 엔벨로프
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEvent {
    pub action: EventAction,
    pub user: User,
}

impl UserEvent {
    /// 커밋된 사용자에 대한 생성 이벤트
    pub fn created(user: User) -> Self {
        Self {
            action: EventAction::UserCreated,
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::valid_user;

    #[test]
    fn test_envelope_shape() {
        let event = UserEvent::created(valid_user("Rob"));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["action"], "USER_CREATED");
        assert_eq!(json["user"]["first_name"], "Rob");
        assert_eq!(json["user"]["nationalities"], serde_json::json!(["DE", "US"]));
    }

    #[test]
    fn test_envelope_decodes_from_wire() {
        let raw = r#"{"action":"USER_CREATED","user":{"first_name":"Rob","last_name":"Smith"}}"#;
        let event: UserEvent = serde_json::from_str(raw).unwrap();

        assert_eq!(event.action, EventAction::UserCreated);
        assert_eq!(event.user.last_name, "Smith");
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let raw = r#"{"action":"USER_DELETED","user":{}}"#;
        assert!(serde_json::from_str::<UserEvent>(raw).is_err());
    }
}
