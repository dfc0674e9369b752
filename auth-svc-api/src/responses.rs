use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User as returned by `GET /auth/session`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// `{"message": "..."}` body used by logout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_omits_missing_optional_fields() {
        let user = UserResponse {
            id: Uuid::nil(),
            email: "a@example.com".to_string(),
            google_id: None,
            full_name: None,
            picture_url: None,
            role: "registered".to_string(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("google_id").is_none());
        assert!(json.get("picture_url").is_none());
        assert_eq!(json["role"], "registered");
    }

    #[test]
    fn user_response_decodes_auth_service_payload() {
        let raw = r#"{
            "id": "6f1c1b7e-2c7a-4a57-9d7e-1f2f3a4b5c6d",
            "email": "jane@example.com",
            "google_id": "1234",
            "full_name": "Jane",
            "role": "registered",
            "created_at": "2025-01-01T00:00:00Z"
        }"#;
        let user: UserResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(user.google_id.as_deref(), Some("1234"));
        assert!(user.picture_url.is_none());
    }
}
