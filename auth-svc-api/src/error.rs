use serde::{Deserialize, Serialize};

/// Public API error response format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorResponse;

    #[test]
    fn serializes_without_details_when_absent() {
        let json = serde_json::to_value(ErrorResponse::new("Not authenticated")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Not authenticated" }));
    }
}
