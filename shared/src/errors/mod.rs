//! Shared error response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const NOT_FOUND: &str = "not_found";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const RATE_LIMIT_EXCEEDED: &str = "rate_limit_exceeded";
    pub const MAIL_SERVICE_FAILURE: &str = "mail_service_failure";
    pub const INVALID_EMAIL: &str = "invalid_email";
    pub const INVALID_CODE_FORMAT: &str = "invalid_code_format";
    pub const CODE_NOT_FOUND: &str = "code_not_found";
    pub const CODE_EXPIRED: &str = "code_expired";
    pub const CODE_MISMATCH: &str = "code_mismatch";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_detail() {
        let response = ErrorResponse::new(error_codes::CODE_EXPIRED, "expired")
            .add_detail("recipient", "a***@b.com");
        let details = response.details.unwrap();
        assert_eq!(details["recipient"], serde_json::json!("a***@b.com"));
    }
}
