use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error response format
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable error code for client-side handling
    pub error: String,

    /// Human-readable message; validation failures carry the Thai guidance
    /// text for the failing rule
    pub message: String,

    /// Optional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal_error() -> Self {
        Self::new("internal_server_error", "An internal error occurred")
    }
}
