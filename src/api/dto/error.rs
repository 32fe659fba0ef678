//! Error response DTO.

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable machine-readable error code
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    /// Human-readable message
    #[schema(example = "Resource not found: JobApplication with id=42")]
    pub message: String,
    /// Structured context, shape depends on the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Request id for log correlation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}
