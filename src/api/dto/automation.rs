//! Automation session DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::ApplicationLog;

/// Starts a browser automation run against one configured site.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct StartAutomationRequest {
    #[validate(length(min = 2, max = 50, message = "Site key must be between 2 and 50 characters"))]
    #[schema(example = "naukri")]
    pub site_key: String,
    #[validate(length(min = 2, max = 200, message = "Keywords must be between 2 and 200 characters"))]
    #[schema(example = "rust developer")]
    pub keywords: String,
    #[schema(example = "Bangalore")]
    #[serde(default)]
    pub location: String,
    /// Click through to apply where the site supports it
    #[serde(default)]
    pub auto_apply: bool,
}

/// One audit line from a session.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogResponse {
    pub id: i64,
    pub session_id: i32,
    pub job_application_id: Option<i32>,
    #[schema(example = "automation_error")]
    pub event_type: String,
    pub message: String,
    pub error_type: Option<String>,
    pub error_details: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<ApplicationLog> for LogResponse {
    fn from(log: ApplicationLog) -> Self {
        Self {
            id: log.id,
            session_id: log.session_id,
            job_application_id: log.job_application_id,
            event_type: log.event_type,
            message: log.message,
            error_type: log.error_type,
            error_details: log.error_details,
            created_at: log.created_at,
        }
    }
}
