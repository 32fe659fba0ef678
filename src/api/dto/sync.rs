//! Sync trigger and session DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{
    ApplicationSession, JobSource, SessionKind, SessionStatus, SourceStatus, UpdateJobSource,
};
use crate::services::SourceReport;

/// Starts a sync run across the enabled sources.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SyncTriggerRequest {
    #[validate(length(min = 2, max = 200, message = "Keywords must be between 2 and 200 characters"))]
    #[schema(example = "rust developer", min_length = 2, max_length = 200)]
    pub keywords: String,
    #[schema(example = "Bangalore")]
    pub location: Option<String>,
    /// Per-source fetch cap
    #[validate(range(min = 1, max = 500, message = "Limit must be between 1 and 500"))]
    #[serde(default = "default_limit")]
    #[schema(example = 50)]
    pub limit: usize,
    /// Restrict the run to these source names; omit for all enabled
    #[schema(example = json!(["linkedin", "indeed"]))]
    pub sources: Option<Vec<String>>,
}

fn default_limit() -> usize {
    50
}

/// Sync or automation run with its counters.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    #[schema(example = 7)]
    pub id: i32,
    pub kind: SessionKind,
    pub status: SessionStatus,
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub jobs_found: i32,
    pub jobs_applied: i32,
    pub jobs_skipped: i32,
    pub errors_encountered: i32,
    /// Per-source `{fetched, new, duplicate, failed}` counts, present
    /// once a sync run has finished
    #[schema(value_type = Option<Vec<SourceReport>>)]
    pub source_reports: Option<serde_json::Value>,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
}

impl From<ApplicationSession> for SessionResponse {
    fn from(s: ApplicationSession) -> Self {
        Self {
            id: s.id,
            kind: s.kind,
            status: s.status,
            keywords: s.keywords,
            location: s.location,
            jobs_found: s.jobs_found,
            jobs_applied: s.jobs_applied,
            jobs_skipped: s.jobs_skipped,
            errors_encountered: s.errors_encountered,
            source_reports: s.source_reports,
            started_at: s.started_at,
            ended_at: s.ended_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SourceResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "linkedin")]
    pub name: String,
    pub enabled: bool,
    pub base_url: String,
    /// Max requests per sync run
    pub rate_limit: i32,
    pub status: SourceStatus,
    pub last_sync: Option<NaiveDateTime>,
    pub total_jobs: i32,
}

impl From<JobSource> for SourceResponse {
    fn from(s: JobSource) -> Self {
        Self {
            id: s.id,
            name: s.name,
            enabled: s.enabled,
            base_url: s.base_url,
            rate_limit: s.rate_limit,
            status: s.status,
            last_sync: s.last_sync,
            total_jobs: s.total_jobs,
        }
    }
}

/// Enable/disable a source or adjust its cap.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateSourceRequest {
    pub enabled: Option<bool>,
    #[validate(range(min = 1, max = 1000, message = "Rate limit must be between 1 and 1000"))]
    pub rate_limit: Option<i32>,
}

impl From<UpdateSourceRequest> for UpdateJobSource {
    fn from(req: UpdateSourceRequest) -> Self {
        Self {
            enabled: req.enabled,
            rate_limit: req.rate_limit,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_response_keeps_source_reports() {
        let session = ApplicationSession {
            id: 3,
            user_id: Some(1),
            kind: SessionKind::Search,
            status: SessionStatus::Completed,
            keywords: Some("rust".to_string()),
            location: Some("Pune".to_string()),
            jobs_found: 6,
            jobs_applied: 0,
            jobs_skipped: 3,
            errors_encountered: 1,
            source_reports: Some(json!([
                { "source": "naukri", "fetched": 10, "new": 6, "duplicate": 3, "failed": 1 }
            ])),
            started_at: chrono::Utc::now().naive_utc(),
            ended_at: Some(chrono::Utc::now().naive_utc()),
        };

        let response = SessionResponse::from(session);
        let reports = response.source_reports.expect("reports should survive");
        assert_eq!(reports[0]["source"], "naukri");
        assert_eq!(reports[0]["fetched"], 10);
    }
}
