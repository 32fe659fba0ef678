use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;

use super::enums::{AutomationState, SessionKind, SessionStatus};

/// One sync or automation run with its aggregate counters.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::application_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApplicationSession {
    pub id: i32,
    pub user_id: Option<i32>,
    pub kind: SessionKind,
    pub status: SessionStatus,
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub jobs_found: i32,
    pub jobs_applied: i32,
    pub jobs_skipped: i32,
    pub errors_encountered: i32,
    /// Per-source `{fetched, new, duplicate, failed}` counts for sync runs.
    pub source_reports: Option<serde_json::Value>,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::application_sessions)]
pub struct NewApplicationSession {
    pub user_id: Option<i32>,
    pub kind: SessionKind,
    pub keywords: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::application_sessions)]
pub struct UpdateApplicationSession {
    pub status: Option<SessionStatus>,
    pub jobs_found: Option<i32>,
    pub jobs_applied: Option<i32>,
    pub jobs_skipped: Option<i32>,
    pub errors_encountered: Option<i32>,
    pub source_reports: Option<serde_json::Value>,
    pub ended_at: Option<NaiveDateTime>,
}

/// Per-event audit line within a session.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::application_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApplicationLog {
    pub id: i64,
    pub session_id: i32,
    pub job_application_id: Option<i32>,
    pub event_type: String,
    pub message: String,
    pub error_type: Option<String>,
    pub error_details: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::application_logs)]
pub struct NewApplicationLog {
    pub session_id: i32,
    pub job_application_id: Option<i32>,
    pub event_type: String,
    pub message: String,
    pub error_type: Option<String>,
    pub error_details: Option<String>,
}

/// WebDriver session state persisted alongside an automation run.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::browser_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BrowserSession {
    pub id: i32,
    pub session_id: i32,
    pub website_id: Option<i32>,
    pub driver_session: Option<String>,
    pub state: AutomationState,
    pub last_error: Option<String>,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::browser_sessions)]
pub struct NewBrowserSession {
    pub session_id: i32,
    pub website_id: Option<i32>,
    pub driver_session: Option<String>,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::browser_sessions)]
pub struct UpdateBrowserSession {
    pub driver_session: Option<String>,
    pub state: Option<AutomationState>,
    pub last_error: Option<String>,
    pub ended_at: Option<NaiveDateTime>,
}
