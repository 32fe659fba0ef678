use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Deserialize;

use super::enums::{AiDecision, JobStatus};

/// Tracked job application. `url` is unique and is the dedup key for
/// everything flowing in from external sources.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::job_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobApplication {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub url: String,
    pub source: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    pub status: JobStatus,
    pub applied_at: Option<NaiveDateTime>,
    pub response_received: bool,
    pub match_score: Option<i32>,
    pub ai_decision: Option<AiDecision>,
    pub ai_reasoning: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::job_applications)]
pub struct NewJobApplication {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub url: String,
    pub source: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
}

#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::job_applications)]
pub struct UpdateJobApplication {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    pub status: Option<JobStatus>,
    pub applied_at: Option<NaiveDateTime>,
    pub response_received: Option<bool>,
    pub match_score: Option<i32>,
    pub ai_decision: Option<AiDecision>,
    pub ai_reasoning: Option<String>,
    pub is_active: Option<bool>,
}
