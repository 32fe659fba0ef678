//! Job application DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{AiDecision, JobApplication, JobStatus};
use crate::repositories::JobFilter;
use crate::services::{JobMatch, JobStats};

#[derive(Debug, Serialize, ToSchema)]
pub struct JobResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "Senior Rust Engineer")]
    pub title: String,
    #[schema(example = "Acme Corp")]
    pub company: String,
    pub location: Option<String>,
    #[schema(example = "https://www.linkedin.com/jobs/view/12345")]
    pub url: String,
    #[schema(example = "linkedin")]
    pub source: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    pub status: JobStatus,
    pub applied_at: Option<NaiveDateTime>,
    pub response_received: bool,
    #[schema(example = 85)]
    pub match_score: Option<i32>,
    pub ai_decision: Option<AiDecision>,
    pub ai_reasoning: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<JobApplication> for JobResponse {
    fn from(job: JobApplication) -> Self {
        Self {
            id: job.id,
            title: job.title,
            company: job.company,
            location: job.location,
            url: job.url,
            source: job.source,
            description: job.description,
            requirements: job.requirements,
            salary_range: job.salary_range,
            status: job.status,
            applied_at: job.applied_at,
            response_received: job.response_received,
            match_score: job.match_score,
            ai_decision: job.ai_decision,
            ai_reasoning: job.ai_reasoning,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

/// List filters, combined with pagination.
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct JobListQuery {
    /// Filter by lifecycle status
    pub status: Option<JobStatus>,
    /// Filter by canonical source name
    #[param(example = "linkedin")]
    pub source: Option<String>,
    /// Keep only jobs scored at or above this value
    #[validate(range(min = 0, max = 100, message = "min_score must be between 0 and 100"))]
    #[param(minimum = 0, maximum = 100)]
    pub min_score: Option<i32>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100"))]
    #[param(minimum = 1, maximum = 100, example = 20)]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

impl JobListQuery {
    pub fn to_filter(&self) -> JobFilter {
        JobFilter {
            status: self.status,
            source: self.source.clone(),
            min_score: self.min_score,
            page: self.page as i64,
            per_page: self.page_size as i64,
        }
    }
}

/// Requested status move.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub status: JobStatus,
}

/// Match verdict attached to the refreshed job.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub job: JobResponse,
    #[schema(example = 85)]
    pub score: i32,
    pub decision: AiDecision,
    pub reasoning: String,
    pub strengths: Vec<String>,
}

impl AnalyzeResponse {
    pub fn new(job: JobApplication, verdict: JobMatch) -> Self {
        Self {
            job: job.into(),
            score: verdict.score,
            decision: verdict.decision,
            reasoning: verdict.reasoning,
            strengths: verdict.strengths,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: JobStatus,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SourceCount {
    #[schema(example = "linkedin")]
    pub source: String,
    pub count: i64,
}

/// Status and source breakdown for the stats endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobStatsResponse {
    pub total: i64,
    pub by_status: Vec<StatusCount>,
    pub by_source: Vec<SourceCount>,
}

impl From<JobStats> for JobStatsResponse {
    fn from(stats: JobStats) -> Self {
        Self {
            total: stats.total,
            by_status: stats
                .by_status
                .into_iter()
                .map(|(status, count)| StatusCount { status, count })
                .collect(),
            by_source: stats
                .by_source
                .into_iter()
                .map(|(source, count)| SourceCount { source, count })
                .collect(),
        }
    }
}
