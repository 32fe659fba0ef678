use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::Deserialize;

use super::enums::SourceStatus;

/// Registered ingestion source (board API, scraper or RSS feed).
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::job_sources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct JobSource {
    pub id: i32,
    pub name: String,
    pub enabled: bool,
    pub base_url: String,
    pub rate_limit: i32,
    pub status: SourceStatus,
    pub last_sync: Option<NaiveDateTime>,
    pub total_jobs: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Deserialize, Clone)]
#[diesel(table_name = crate::schema::job_sources)]
pub struct NewJobSource {
    pub name: String,
    pub enabled: bool,
    pub base_url: String,
    pub rate_limit: i32,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::job_sources)]
pub struct UpdateJobSource {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub rate_limit: Option<i32>,
    pub status: Option<SourceStatus>,
    pub last_sync: Option<NaiveDateTime>,
    pub total_jobs: Option<i32>,
}

/// Raw listing as fetched from a source, before normalization into
/// `job_applications`. Kept for audit and re-sync.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::external_job_results)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ExternalJobResult {
    pub id: i64,
    pub source_id: i32,
    pub external_id: Option<String>,
    pub url: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub posted_date: Option<String>,
    pub fetched_at: NaiveDateTime,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::external_job_results)]
pub struct NewExternalJobResult {
    pub source_id: i32,
    pub external_id: Option<String>,
    pub url: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub job_type: Option<String>,
    pub posted_date: Option<String>,
}

/// Daily request counter per source, for quota accounting.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::api_usage)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApiUsage {
    pub id: i64,
    pub source_id: i32,
    pub usage_date: NaiveDate,
    pub requests_made: i32,
    pub quota: Option<i32>,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::api_usage)]
pub struct NewApiUsage {
    pub source_id: i32,
    pub usage_date: NaiveDate,
    pub requests_made: i32,
    pub quota: Option<i32>,
}
