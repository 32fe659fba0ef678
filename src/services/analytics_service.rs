//! Aggregated usage and outcome metrics.

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::{JobStatus, NewAnalyticsEvent};
use crate::repositories::{AnalyticsRepository, JobApplicationRepository};

/// One labelled counter in a breakdown.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}

/// One day of a time series.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: i64,
}

/// Totals plus a daily sync series for the summary endpoint.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct AnalyticsSummary {
    pub total_jobs: i64,
    pub jobs_applied: i64,
    pub by_status: Vec<NamedCount>,
    pub by_source: Vec<NamedCount>,
    pub events_by_type: Vec<NamedCount>,
    pub daily_syncs: Vec<DailyCount>,
}

fn named(pairs: Vec<(String, i64)>) -> Vec<NamedCount> {
    pairs
        .into_iter()
        .map(|(name, count)| NamedCount { name, count })
        .collect()
}

#[derive(Clone)]
pub struct AnalyticsService {
    analytics: AnalyticsRepository,
    jobs: JobApplicationRepository,
}

impl AnalyticsService {
    pub fn new(analytics: AnalyticsRepository, jobs: JobApplicationRepository) -> Self {
        Self { analytics, jobs }
    }

    pub async fn record_event(
        &self,
        user_id: Option<i32>,
        event_type: &str,
        payload: Option<serde_json::Value>,
    ) -> AppResult<()> {
        self.analytics
            .record(NewAnalyticsEvent {
                user_id,
                event_type: event_type.to_string(),
                payload,
            })
            .await?;
        Ok(())
    }

    /// Thirty days of history plus all-time totals.
    pub async fn summary(&self) -> AppResult<AnalyticsSummary> {
        let by_status = self.jobs.count_by_status().await?;
        let by_source = self.jobs.count_by_source().await?;
        let events_by_type = self.analytics.totals_by_type().await?;

        let from_day = (Utc::now() - Duration::days(30)).date_naive();
        let daily_syncs = self.analytics.daily_series("sync_completed", from_day).await?;

        let total_jobs = by_status.iter().map(|(_, n)| n).sum();
        let jobs_applied = by_status
            .iter()
            .filter(|(s, _)| {
                matches!(s, JobStatus::Applied | JobStatus::Interview | JobStatus::Offer)
            })
            .map(|(_, n)| n)
            .sum();

        Ok(AnalyticsSummary {
            total_jobs,
            jobs_applied,
            by_status: named(
                by_status
                    .into_iter()
                    .map(|(s, n)| (s.to_string(), n))
                    .collect(),
            ),
            by_source: named(by_source),
            events_by_type: named(events_by_type),
            daily_syncs: daily_syncs
                .into_iter()
                .map(|(day, count)| DailyCount { day, count })
                .collect(),
        })
    }
}
