//! Multi-source job ingestion.
//!
//! One run fetches from each enabled board, archives the raw results,
//! normalizes them into `job_applications` with insert-if-absent dedup on
//! the URL, and records the outcome on the session row. A failing source
//! is contained to its own report entry; the run carries on.

use std::sync::Arc;

use serde::Serialize;

use crate::config::BoardsConfig;
use crate::error::{AppError, AppResult};
use crate::external::boards::{BoardRegistry, FetchedJob, SearchQuery};
use crate::models::{
    ApplicationSession, JobSource, NewAnalyticsEvent, NewApplicationSession, NewExternalJobResult,
    NewJobApplication, SessionKind, SessionStatus, SourceStatus, UpdateApplicationSession,
    UpdateJobSource,
};
use crate::repositories::{
    AnalyticsRepository, JobApplicationRepository, SessionRepository, SourceRepository,
};
use crate::services::notifications::{NotificationMessage, NotificationService};
use crate::utils::extract_source;

/// Per-source outcome of one sync run.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SourceReport {
    pub source: String,
    pub fetched: usize,
    pub new: usize,
    pub duplicate: usize,
    pub failed: usize,
}

/// Aggregate outcome of one sync run.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SyncReport {
    pub session_id: i32,
    pub sources: Vec<SourceReport>,
}

impl SyncReport {
    pub fn total_new(&self) -> usize {
        self.sources.iter().map(|s| s.new).sum()
    }

    pub fn total_fetched(&self) -> usize {
        self.sources.iter().map(|s| s.fetched).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.sources.iter().map(|s| s.failed).sum()
    }

    pub fn total_duplicate(&self) -> usize {
        self.sources.iter().map(|s| s.duplicate).sum()
    }
}

#[derive(Clone)]
pub struct SyncService {
    registry: Arc<BoardRegistry>,
    sources: SourceRepository,
    jobs: JobApplicationRepository,
    sessions: SessionRepository,
    analytics: AnalyticsRepository,
    notifications: NotificationService,
    max_failures_per_source: u32,
}

impl SyncService {
    pub fn new(
        registry: Arc<BoardRegistry>,
        sources: SourceRepository,
        jobs: JobApplicationRepository,
        sessions: SessionRepository,
        analytics: AnalyticsRepository,
        notifications: NotificationService,
        config: &BoardsConfig,
    ) -> Self {
        Self {
            registry,
            sources,
            jobs,
            sessions,
            analytics,
            notifications,
            max_failures_per_source: config.max_failures_per_source,
        }
    }

    /// Creates the session row and spawns the run in the background,
    /// returning the session immediately so callers can poll it.
    pub async fn start(
        &self,
        user_id: Option<i32>,
        query: SearchQuery,
        requested: Option<Vec<String>>,
    ) -> AppResult<ApplicationSession> {
        let session = self
            .sessions
            .create(NewApplicationSession {
                user_id,
                kind: SessionKind::Search,
                keywords: Some(query.keywords.clone()),
                location: Some(query.location.clone()),
            })
            .await?;

        let service = self.clone();
        let session_id = session.id;
        tokio::spawn(async move {
            if let Err(e) = service.run(session_id, query, requested).await {
                tracing::error!(session_id, error = %e, "sync run failed");
            }
        });

        Ok(session)
    }

    /// Runs the sync for a pre-created session and finalizes it.
    pub async fn run(
        &self,
        session_id: i32,
        query: SearchQuery,
        requested: Option<Vec<String>>,
    ) -> AppResult<SyncReport> {
        let targets = self.resolve_sources(requested).await?;
        tracing::info!(
            session_id,
            sources = targets.len(),
            keywords = %query.keywords,
            "sync run starting"
        );

        let mut reports = Vec::with_capacity(targets.len());
        for source in &targets {
            reports.push(self.sync_one(session_id, source, &query).await);
        }

        let report = SyncReport {
            session_id,
            sources: reports,
        };
        self.finalize(session_id, &report).await?;
        Ok(report)
    }

    pub async fn get_session(&self, session_id: i32) -> AppResult<ApplicationSession> {
        self.sessions.get(session_id).await
    }

    pub async fn list_sources(&self) -> AppResult<Vec<JobSource>> {
        self.sources.list().await
    }

    pub async fn update_source(
        &self,
        source_id: i32,
        update: UpdateJobSource,
    ) -> AppResult<JobSource> {
        self.sources.update(source_id, update).await
    }

    /// All enabled sources, or the enabled subset of the requested names.
    /// Requesting only unknown or disabled sources is an input error.
    async fn resolve_sources(&self, requested: Option<Vec<String>>) -> AppResult<Vec<JobSource>> {
        let enabled = self.sources.list_enabled().await?;
        let targets = match requested {
            None => enabled,
            Some(names) => enabled
                .into_iter()
                .filter(|s| names.iter().any(|n| n == &s.name))
                .collect(),
        };
        if targets.is_empty() {
            return Err(AppError::BadRequest {
                message: "No enabled sources match the request".to_string(),
            });
        }
        Ok(targets)
    }

    /// One source, its own error boundary. Fetch is retried up to the
    /// configured failure cap before the source is marked as errored and
    /// skipped for this run.
    async fn sync_one(
        &self,
        session_id: i32,
        source: &JobSource,
        query: &SearchQuery,
    ) -> SourceReport {
        let mut report = SourceReport {
            source: source.name.clone(),
            fetched: 0,
            new: 0,
            duplicate: 0,
            failed: 0,
        };

        let Some(provider) = self.registry.get(&source.name) else {
            tracing::warn!(source = %source.name, "no provider registered, skipping");
            report.failed += 1;
            return report;
        };

        let today = chrono::Utc::now().date_naive();
        match self.sources.usage_for_day(source.id, today).await {
            Ok(usage) => {
                if budget_exhausted(usage.as_ref()) {
                    tracing::warn!(source = %source.name, "daily request budget exhausted, skipping");
                    report.failed += 1;
                    return report;
                }
            }
            Err(e) => {
                tracing::warn!(source = %source.name, error = %e, "usage lookup failed");
            }
        }

        let mut bounded_query = query.clone();
        bounded_query.limit = bounded_query.limit.min(source.rate_limit.max(1) as usize);

        let mut jobs = None;
        for attempt in 1..=self.max_failures_per_source {
            match provider.fetch(&bounded_query).await {
                Ok(batch) => {
                    jobs = Some(batch);
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        source = %source.name,
                        attempt,
                        error = %e,
                        "source fetch failed"
                    );
                }
            }
        }
        if let Err(e) = self.sources.record_usage(source.id, today, 1).await {
            tracing::warn!(source = %source.name, error = %e, "usage accounting failed");
        }

        let Some(jobs) = jobs else {
            report.failed += 1;
            if let Err(e) = self.sources.set_status(source.id, SourceStatus::Error).await {
                tracing::warn!(source = %source.name, error = %e, "could not mark source errored");
            }
            return report;
        };

        report.fetched = jobs.len();
        if let Err(e) = self.archive_raw(source.id, &jobs).await {
            tracing::warn!(source = %source.name, error = %e, "raw result archive failed");
        }

        for job in jobs {
            if !job.is_complete() {
                report.failed += 1;
                continue;
            }
            match self.jobs.insert_if_absent(normalize(job)).await {
                Ok(Some(_)) => report.new += 1,
                Ok(None) => report.duplicate += 1,
                Err(e) => {
                    tracing::warn!(source = %source.name, error = %e, "job insert failed");
                    report.failed += 1;
                }
            }
        }

        if let Err(e) = self.sources.record_sync(source.id, report.new as i32).await {
            tracing::warn!(source = %source.name, error = %e, "sync bookkeeping failed");
        }
        tracing::info!(
            session_id,
            source = %source.name,
            fetched = report.fetched,
            new = report.new,
            duplicate = report.duplicate,
            failed = report.failed,
            "source synced"
        );
        report
    }

    async fn archive_raw(&self, source_id: i32, jobs: &[FetchedJob]) -> AppResult<usize> {
        let rows = jobs
            .iter()
            .filter(|j| j.is_complete())
            .map(|j| NewExternalJobResult {
                source_id,
                external_id: j.external_id.clone(),
                url: j.url.clone(),
                title: j.title.clone(),
                company: j.company.clone(),
                location: j.location.clone(),
                salary: j.salary.clone(),
                job_type: j.job_type.clone(),
                posted_date: j.posted_date.clone(),
            })
            .collect();
        self.sources.insert_external_results(rows).await
    }

    async fn finalize(&self, session_id: i32, report: &SyncReport) -> AppResult<()> {
        let all_failed = !report.sources.is_empty()
            && report.sources.iter().all(|s| s.fetched == 0 && s.failed > 0);
        let final_status = if all_failed {
            SessionStatus::Error
        } else {
            SessionStatus::Completed
        };

        let session = self
            .sessions
            .finalize(
                session_id,
                final_status,
                UpdateApplicationSession {
                    jobs_found: Some(report.total_new() as i32),
                    jobs_skipped: Some(report.total_duplicate() as i32),
                    errors_encountered: Some(report.total_failed() as i32),
                    source_reports: serde_json::to_value(&report.sources).ok(),
                    ..Default::default()
                },
            )
            .await?;

        if let Err(e) = self
            .analytics
            .record(NewAnalyticsEvent {
                user_id: session.user_id,
                event_type: "sync_completed".to_string(),
                payload: serde_json::to_value(report).ok(),
            })
            .await
        {
            tracing::warn!(session_id, error = %e, "analytics event failed");
        }

        if let Some(user_id) = session.user_id {
            let message = sync_outcome_message(report, final_status);
            match final_status {
                SessionStatus::Error => self.notifications.notify_error(user_id, message).await,
                _ => self.notifications.notify_completion(user_id, message).await,
            }
        }
        Ok(())
    }
}

/// Webhook payload for a finished sync run.
fn sync_outcome_message(report: &SyncReport, status: SessionStatus) -> NotificationMessage {
    let (title, body) = if status == SessionStatus::Error {
        (
            "Job sync failed",
            format!("All {} sources failed to deliver results", report.sources.len()),
        )
    } else {
        (
            "Job sync completed",
            format!(
                "{} new jobs out of {} fetched ({} duplicates)",
                report.total_new(),
                report.total_fetched(),
                report.total_duplicate()
            ),
        )
    };
    NotificationMessage::new(title, body)
        .with_meta("session_id", report.session_id.to_string())
        .with_meta("event", "sync_finished")
}

/// True when the day's `api_usage` row carries a quota and the request
/// counter has reached it. Sources without a quota are unmetered.
fn budget_exhausted(usage: Option<&crate::models::ApiUsage>) -> bool {
    match usage {
        Some(u) => matches!(u.quota, Some(q) if u.requests_made >= q),
        None => false,
    }
}

/// Normalizes a fetched record, tagging it with the canonical source name
/// derived from its URL rather than the board it arrived through.
fn normalize(job: FetchedJob) -> NewJobApplication {
    let source = extract_source(&job.url).to_string();
    NewJobApplication {
        title: job.title,
        company: job.company,
        location: job.location,
        url: job.url,
        source,
        description: job.description,
        requirements: job.requirements,
        salary_range: job.salary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetched(url: &str) -> FetchedJob {
        FetchedJob {
            title: "Rust Developer".into(),
            company: "Acme".into(),
            url: url.into(),
            ..Default::default()
        }
    }

    #[test]
    fn normalize_tags_canonical_source_from_url() {
        let row = normalize(fetched("https://www.linkedin.com/jobs/view/123"));
        assert_eq!(row.source, "LinkedIn");

        let row = normalize(fetched("https://careers.ibm.com/job/456"));
        assert_eq!(row.source, "IBM");
    }

    #[test]
    fn finished_run_builds_webhook_payload() {
        let report = SyncReport {
            session_id: 9,
            sources: vec![SourceReport {
                source: "naukri".into(),
                fetched: 10,
                new: 6,
                duplicate: 3,
                failed: 1,
            }],
        };

        let msg = sync_outcome_message(&report, SessionStatus::Completed);
        assert_eq!(msg.title, "Job sync completed");
        assert!(msg.body.contains("6 new jobs out of 10 fetched"));
        assert_eq!(msg.metadata.get("session_id").map(String::as_str), Some("9"));

        let msg = sync_outcome_message(&report, SessionStatus::Error);
        assert_eq!(msg.title, "Job sync failed");
    }

    #[test]
    fn budget_gates_on_quota_only() {
        use crate::models::ApiUsage;

        let day = chrono::Utc::now().date_naive();
        let usage = |requests_made, quota| ApiUsage {
            id: 1,
            source_id: 1,
            usage_date: day,
            requests_made,
            quota,
        };

        assert!(!budget_exhausted(None));
        assert!(!budget_exhausted(Some(&usage(50, None))));
        assert!(!budget_exhausted(Some(&usage(9, Some(10)))));
        assert!(budget_exhausted(Some(&usage(10, Some(10)))));
        assert!(budget_exhausted(Some(&usage(11, Some(10)))));
    }

    #[test]
    fn report_totals_sum_across_sources() {
        let report = SyncReport {
            session_id: 1,
            sources: vec![
                SourceReport {
                    source: "naukri".into(),
                    fetched: 10,
                    new: 6,
                    duplicate: 3,
                    failed: 1,
                },
                SourceReport {
                    source: "indeed".into(),
                    fetched: 5,
                    new: 2,
                    duplicate: 3,
                    failed: 0,
                },
            ],
        };
        assert_eq!(report.total_fetched(), 15);
        assert_eq!(report.total_new(), 8);
        assert_eq!(report.total_duplicate(), 6);
        assert_eq!(report.total_failed(), 1);
    }
}
