//! Automation session lifecycle: start, track, cancel.
//!
//! Running sessions live in a `DashMap` of cancellation tokens; the
//! database rows are the durable record. The engine itself is in
//! `crate::automation`, behind the `Browser` trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;

use crate::automation::{
    AutomationEngine, Browser, CardSnapshot, EngineSink, RunOutcome, SiteSelectors,
    WebDriverBrowser,
};
use crate::config::AutomationConfig;
use crate::error::{AppError, AppResult};
use crate::models::{
    ApplicationLog, ApplicationSession, AutomationState, BlacklistEntry, JobStatus,
    NewApplicationLog, NewApplicationSession, NewBlacklistEntry, NewBrowserSession,
    NewJobApplication, NewWebsiteConfiguration, SessionKind, SessionStatus,
    UpdateApplicationSession, UpdateBrowserSession, UpdateJobApplication,
    UpdateWebsiteConfiguration, WebsiteConfiguration,
};
use crate::repositories::{
    BlacklistRepository, JobApplicationRepository, SessionRepository, WebsiteRepository,
};
use crate::services::notifications::{NotificationMessage, NotificationService};
use crate::utils::extract_source;

#[derive(Clone)]
pub struct AutomationService {
    config: AutomationConfig,
    sessions: SessionRepository,
    websites: WebsiteRepository,
    jobs: JobApplicationRepository,
    blacklist: BlacklistRepository,
    notifications: NotificationService,
    active: Arc<DashMap<i32, CancellationToken>>,
}

impl AutomationService {
    pub fn new(
        config: AutomationConfig,
        sessions: SessionRepository,
        websites: WebsiteRepository,
        jobs: JobApplicationRepository,
        blacklist: BlacklistRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            config,
            sessions,
            websites,
            jobs,
            blacklist,
            notifications,
            active: Arc::new(DashMap::new()),
        }
    }

    /// Starts an automation run against one configured site. The session
    /// row is returned immediately; the browser work happens in a spawned
    /// task.
    pub async fn start(
        &self,
        user_id: Option<i32>,
        site_key: &str,
        keywords: String,
        location: String,
        auto_apply: bool,
    ) -> AppResult<ApplicationSession> {
        if self.active.len() >= self.config.max_concurrent_sessions {
            return Err(AppError::Automation {
                stage: "session_setup".to_string(),
                message: format!(
                    "Concurrent session limit ({}) reached",
                    self.config.max_concurrent_sessions
                ),
            });
        }

        let site = self.websites.get_by_site_key(site_key).await?;
        if !site.enabled {
            return Err(AppError::BadRequest {
                message: format!("Site '{site_key}' is disabled"),
            });
        }
        // Surface a broken selector config to the caller, not the task.
        SiteSelectors::from_config(&site.selectors)?;

        let session = self
            .sessions
            .create(NewApplicationSession {
                user_id,
                kind: SessionKind::Automation,
                keywords: Some(keywords.clone()),
                location: Some(location.clone()),
            })
            .await?;
        let browser_row = self
            .sessions
            .create_browser_session(NewBrowserSession {
                session_id: session.id,
                website_id: Some(site.id),
                driver_session: None,
            })
            .await?;

        let token = CancellationToken::new();
        self.active.insert(session.id, token.clone());

        let service = self.clone();
        let session_id = session.id;
        tokio::spawn(async move {
            service
                .run_session(session_id, browser_row.id, site, keywords, location, auto_apply, token)
                .await;
            service.active.remove(&session_id);
        });

        Ok(session)
    }

    /// Cancels a running session. Sessions that already finished cannot
    /// be cancelled.
    pub async fn cancel(&self, session_id: i32) -> AppResult<()> {
        if let Some(entry) = self.active.get(&session_id) {
            entry.value().cancel();
            return Ok(());
        }
        // Distinguish "never existed" from "already finished".
        let session = self.sessions.get(session_id).await?;
        Err(AppError::UnprocessableContent {
            message: format!("Session {session_id} is not running (status: {})", session.status),
        })
    }

    pub async fn get(&self, session_id: i32) -> AppResult<ApplicationSession> {
        self.sessions.get(session_id).await
    }

    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<ApplicationSession>> {
        self.sessions.list_recent(limit).await
    }

    pub async fn logs(&self, session_id: i32) -> AppResult<Vec<ApplicationLog>> {
        self.sessions.get(session_id).await?;
        self.sessions.logs_for_session(session_id).await
    }

    pub async fn list_websites(&self) -> AppResult<Vec<WebsiteConfiguration>> {
        self.websites.list().await
    }

    pub async fn get_website(&self, site_key: &str) -> AppResult<WebsiteConfiguration> {
        self.websites.get_by_site_key(site_key).await
    }

    pub async fn create_website(
        &self,
        new_site: NewWebsiteConfiguration,
    ) -> AppResult<WebsiteConfiguration> {
        SiteSelectors::from_config(&new_site.selectors)?;
        self.websites.create(new_site).await
    }

    pub async fn update_website(
        &self,
        site_key: &str,
        update: UpdateWebsiteConfiguration,
    ) -> AppResult<WebsiteConfiguration> {
        if let Some(selectors) = &update.selectors {
            SiteSelectors::from_config(selectors)?;
        }
        self.websites.update(site_key, update).await
    }

    pub async fn delete_website(&self, site_key: &str) -> AppResult<()> {
        self.websites.delete(site_key).await
    }

    pub async fn list_blacklist(&self) -> AppResult<Vec<BlacklistEntry>> {
        self.blacklist.list().await
    }

    pub async fn add_to_blacklist(&self, entry: NewBlacklistEntry) -> AppResult<BlacklistEntry> {
        self.blacklist.create(entry).await
    }

    pub async fn remove_from_blacklist(&self, entry_id: i32) -> AppResult<()> {
        self.blacklist.delete(entry_id).await
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_session(
        &self,
        session_id: i32,
        browser_row_id: i32,
        site: WebsiteConfiguration,
        keywords: String,
        location: String,
        auto_apply: bool,
        token: CancellationToken,
    ) {
        tracing::info!(session_id, site = %site.site_key, "automation session starting");

        let outcome = self
            .drive_browser(session_id, browser_row_id, &site, &keywords, &location, auto_apply, token)
            .await;

        let (status, outcome) = match outcome {
            Ok(o) if o.cancelled => (SessionStatus::Cancelled, o),
            Ok(o) if o.jobs_found == 0 && o.errors > 0 => (SessionStatus::Error, o),
            Ok(o) => (SessionStatus::Completed, o),
            Err(e) => {
                tracing::error!(session_id, error = %e, "automation session failed");
                (
                    SessionStatus::Error,
                    RunOutcome {
                        errors: 1,
                        ..Default::default()
                    },
                )
            }
        };

        let counters = UpdateApplicationSession {
            jobs_found: Some(outcome.jobs_found),
            jobs_applied: Some(outcome.jobs_applied),
            jobs_skipped: Some(outcome.jobs_skipped),
            errors_encountered: Some(outcome.errors),
            ..Default::default()
        };
        match self.sessions.finalize(session_id, status, counters).await {
            Ok(session) => {
                if let Some(user_id) = session.user_id {
                    let message = automation_outcome_message(&site.site_key, status, &outcome);
                    match status {
                        SessionStatus::Error => {
                            self.notifications.notify_error(user_id, message).await
                        }
                        _ => self.notifications.notify_completion(user_id, message).await,
                    }
                }
            }
            Err(e) => {
                tracing::error!(session_id, error = %e, "could not finalize session");
            }
        }
        if let Err(e) = self
            .sessions
            .update_browser_session(
                browser_row_id,
                UpdateBrowserSession {
                    ended_at: Some(Utc::now().naive_utc()),
                    ..Default::default()
                },
            )
            .await
        {
            tracing::warn!(session_id, error = %e, "could not close browser session row");
        }
        tracing::info!(
            session_id,
            status = %status,
            applied = outcome.jobs_applied,
            errors = outcome.errors,
            "automation session finished"
        );
    }

    #[allow(clippy::too_many_arguments)]
    async fn drive_browser(
        &self,
        session_id: i32,
        browser_row_id: i32,
        site: &WebsiteConfiguration,
        keywords: &str,
        location: &str,
        auto_apply: bool,
        token: CancellationToken,
    ) -> AppResult<RunOutcome> {
        let mut browser = Box::new(WebDriverBrowser::connect(&self.config).await?);
        if let Some(handle) = browser.session_handle() {
            if let Err(e) = self
                .sessions
                .update_browser_session(
                    browser_row_id,
                    UpdateBrowserSession {
                        driver_session: Some(handle.clone()),
                        ..Default::default()
                    },
                )
                .await
            {
                tracing::warn!(session_id, error = %e, "could not record driver session");
            }
            tracing::debug!(session_id, driver_session = %handle, "webdriver connected");
        }

        let sink = DbSink {
            session_id,
            browser_row_id,
            site_key: site.site_key.clone(),
            base_url: site.base_url.clone(),
            sessions: self.sessions.clone(),
            jobs: self.jobs.clone(),
            blacklist: self.blacklist.clone(),
        };
        let mut engine = AutomationEngine::new(site, &sink, token, auto_apply)?;
        let result = engine.run(browser.as_mut(), keywords, location).await;

        if let Err(e) = (browser as Box<dyn Browser>).close().await {
            tracing::warn!(session_id, error = %e, "webdriver teardown failed");
        }
        result
    }
}

/// Webhook payload for a finished automation run.
fn automation_outcome_message(
    site_key: &str,
    status: SessionStatus,
    outcome: &RunOutcome,
) -> NotificationMessage {
    let (title, body) = match status {
        SessionStatus::Error => (
            "Automation run failed",
            format!("{site_key}: {} errors encountered", outcome.errors),
        ),
        SessionStatus::Cancelled => (
            "Automation run cancelled",
            format!("{site_key}: stopped after {} applications", outcome.jobs_applied),
        ),
        _ => (
            "Automation run completed",
            format!(
                "{site_key}: {} jobs found, {} applications submitted",
                outcome.jobs_found, outcome.jobs_applied
            ),
        ),
    };
    NotificationMessage::new(title, body)
        .with_meta("site_key", site_key.to_string())
        .with_meta("event", "automation_finished")
}

/// Engine sink writing through the repositories.
struct DbSink {
    session_id: i32,
    browser_row_id: i32,
    site_key: String,
    base_url: String,
    sessions: SessionRepository,
    jobs: JobApplicationRepository,
    blacklist: BlacklistRepository,
}

#[async_trait]
impl EngineSink for DbSink {
    async fn is_blacklisted(&self, company: &str) -> AppResult<bool> {
        self.blacklist.contains(company).await
    }

    async fn record_job(&self, card: &CardSnapshot, applied: bool) -> AppResult<bool> {
        // Cards without a link cannot be deduplicated or tracked.
        let Some(url) = card.url.clone() else {
            return Ok(false);
        };
        let url = if url.starts_with('/') {
            format!("{}{}", self.base_url.trim_end_matches('/'), url)
        } else {
            url
        };

        if applied {
            if let Some(existing) = self.jobs.find_by_url(&url).await? {
                self.jobs
                    .update(
                        existing.id,
                        UpdateJobApplication {
                            status: Some(JobStatus::Applied),
                            applied_at: Some(Utc::now().naive_utc()),
                            ..Default::default()
                        },
                    )
                    .await?;
            }
            return Ok(true);
        }

        let inserted = self
            .jobs
            .insert_if_absent(NewJobApplication {
                title: card.title.clone(),
                company: card.company.clone(),
                location: card.location.clone(),
                source: extract_source(&url).to_string(),
                url,
                description: None,
                requirements: None,
                salary_range: None,
            })
            .await?;
        Ok(inserted.is_some())
    }

    async fn state_changed(&self, state: AutomationState) -> AppResult<()> {
        self.sessions
            .update_browser_session(
                self.browser_row_id,
                UpdateBrowserSession {
                    state: Some(state),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    async fn log_error(&self, stage: &str, message: &str) -> AppResult<()> {
        self.sessions
            .add_log(NewApplicationLog {
                session_id: self.session_id,
                job_application_id: None,
                event_type: "automation_error".to_string(),
                message: format!("{} automation failed during {stage}", self.site_key),
                error_type: Some(stage.to_string()),
                error_details: Some(message.to_string()),
            })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_run_builds_webhook_payload() {
        let outcome = RunOutcome {
            jobs_found: 12,
            jobs_applied: 4,
            jobs_skipped: 8,
            errors: 0,
            cancelled: false,
        };

        let msg = automation_outcome_message("linkedin", SessionStatus::Completed, &outcome);
        assert_eq!(msg.title, "Automation run completed");
        assert!(msg.body.contains("12 jobs found"));
        assert!(msg.body.contains("4 applications"));
        assert_eq!(msg.metadata.get("site_key").map(String::as_str), Some("linkedin"));

        let msg = automation_outcome_message("linkedin", SessionStatus::Error, &outcome);
        assert_eq!(msg.title, "Automation run failed");

        let msg = automation_outcome_message("linkedin", SessionStatus::Cancelled, &outcome);
        assert_eq!(msg.title, "Automation run cancelled");
    }
}
