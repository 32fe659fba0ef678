//! Business logic layer between handlers and repositories.

mod ai_service;
mod analytics_service;
mod automation_service;
mod criteria_service;
mod job_service;
pub mod notifications;
mod resume_service;
mod sync_service;
mod user_service;

pub use ai_service::{AiService, JobMatch};
pub use analytics_service::{AnalyticsService, AnalyticsSummary, DailyCount, NamedCount};
pub use automation_service::AutomationService;
pub use criteria_service::CriteriaService;
pub use job_service::{JobService, JobStats};
pub use notifications::NotificationService;
pub use resume_service::{ParsedResume, ResumeService};
pub use sync_service::{SourceReport, SyncReport, SyncService};
pub use user_service::{TokenPair, UserService};

use std::sync::Arc;

use crate::config::Settings;
use crate::external::boards::BoardRegistry;
use crate::repositories::Repositories;

/// Aggregates all services for use as part of the Axum state.
/// Cloning is cheap since every service holds `Arc`-backed handles.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub criteria: CriteriaService,
    pub jobs: JobService,
    pub sync: SyncService,
    pub automation: AutomationService,
    pub resume: ResumeService,
    pub analytics: AnalyticsService,
    pub notifications: NotificationService,
}

impl Services {
    pub fn new(repos: Repositories, registry: Arc<BoardRegistry>, settings: &Settings) -> Self {
        let ai = AiService::new(settings.ai.clone());
        let notifications = NotificationService::new(repos.notifications.clone());
        Self {
            users: UserService::new(repos.users.clone(), settings.jwt.clone()),
            criteria: CriteriaService::new(repos.criteria.clone()),
            jobs: JobService::new(repos.jobs.clone(), repos.cover_letters.clone(), ai),
            sync: SyncService::new(
                registry,
                repos.sources.clone(),
                repos.jobs.clone(),
                repos.sessions.clone(),
                repos.analytics.clone(),
                notifications.clone(),
                &settings.boards,
            ),
            automation: AutomationService::new(
                settings.automation.clone(),
                repos.sessions.clone(),
                repos.websites.clone(),
                repos.jobs.clone(),
                repos.blacklist.clone(),
                notifications.clone(),
            ),
            resume: ResumeService::new(settings.uploads.clone()),
            analytics: AnalyticsService::new(repos.analytics.clone(), repos.jobs.clone()),
            notifications,
        }
    }
}
