//! Data access layer over the async connection pool.

mod analytics_repo;
mod blacklist_repo;
mod cover_letter_repo;
mod criteria_repo;
mod job_repo;
mod notification_repo;
mod session_repo;
mod source_repo;
mod user_repo;
mod website_repo;

pub use analytics_repo::AnalyticsRepository;
pub use blacklist_repo::BlacklistRepository;
pub use cover_letter_repo::CoverLetterRepository;
pub use criteria_repo::CriteriaRepository;
pub use job_repo::{JobApplicationRepository, JobFilter};
pub use notification_repo::NotificationRepository;
pub use session_repo::SessionRepository;
pub use source_repo::SourceRepository;
pub use user_repo::UserProfileRepository;
pub use website_repo::WebsiteRepository;

use crate::db::AsyncDbPool;

/// All repositories, sharing one pool. Cloning is cheap since each
/// repository holds a pool handle backed by `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserProfileRepository,
    pub jobs: JobApplicationRepository,
    pub criteria: CriteriaRepository,
    pub sources: SourceRepository,
    pub sessions: SessionRepository,
    pub websites: WebsiteRepository,
    pub cover_letters: CoverLetterRepository,
    pub blacklist: BlacklistRepository,
    pub notifications: NotificationRepository,
    pub analytics: AnalyticsRepository,
}

impl Repositories {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserProfileRepository::new(pool.clone()),
            jobs: JobApplicationRepository::new(pool.clone()),
            criteria: CriteriaRepository::new(pool.clone()),
            sources: SourceRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone()),
            websites: WebsiteRepository::new(pool.clone()),
            cover_letters: CoverLetterRepository::new(pool.clone()),
            blacklist: BlacklistRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool.clone()),
            analytics: AnalyticsRepository::new(pool),
        }
    }
}
