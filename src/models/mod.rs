mod criteria;
mod enums;
mod job;
mod misc;
mod session;
mod source;
mod user;
mod website;

pub use criteria::{JobSearchCriteria, NewJobSearchCriteria, UpdateJobSearchCriteria};
pub use enums::{
    AiDecision, AutomationState, JobStatus, SessionKind, SessionStatus, SourceStatus,
};
pub use job::{JobApplication, NewJobApplication, UpdateJobApplication};
pub use misc::{
    AnalyticsEvent, BlacklistEntry, CoverLetter, NewAnalyticsEvent, NewBlacklistEntry,
    NewCoverLetter, NewNotificationSettings, NotificationSettings, UpdateNotificationSettings,
};
pub use session::{
    ApplicationLog, ApplicationSession, BrowserSession, NewApplicationLog, NewApplicationSession,
    NewBrowserSession, UpdateApplicationSession, UpdateBrowserSession,
};
pub use source::{
    ApiUsage, ExternalJobResult, JobSource, NewApiUsage, NewExternalJobResult, NewJobSource,
    UpdateJobSource,
};
pub use user::{NewUserProfile, UpdateUserProfile, UserProfile};
pub use website::{NewWebsiteConfiguration, UpdateWebsiteConfiguration, WebsiteConfiguration};
