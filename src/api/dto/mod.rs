//! Request/response DTOs for the REST API.

mod auth;
mod automation;
mod blacklist;
mod cover_letter;
mod criteria;
mod error;
mod health;
mod job;
mod notification;
mod pagination;
mod profile;
mod resume;
mod sync;
mod website;

pub use auth::{AuthResponse, LoginRequest, RefreshRequest, RegisterRequest, TokenResponse};
pub use automation::{LogResponse, StartAutomationRequest};
pub use blacklist::{BlacklistResponse, CreateBlacklistRequest};
pub use cover_letter::{CoverLetterQuery, CoverLetterResponse, GenerateCoverLetterRequest};
pub use criteria::{CreateCriteriaRequest, CriteriaResponse, UpdateCriteriaRequest};
pub use error::ErrorResponse;
pub use health::HealthResponse;
pub use job::{
    AnalyzeResponse, JobListQuery, JobResponse, JobStatsResponse, SourceCount, StatusCount,
    StatusUpdateRequest,
};
pub use notification::{NotificationSettingsResponse, UpdateNotificationSettingsRequest};
pub use pagination::{PagedResponse, PaginationMeta};
pub use profile::{PreferencesRequest, ProfileResponse, UpdateProfileRequest};
pub use resume::ResumeParseResponse;
pub use sync::{SessionResponse, SourceResponse, SyncTriggerRequest, UpdateSourceRequest};
pub use website::{CreateWebsiteRequest, UpdateWebsiteRequest, WebsiteResponse};
