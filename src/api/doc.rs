use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AUTH_TAG: &str = "Auth";
pub const PROFILE_TAG: &str = "Profile";
pub const CRITERIA_TAG: &str = "Criteria";
pub const JOB_TAG: &str = "Jobs";
pub const SYNC_TAG: &str = "Sync";
pub const AUTOMATION_TAG: &str = "Automation";
pub const WEBSITE_TAG: &str = "Websites";
pub const RESUME_TAG: &str = "Resume";
pub const COVER_LETTER_TAG: &str = "Cover Letters";
pub const BLACKLIST_TAG: &str = "Blacklist";
pub const NOTIFICATION_TAG: &str = "Notifications";
pub const ANALYTICS_TAG: &str = "Analytics";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Jobpilot",
        description = "Job application tracking and automation API",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Registration, login and token refresh"),
        (name = PROFILE_TAG, description = "Applicant profile and preferences"),
        (name = CRITERIA_TAG, description = "Saved search criteria"),
        (name = JOB_TAG, description = "Tracked job applications"),
        (name = SYNC_TAG, description = "Multi-source job ingestion"),
        (name = AUTOMATION_TAG, description = "Browser automation sessions"),
        (name = WEBSITE_TAG, description = "Site automation profiles"),
        (name = RESUME_TAG, description = "Resume upload and parsing"),
        (name = COVER_LETTER_TAG, description = "Cover letter generation"),
        (name = BLACKLIST_TAG, description = "Company blacklist"),
        (name = NOTIFICATION_TAG, description = "Webhook notification settings"),
        (name = ANALYTICS_TAG, description = "Usage and outcome metrics"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer Token Authentication"))
                        .build(),
                ),
            )
        }
    }
}
