//! Website automation profile DTOs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewWebsiteConfiguration, UpdateWebsiteConfiguration, WebsiteConfiguration};

#[derive(Debug, Serialize, ToSchema)]
pub struct WebsiteResponse {
    pub id: i32,
    #[schema(example = "naukri")]
    pub site_key: String,
    #[schema(example = "Naukri")]
    pub display_name: String,
    pub base_url: String,
    /// Search URL template with `{keywords}` and `{location}` placeholders
    #[schema(example = "https://www.naukri.com/{keywords}-jobs-in-{location}")]
    pub search_url: String,
    pub login_required: bool,
    /// Seconds to wait between applications
    pub rate_limit_delay: i32,
    pub max_applications_per_session: i32,
    pub supports_auto_apply: bool,
    /// CSS selectors by role (search_input, job_card, title, ...)
    #[schema(value_type = Object)]
    pub selectors: JsonValue,
    pub enabled: bool,
    pub updated_at: NaiveDateTime,
}

impl From<WebsiteConfiguration> for WebsiteResponse {
    fn from(w: WebsiteConfiguration) -> Self {
        Self {
            id: w.id,
            site_key: w.site_key,
            display_name: w.display_name,
            base_url: w.base_url,
            search_url: w.search_url,
            login_required: w.login_required,
            rate_limit_delay: w.rate_limit_delay,
            max_applications_per_session: w.max_applications_per_session,
            supports_auto_apply: w.supports_auto_apply,
            selectors: w.selectors,
            enabled: w.enabled,
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateWebsiteRequest {
    #[validate(length(min = 2, max = 50, message = "Site key must be between 2 and 50 characters"))]
    #[schema(example = "naukri")]
    pub site_key: String,
    #[validate(length(min = 1, max = 120, message = "Display name is required"))]
    pub display_name: String,
    #[validate(url(message = "Invalid base URL"))]
    pub base_url: String,
    #[validate(length(min = 1, message = "Search URL is required"))]
    pub search_url: String,
    #[serde(default)]
    pub login_required: bool,
    #[validate(range(min = 0, max = 300, message = "Delay must be between 0 and 300 seconds"))]
    #[serde(default = "default_rate_limit_delay")]
    pub rate_limit_delay: i32,
    #[validate(range(min = 1, max = 100, message = "Session cap must be between 1 and 100"))]
    #[serde(default = "default_session_cap")]
    pub max_applications_per_session: i32,
    #[serde(default)]
    pub supports_auto_apply: bool,
    #[schema(value_type = Object)]
    pub selectors: JsonValue,
}

fn default_rate_limit_delay() -> i32 {
    5
}

fn default_session_cap() -> i32 {
    20
}

impl From<CreateWebsiteRequest> for NewWebsiteConfiguration {
    fn from(req: CreateWebsiteRequest) -> Self {
        Self {
            site_key: req.site_key,
            display_name: req.display_name,
            base_url: req.base_url,
            search_url: req.search_url,
            login_required: req.login_required,
            rate_limit_delay: req.rate_limit_delay,
            max_applications_per_session: req.max_applications_per_session,
            supports_auto_apply: req.supports_auto_apply,
            selectors: req.selectors,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateWebsiteRequest {
    #[validate(length(min = 1, max = 120, message = "Display name cannot be empty"))]
    pub display_name: Option<String>,
    #[validate(url(message = "Invalid base URL"))]
    pub base_url: Option<String>,
    pub search_url: Option<String>,
    pub login_required: Option<bool>,
    #[validate(range(min = 0, max = 300, message = "Delay must be between 0 and 300 seconds"))]
    pub rate_limit_delay: Option<i32>,
    #[validate(range(min = 1, max = 100, message = "Session cap must be between 1 and 100"))]
    pub max_applications_per_session: Option<i32>,
    pub supports_auto_apply: Option<bool>,
    #[schema(value_type = Option<Object>)]
    pub selectors: Option<JsonValue>,
    pub enabled: Option<bool>,
}

impl From<UpdateWebsiteRequest> for UpdateWebsiteConfiguration {
    fn from(req: UpdateWebsiteRequest) -> Self {
        Self {
            display_name: req.display_name,
            base_url: req.base_url,
            search_url: req.search_url,
            login_required: req.login_required,
            rate_limit_delay: req.rate_limit_delay,
            max_applications_per_session: req.max_applications_per_session,
            supports_auto_apply: req.supports_auto_apply,
            selectors: req.selectors,
            enabled: req.enabled,
        }
    }
}
