//! Notification settings DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NotificationSettings, UpdateNotificationSettings};

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationSettingsResponse {
    #[schema(example = "https://hooks.example.com/T000/B000/XXX")]
    pub webhook_url: Option<String>,
    pub notify_on_completion: bool,
    pub notify_on_error: bool,
}

impl From<NotificationSettings> for NotificationSettingsResponse {
    fn from(s: NotificationSettings) -> Self {
        Self {
            webhook_url: s.webhook_url,
            notify_on_completion: s.notify_on_completion,
            notify_on_error: s.notify_on_error,
        }
    }
}

impl NotificationSettingsResponse {
    /// Defaults shown to users who never saved settings.
    pub fn defaults() -> Self {
        Self {
            webhook_url: None,
            notify_on_completion: true,
            notify_on_error: true,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateNotificationSettingsRequest {
    #[validate(url(message = "Invalid webhook URL"))]
    pub webhook_url: Option<String>,
    pub notify_on_completion: Option<bool>,
    pub notify_on_error: Option<bool>,
}

impl From<UpdateNotificationSettingsRequest> for UpdateNotificationSettings {
    fn from(req: UpdateNotificationSettingsRequest) -> Self {
        Self {
            webhook_url: req.webhook_url,
            notify_on_completion: req.notify_on_completion,
            notify_on_error: req.notify_on_error,
        }
    }
}
