//! User notification settings and event fan-out.

use crate::error::AppResult;
use crate::models::{NotificationSettings, UpdateNotificationSettings};
use crate::repositories::NotificationRepository;

use super::provider::{NotificationMessage, NotificationProvider};
use super::webhook_provider::WebhookProvider;

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository) -> Self {
        Self { repo }
    }

    /// Current settings, or the defaults for users who never saved any.
    pub async fn settings_for(&self, user_id: i32) -> AppResult<Option<NotificationSettings>> {
        self.repo.find_for_user(user_id).await
    }

    pub async fn update_settings(
        &self,
        user_id: i32,
        update: UpdateNotificationSettings,
    ) -> AppResult<NotificationSettings> {
        self.repo.upsert(user_id, update).await
    }

    /// Fires a completion notification if the user opted in and has a
    /// webhook configured. Delivery failure is logged, never propagated.
    pub async fn notify_completion(&self, user_id: i32, message: NotificationMessage) {
        self.dispatch(user_id, message, |s| s.notify_on_completion).await;
    }

    pub async fn notify_error(&self, user_id: i32, message: NotificationMessage) {
        self.dispatch(user_id, message, |s| s.notify_on_error).await;
    }

    async fn dispatch<F>(&self, user_id: i32, message: NotificationMessage, wants: F)
    where
        F: Fn(&NotificationSettings) -> bool,
    {
        let settings = match self.repo.find_for_user(user_id).await {
            Ok(Some(s)) => s,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "could not load notification settings");
                return;
            }
        };
        if !wants(&settings) {
            return;
        }
        let Some(url) = settings.webhook_url else {
            return;
        };

        let provider = WebhookProvider::new(url);
        match provider.send(&message).await {
            Ok(result) if result.success => {
                tracing::debug!(user_id, provider = provider.name(), "notification delivered");
            }
            Ok(result) => {
                tracing::warn!(
                    user_id,
                    provider = provider.name(),
                    status = ?result.status_code,
                    "notification delivery failed"
                );
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "notification send errored");
            }
        }
    }
}
