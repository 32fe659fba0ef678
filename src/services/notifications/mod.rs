//! Outbound notifications: provider trait, webhook delivery, settings.

mod notification_service;
mod provider;
mod webhook_provider;

pub use notification_service::NotificationService;
pub use provider::{NotificationMessage, NotificationProvider, NotificationResult};
pub use webhook_provider::WebhookProvider;
