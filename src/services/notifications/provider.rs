//! Notification provider abstraction.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Message handed to a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub title: String,
    pub body: String,
    /// Provider-agnostic extra fields, forwarded as-is.
    pub metadata: HashMap<String, String>,
}

impl NotificationMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Delivery outcome. Providers report failure through this rather than an
/// error so a dead webhook never fails the operation that triggered it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    pub success: bool,
    pub status_code: Option<u16>,
    pub response: Option<String>,
    pub duration_ms: u64,
}

#[async_trait]
pub trait NotificationProvider: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult>;

    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_builder_collects_metadata() {
        let msg = NotificationMessage::new("Sync done", "8 new jobs")
            .with_meta("session_id", "42")
            .with_meta("event", "sync_completed");
        assert_eq!(msg.metadata.len(), 2);
        assert_eq!(msg.metadata["session_id"], "42");
    }
}
