//! Webhook delivery over the shared HTTP client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use crate::error::AppResult;
use crate::external::client::HTTP_CLIENT;

const SEND_TIMEOUT: Duration = Duration::from_secs(15);

pub struct WebhookProvider {
    url: String,
}

impl WebhookProvider {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait]
impl NotificationProvider for WebhookProvider {
    /// POSTs the message as JSON. Transport errors come back as an
    /// unsuccessful result, not an `Err`.
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult> {
        let start = Instant::now();
        let response = HTTP_CLIENT
            .post(&self.url)
            .timeout(SEND_TIMEOUT)
            .json(&json!({
                "title": message.title,
                "body": message.body,
                "metadata": message.metadata,
            }))
            .send()
            .await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                let success = resp.status().is_success();
                Ok(NotificationResult {
                    success,
                    status_code: Some(status_code),
                    response: resp.text().await.ok(),
                    duration_ms,
                })
            }
            Err(e) => Ok(NotificationResult {
                success: false,
                status_code: None,
                response: Some(e.to_string()),
                duration_ms,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
