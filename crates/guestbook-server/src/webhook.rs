use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use guestbook_log::{GuestbookEvent, Notifier, NotifyError};
use reqwest::Client;
use serde_json::json;

use crate::error::{ServerError, ServerResult};

/// Posts moderation events to a chat-style webhook as `{"content": "..."}`.
///
/// Delivery runs on a detached task: `notify` returns as soon as the request
/// is queued, and a failed delivery is only logged.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> ServerResult<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| ServerError::Notifier(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl fmt::Debug for WebhookNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookNotifier")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, event: &GuestbookEvent) -> Result<(), NotifyError> {
        let body = json!({ "content": event.summary() });
        let request = self.client.post(&self.url).json(&body);
        tokio::spawn(async move {
            match request.send().await.and_then(|r| r.error_for_status()) {
                Ok(response) => {
                    tracing::debug!(status = %response.status(), "delivered moderation webhook")
                }
                Err(e) => tracing::warn!(error = %e, "moderation webhook delivery failed"),
            }
        });
        Ok(())
    }
}
