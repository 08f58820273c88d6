//! Notification Sinks
//!
//! Best-effort outcome reporting. The log sink writes through tracing; the
//! webhook sink POSTs the event as JSON to a configured endpoint (Discord,
//! Slack, anything that accepts a JSON body). Neither lets a delivery
//! failure reach the caller.

use async_trait::async_trait;

use crate::ports::{NotificationEvent, NotificationKind, NotificationSink};

/// Sink that reports outcomes through the process log.
#[derive(Debug, Default)]
pub struct LogNotificationSink;

impl LogNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn report(&self, event: NotificationEvent) {
        match event.kind {
            NotificationKind::Success => tracing::info!(
                title = %event.title,
                message = %event.message,
                signature = ?event.signature,
                "notification"
            ),
            NotificationKind::Error => tracing::warn!(
                title = %event.title,
                message = %event.message,
                "notification"
            ),
        }
    }
}

/// Sink that POSTs outcomes to a webhook endpoint.
pub struct WebhookNotificationSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotificationSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookNotificationSink {
    async fn report(&self, event: NotificationEvent) {
        let result = self.client.post(&self.url).json(&event).send().await;
        match result {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(status = %response.status(), "webhook notification rejected");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "webhook notification failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sink_accepts_both_kinds() {
        let sink = LogNotificationSink::new();
        sink.report(NotificationEvent::success("t", "m", "sig")).await;
        sink.report(NotificationEvent::error("t", "m")).await;
    }

    #[tokio::test]
    async fn test_webhook_sink_swallows_connection_errors() {
        // Nothing listens on this port; report must still return normally
        let sink = WebhookNotificationSink::new("http://127.0.0.1:1/hook");
        sink.report(NotificationEvent::error("t", "m")).await;
    }
}
