use serde::{Deserialize, Serialize};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A terminal order outcome to surface to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Transaction receipt, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl NotificationEvent {
    pub fn success(title: impl Into<String>, message: impl Into<String>, signature: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
            signature: Some(signature.to_string()),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
            signature: None,
        }
    }
}

/// Best-effort, fire-and-forget outcome reporting.
///
/// Delivery failure must never affect order state, so `report` is
/// infallible; implementations log and swallow their own errors.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    async fn report(&self, event: NotificationEvent);
}
