use thiserror::Error;

use crate::domain::Settings;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to persist settings: {0}")]
    WriteFailed(String),
}

/// Durable store of user policy settings.
///
/// Reads never fail: a store that cannot produce a value returns the built-in
/// defaults. Writes are best-effort; a write failure is surfaced to the
/// caller but treated as non-fatal by the core.
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self) -> Settings;
    async fn set(&self, settings: Settings) -> Result<(), StoreError>;
}
