//! File-Backed Settings Store
//!
//! Persists user policy as a single JSON document. Reads never fail: any
//! problem (missing file, unreadable, malformed) falls back to the built-in
//! defaults with a warning. Writes are best-effort.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::Settings;
use crate::ports::{SettingsStore, StoreError};

pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self) -> Settings {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "settings file unreadable, using defaults"
                    );
                    Settings::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "settings read failed, using defaults"
                );
                Settings::default()
            }
        }
    }

    async fn set(&self, settings: Settings) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&settings)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))
    }
}
