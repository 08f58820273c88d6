//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml
//! structure. Configuration covers the service wiring (monitored domain,
//! settings file location, alerts, logging); the user's trading policy lives
//! in the settings store, not here.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub monitor: MonitorSection,
    pub storage: StorageSection,
    pub logging: LoggingSection,
    #[serde(default)]
    pub alerts: AlertsSection,
}

/// Monitoring configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSection {
    /// Domain a monitoring context must stay on (e.g. "axiom.trade");
    /// navigating away tears the session down
    pub expected_domain: String,
}

/// Settings persistence configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSection {
    /// Path of the JSON settings document (supports ~ expansion)
    pub settings_path: String,
}

impl StorageSection {
    /// Get the settings path with ~ expanded
    pub fn expanded_settings_path(&self) -> String {
        shellexpand::tilde(&self.settings_path).to_string()
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

/// Alerts configuration section (optional)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AlertsSection {
    /// Enable webhook notifications
    #[serde(default)]
    pub webhook_enabled: bool,
    /// Webhook URL receiving order outcome events
    #[serde(default)]
    pub webhook_url: String,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.expected_domain.is_empty() {
            return Err(ConfigError::ValidationError(
                "expected_domain cannot be empty".to_string(),
            ));
        }

        if self.storage.settings_path.is_empty() {
            return Err(ConfigError::ValidationError(
                "settings_path cannot be empty".to_string(),
            ));
        }

        if self.alerts.webhook_enabled && self.alerts.webhook_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "webhook_url required when webhook_enabled is true".to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::ValidationError(format!(
                "unknown log level: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_valid_config() -> String {
        r#"
[monitor]
expected_domain = "axiom.trade"

[storage]
settings_path = "~/.devsniper/settings.json"

[logging]
level = "info"

[alerts]
webhook_enabled = false
webhook_url = ""
"#
        .to_string()
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(create_valid_config().as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.monitor.expected_domain, "axiom.trade");
        assert!(config.storage.settings_path.ends_with("settings.json"));
        assert_eq!(config.logging.level, "info");
        assert!(!config.alerts.webhook_enabled);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/nonexistent/path/config.toml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }

    #[test]
    fn test_empty_domain_rejected() {
        let invalid = r#"
[monitor]
expected_domain = ""

[storage]
settings_path = "settings.json"

[logging]
level = "info"
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(invalid.as_bytes()).unwrap();

        let result = load_config(file.path());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_webhook_enabled_requires_url() {
        let invalid = r#"
[monitor]
expected_domain = "axiom.trade"

[storage]
settings_path = "settings.json"

[logging]
level = "info"

[alerts]
webhook_enabled = true
webhook_url = ""
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(invalid.as_bytes()).unwrap();

        let result = load_config(file.path());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let invalid = r#"
[monitor]
expected_domain = "axiom.trade"

[storage]
settings_path = "settings.json"

[logging]
level = "loud"
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(invalid.as_bytes()).unwrap();

        let result = load_config(file.path());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(_)
        ));
    }

    #[test]
    fn test_alerts_section_optional() {
        let minimal = r#"
[monitor]
expected_domain = "axiom.trade"

[storage]
settings_path = "settings.json"

[logging]
level = "debug"
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(minimal.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(!config.alerts.webhook_enabled);
        assert!(config.alerts.webhook_url.is_empty());
    }

    #[test]
    fn test_tilde_expansion() {
        let section = StorageSection {
            settings_path: "~/.devsniper/settings.json".to_string(),
        };
        let expanded = section.expanded_settings_path();
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with(".devsniper/settings.json"));
    }
}
