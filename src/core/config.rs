//! Logger configuration
//!
//! A [`LoggerConfig`] is fixed when the logger is built. It can be assembled
//! through [`LoggerBuilder`](super::LoggerBuilder) or loaded from JSON; keys the
//! logger does not recognise are ignored.

use super::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory for the daily error files
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default paste service used by the webhook sink
pub const DEFAULT_PASTE_SERVICE: &str = "https://hst.sh";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Development,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// IANA zone for timestamps; system local time when unset
    pub timezone: Option<String>,
    /// Whether console prefixes carry a timestamp
    pub timestamp: bool,
    pub env: Environment,
    /// Explicit override of the single-line error mode
    pub single_line_errors: Option<bool>,
    pub persist_errors_to_file: bool,
    pub log_dir: PathBuf,
    /// Webhook URL receiving error notifications
    pub remote_notify_target: Option<String>,
    pub paste_service_url: String,
    /// Extension appended to paste URLs as a syntax hint
    pub paste_language: String,
    pub webhook_username: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            timezone: None,
            timestamp: true,
            env: Environment::default(),
            single_line_errors: None,
            persist_errors_to_file: false,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            remote_notify_target: None,
            paste_service_url: DEFAULT_PASTE_SERVICE.to_string(),
            paste_language: "log".to_string(),
            webhook_username: "Error Log".to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON, ignoring unknown keys
    ///
    /// # Examples
    ///
    /// ```
    /// use errlog::core::LoggerConfig;
    ///
    /// let config = LoggerConfig::from_json(r#"{"timezone": "UTC", "colour": "mauve"}"#).unwrap();
    /// assert_eq!(config.timezone.as_deref(), Some("UTC"));
    /// assert!(config.timestamp);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Effective single-line mode: an explicit setting wins, otherwise
    /// development environments print multi-line errors.
    #[must_use]
    pub fn single_line_errors(&self) -> bool {
        self.single_line_errors
            .unwrap_or(self.env != Environment::Development)
    }
}
