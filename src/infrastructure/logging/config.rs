//! Logger settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::models::LoggingConfig;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (json, pretty)
    #[serde(default = "default_format")]
    pub format: LogFormat,

    /// Directory for log files (optional, if None logs only to stderr)
    pub log_dir: Option<PathBuf>,

    /// Enable stderr logging
    #[serde(default = "default_true")]
    pub enable_stderr: bool,

    /// Log rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

/// Stderr output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Compact human-readable lines
    Pretty,
}

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    /// New file every day
    #[default]
    Daily,
    /// New file every hour
    Hourly,
    /// A single file
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            log_dir: None,
            enable_stderr: true,
            rotation: RotationPolicy::default(),
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    /// Unrecognized format or rotation names fall back to the defaults;
    /// `ConfigLoader::validate` rejects them before this point.
    fn from(settings: &LoggingConfig) -> Self {
        let format = match settings.format.as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        let rotation = match settings.rotation.as_str() {
            "hourly" => RotationPolicy::Hourly,
            "never" => RotationPolicy::Never,
            _ => RotationPolicy::Daily,
        };

        Self {
            level: settings.level.clone(),
            format,
            log_dir: settings.directory.clone(),
            enable_stderr: true,
            rotation,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_format() -> LogFormat {
    LogFormat::Pretty
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let settings = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
            directory: Some(PathBuf::from("/var/log/jobsight")),
            rotation: "hourly".to_string(),
        };

        let config = LogConfig::from(&settings);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.rotation, RotationPolicy::Hourly);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/jobsight")));
        assert!(config.enable_stderr);
    }

    #[test]
    fn test_from_default_settings() {
        let config = LogConfig::from(&LoggingConfig::default());
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.rotation, RotationPolicy::Daily);
        assert!(config.log_dir.is_none());
    }
}
