//! Configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::EngineType;
use crate::services::ConfiguredJobTypes;

/// Project configuration file, created by hand or by tooling.
pub const PROJECT_CONFIG_PATH: &str = ".jobsight/config.yaml";

/// Optional project-local overrides, usually kept out of version control.
pub const LOCAL_CONFIG_PATH: &str = ".jobsight/local.yaml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "JOBSIGHT_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `logging.level` is not a known level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// `logging.format` is not a known format
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// `logging.rotation` is not a known policy
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    /// A field limit is zero
    #[error("Invalid field limit for {0}: must be at least 1")]
    ZeroFieldLimit(&'static str),

    /// A rules table key is blank
    #[error("Engine name in rules table cannot be empty")]
    EmptyEngineName,

    /// A rule list contains a blank name
    #[error("Empty rule name configured for engine {0}")]
    EmptyRuleName(String),

    /// Two rules table keys differ only in case
    #[error("Rules table keys '{first}' and '{second}' name the same engine")]
    ConflictingEngineKeys {
        /// Key seen first, in table order
        first: String,
        /// Key that collided with it
        second: String,
    },

    /// A job type definition does not compile
    #[error("Invalid job type definition: {0}")]
    InvalidJobType(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .jobsight/config.yaml (project config)
    /// 3. .jobsight/local.yaml (project local overrides, optional)
    /// 4. Environment variables (JOBSIGHT_* prefix, `__` for nesting)
    ///
    /// Environment keys arrive lowercased, so `JOBSIGHT_RULES__SPARK`
    /// replaces a file's `spark` list and collides with a `SPARK` list.
    pub fn load() -> Result<Config> {
        let config: Config = Self::project_figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::finish(config)
    }

    /// Load configuration from a specific file, still honoring environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::finish(config)
    }

    /// Load from an explicit file when given, otherwise from the project files
    pub fn load_with(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Validate, then key the rules table by normalized engine name.
    fn finish(mut config: Config) -> Result<Config> {
        Self::validate(&config)?;
        config.rules = std::mem::take(&mut config.rules)
            .into_iter()
            .map(|(engine, rules)| (EngineType::new(&engine).to_string(), rules))
            .collect();
        Ok(config)
    }

    fn project_figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(PROJECT_CONFIG_PATH))
            .merge(Yaml::file(LOCAL_CONFIG_PATH))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        // A zero limit would store every value of that field as an empty string
        if let Some((name, _)) = config
            .field_limits
            .entries()
            .into_iter()
            .find(|(_, limit)| *limit == 0)
        {
            return Err(ConfigError::ZeroFieldLimit(name));
        }

        // Rule names are resolved against the catalog when the registry is built
        let mut engines: HashMap<EngineType, &String> = HashMap::new();
        for (engine, rules) in &config.rules {
            if engine.trim().is_empty() {
                return Err(ConfigError::EmptyEngineName);
            }
            if rules.iter().any(|rule| rule.trim().is_empty()) {
                return Err(ConfigError::EmptyRuleName(engine.clone()));
            }
            if let Some(first) = engines.insert(EngineType::new(engine), engine) {
                return Err(ConfigError::ConflictingEngineKeys {
                    first: first.clone(),
                    second: engine.clone(),
                });
            }
        }

        ConfiguredJobTypes::from_config(&config.job_types)
            .map_err(|e| ConfigError::InvalidJobType(e.to_string()))?;

        Ok(())
    }
}
