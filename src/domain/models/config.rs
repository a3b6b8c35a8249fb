//! Application configuration model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::field_limits::FieldLimits;

/// Main configuration structure for Jobsight
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Maximum stored length of each record field
    #[serde(default)]
    pub field_limits: FieldLimits,

    /// Ordered rule names per engine type (e.g. `spark: [ExecutorGc, StageSkew]`)
    ///
    /// Keys are case-insensitive and must not collide once upper-cased.
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<String>>,

    /// Job type definitions, checked in order per engine
    #[serde(default)]
    pub job_types: Vec<JobTypeConfig>,

    /// Where scheduler information is read from in a job's configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Rotation of log files: daily, hourly, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            directory: None,
            rotation: default_rotation(),
        }
    }
}

/// One job type definition.
///
/// A job of engine `engine` is of this type when its configuration
/// property `property` is present and fully matches `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JobTypeConfig {
    /// Display name stored on the record (e.g. `Pig`)
    pub name: String,
    /// Engine type this definition applies to
    pub engine: String,
    /// Configuration property to inspect
    pub property: String,
    /// Regular expression the whole property value must match
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_pattern() -> String {
    ".*".to_string()
}

/// Configuration property keys that carry workflow scheduler information.
///
/// Defaults follow the Azkaban property names, where the id and the URL of
/// an entity are the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SchedulerConfig {
    /// Scheduler name written to the record
    pub name: String,
    /// Property holding the scheduler job name
    pub job_name: String,
    /// Property holding the job definition id
    pub job_def_id: String,
    /// Property holding the job execution id
    pub job_exec_id: String,
    /// Property holding the flow definition id
    pub flow_def_id: String,
    /// Property holding the flow execution id
    pub flow_exec_id: String,
    /// Property holding the job definition URL
    pub job_def_url: String,
    /// Property holding the job execution URL
    pub job_exec_url: String,
    /// Property holding the flow definition URL
    pub flow_def_url: String,
    /// Property holding the flow execution URL
    pub flow_exec_url: String,
    /// Property holding the flow nesting depth, if the scheduler sets one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_depth: Option<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            name: "azkaban".to_string(),
            job_name: "azkaban.job.id".to_string(),
            job_def_id: "azkaban.link.job.url".to_string(),
            job_exec_id: "azkaban.link.attempt.url".to_string(),
            flow_def_id: "azkaban.link.workflow.url".to_string(),
            flow_exec_id: "azkaban.link.execution.url".to_string(),
            job_def_url: "azkaban.link.job.url".to_string(),
            job_exec_url: "azkaban.link.attempt.url".to_string(),
            flow_def_url: "azkaban.link.workflow.url".to_string(),
            flow_exec_url: "azkaban.link.execution.url".to_string(),
            workflow_depth: None,
        }
    }
}
