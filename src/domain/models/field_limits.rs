//! Per-field maximum lengths shared with the storage schema.
//!
//! [`FieldLimits`] is a plain value passed to the record assembler. Every
//! persisted string goes through [`FieldLimits::truncate`] with its own
//! [`Field`] key; oversize values lose their trailing characters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a length-limited string column.
///
/// Variants mirror the record fields they limit; see [`FieldLimits`] for the
/// limit each one maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Record id (application id)
    Id,
    /// Tracking URL
    TrackingUrl,
    /// Queue name
    QueueName,
    /// Submitting user
    Username,
    /// Application name
    Name,
    /// Classified job type
    JobType,
    /// Finding rule class
    RuleClass,
    /// Finding rule name
    RuleName,
    /// Detail line label
    DetailName,
    /// Detail line value
    DetailValue,
    /// Detail line explanation
    DetailText,
    /// Scheduler name
    Scheduler,
    /// Scheduler job name
    JobName,
    /// Job definition id
    JobDefId,
    /// Job execution id
    JobExecId,
    /// Flow definition id
    FlowDefId,
    /// Flow execution id
    FlowExecId,
    /// Job definition URL
    JobDefUrl,
    /// Job execution URL
    JobExecUrl,
    /// Flow definition URL
    FlowDefUrl,
    /// Flow execution URL
    FlowExecUrl,
}

impl Field {
    /// Snake-case name, matching the [`FieldLimits`] key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::TrackingUrl => "tracking_url",
            Self::QueueName => "queue_name",
            Self::Username => "username",
            Self::Name => "name",
            Self::JobType => "job_type",
            Self::RuleClass => "rule_class",
            Self::RuleName => "rule_name",
            Self::DetailName => "detail_name",
            Self::DetailValue => "detail_value",
            Self::DetailText => "detail_text",
            Self::Scheduler => "scheduler",
            Self::JobName => "job_name",
            Self::JobDefId => "job_def_id",
            Self::JobExecId => "job_exec_id",
            Self::FlowDefId => "flow_def_id",
            Self::FlowExecId => "flow_exec_id",
            Self::JobDefUrl => "job_def_url",
            Self::JobExecUrl => "job_exec_url",
            Self::FlowDefUrl => "flow_def_url",
            Self::FlowExecUrl => "flow_exec_url",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maximum character length of every persisted string field.
///
/// Each limit applies to the [`Field`] of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FieldLimits {
    /// Default 50
    pub id: usize,
    /// Default 255
    pub tracking_url: usize,
    /// Default 50
    pub queue_name: usize,
    /// Default 50
    pub username: usize,
    /// Default 100
    pub name: usize,
    /// Default 20
    pub job_type: usize,
    /// Default 255
    pub rule_class: usize,
    /// Default 128
    pub rule_name: usize,
    /// Default 128
    pub detail_name: usize,
    /// Default 255
    pub detail_value: usize,
    /// Default 65535, the size of a text column
    pub detail_text: usize,
    /// Default 20
    pub scheduler: usize,
    /// Default 255
    pub job_name: usize,
    /// Shared by job/flow definition and execution ids
    pub scheduler_id: usize,
    /// Shared by job/flow definition and execution URLs
    pub scheduler_url: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            id: 50,
            tracking_url: 255,
            queue_name: 50,
            username: 50,
            name: 100,
            job_type: 20,
            rule_class: 255,
            rule_name: 128,
            detail_name: 128,
            detail_value: 255,
            detail_text: 65535,
            scheduler: 20,
            job_name: 255,
            scheduler_id: 255,
            scheduler_url: 800,
        }
    }
}

impl FieldLimits {
    /// Maximum number of characters stored for `field`.
    pub fn limit(&self, field: Field) -> usize {
        match field {
            Field::Id => self.id,
            Field::TrackingUrl => self.tracking_url,
            Field::QueueName => self.queue_name,
            Field::Username => self.username,
            Field::Name => self.name,
            Field::JobType => self.job_type,
            Field::RuleClass => self.rule_class,
            Field::RuleName => self.rule_name,
            Field::DetailName => self.detail_name,
            Field::DetailValue => self.detail_value,
            Field::DetailText => self.detail_text,
            Field::Scheduler => self.scheduler,
            Field::JobName => self.job_name,
            Field::JobDefId | Field::JobExecId | Field::FlowDefId | Field::FlowExecId => {
                self.scheduler_id
            }
            Field::JobDefUrl | Field::JobExecUrl | Field::FlowDefUrl | Field::FlowExecUrl => {
                self.scheduler_url
            }
        }
    }

    /// Named limits, in declaration order, for validation and display.
    pub fn entries(&self) -> [(&'static str, usize); 15] {
        [
            ("id", self.id),
            ("tracking_url", self.tracking_url),
            ("queue_name", self.queue_name),
            ("username", self.username),
            ("name", self.name),
            ("job_type", self.job_type),
            ("rule_class", self.rule_class),
            ("rule_name", self.rule_name),
            ("detail_name", self.detail_name),
            ("detail_value", self.detail_value),
            ("detail_text", self.detail_text),
            ("scheduler", self.scheduler),
            ("job_name", self.job_name),
            ("scheduler_id", self.scheduler_id),
            ("scheduler_url", self.scheduler_url),
        ]
    }

    /// Cut `value` down to the limit of `field`.
    ///
    /// Counts characters, not bytes, so multi-byte text is never split.
    /// `application_id` only labels the debug event emitted on truncation.
    pub fn truncate(&self, field: Field, value: &str, application_id: &str) -> String {
        let limit = self.limit(field);
        match value.char_indices().nth(limit) {
            None => value.to_string(),
            Some((cut, _)) => {
                tracing::debug!(
                    application_id = %application_id,
                    field = %field,
                    limit = limit,
                    original_chars = value.chars().count(),
                    "Truncating field"
                );
                value[..cut].to_string()
            }
        }
    }

    /// Truncate an optional value, leaving `None` untouched.
    pub fn truncate_opt(
        &self,
        field: Field,
        value: Option<&str>,
        application_id: &str,
    ) -> Option<String> {
        value.map(|v| self.truncate(field, v, application_id))
    }
}
