//! Persistable diagnosis of one job.
//!
//! A [`DiagnosticRecord`] is what the pipeline hands to storage. All string
//! fields in it have already been cut to their [`FieldLimits`] and both
//! timestamps have already been floored.
//!
//! [`FieldLimits`]: super::field_limits::FieldLimits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::severity::Severity;

/// Job type name used when the classifier finds no match.
pub const UNKNOWN_JOB_TYPE: &str = "Unknown";

/// A finer classification of a job within its engine (e.g. `Pig`, `Hive`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobType {
    name: String,
}

impl JobType {
    /// A job type with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Display name stored on the record.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Resource figures computed outside the pipeline.
///
/// Units are whatever the aggregator uses; the pipeline stores them as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatedMetrics {
    /// Resources the job consumed
    pub resource_used: u64,
    /// Share of `resource_used` that did no useful work
    pub resource_wasted: u64,
    /// Time spent waiting rather than running
    pub total_delay: u64,
}

/// Workflow scheduler execution that launched the job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerInfo {
    /// Scheduler name (e.g. `azkaban`, `oozie`)
    pub scheduler: String,
    /// Scheduler job that submitted this application
    pub job_name: String,
    /// Job definition id, stable across executions
    pub job_def_id: String,
    /// Id of this job execution
    pub job_exec_id: String,
    /// Flow definition id, stable across executions
    pub flow_def_id: String,
    /// Id of this flow execution
    pub flow_exec_id: String,
    /// Link to the job definition
    pub job_def_url: String,
    /// Link to the job execution
    pub job_exec_url: String,
    /// Link to the flow definition
    pub flow_def_url: String,
    /// Link to the flow execution
    pub flow_exec_url: String,
    /// Nesting depth of the flow (0 for a top-level flow)
    pub workflow_depth: u32,
}

/// One detail line of a stored finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingDetailRecord {
    /// Truncated [`FindingDetail::name`](super::finding::FindingDetail::name)
    pub name: String,
    /// Truncated detail value
    pub value: String,
    /// Truncated explanation text
    pub details: String,
}

/// A stored finding. Owns its detail lines in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingRecord {
    /// Rule implementation identifier
    pub rule_class: String,
    /// Rule display name
    pub rule_name: String,
    /// Finding severity
    pub severity: Severity,
    /// Finding score
    pub score: i32,
    /// Detail lines in rule order
    pub details: Vec<FindingDetailRecord>,
}

/// The final diagnosis of one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    /// Application id
    pub id: String,
    /// Resource manager tracking URL
    pub tracking_url: String,
    /// Queue the job ran in
    pub queue_name: String,
    /// User who submitted the job
    pub username: String,
    /// Epoch milliseconds, at least one second
    pub start_time: i64,
    /// Epoch milliseconds, at least one second
    pub finish_time: i64,
    /// Application name
    pub name: String,
    /// Classified job type, or "Unknown"
    pub job_type: String,
    /// See [`AggregatedMetrics::resource_used`]
    pub resource_used: u64,
    /// See [`AggregatedMetrics::resource_wasted`]
    pub resource_wasted: u64,
    /// See [`AggregatedMetrics::total_delay`]
    pub total_delay: u64,
    /// Maximum severity over all findings
    pub severity: Severity,
    /// Sum of all finding scores
    pub score: i64,
    /// Findings in rule evaluation order
    pub findings: Vec<FindingRecord>,
    /// Present when the job was launched by a workflow scheduler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<SchedulerInfo>,
}

impl DiagnosticRecord {
    /// `start_time` as a UTC timestamp.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.start_time)
    }

    /// `finish_time` as a UTC timestamp.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.finish_time)
    }

    /// Wall-clock run time, zero if the finish precedes the start.
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.finish_time.saturating_sub(self.start_time)).unwrap_or(0)
    }

    /// Look up a finding by rule class.
    pub fn finding(&self, rule_class: &str) -> Option<&FindingRecord> {
        self.findings.iter().find(|f| f.rule_class == rule_class)
    }
}
