//! Job descriptor domain model.
//!
//! A [`JobDescriptor`] wraps the metadata of one completed application run
//! as discovered by a scheduler, together with the bounded retry budget that
//! scheduler spends while trying to fetch and analyze it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of times a job may be retried before it is dropped.
pub const RETRY_LIMIT: u32 = 3;

/// Smallest timestamp (epoch milliseconds) a descriptor will carry.
///
/// The store's timestamp column starts at `FROM_UNIXTIME(1)`, so zero and
/// negative values are replaced by one second past the epoch.
pub const TIMESTAMP_FLOOR_MS: i64 = 1000;

/// Replace a non-positive epoch-millisecond timestamp with [`TIMESTAMP_FLOOR_MS`].
///
/// This is a fixed sentinel, not a clamp to the current time: positive
/// values below the floor are kept as they are.
pub const fn floor_timestamp(millis: i64) -> i64 {
    if millis <= 0 {
        TIMESTAMP_FLOOR_MS
    } else {
        millis
    }
}

/// The distributed-computation framework that produced a job.
///
/// Names are case-insensitive and normalized to upper case, so `"spark"`
/// and `"SPARK"` are the same engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EngineType(String);

impl EngineType {
    /// Normalize `name`: surrounding whitespace is dropped, the rest upper-cased.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_uppercase())
    }

    /// Normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EngineType {
    fn default() -> Self {
        Self::new("UNKNOWN")
    }
}

impl From<String> for EngineType {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for EngineType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<EngineType> for String {
    fn from(engine: EngineType) -> Self {
        engine.0
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named fields used to create a [`JobDescriptor`].
///
/// Every field has a default: empty strings, the default engine type, and
/// timestamps of `0`, which the descriptor floors to [`TIMESTAMP_FLOOR_MS`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct JobDescriptorConfig {
    /// Engine that ran the job (e.g. `MAPREDUCE`, `SPARK`)
    pub engine_type: EngineType,
    /// Application id assigned by the resource manager
    pub application_id: String,
    /// Application name
    pub name: String,
    /// Queue the job was submitted to
    pub queue_name: String,
    /// User who ran the job
    pub user: String,
    /// Tracking URL in the resource manager
    pub tracking_url: String,
    /// Submission time in epoch milliseconds
    pub start_time: i64,
    /// Finish time in epoch milliseconds
    pub finish_time: i64,
}

/// Metadata of a completed job plus its retry budget.
///
/// Identity and metadata are fixed at creation; the only mutation is
/// [`retry`](Self::retry). A descriptor belongs to a single processing
/// sequence and must not be retried from two callers at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDescriptor {
    engine_type: EngineType,
    application_id: String,
    name: String,
    queue_name: String,
    user: String,
    tracking_url: String,
    start_time: i64,
    finish_time: i64,
    retries: u32,
}

impl JobDescriptor {
    /// Create a descriptor, flooring both timestamps.
    pub fn new(config: JobDescriptorConfig) -> Self {
        Self {
            engine_type: config.engine_type,
            application_id: config.application_id,
            name: config.name,
            queue_name: config.queue_name,
            user: config.user,
            tracking_url: config.tracking_url,
            start_time: floor_timestamp(config.start_time),
            finish_time: floor_timestamp(config.finish_time),
            retries: 0,
        }
    }

    /// Engine that ran the job; selects the rule list.
    pub fn engine_type(&self) -> &EngineType {
        &self.engine_type
    }

    /// Application id, the job's identity and the record id.
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Application name as submitted.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue the job ran in.
    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// User who submitted the job.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Resource manager tracking URL.
    pub fn tracking_url(&self) -> &str {
        &self.tracking_url
    }

    /// Submission time in epoch milliseconds, never below the floor.
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    /// Finish time in epoch milliseconds, never below the floor.
    pub fn finish_time(&self) -> i64 {
        self.finish_time
    }

    /// Number of times [`retry`](Self::retry) has been called.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Check whether another retry is still available without spending it.
    pub fn can_retry(&self) -> bool {
        self.retries < RETRY_LIMIT
    }

    /// Spend one retry.
    ///
    /// Returns `true` for the first [`RETRY_LIMIT`] calls and `false` on
    /// every call after that. Once this returns `false` the job should be
    /// dropped. Analysis failures do not call this; the scheduler decides.
    pub fn retry(&mut self) -> bool {
        let attempt = self.retries;
        self.retries = self.retries.saturating_add(1);
        attempt < RETRY_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor_with_times(start_time: i64, finish_time: i64) -> JobDescriptor {
        JobDescriptor::new(JobDescriptorConfig {
            application_id: "application_1_0001".to_string(),
            start_time,
            finish_time,
            ..Default::default()
        })
    }

    #[test]
    fn test_retry_budget_is_exhausted_after_limit() {
        let mut job = descriptor_with_times(5000, 6000);
        let outcomes: Vec<bool> = (0..=RETRY_LIMIT).map(|_| job.retry()).collect();
        assert_eq!(outcomes, vec![true, true, true, false]);
        assert!(!job.retry());
        assert!(!job.retry());
        assert!(!job.can_retry());
    }

    #[test]
    fn test_can_retry_does_not_spend() {
        let job = descriptor_with_times(5000, 6000);
        assert!(job.can_retry());
        assert_eq!(job.retries(), 0);
    }

    #[test]
    fn test_start_time_floor() {
        assert_eq!(descriptor_with_times(0, 0).start_time(), 1000);
        assert_eq!(descriptor_with_times(-5, 0).start_time(), 1000);
        assert_eq!(descriptor_with_times(1000, 0).start_time(), 1000);
        assert_eq!(descriptor_with_times(5000, 0).start_time(), 5000);
    }

    #[test]
    fn test_finish_time_floor() {
        assert_eq!(descriptor_with_times(0, 0).finish_time(), 1000);
        assert_eq!(descriptor_with_times(0, -1).finish_time(), 1000);
        assert_eq!(descriptor_with_times(0, 42).finish_time(), 42);
    }

    #[test]
    fn test_engine_type_normalized() {
        assert_eq!(EngineType::new(" spark "), EngineType::new("SPARK"));
        assert_eq!(EngineType::from("mapreduce").as_str(), "MAPREDUCE");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: JobDescriptorConfig = serde_json::from_str(
            r#"{"engine_type": "spark", "application_id": "application_7_0002"}"#,
        )
        .unwrap();
        let job = JobDescriptor::new(config);
        assert_eq!(job.engine_type().as_str(), "SPARK");
        assert_eq!(job.application_id(), "application_7_0002");
        assert_eq!(job.queue_name(), "");
        assert_eq!(job.start_time(), TIMESTAMP_FLOOR_MS);
    }
}
