//! Common test utilities for integration tests
//!
//! Provides shared fixtures used across the integration test files: a small
//! job data type, rules with fixed outcomes, and descriptor builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jobsight::{
    EngineType, Finding, JobConfiguration, JobData, JobDescriptor, JobDescriptorConfig, Rule,
    Severity,
};

/// Fetched data of a test job: task durations plus configuration properties.
#[derive(Debug, Clone, Default)]
pub struct Tasks {
    pub engine: EngineType,
    pub durations: Vec<u64>,
    pub properties: HashMap<String, String>,
}

impl Tasks {
    pub fn new(engine: &str, durations: &[u64]) -> Self {
        Self {
            engine: EngineType::new(engine),
            durations: durations.to_vec(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }
}

impl JobData for Tasks {
    fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }
}

impl JobConfiguration for Tasks {
    fn engine_type(&self) -> &EngineType {
        &self.engine
    }

    fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// A rule that always reports the same severity and score, and counts its calls.
pub struct FixedRule {
    pub class_name: String,
    pub severity: Severity,
    pub score: i32,
    pub calls: AtomicUsize,
}

impl FixedRule {
    pub fn new(class_name: &str, severity: Severity, score: i32) -> Arc<Self> {
        Arc::new(Self {
            class_name: class_name.to_string(),
            severity,
            score,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Rule<Tasks> for FixedRule {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn name(&self) -> &str {
        &self.class_name
    }

    fn apply(&self, _data: &Tasks) -> anyhow::Result<Option<Finding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Finding::new(
            &self.class_name,
            &self.class_name,
            self.severity,
            self.score,
        )))
    }
}

/// Scores the longest task duration, abstaining on short jobs.
pub struct LongestTask;

impl Rule<Tasks> for LongestTask {
    fn class_name(&self) -> &str {
        "LongestTask"
    }

    fn name(&self) -> &str {
        "Longest Task"
    }

    fn apply(&self, data: &Tasks) -> anyhow::Result<Option<Finding>> {
        let longest = data.durations.iter().copied().max().unwrap_or(0);
        if longest < 60 {
            return Ok(None);
        }
        let severity = if longest > 3600 {
            Severity::Critical
        } else {
            Severity::Moderate
        };
        Ok(Some(Finding::new(
            self.class_name(),
            self.name(),
            severity,
            i32::try_from(longest)?,
        )))
    }
}

/// A rule whose every application fails.
pub struct FailingRule;

impl Rule<Tasks> for FailingRule {
    fn class_name(&self) -> &str {
        "FailingRule"
    }

    fn name(&self) -> &str {
        "Failing Rule"
    }

    fn apply(&self, _data: &Tasks) -> anyhow::Result<Option<Finding>> {
        anyhow::bail!("task counters are missing")
    }
}

/// Descriptor for a job of `engine` with the given application id.
pub fn job(engine: &str, application_id: &str) -> JobDescriptor {
    JobDescriptor::new(JobDescriptorConfig {
        engine_type: engine.into(),
        application_id: application_id.to_string(),
        name: format!("job {application_id}"),
        queue_name: "default".to_string(),
        user: "tester".to_string(),
        tracking_url: format!("http://rm:8088/proxy/{application_id}/"),
        start_time: 1_700_000_000_000,
        finish_time: 1_700_000_060_000,
    })
}

/// Setup test logging
///
/// Initializes a tracing subscriber writing to the test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
