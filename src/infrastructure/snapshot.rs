//! Captured job snapshots.
//!
//! A snapshot is a JSON document holding everything the pipeline needs for
//! one job: the descriptor fields, the job configuration properties, metrics
//! computed elsewhere, and the outcome each rule produced when the job was
//! captured. The CLI replays a snapshot through the pipeline with
//! [`RecordedRule`]s standing in for the real rule implementations.
//!
//! ```json
//! {
//!   "engine_type": "mapreduce",
//!   "application_id": "application_1_0042",
//!   "user": "alice",
//!   "start_time": 1700000000000,
//!   "finish_time": 1700000600000,
//!   "data": {
//!     "properties": { "pig.script": "etl.pig" },
//!     "metrics": { "resource_used": 4096 },
//!     "results": {
//!       "MapperSkew": { "rule_class": "MapperSkew", "rule_name": "Mapper Skew",
//!                       "severity": "moderate", "score": 12 },
//!       "MapperGc": null
//!     }
//!   }
//! }
//! ```
//!
//! A snapshot without `data` stands for a job the history service returned
//! nothing for.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::models::{
    AggregatedMetrics, EngineType, Finding, JobDescriptor, JobDescriptorConfig,
};
use crate::domain::ports::{JobConfiguration, JobData, MetricsAggregator, Rule};
use crate::services::RuleCatalog;

/// On-disk form of a captured job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSnapshot {
    /// Descriptor fields, inlined at the top level
    #[serde(flatten)]
    pub job: JobDescriptorConfig,

    /// Fetched execution data; absent when nothing was returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CapturedData>,
}

/// Execution data section of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapturedData {
    /// Job configuration properties
    pub properties: BTreeMap<String, String>,
    /// Resource figures computed when the job was captured
    pub metrics: AggregatedMetrics,
    /// Finding per rule class; `null` means the rule abstained
    pub results: BTreeMap<String, Option<Finding>>,
    /// Error message per rule class for rules that failed
    pub failures: BTreeMap<String, String>,
}

impl JobSnapshot {
    /// Read a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Invalid snapshot JSON")
    }

    /// Split into the descriptor and the data the rules see.
    pub fn into_parts(self) -> (JobDescriptor, SnapshotData) {
        let engine = self.job.engine_type.clone();
        let job = JobDescriptor::new(self.job);
        let data = SnapshotData {
            engine,
            captured: self.data,
        };
        (job, data)
    }
}

/// Fetched data of a replayed job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotData {
    engine: EngineType,
    captured: Option<CapturedData>,
}

impl SnapshotData {
    /// Data for an `engine` job; `None` stands for an empty fetch.
    pub fn new(engine: impl Into<EngineType>, captured: Option<CapturedData>) -> Self {
        Self {
            engine: engine.into(),
            captured,
        }
    }

    /// Captured metrics, zero when nothing was captured.
    pub fn metrics(&self) -> AggregatedMetrics {
        self.captured
            .as_ref()
            .map(|captured| captured.metrics)
            .unwrap_or_default()
    }

    fn captured(&self) -> Option<&CapturedData> {
        self.captured.as_ref()
    }
}

impl JobData for SnapshotData {
    fn is_empty(&self) -> bool {
        self.captured.is_none()
    }
}

impl JobConfiguration for SnapshotData {
    fn engine_type(&self) -> &EngineType {
        &self.engine
    }

    fn property(&self, key: &str) -> Option<&str> {
        self.captured()?.properties.get(key).map(String::as_str)
    }
}

/// Replays the outcome a rule produced when the snapshot was captured.
///
/// A rule with no recorded outcome abstains.
#[derive(Debug, Clone)]
pub struct RecordedRule {
    class_name: String,
}

impl RecordedRule {
    /// Replay the outcome recorded under `class_name`.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }

    /// A catalog holding one recorded rule for every rule name in a
    /// configured rule table.
    pub fn catalog(table: &BTreeMap<String, Vec<String>>) -> RuleCatalog<SnapshotData> {
        let mut catalog = RuleCatalog::new();
        for name in table.values().flatten() {
            if catalog.get(name).is_none() {
                catalog.add(Arc::new(Self::new(name.clone())) as Arc<dyn Rule<SnapshotData>>);
            }
        }
        catalog
    }
}

impl Rule<SnapshotData> for RecordedRule {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn name(&self) -> &str {
        &self.class_name
    }

    fn apply(&self, data: &SnapshotData) -> Result<Option<Finding>> {
        let Some(captured) = data.captured() else {
            return Ok(None);
        };
        if let Some(message) = captured.failures.get(&self.class_name) {
            anyhow::bail!("{message}");
        }
        Ok(captured.results.get(&self.class_name).cloned().flatten())
    }
}

/// Reports the metrics stored in the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotMetrics;

impl MetricsAggregator<SnapshotData> for SnapshotMetrics {
    fn aggregate(&self, data: &SnapshotData) -> AggregatedMetrics {
        data.metrics()
    }
}
