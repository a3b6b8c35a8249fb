//! Jobsight - diagnostic verdicts for completed cluster jobs
//!
//! Jobsight turns the execution data of a finished distributed-computation
//! job (MapReduce, Spark, ...) into a [`DiagnosticRecord`]: the findings of
//! each applicable rule, an overall severity, a score, and the job's
//! metadata, with every stored field bounded in length.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): job descriptors, findings, records, and
//!   the ports the pipeline consumes (rules, classifier, metrics, scheduler)
//! - **Service Layer** (`services`): rule registry, rule evaluation,
//!   severity aggregation, record assembly, and the [`Analyzer`] pipeline
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging,
//!   and captured job snapshots
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use jobsight::{Analyzer, Finding, JobData, JobDescriptor, JobDescriptorConfig, Rule,
//!                RuleRegistry, Severity};
//!
//! struct Tasks(Vec<u64>);
//!
//! impl JobData for Tasks {
//!     fn is_empty(&self) -> bool {
//!         self.0.is_empty()
//!     }
//! }
//!
//! struct LongTasks;
//!
//! impl Rule<Tasks> for LongTasks {
//!     fn class_name(&self) -> &str { "LongTasks" }
//!     fn name(&self) -> &str { "Long Tasks" }
//!     fn apply(&self, data: &Tasks) -> anyhow::Result<Option<Finding>> {
//!         let long = data.0.iter().filter(|d| **d > 600).count();
//!         Ok((long > 0).then(|| Finding::new("LongTasks", "Long Tasks", Severity::Moderate, 5)))
//!     }
//! }
//!
//! let registry =
//!     RuleRegistry::new().with_rule("mapreduce", Arc::new(LongTasks) as Arc<dyn Rule<Tasks>>);
//! let analyzer = Analyzer::new(registry);
//!
//! let job = JobDescriptor::new(JobDescriptorConfig {
//!     engine_type: "mapreduce".into(),
//!     application_id: "application_1_0001".to_string(),
//!     ..Default::default()
//! });
//!
//! let record = analyzer.analyze(&job, &Tasks(vec![30, 900])).unwrap();
//! assert_eq!(record.severity, Severity::Moderate);
//! assert_eq!(record.score, 5);
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{AnalysisError, AnalysisResult};
pub use domain::models::{
    AggregatedMetrics, Config, DiagnosticRecord, EngineType, Field, FieldLimits, Finding,
    FindingDetail, FindingDetailRecord, FindingRecord, JobDescriptor, JobDescriptorConfig,
    JobType, SchedulerInfo, Severity, RETRY_LIMIT, UNKNOWN_JOB_TYPE,
};
pub use domain::ports::{
    JobConfiguration, JobData, JobTypeClassifier, MetricsAggregator, Rule,
    SchedulerInfoExtractor,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    evaluate_rules, overall_score, overall_severity, Analyzer, ConfiguredJobTypes,
    PropertySchedulerInfo, RecordAssembler, RuleCatalog, RuleRegistry,
};
