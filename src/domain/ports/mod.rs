//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the collaborators the analysis pipeline consumes:
//! - JobData / JobConfiguration: fetched execution data
//! - Rule: one diagnostic rule
//! - JobTypeClassifier: job type lookup
//! - MetricsAggregator: resource usage, waste, and delay
//! - SchedulerInfoExtractor: workflow scheduler lookup
//!
//! These traits keep the pipeline independent of any particular history
//! service, rule set, or scheduler.

pub mod classifier;
pub mod job_data;
pub mod metrics_aggregator;
pub mod null;
pub mod rule;
pub mod scheduler_info;

pub use classifier::JobTypeClassifier;
pub use job_data::{JobConfiguration, JobData};
pub use metrics_aggregator::MetricsAggregator;
pub use null::{NullAggregator, NullClassifier, NullSchedulerInfo};
pub use rule::Rule;
pub use scheduler_info::SchedulerInfoExtractor;
