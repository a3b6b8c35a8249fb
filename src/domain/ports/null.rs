//! Null collaborator implementations.
//!
//! Used when a deployment has no classifier, no metrics aggregator, or no
//! scheduler integration, but the analyzer still needs an implementation.

use crate::domain::models::{AggregatedMetrics, JobType, SchedulerInfo};

use super::{JobTypeClassifier, MetricsAggregator, SchedulerInfoExtractor};

/// A classifier that never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClassifier;

impl<D: ?Sized> JobTypeClassifier<D> for NullClassifier {
    fn classify(&self, _data: &D) -> Option<JobType> {
        None
    }
}

/// An aggregator that reports zero for every figure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAggregator;

impl<D: ?Sized> MetricsAggregator<D> for NullAggregator {
    fn aggregate(&self, _data: &D) -> AggregatedMetrics {
        AggregatedMetrics::default()
    }
}

/// An extractor that never finds scheduler information.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSchedulerInfo;

impl<D: ?Sized> SchedulerInfoExtractor<D> for NullSchedulerInfo {
    fn extract(&self, _data: &D) -> Option<SchedulerInfo> {
        None
    }
}
