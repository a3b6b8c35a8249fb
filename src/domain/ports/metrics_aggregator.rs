//! Metrics aggregator port.

use crate::domain::models::AggregatedMetrics;

/// Computes resource usage, waste, and delay for a job.
///
/// The computation itself lives outside the pipeline; the pipeline only
/// stores the result. Implementations are shared across concurrent
/// analyses, so they must either be stateless or synchronize internally.
pub trait MetricsAggregator<D: ?Sized>: Send + Sync {
    /// Resource figures for one job's data.
    fn aggregate(&self, data: &D) -> AggregatedMetrics;
}
