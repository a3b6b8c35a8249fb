//! Scheduler info extractor port.

use crate::domain::models::SchedulerInfo;

/// Finds the workflow scheduler execution that launched a job.
pub trait SchedulerInfoExtractor<D: ?Sized>: Send + Sync {
    /// `None` when the job was not launched by a known scheduler.
    fn extract(&self, data: &D) -> Option<SchedulerInfo>;
}
