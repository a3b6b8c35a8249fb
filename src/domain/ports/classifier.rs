//! Job type classifier port.

use crate::domain::models::JobType;

/// Derives a job's [`JobType`] from its fetched data.
pub trait JobTypeClassifier<D: ?Sized>: Send + Sync {
    /// `None` when no known job type matches; the record then says "Unknown".
    fn classify(&self, data: &D) -> Option<JobType>;
}
