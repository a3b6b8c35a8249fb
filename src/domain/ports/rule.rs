//! Rule port.

use crate::domain::models::Finding;

/// A diagnostic rule applied to a job's fetched data.
///
/// Rules are treated as pure functions of the data. Returning `Ok(None)`
/// means the rule abstains; returning `Err` aborts the whole analysis.
/// Nothing inside the pipeline times a rule out, so a rule that may block
/// needs a timeout imposed by the caller.
///
/// # Examples
///
/// ```
/// use jobsight::domain::models::{Finding, Severity};
/// use jobsight::domain::ports::{JobData, Rule};
///
/// struct Tasks(Vec<u64>);
///
/// impl JobData for Tasks {
///     fn is_empty(&self) -> bool {
///         self.0.is_empty()
///     }
/// }
///
/// struct TooManyTasks;
///
/// impl Rule<Tasks> for TooManyTasks {
///     fn class_name(&self) -> &str {
///         "TooManyTasks"
///     }
///
///     fn name(&self) -> &str {
///         "Too Many Tasks"
///     }
///
///     fn apply(&self, data: &Tasks) -> anyhow::Result<Option<Finding>> {
///         if data.0.len() < 1000 {
///             return Ok(None);
///         }
///         Ok(Some(Finding::new(self.class_name(), self.name(), Severity::Moderate, 2)))
///     }
/// }
/// ```
pub trait Rule<D: ?Sized>: Send + Sync {
    /// Stable identifier of the implementation, stored as the rule class.
    fn class_name(&self) -> &str;

    /// Human-readable name, stored as the rule name.
    fn name(&self) -> &str;

    /// Evaluate the job's data.
    ///
    /// `Ok(Some(_))` reports a finding, `Ok(None)` abstains, and `Err`
    /// fails the analysis of this job.
    fn apply(&self, data: &D) -> anyhow::Result<Option<Finding>>;
}
