//! Fetched execution data port.

use crate::domain::models::EngineType;

/// Execution data fetched for one job.
///
/// The pipeline only asks whether the data is empty; everything else is
/// opaque to it and handed to the rules as is.
pub trait JobData {
    /// True when the history service returned nothing worth analyzing
    /// (e.g. a MapReduce job with no mappers and no reducers).
    fn is_empty(&self) -> bool;
}

/// Data that also exposes its engine type and configuration properties.
///
/// Required by the configured job type classifier and the property-based
/// scheduler info extractor.
pub trait JobConfiguration: JobData {
    /// Engine that ran the job.
    fn engine_type(&self) -> &EngineType;

    /// Value of a job configuration property, if set.
    fn property(&self, key: &str) -> Option<&str>;
}
