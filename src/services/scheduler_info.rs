//! Property-based scheduler info extractor.
//!
//! Reads workflow scheduler identifiers and links from a job's
//! configuration properties. Which property holds which value is set by the
//! `scheduler` section of the configuration.

use crate::domain::models::{SchedulerConfig, SchedulerInfo};
use crate::domain::ports::{JobConfiguration, SchedulerInfoExtractor};

/// Extracts [`SchedulerInfo`] from configuration properties.
///
/// A job counts as scheduler-launched when either its job definition id or
/// its flow execution id property is set. Other missing properties are
/// stored as empty strings and an unparsable depth as `0`.
#[derive(Debug, Clone, Default)]
pub struct PropertySchedulerInfo {
    keys: SchedulerConfig,
}

impl PropertySchedulerInfo {
    /// Read scheduler fields from the properties named by `keys`.
    pub fn new(keys: SchedulerConfig) -> Self {
        Self { keys }
    }
}

impl<D> SchedulerInfoExtractor<D> for PropertySchedulerInfo
where
    D: JobConfiguration + ?Sized,
{
    fn extract(&self, data: &D) -> Option<SchedulerInfo> {
        let keys = &self.keys;
        if data.property(&keys.job_def_id).is_none() && data.property(&keys.flow_exec_id).is_none()
        {
            return None;
        }

        let read = |key: &str| data.property(key).unwrap_or_default().to_string();
        let workflow_depth = keys
            .workflow_depth
            .as_deref()
            .and_then(|key| data.property(key))
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0);

        Some(SchedulerInfo {
            scheduler: keys.name.clone(),
            job_name: read(&keys.job_name),
            job_def_id: read(&keys.job_def_id),
            job_exec_id: read(&keys.job_exec_id),
            flow_def_id: read(&keys.flow_def_id),
            flow_exec_id: read(&keys.flow_exec_id),
            job_def_url: read(&keys.job_def_url),
            job_exec_url: read(&keys.job_exec_url),
            flow_def_url: read(&keys.flow_def_url),
            flow_exec_url: read(&keys.flow_exec_url),
            workflow_depth,
        })
    }
}
