//! Domain models: jobs, findings, severities, and the records built from them.

pub mod config;
pub mod field_limits;
pub mod finding;
pub mod job;
pub mod record;
pub mod severity;

pub use config::{Config, JobTypeConfig, LoggingConfig, SchedulerConfig};
pub use field_limits::{Field, FieldLimits};
pub use finding::{Finding, FindingDetail, NO_DATA_RULE_CLASS, NO_DATA_RULE_NAME};
pub use job::{
    floor_timestamp, EngineType, JobDescriptor, JobDescriptorConfig, RETRY_LIMIT,
    TIMESTAMP_FLOOR_MS,
};
pub use record::{
    AggregatedMetrics, DiagnosticRecord, FindingDetailRecord, FindingRecord, JobType,
    SchedulerInfo, UNKNOWN_JOB_TYPE,
};
pub use severity::Severity;
