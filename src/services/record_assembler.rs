//! Record assembly.
//!
//! Builds the persistable [`DiagnosticRecord`] from a job descriptor, its
//! findings, and the outputs of the classifier, metrics aggregator, and
//! scheduler extractor. Every string goes through [`FieldLimits::truncate`]
//! with its own field key.

use crate::domain::models::{
    AggregatedMetrics, DiagnosticRecord, Field, FieldLimits, Finding, FindingDetailRecord,
    FindingRecord, JobDescriptor, JobType, SchedulerInfo, UNKNOWN_JOB_TYPE,
};

use super::severity_aggregator::Verdict;

/// Everything the assembler combines into one record.
#[derive(Debug, Clone)]
pub struct AssemblyInput<'a> {
    /// Job being recorded
    pub job: &'a JobDescriptor,
    /// Rule outputs in evaluation order
    pub findings: &'a [Finding],
    /// Classifier output; `None` is stored as "Unknown"
    pub job_type: Option<&'a JobType>,
    /// Aggregator output, stored as is
    pub metrics: AggregatedMetrics,
    /// Extractor output; `None` leaves the scheduler section out
    pub scheduler: Option<&'a SchedulerInfo>,
}

/// Maps analysis outputs onto a size-bounded [`DiagnosticRecord`].
#[derive(Debug, Clone, Default)]
pub struct RecordAssembler {
    limits: FieldLimits,
}

impl RecordAssembler {
    /// An assembler that truncates to `limits`.
    pub fn new(limits: FieldLimits) -> Self {
        Self { limits }
    }

    /// Limits applied to every string field.
    pub fn limits(&self) -> &FieldLimits {
        &self.limits
    }

    /// Build the record. The severity is the maximum and the score the sum
    /// over `input.findings`; every string is cut to its field limit.
    pub fn assemble(&self, input: &AssemblyInput<'_>) -> DiagnosticRecord {
        let job = input.job;
        let app_id = job.application_id();
        let verdict = Verdict::from_findings(input.findings);
        let job_type = input.job_type.map_or(UNKNOWN_JOB_TYPE, JobType::name);

        let record = DiagnosticRecord {
            id: self.limits.truncate(Field::Id, app_id, app_id),
            tracking_url: self
                .limits
                .truncate(Field::TrackingUrl, job.tracking_url(), app_id),
            queue_name: self.limits.truncate(Field::QueueName, job.queue_name(), app_id),
            username: self.limits.truncate(Field::Username, job.user(), app_id),
            start_time: job.start_time(),
            finish_time: job.finish_time(),
            name: self.limits.truncate(Field::Name, job.name(), app_id),
            job_type: self.limits.truncate(Field::JobType, job_type, app_id),
            resource_used: input.metrics.resource_used,
            resource_wasted: input.metrics.resource_wasted,
            total_delay: input.metrics.total_delay,
            severity: verdict.severity,
            score: verdict.score,
            findings: input
                .findings
                .iter()
                .map(|finding| self.finding_record(finding, app_id))
                .collect(),
            scheduler: input
                .scheduler
                .map(|info| self.scheduler_info(info, app_id)),
        };

        tracing::info!(
            application_id = %app_id,
            severity = %record.severity,
            score = record.score,
            findings = record.findings.len(),
            job_type = %record.job_type,
            "Assembled diagnostic record"
        );

        record
    }

    fn finding_record(&self, finding: &Finding, app_id: &str) -> FindingRecord {
        FindingRecord {
            rule_class: self
                .limits
                .truncate(Field::RuleClass, &finding.rule_class, app_id),
            rule_name: self
                .limits
                .truncate(Field::RuleName, &finding.rule_name, app_id),
            severity: finding.severity,
            score: finding.score,
            details: finding
                .details
                .iter()
                .map(|detail| FindingDetailRecord {
                    name: self.limits.truncate(Field::DetailName, &detail.name, app_id),
                    value: self
                        .limits
                        .truncate(Field::DetailValue, &detail.value, app_id),
                    details: self
                        .limits
                        .truncate(Field::DetailText, &detail.details, app_id),
                })
                .collect(),
        }
    }

    fn scheduler_info(&self, info: &SchedulerInfo, app_id: &str) -> SchedulerInfo {
        let cut = |field, value: &str| self.limits.truncate(field, value, app_id);
        SchedulerInfo {
            scheduler: cut(Field::Scheduler, &info.scheduler),
            job_name: cut(Field::JobName, &info.job_name),
            job_def_id: cut(Field::JobDefId, &info.job_def_id),
            job_exec_id: cut(Field::JobExecId, &info.job_exec_id),
            flow_def_id: cut(Field::FlowDefId, &info.flow_def_id),
            flow_exec_id: cut(Field::FlowExecId, &info.flow_exec_id),
            job_def_url: cut(Field::JobDefUrl, &info.job_def_url),
            job_exec_url: cut(Field::JobExecUrl, &info.job_exec_url),
            flow_def_url: cut(Field::FlowDefUrl, &info.flow_def_url),
            flow_exec_url: cut(Field::FlowExecUrl, &info.flow_exec_url),
            workflow_depth: info.workflow_depth,
        }
    }
}
