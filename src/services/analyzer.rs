//! The analysis pipeline.
//!
//! [`Analyzer`] turns one job's descriptor and fetched data into a
//! [`DiagnosticRecord`]:
//!
//! 1. evaluate the engine's rules (or record the no-data sentinel),
//! 2. classify the job type,
//! 3. aggregate resource metrics,
//! 4. extract scheduler information,
//! 5. assemble the size-bounded record.
//!
//! An analyzer holds no per-job state. It can be shared between worker
//! threads as long as its collaborators are stateless or synchronize
//! internally, and each worker owns the descriptor it analyzes.
//!
//! ## Usage
//!
//! ```ignore
//! let analyzer = Analyzer::new(registry)
//!     .with_classifier(Arc::new(ConfiguredJobTypes::from_config(&config.job_types)?))
//!     .with_scheduler_info(Arc::new(PropertySchedulerInfo::new(config.scheduler.clone())))
//!     .with_field_limits(config.field_limits.clone());
//!
//! let record = analyzer.analyze(&job, &data)?;
//! ```

use std::fmt;
use std::sync::Arc;

use crate::domain::errors::AnalysisResult;
use crate::domain::models::{DiagnosticRecord, FieldLimits, JobDescriptor};
use crate::domain::ports::{
    JobData, JobTypeClassifier, MetricsAggregator, NullAggregator, NullClassifier,
    NullSchedulerInfo, SchedulerInfoExtractor,
};

use super::record_assembler::{AssemblyInput, RecordAssembler};
use super::rule_evaluation::evaluate_rules;
use super::rule_registry::RuleRegistry;

/// Runs the full analysis pipeline for jobs whose data is of type `D`.
pub struct Analyzer<D: ?Sized> {
    registry: RuleRegistry<D>,
    classifier: Arc<dyn JobTypeClassifier<D>>,
    aggregator: Arc<dyn MetricsAggregator<D>>,
    scheduler_info: Arc<dyn SchedulerInfoExtractor<D>>,
    assembler: RecordAssembler,
}

impl<D: ?Sized> fmt::Debug for Analyzer<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("registry", &self.registry)
            .field("assembler", &self.assembler)
            .finish_non_exhaustive()
    }
}

impl<D: JobData + ?Sized> Analyzer<D> {
    /// Create an analyzer with no classifier, zero metrics, no scheduler
    /// integration, and the default field limits.
    pub fn new(registry: RuleRegistry<D>) -> Self {
        Self {
            registry,
            classifier: Arc::new(NullClassifier),
            aggregator: Arc::new(NullAggregator),
            scheduler_info: Arc::new(NullSchedulerInfo),
            assembler: RecordAssembler::default(),
        }
    }

    /// Use `classifier` to derive the job type.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn JobTypeClassifier<D>>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Use `aggregator` for the resource figures.
    #[must_use]
    pub fn with_aggregator(mut self, aggregator: Arc<dyn MetricsAggregator<D>>) -> Self {
        self.aggregator = aggregator;
        self
    }

    /// Use `extractor` to find the launching scheduler execution.
    #[must_use]
    pub fn with_scheduler_info(mut self, extractor: Arc<dyn SchedulerInfoExtractor<D>>) -> Self {
        self.scheduler_info = extractor;
        self
    }

    /// Truncate record fields to `limits` instead of the defaults.
    #[must_use]
    pub fn with_field_limits(mut self, limits: FieldLimits) -> Self {
        self.assembler = RecordAssembler::new(limits);
        self
    }

    /// Rules this analyzer evaluates.
    pub fn registry(&self) -> &RuleRegistry<D> {
        &self.registry
    }

    /// Analyze one job.
    ///
    /// Fails only when a rule fails, in which case nothing else runs and no
    /// record is produced. The descriptor's retry budget is left untouched.
    pub fn analyze(&self, job: &JobDescriptor, data: &D) -> AnalysisResult<DiagnosticRecord> {
        let findings = evaluate_rules(job, data, &self.registry)?;

        let job_type = self.classifier.classify(data);
        if job_type.is_none() {
            tracing::debug!(
                application_id = %job.application_id(),
                engine = %job.engine_type(),
                "No job type matched"
            );
        }
        let metrics = self.aggregator.aggregate(data);
        let scheduler = self.scheduler_info.extract(data);

        Ok(self.assembler.assemble(&AssemblyInput {
            job,
            findings: &findings,
            job_type: job_type.as_ref(),
            metrics,
            scheduler: scheduler.as_ref(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        AggregatedMetrics, Finding, JobDescriptorConfig, JobType, Severity, UNKNOWN_JOB_TYPE,
    };
    use crate::domain::ports::Rule;

    struct Tasks {
        durations: Vec<u64>,
    }

    impl JobData for Tasks {
        fn is_empty(&self) -> bool {
            self.durations.is_empty()
        }
    }

    struct SlowTasks;

    impl Rule<Tasks> for SlowTasks {
        fn class_name(&self) -> &str {
            "SlowTasks"
        }

        fn name(&self) -> &str {
            "Slow Tasks"
        }

        fn apply(&self, data: &Tasks) -> anyhow::Result<Option<Finding>> {
            let slow = data.durations.iter().filter(|d| **d > 60).count();
            if slow == 0 {
                return Ok(None);
            }
            Ok(Some(Finding::new(
                self.class_name(),
                self.name(),
                Severity::Moderate,
                i32::try_from(slow)?,
            )))
        }
    }

    struct Failing;

    impl Rule<Tasks> for Failing {
        fn class_name(&self) -> &str {
            "Failing"
        }

        fn name(&self) -> &str {
            "Failing"
        }

        fn apply(&self, _data: &Tasks) -> anyhow::Result<Option<Finding>> {
            anyhow::bail!("history data is inconsistent")
        }
    }

    struct TaskCount;

    impl MetricsAggregator<Tasks> for TaskCount {
        fn aggregate(&self, data: &Tasks) -> AggregatedMetrics {
            AggregatedMetrics {
                resource_used: data.durations.iter().sum(),
                resource_wasted: 0,
                total_delay: 5,
            }
        }
    }

    struct AlwaysPig;

    impl JobTypeClassifier<Tasks> for AlwaysPig {
        fn classify(&self, _data: &Tasks) -> Option<JobType> {
            Some(JobType::new("Pig"))
        }
    }

    fn job() -> JobDescriptor {
        JobDescriptor::new(JobDescriptorConfig {
            engine_type: "mapreduce".into(),
            application_id: "application_1_0007".to_string(),
            user: "carol".to_string(),
            ..Default::default()
        })
    }

    fn registry() -> RuleRegistry<Tasks> {
        RuleRegistry::new().with_rule("mapreduce", Arc::new(SlowTasks) as Arc<dyn Rule<Tasks>>)
    }

    #[test]
    fn test_full_pipeline() {
        let analyzer = Analyzer::new(registry())
            .with_classifier(Arc::new(AlwaysPig))
            .with_aggregator(Arc::new(TaskCount));

        let data = Tasks {
            durations: vec![10, 90, 120],
        };
        let record = analyzer.analyze(&job(), &data).unwrap();

        assert_eq!(record.id, "application_1_0007");
        assert_eq!(record.username, "carol");
        assert_eq!(record.job_type, "Pig");
        assert_eq!(record.severity, Severity::Moderate);
        assert_eq!(record.score, 2);
        assert_eq!(record.resource_used, 220);
        assert_eq!(record.total_delay, 5);
        assert_eq!(record.findings.len(), 1);
    }

    #[test]
    fn test_defaults_without_collaborators() {
        let analyzer = Analyzer::new(registry());
        let record = analyzer
            .analyze(&job(), &Tasks { durations: vec![1] })
            .unwrap();

        assert_eq!(record.job_type, UNKNOWN_JOB_TYPE);
        assert_eq!(record.resource_used, 0);
        assert_eq!(record.severity, Severity::None);
        assert!(record.findings.is_empty());
        assert!(record.scheduler.is_none());
    }

    #[test]
    fn test_empty_data_records_sentinel() {
        let analyzer = Analyzer::new(registry());
        let record = analyzer
            .analyze(&job(), &Tasks { durations: vec![] })
            .unwrap();

        assert_eq!(record.findings.len(), 1);
        assert_eq!(record.findings[0].rule_class, "NoDataReceived");
        assert_eq!(record.severity, Severity::Low);
        assert_eq!(record.score, 0);
    }

    #[test]
    fn test_rule_failure_produces_no_record() {
        let registry = registry().with_rule("mapreduce", Arc::new(Failing));
        let analyzer = Analyzer::new(registry);
        let mut job = job();

        let err = analyzer
            .analyze(&job, &Tasks { durations: vec![1] })
            .unwrap_err();
        assert_eq!(err.rule(), "Failing");
        assert_eq!(job.retries(), 0);
        assert!(job.retry());
    }
}
