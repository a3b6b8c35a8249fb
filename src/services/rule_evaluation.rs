//! Rule evaluation loop.
//!
//! Applies the registered rules for a job's engine type to its fetched
//! data. Empty data short-circuits to the single no-data sentinel finding.
//! The first rule error aborts evaluation and is returned as is; findings
//! collected before it are discarded.

use crate::domain::errors::{AnalysisError, AnalysisResult};
use crate::domain::models::{Finding, JobDescriptor};
use crate::domain::ports::JobData;

use super::rule_registry::RuleRegistry;

/// Run every applicable rule against `data`, in registration order.
///
/// Returns exactly one [`Finding::no_data`] when `data` is empty, without
/// consulting the registry. Otherwise returns one finding per rule that did
/// not abstain, in rule order.
pub fn evaluate_rules<D>(
    job: &JobDescriptor,
    data: &D,
    registry: &RuleRegistry<D>,
) -> AnalysisResult<Vec<Finding>>
where
    D: JobData + ?Sized,
{
    if data.is_empty() {
        tracing::info!(
            application_id = %job.application_id(),
            engine = %job.engine_type(),
            "No data received for job"
        );
        return Ok(vec![Finding::no_data()]);
    }

    let rules = registry.rules_for(job.engine_type());
    let mut findings = Vec::with_capacity(rules.len());

    for rule in rules {
        match rule.apply(data) {
            Ok(Some(finding)) => {
                tracing::debug!(
                    application_id = %job.application_id(),
                    rule = rule.name(),
                    severity = %finding.severity,
                    score = finding.score,
                    "Rule produced finding"
                );
                findings.push(finding);
            }
            Ok(None) => {
                tracing::debug!(
                    application_id = %job.application_id(),
                    rule = rule.name(),
                    "Rule abstained"
                );
            }
            Err(source) => {
                tracing::warn!(
                    application_id = %job.application_id(),
                    rule = rule.name(),
                    error = %source,
                    "Rule failed, aborting analysis"
                );
                return Err(AnalysisError::RuleFailed {
                    rule: rule.name().to_string(),
                    application_id: job.application_id().to_string(),
                    source,
                });
            }
        }
    }

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{JobDescriptorConfig, Severity};
    use crate::domain::ports::Rule;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counters(Vec<u32>);

    impl JobData for Counters {
        fn is_empty(&self) -> bool {
            self.0.is_empty()
        }
    }

    /// Reports the counter at `index` as a finding score, abstaining on zero.
    struct CounterRule {
        name: &'static str,
        index: usize,
        calls: AtomicUsize,
    }

    impl CounterRule {
        fn new(name: &'static str, index: usize) -> Arc<Self> {
            Arc::new(Self {
                name,
                index,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Rule<Counters> for CounterRule {
        fn class_name(&self) -> &str {
            self.name
        }

        fn name(&self) -> &str {
            self.name
        }

        fn apply(&self, data: &Counters) -> anyhow::Result<Option<Finding>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let value = *data
                .0
                .get(self.index)
                .ok_or_else(|| anyhow::anyhow!("counter {} missing", self.index))?;
            if value == 0 {
                return Ok(None);
            }
            Ok(Some(Finding::new(
                self.name,
                self.name,
                Severity::Low,
                i32::try_from(value)?,
            )))
        }
    }

    fn job(engine: &str) -> JobDescriptor {
        JobDescriptor::new(JobDescriptorConfig {
            engine_type: engine.into(),
            application_id: "application_1_0001".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_data_yields_only_sentinel() {
        let rule = CounterRule::new("first", 0);
        let registry =
            RuleRegistry::new().with_rule("mapreduce", rule.clone() as Arc<dyn Rule<Counters>>);

        for engine in ["mapreduce", "spark", "tez"] {
            let findings = evaluate_rules(&job(engine), &Counters(vec![]), &registry).unwrap();
            assert_eq!(findings, vec![Finding::no_data()]);
        }
        assert_eq!(rule.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_findings_follow_rule_order_and_skip_abstentions() {
        let registry = RuleRegistry::new()
            .with_rule("mapreduce", CounterRule::new("c", 2) as Arc<dyn Rule<Counters>>)
            .with_rule("mapreduce", CounterRule::new("a", 0))
            .with_rule("mapreduce", CounterRule::new("b", 1));

        let findings =
            evaluate_rules(&job("mapreduce"), &Counters(vec![4, 0, 7]), &registry).unwrap();
        let names: Vec<&str> = findings.iter().map(|f| f.rule_name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);
        assert_eq!(findings[0].score, 7);
    }

    #[test]
    fn test_no_rules_for_engine_yields_nothing() {
        let registry: RuleRegistry<Counters> = RuleRegistry::new();
        let findings = evaluate_rules(&job("spark"), &Counters(vec![1]), &registry).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_rule_failure_is_fatal() {
        let after = CounterRule::new("after", 0);
        let registry = RuleRegistry::new()
            .with_rule("mapreduce", CounterRule::new("ok", 0) as Arc<dyn Rule<Counters>>)
            .with_rule("mapreduce", CounterRule::new("broken", 9))
            .with_rule("mapreduce", after.clone());

        let err = evaluate_rules(&job("mapreduce"), &Counters(vec![1]), &registry).unwrap_err();
        assert_eq!(err.rule(), "broken");
        assert_eq!(err.application_id(), "application_1_0001");
        assert_eq!(after.calls.load(Ordering::SeqCst), 0);
    }
}
