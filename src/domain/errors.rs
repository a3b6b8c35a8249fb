//! Domain errors for the Jobsight analysis pipeline.

use thiserror::Error;

/// Errors surfaced by an analysis invocation.
///
/// Empty data, unclassifiable jobs, and oversize fields all have defined
/// fallbacks and never show up here. A failing rule aborts the whole
/// invocation and no partial record is produced.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A rule returned an error while evaluating the job's data.
    #[error("Rule '{rule}' failed for {application_id}: {source}")]
    RuleFailed {
        /// Display name of the failing rule
        rule: String,
        /// Application id of the job under analysis
        application_id: String,
        /// Error returned by the rule
        #[source]
        source: anyhow::Error,
    },
}

impl AnalysisError {
    /// Name of the rule that failed.
    pub fn rule(&self) -> &str {
        match self {
            Self::RuleFailed { rule, .. } => rule,
        }
    }

    /// Application id of the job being analyzed.
    pub fn application_id(&self) -> &str {
        match self {
            Self::RuleFailed { application_id, .. } => application_id,
        }
    }
}

/// Result type for analysis invocations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_failed_display_and_source() {
        let err = AnalysisError::RuleFailed {
            rule: "Mapper GC".to_string(),
            application_id: "application_1_0001".to_string(),
            source: anyhow::anyhow!("counter missing"),
        };
        assert_eq!(
            err.to_string(),
            "Rule 'Mapper GC' failed for application_1_0001: counter missing"
        );
        assert_eq!(err.rule(), "Mapper GC");
        assert_eq!(err.application_id(), "application_1_0001");
        assert!(std::error::Error::source(&err).is_some());
    }
}
