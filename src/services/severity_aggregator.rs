//! Severity and score aggregation.
//!
//! Reduces a job's findings to its overall severity (the maximum) and its
//! overall score (the sum). Both reductions are order-independent.

use serde::{Deserialize, Serialize};

use crate::domain::models::{Finding, Severity};

/// Overall verdict for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Verdict {
    /// Maximum finding severity
    pub severity: Severity,
    /// Sum of finding scores, widened so it cannot overflow
    pub score: i64,
}

impl Verdict {
    /// Reduce `findings` to their overall severity and score.
    pub fn from_findings(findings: &[Finding]) -> Self {
        Self {
            severity: overall_severity(findings),
            score: overall_score(findings),
        }
    }
}

/// Maximum severity over `findings`, [`Severity::None`] when there are none.
pub fn overall_severity(findings: &[Finding]) -> Severity {
    Severity::max_of(findings.iter().map(|f| f.severity))
}

/// Sum of finding scores, `0` when there are none.
///
/// Negative scores are summed like any other; rules are expected not to
/// report them.
pub fn overall_score(findings: &[Finding]) -> i64 {
    findings.iter().map(|f| i64::from(f.score)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn finding(severity: Severity, score: i32) -> Finding {
        Finding::new("Rule", "Rule", severity, score)
    }

    #[test]
    fn test_worst_severity_wins() {
        let findings = vec![
            finding(Severity::Low, 0),
            finding(Severity::Critical, 0),
            finding(Severity::None, 0),
        ];
        assert_eq!(overall_severity(&findings), Severity::Critical);
    }

    #[test]
    fn test_scores_are_summed() {
        let findings = vec![
            finding(Severity::Low, 3),
            finding(Severity::Low, 5),
            finding(Severity::Low, 0),
        ];
        assert_eq!(overall_score(&findings), 8);
    }

    #[test]
    fn test_empty_findings() {
        assert_eq!(Verdict::from_findings(&[]), Verdict::default());
        assert_eq!(Verdict::default().severity, Severity::None);
        assert_eq!(Verdict::default().score, 0);
    }

    #[test]
    fn test_score_does_not_overflow_i32() {
        let findings = vec![finding(Severity::Severe, i32::MAX), finding(Severity::Low, 1)];
        assert_eq!(overall_score(&findings), i64::from(i32::MAX) + 1);
    }

    proptest! {
        #[test]
        fn prop_verdict_is_order_independent(
            raw in prop::collection::vec((0u8..5, 0i32..1000), 0..16)
        ) {
            let mut findings: Vec<Finding> = raw
                .iter()
                .map(|(s, score)| finding(Severity::from_value(*s).unwrap(), *score))
                .collect();
            let forward = Verdict::from_findings(&findings);
            findings.reverse();
            prop_assert_eq!(forward, Verdict::from_findings(&findings));
            prop_assert!(forward.score >= 0);
            prop_assert!(findings.iter().all(|f| f.severity <= forward.severity));
        }
    }
}
