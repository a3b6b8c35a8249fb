//! Finding domain model.
//!
//! A [`Finding`] is one rule's verdict for one job: a severity, a score, and
//! an ordered list of detail lines explaining it.

use serde::{Deserialize, Serialize};

use super::severity::Severity;

/// Rule class identifier of the sentinel produced when a job has no data.
pub const NO_DATA_RULE_CLASS: &str = "NoDataReceived";

/// Display name of the sentinel produced when a job has no data.
pub const NO_DATA_RULE_NAME: &str = "No Data Received";

/// One line of supporting detail on a finding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FindingDetail {
    /// Label, e.g. `"GC ratio"`
    pub name: String,
    /// Measured value rendered as text
    pub value: String,
    /// Free-form explanation, may be empty
    #[serde(default)]
    pub details: String,
}

impl FindingDetail {
    /// A detail line with no explanation text.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            details: String::new(),
        }
    }

    /// Set the explanation text.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }
}

/// Output of a single rule applied to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable identifier of the rule implementation
    pub rule_class: String,
    /// Human-readable rule name
    pub rule_name: String,
    /// How problematic the rule judged the job
    pub severity: Severity,
    /// Rules are expected to report non-negative scores
    pub score: i32,
    /// Supporting detail lines in the order the rule added them
    #[serde(default)]
    pub details: Vec<FindingDetail>,
}

impl Finding {
    /// A finding without detail lines.
    pub fn new(
        rule_class: impl Into<String>,
        rule_name: impl Into<String>,
        severity: Severity,
        score: i32,
    ) -> Self {
        Self {
            rule_class: rule_class.into(),
            rule_name: rule_name.into(),
            severity,
            score,
            details: Vec::new(),
        }
    }

    /// The sentinel finding recorded when fetched data is empty.
    pub fn no_data() -> Self {
        Self::new(NO_DATA_RULE_CLASS, NO_DATA_RULE_NAME, Severity::Low, 0)
            .with_detail(FindingDetail::new(NO_DATA_RULE_NAME, "").with_details(
                "The history service returned no execution data for this job",
            ))
    }

    /// Whether this is the no-data sentinel.
    pub fn is_no_data(&self) -> bool {
        self.rule_class == NO_DATA_RULE_CLASS
    }

    /// Append a detail line, keeping insertion order.
    #[must_use]
    pub fn with_detail(mut self, detail: FindingDetail) -> Self {
        self.details.push(detail);
        self
    }

    /// Append a detail line in place.
    pub fn add_detail(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        details: impl Into<String>,
    ) {
        self.details
            .push(FindingDetail::new(name, value).with_details(details));
    }
}
