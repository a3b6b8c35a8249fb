//! Severity domain model.
//!
//! Severities form a fixed total order from `None` to `Critical`. The
//! overall severity of a job is the maximum over its findings, with `None`
//! as the identity element of that maximum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How problematic a finding is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Nothing to report
    #[default]
    None = 0,
    /// Minor inefficiency
    Low = 1,
    /// Worth a look
    Moderate = 2,
    /// Significant problem
    Severe = 3,
    /// The job is seriously misbehaving
    Critical = 4,
}

impl Severity {
    /// All severities in ascending order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Low,
        Self::Moderate,
        Self::Severe,
        Self::Critical,
    ];

    /// Numeric value of this severity (0-4).
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Lowercase name, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
            Self::Critical => "critical",
        }
    }

    /// Parse a name case-insensitively, ignoring surrounding whitespace.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "moderate" => Some(Self::Moderate),
            "severe" => Some(Self::Severe),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Look up a severity by its numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// The more severe of two severities.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Ord::max(self, other)
    }

    /// Maximum over any number of severities; `None` for an empty input.
    pub fn max_of<I>(severities: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        severities.into_iter().fold(Self::None, Self::max)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
