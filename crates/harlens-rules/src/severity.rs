use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency of a finding. Variants are declared most urgent first, so the
/// derived ordering sorts critical findings ahead of everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Medium,
    Info,
    Low,
}

impl Severity {
    /// Sort rank, 0 being the most urgent
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Medium => "medium",
            Severity::Info => "info",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
