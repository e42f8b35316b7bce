use crate::advice;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleId {
    #[serde(rename = "Slow TTFB")]
    SlowTtfb,
    #[serde(rename = "Large Payload")]
    LargePayload,
    #[serde(rename = "5xx Error")]
    ServerError,
    #[serde(rename = "4xx Error")]
    ClientError,
    #[serde(rename = "Redirect Chain")]
    RedirectChain,
    #[serde(rename = "High Connect Time")]
    HighConnectTime,
    #[serde(rename = "High DNS Time")]
    HighDnsTime,
}

impl RuleId {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::SlowTtfb => "Slow TTFB",
            RuleId::LargePayload => "Large Payload",
            RuleId::ServerError => "5xx Error",
            RuleId::ClientError => "4xx Error",
            RuleId::RedirectChain => "Redirect Chain",
            RuleId::HighConnectTime => "High Connect Time",
            RuleId::HighDnsTime => "High DNS Time",
        }
    }

    /// Name of the rule that raises this id; both error bands share one rule
    pub fn rule_name(self) -> &'static str {
        match self {
            RuleId::ServerError | RuleId::ClientError => "Error Response",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule firing against one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: RuleId,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_context: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<String>,
}

impl Finding {
    /// Create a finding carrying the static remediation text for its rule
    pub fn new(rule_id: RuleId, severity: Severity, message: impl Into<String>) -> Self {
        let advice = advice::for_rule(rule_id);
        Self {
            rule_id,
            severity,
            message: message.into(),
            suggestion: Some(advice.suggestion.to_string()),
            domain_context: Some(advice.context.to_string()),
            next_steps: advice.next_steps.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Stable sort, most urgent first; findings of equal severity keep rule order
pub fn sort_by_severity(findings: &mut [Finding]) {
    findings.sort_by_key(|f| f.severity);
}
