use crate::finding::{Finding, sort_by_severity};
use crate::rules::{
    ErrorResponseRule, HighConnectTimeRule, HighDnsTimeRule, LargePayloadRule, RedirectChainRule,
    Rule, SlowTtfbRule,
};
use harlens_core::RequestRecord;
use serde::{Deserialize, Serialize};

/// Trigger points for the threshold-based rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub ttfb_ms: f64,
    pub payload_bytes: i64,
    pub connect_ms: f64,
    pub dns_ms: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            ttfb_ms: 500.0,
            payload_bytes: 1_048_576,
            connect_ms: 500.0,
            dns_ms: 300.0,
        }
    }
}

/// A request together with the findings raised against it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedRequest {
    pub record: RequestRecord,
    pub findings: Vec<Finding>,
}

impl AnalyzedRequest {
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Findings ordered most urgent first
    pub fn sorted_findings(&self) -> Vec<Finding> {
        let mut findings = self.findings.clone();
        sort_by_severity(&mut findings);
        findings
    }
}

/// Ordered battery of rules applied to one record at a time.
///
/// The engine holds no per-call state, so a single instance can be shared
/// across threads and evaluating the same record twice gives the same result.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    pub fn new(thresholds: Thresholds) -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(SlowTtfbRule {
                threshold_ms: thresholds.ttfb_ms,
            }),
            Box::new(LargePayloadRule {
                max_bytes: thresholds.payload_bytes,
            }),
            Box::new(ErrorResponseRule),
            Box::new(RedirectChainRule),
            Box::new(HighConnectTimeRule {
                threshold_ms: thresholds.connect_ms,
            }),
            Box::new(HighDnsTimeRule {
                threshold_ms: thresholds.dns_ms,
            }),
        ];
        Self { rules }
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule against the record. Findings come back in rule order,
    /// not sorted by severity.
    pub fn evaluate(&self, record: &RequestRecord) -> Vec<Finding> {
        self.rules.iter().filter_map(|r| r.check(record)).collect()
    }

    pub fn analyze_all(&self, records: &[RequestRecord]) -> Vec<AnalyzedRequest> {
        tracing::debug!(
            "Evaluating {} rules against {} requests",
            self.rules.len(),
            records.len()
        );

        let analyzed: Vec<AnalyzedRequest> = records
            .iter()
            .map(|record| AnalyzedRequest {
                record: record.clone(),
                findings: self.evaluate(record),
            })
            .collect();

        let total: usize = analyzed.iter().map(|a| a.findings.len()).sum();
        tracing::info!(
            "Rule evaluation complete: {} findings across {} requests",
            total,
            analyzed.iter().filter(|a| a.has_findings()).count()
        );

        analyzed
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}

/// Evaluate a record with the default thresholds
pub fn evaluate(record: &RequestRecord) -> Vec<Finding> {
    RuleEngine::default().evaluate(record)
}

/// Evaluate every record with the default thresholds
pub fn analyze_records(records: &[RequestRecord]) -> Vec<AnalyzedRequest> {
    RuleEngine::default().analyze_all(records)
}
