use crate::finding::{Finding, RuleId};
use crate::severity::Severity;
use harlens_core::RequestRecord;

const MIB: f64 = 1024.0 * 1024.0;

/// A single diagnostic check. Rules are independent: each one looks at the
/// record alone and never at what other rules reported.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, record: &RequestRecord) -> Option<Finding>;
}

pub struct SlowTtfbRule {
    pub threshold_ms: f64,
}

impl Rule for SlowTtfbRule {
    fn name(&self) -> &'static str {
        "Slow TTFB"
    }

    fn check(&self, record: &RequestRecord) -> Option<Finding> {
        (record.wait_time > self.threshold_ms).then(|| {
            Finding::new(
                RuleId::SlowTtfb,
                Severity::Warning,
                format!("Slow TTFB: {} ms", record.wait_time),
            )
        })
    }
}

/// Fires only for sizes known to exceed the limit; `-1` (unknown) never does
pub struct LargePayloadRule {
    pub max_bytes: i64,
}

impl Rule for LargePayloadRule {
    fn name(&self) -> &'static str {
        "Large Payload"
    }

    fn check(&self, record: &RequestRecord) -> Option<Finding> {
        if record.response_size < 0 || record.response_size <= self.max_bytes {
            return None;
        }

        let size_mb = record.response_size as f64 / MIB;
        Some(Finding::new(
            RuleId::LargePayload,
            Severity::Warning,
            format!("Large Payload: {:.2} MB", size_mb),
        ))
    }
}

pub struct ErrorResponseRule;

impl Rule for ErrorResponseRule {
    fn name(&self) -> &'static str {
        "Error Response"
    }

    fn check(&self, record: &RequestRecord) -> Option<Finding> {
        let (rule_id, severity) = match record.status {
            500..=599 => (RuleId::ServerError, Severity::Critical),
            400..=499 => (RuleId::ClientError, Severity::Warning),
            _ => return None,
        };

        Some(Finding::new(
            rule_id,
            severity,
            format!("Error Response: HTTP {}", record.status),
        ))
    }
}

pub struct RedirectChainRule;

impl Rule for RedirectChainRule {
    fn name(&self) -> &'static str {
        "Redirect Chain"
    }

    fn check(&self, record: &RequestRecord) -> Option<Finding> {
        (record.redirect_time > 0.0).then(|| {
            Finding::new(
                RuleId::RedirectChain,
                Severity::Info,
                format!("Redirected: {} ms", record.redirect_time),
            )
        })
    }
}

pub struct HighConnectTimeRule {
    pub threshold_ms: f64,
}

impl Rule for HighConnectTimeRule {
    fn name(&self) -> &'static str {
        "High Connect Time"
    }

    fn check(&self, record: &RequestRecord) -> Option<Finding> {
        (record.connect_time > self.threshold_ms).then(|| {
            Finding::new(
                RuleId::HighConnectTime,
                Severity::Medium,
                format!("Connect Time High: {} ms", record.connect_time),
            )
        })
    }
}

pub struct HighDnsTimeRule {
    pub threshold_ms: f64,
}

impl Rule for HighDnsTimeRule {
    fn name(&self) -> &'static str {
        "High DNS Time"
    }

    fn check(&self, record: &RequestRecord) -> Option<Finding> {
        (record.dns_time > self.threshold_ms).then(|| {
            Finding::new(
                RuleId::HighDnsTime,
                Severity::Low,
                format!("DNS Lookup Slow: {} ms", record.dns_time),
            )
        })
    }
}
