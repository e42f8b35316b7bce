mod domains;
mod slowest;
mod status;

pub use domains::DomainLoadAnalyzer;
pub use slowest::SlowestRequestsAnalyzer;
pub use status::StatusDistributionAnalyzer;

use crate::derive::floor_unknown;
use crate::extract::RequestRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub total_requests: usize,
    pub slowest_requests: Vec<SlowRequest>,
    pub status_distribution: Vec<StatusBucket>,
    pub domain_load: Vec<DomainLoad>,
}

impl StatsReport {
    /// Run every aggregate over the records, keeping the top `top_n` of the ranked ones
    pub fn build(records: &[RequestRecord], top_n: usize) -> Self {
        Self {
            total_requests: records.len(),
            slowest_requests: SlowestRequestsAnalyzer::new(top_n).analyze(records),
            status_distribution: StatusDistributionAnalyzer.analyze(records),
            domain_load: DomainLoadAnalyzer::new(top_n).analyze(records),
        }
    }
}

/// Per-phase timing with "not captured" phases counted as zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingBreakdown {
    pub dns: f64,
    pub connect: f64,
    pub ssl: f64,
    pub wait: f64,
    pub receive: f64,
}

impl TimingBreakdown {
    pub fn from_record(record: &RequestRecord) -> Self {
        Self {
            dns: floor_unknown(record.dns_time),
            connect: floor_unknown(record.connect_time),
            ssl: floor_unknown(record.ssl_time),
            wait: floor_unknown(record.wait_time),
            receive: floor_unknown(record.receive_time),
        }
    }

    pub fn total(&self) -> f64 {
        self.dns + self.connect + self.ssl + self.wait + self.receive
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlowRequest {
    pub url: String,
    pub short_url: String,
    pub method: String,
    pub status: i64,
    pub status_category: String,
    pub time: f64,
    pub timings: TimingBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBucket {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainLoad {
    pub domain: String,
    pub total_time: f64,
    pub request_count: usize,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, records: &[RequestRecord]) -> Self::Output;
}
