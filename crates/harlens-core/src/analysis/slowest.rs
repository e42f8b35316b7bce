use super::{Analyzer, SlowRequest, TimingBreakdown};
use crate::derive::{SHORT_URL_LEN, short_url, status_category};
use crate::extract::RequestRecord;

pub struct SlowestRequestsAnalyzer {
    top_n: usize,
}

impl SlowestRequestsAnalyzer {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl Default for SlowestRequestsAnalyzer {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Analyzer for SlowestRequestsAnalyzer {
    type Output = Vec<SlowRequest>;

    fn analyze(&self, records: &[RequestRecord]) -> Self::Output {
        tracing::debug!("Ranking {} requests by total time", records.len());

        let mut ranked: Vec<&RequestRecord> = records.iter().collect();
        // Stable sort: equal times keep capture order
        ranked.sort_by(|a, b| b.time_ms.total_cmp(&a.time_ms));
        ranked.truncate(self.top_n);

        ranked
            .into_iter()
            .map(|r| SlowRequest {
                url: r.url.clone(),
                short_url: short_url(&r.url, SHORT_URL_LEN),
                method: r.method.clone(),
                status: r.status,
                status_category: status_category(r.status),
                time: r.time_ms,
                timings: TimingBreakdown::from_record(r),
            })
            .collect()
    }
}
