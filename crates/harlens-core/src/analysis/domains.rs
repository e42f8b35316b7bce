use super::{Analyzer, DomainLoad};
use crate::derive::domain;
use crate::extract::RequestRecord;
use std::collections::HashMap;

/// Total load time per domain, heaviest first
pub struct DomainLoadAnalyzer {
    top_n: usize,
}

impl DomainLoadAnalyzer {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

impl Default for DomainLoadAnalyzer {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Analyzer for DomainLoadAnalyzer {
    type Output = Vec<DomainLoad>;

    fn analyze(&self, records: &[RequestRecord]) -> Self::Output {
        let mut totals: HashMap<String, (f64, usize)> = HashMap::new();
        for record in records {
            let (time, count) = totals.entry(domain(&record.url)).or_insert((0.0, 0));
            *time += record.time_ms.max(0.0);
            *count += 1;
        }

        let mut loads: Vec<DomainLoad> = totals
            .into_iter()
            .map(|(domain, (total_time, request_count))| DomainLoad {
                domain,
                total_time,
                request_count,
            })
            .collect();

        loads.sort_by(|a, b| {
            b.total_time
                .total_cmp(&a.total_time)
                .then_with(|| a.domain.cmp(&b.domain))
        });
        loads.truncate(self.top_n);

        tracing::info!("Domain load analysis complete: {} domains", loads.len());

        loads
    }
}
