use super::{Analyzer, StatusBucket};
use crate::derive::status_category;
use crate::extract::RequestRecord;
use std::collections::BTreeMap;

pub struct StatusDistributionAnalyzer;

impl Analyzer for StatusDistributionAnalyzer {
    type Output = Vec<StatusBucket>;

    fn analyze(&self, records: &[RequestRecord]) -> Self::Output {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            *counts.entry(status_category(record.status)).or_insert(0) += 1;
        }

        tracing::debug!("Found {} status categories", counts.len());

        counts
            .into_iter()
            .map(|(category, count)| StatusBucket { category, count })
            .collect()
    }
}
