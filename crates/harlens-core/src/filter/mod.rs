use crate::derive::{is_slow_ttfb, mime_group};
use crate::extract::RequestRecord;

/// Filter criteria for request records
///
/// All filter conditions are combined with AND logic - a record must match
/// ALL specified criteria to be included. Within a list (statuses, MIME
/// groups) any single match is enough.
#[derive(Debug, Default, Clone)]
pub struct RecordFilter {
    /// HTTP status filters (e.g., "2xx", "404", "500-599")
    pub statuses: Vec<StatusFilter>,
    /// Top-level MIME groups (case-insensitive, e.g., "image", "text")
    pub mime_groups: Vec<String>,
    /// Only keep records whose wait time marks them as slow TTFB
    pub slow_ttfb_only: bool,
}

impl RecordFilter {
    /// Create a new RecordFilter with default (no filtering)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add status filters from a comma-separated list such as "2xx,404"
    pub fn with_statuses(mut self, patterns: &str) -> crate::Result<Self> {
        for pattern in split_list(patterns) {
            self.statuses.push(StatusFilter::parse(pattern)?);
        }
        Ok(self)
    }

    /// Add MIME groups from a comma-separated list such as "image,text"
    pub fn with_mime_groups(mut self, groups: &str) -> Self {
        self.mime_groups
            .extend(split_list(groups).map(str::to_lowercase));
        self
    }

    pub fn slow_ttfb_only(mut self, enabled: bool) -> Self {
        self.slow_ttfb_only = enabled;
        self
    }

    /// Check if a record matches all filter criteria
    pub fn matches(&self, record: &RequestRecord) -> bool {
        self.matches_status(record) && self.matches_mime(record) && self.matches_ttfb(record)
    }

    /// Keep the matching records, in their original order
    pub fn apply<'a>(&self, records: &'a [RequestRecord]) -> Vec<&'a RequestRecord> {
        let matched: Vec<&RequestRecord> = records.iter().filter(|r| self.matches(r)).collect();

        tracing::debug!(
            "Filter kept {} of {} records",
            matched.len(),
            records.len()
        );

        matched
    }

    fn matches_status(&self, record: &RequestRecord) -> bool {
        self.statuses.is_empty() || self.statuses.iter().any(|f| f.matches(record.status))
    }

    fn matches_mime(&self, record: &RequestRecord) -> bool {
        if self.mime_groups.is_empty() {
            return true;
        }
        let group = mime_group(&record.mime_type).to_lowercase();
        self.mime_groups.iter().any(|g| *g == group)
    }

    fn matches_ttfb(&self, record: &RequestRecord) -> bool {
        !self.slow_ttfb_only || is_slow_ttfb(record)
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Status filter for HTTP status codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    /// Exact status code (e.g., 404)
    Exact(i64),
    /// Status code range (e.g., 200-299 for "2xx")
    Range(i64, i64),
}

impl StatusFilter {
    /// Parse a status filter pattern
    ///
    /// Supports:
    /// - Exact: "404", "200"
    /// - Category shorthand: "2xx", "4XX", "5xx"
    /// - Explicit range: "200-299", "500-599"
    pub fn parse(pattern: &str) -> crate::Result<Self> {
        let pattern = pattern.trim();

        if pattern.len() == 3 && pattern.to_ascii_lowercase().ends_with("xx") {
            if let Some(digit) = pattern.chars().next().and_then(|c| c.to_digit(10)) {
                let start = digit as i64 * 100;
                return Ok(StatusFilter::Range(start, start + 99));
            }
            return Err(crate::Error::InvalidPattern(format!(
                "Invalid status category: {}",
                pattern
            )));
        }

        if let Some((start_str, end_str)) = pattern.split_once('-') {
            let start = start_str.trim().parse::<i64>().map_err(|_| {
                crate::Error::InvalidPattern(format!("Invalid status range start: {}", start_str))
            })?;
            let end = end_str.trim().parse::<i64>().map_err(|_| {
                crate::Error::InvalidPattern(format!("Invalid status range end: {}", end_str))
            })?;
            if start > end {
                return Err(crate::Error::InvalidPattern(format!(
                    "Status range is reversed: {}",
                    pattern
                )));
            }
            return Ok(StatusFilter::Range(start, end));
        }

        let code = pattern.parse::<i64>().map_err(|_| {
            crate::Error::InvalidPattern(format!("Invalid status code: {}", pattern))
        })?;
        Ok(StatusFilter::Exact(code))
    }

    /// Check if a status code matches this filter
    pub fn matches(&self, status: i64) -> bool {
        match self {
            StatusFilter::Exact(code) => status == *code,
            StatusFilter::Range(start, end) => (*start..=*end).contains(&status),
        }
    }
}
