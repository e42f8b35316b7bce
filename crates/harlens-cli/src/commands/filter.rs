use crate::{OutputFormat, csv_field};
use anyhow::Result;
use harlens_core::RequestRecord;
use harlens_core::derive::{SHORT_URL_LEN, is_slow_ttfb, mime_group, short_url, status_category};
use harlens_core::filter::RecordFilter;
use std::path::Path;

/// Build the record filter from CLI values
pub fn build_filter(
    status: Option<&str>,
    mime: Option<&str>,
    slow_ttfb: bool,
) -> Result<RecordFilter> {
    let mut filter = RecordFilter::new().slow_ttfb_only(slow_ttfb);

    if let Some(status_patterns) = status {
        filter = filter.with_statuses(status_patterns)?;
    }

    if let Some(mime_groups) = mime {
        filter = filter.with_mime_groups(mime_groups);
    }

    Ok(filter)
}

/// Load a HAR file and keep the records matching the filter
pub fn filter_records(file: &Path, filter: &RecordFilter) -> Result<Vec<RequestRecord>> {
    let records = super::load_records(file)?;
    Ok(filter.apply(&records).into_iter().cloned().collect())
}

pub fn execute(
    file: &Path,
    status: Option<String>,
    mime: Option<String>,
    slow_ttfb: bool,
    format: OutputFormat,
) -> Result<()> {
    tracing::debug!("Filtering HAR file: {}", file.display());

    let filter = build_filter(status.as_deref(), mime.as_deref(), slow_ttfb)?;
    let records = filter_records(file, &filter)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Table => output_table(&records),
        OutputFormat::Pretty => output_pretty(&records),
    }

    Ok(())
}

fn output_pretty(records: &[RequestRecord]) {
    use console::style;

    println!("\n{} {}", style("Filtered Requests:").bold(), records.len());

    for (i, r) in records.iter().enumerate() {
        let ttfb = if is_slow_ttfb(r) {
            style("slow TTFB").yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {}. {} {} {} [{}] {}",
            i + 1,
            r.status,
            r.method,
            short_url(&r.url, SHORT_URL_LEN),
            mime_group(&r.mime_type),
            ttfb
        );
    }

    println!(); // trailing newline
}

fn output_table(records: &[RequestRecord]) {
    println!("status_category,method,url,mime_group,wait_ms,slow_ttfb");
    for r in records {
        println!(
            "{},{},{},{},{},{}",
            status_category(r.status),
            csv_field(&r.method),
            csv_field(&r.url),
            csv_field(&mime_group(&r.mime_type)),
            r.wait_time,
            is_slow_ttfb(r)
        );
    }
}
