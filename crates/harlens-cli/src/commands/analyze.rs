use crate::{OutputFormat, csv_field};
use anyhow::Result;
use clap::Args;
use harlens_rules::{AnalyzedRequest, RuleEngine, Severity, Thresholds};
use harlens_summary::prompt::flagged;
use harlens_summary::{OpenAiSummarizer, SummarizerConfig, summarize_or_fallback};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

pub const NO_ISSUES_MESSAGE: &str = "No rule violations found in this HAR file.";

const SEPARATOR_WIDTH: usize = 70;

/// Overrides for the rule thresholds; unset flags keep the defaults
#[derive(Debug, Clone, Default, Args)]
pub struct ThresholdArgs {
    /// Wait time (ms) above which a request has slow TTFB [default: 500]
    #[arg(long, value_name = "MS")]
    pub ttfb_ms: Option<f64>,

    /// Response body size (bytes) above which a payload is large [default: 1048576]
    #[arg(long, value_name = "BYTES")]
    pub payload_bytes: Option<i64>,

    /// Connect time (ms) above which connection setup is slow [default: 500]
    #[arg(long, value_name = "MS")]
    pub connect_ms: Option<f64>,

    /// DNS time (ms) above which name resolution is slow [default: 300]
    #[arg(long, value_name = "MS")]
    pub dns_ms: Option<f64>,
}

impl ThresholdArgs {
    pub fn into_thresholds(self) -> Thresholds {
        let defaults = Thresholds::default();
        Thresholds {
            ttfb_ms: self.ttfb_ms.unwrap_or(defaults.ttfb_ms),
            payload_bytes: self.payload_bytes.unwrap_or(defaults.payload_bytes),
            connect_ms: self.connect_ms.unwrap_or(defaults.connect_ms),
            dns_ms: self.dns_ms.unwrap_or(defaults.dns_ms),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Include suggestions, context, and next steps for every finding
    pub details: bool,
    pub thresholds: Thresholds,
    /// Ask the summarizer for a synthesis when set
    pub summary: Option<SummarizerConfig>,
}

#[derive(Debug, Serialize)]
struct AnalyzeOutput<'a> {
    total_requests: usize,
    flagged_requests: usize,
    results: &'a [AnalyzedRequest],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
}

/// Analyze a HAR file and return every request with its findings
pub fn analyze_har(file: &Path, thresholds: Thresholds) -> Result<Vec<AnalyzedRequest>> {
    tracing::debug!("Reading HAR file: {}", file.display());

    let records = super::load_records(file)?;
    let engine = RuleEngine::new(thresholds);
    tracing::debug!("Active rules: {}", engine.rule_names().join(", "));

    Ok(engine.analyze_all(&records))
}

pub fn execute(file: &Path, options: AnalyzeOptions, format: OutputFormat) -> Result<()> {
    tracing::info!("Analyzing HAR file: {}", file.display());

    let results = analyze_har(file, options.thresholds)?;

    // Rule results are final before the summarizer runs
    let summary = options.summary.map(|config| summarize(config, &results));

    match format {
        OutputFormat::Json => output_json(&results, summary)?,
        OutputFormat::Table => print!("{}", render_table(&results)),
        OutputFormat::Pretty => output_pretty(&results, options.details, summary.as_deref()),
    }

    Ok(())
}

/// Summary text for the report; failures become a message, never an error
fn summarize(config: SummarizerConfig, results: &[AnalyzedRequest]) -> String {
    if flagged(results).is_empty() {
        return harlens_summary::NO_ISSUES_MESSAGE.to_string();
    }

    let summarizer = match OpenAiSummarizer::new(config) {
        Ok(summarizer) => summarizer,
        Err(e) => return summary_failed(e),
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => return summary_failed(e),
    };

    runtime.block_on(summarize_or_fallback(&summarizer, results))
}

fn summary_failed(e: impl std::fmt::Display) -> String {
    tracing::warn!("Summarizer unavailable: {}", e);
    format!("Summary failed: {}", e)
}

/// Plain-text report: flagged requests in capture order, findings most urgent first
pub fn render_report(results: &[AnalyzedRequest], details: bool) -> String {
    let mut out = String::new();
    let flagged = flagged(results);

    if flagged.is_empty() {
        let _ = writeln!(out, "{}", NO_ISSUES_MESSAGE);
        return out;
    }

    for request in flagged {
        let _ = writeln!(out, "{} {}", request.record.method, request.record.url);

        for finding in request.sorted_findings() {
            let _ = writeln!(
                out,
                "   [{}] {}",
                severity_label(finding.severity),
                finding.message
            );

            if details {
                if let Some(suggestion) = &finding.suggestion {
                    let _ = writeln!(out, "         Suggestion: {}", suggestion);
                }
                if let Some(context) = &finding.domain_context {
                    let _ = writeln!(out, "         Context:    {}", context);
                }
                if !finding.next_steps.is_empty() {
                    let _ = writeln!(out, "         Next steps:");
                    for (i, step) in finding.next_steps.iter().enumerate() {
                        let _ = writeln!(out, "           {}. {}", i + 1, step);
                    }
                }
            }
        }

        if details {
            let _ = writeln!(
                out,
                "   Status: {} | Time: {} ms | TTFB: {} ms",
                request.record.status,
                request.record.time_ms,
                request.record.wait_time
            );
        }

        let _ = writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH));
    }

    out
}

/// One CSV row per finding, most urgent first within each request
pub fn render_table(results: &[AnalyzedRequest]) -> String {
    let mut out = String::from("method,url,rule_id,severity,message\n");

    for request in results.iter().filter(|r| r.has_findings()) {
        for finding in request.sorted_findings() {
            let _ = writeln!(
                out,
                "{},{},{},{},{}",
                csv_field(&request.record.method),
                csv_field(&request.record.url),
                csv_field(finding.rule_id.as_str()),
                finding.severity,
                csv_field(&finding.message)
            );
        }
    }

    out
}

fn severity_label(severity: Severity) -> String {
    severity.as_str().to_uppercase()
}

fn output_pretty(results: &[AnalyzedRequest], details: bool, summary: Option<&str>) {
    use console::style;

    println!("\n{}", style("Rule-Based Issues Found:").bold().cyan());
    println!();
    print!("{}", render_report(results, details));

    if let Some(summary) = summary {
        println!("\n{}", style("Summary:").bold());
        println!("{}", summary);
    }

    println!(); // trailing newline
}

fn output_json(results: &[AnalyzedRequest], summary: Option<String>) -> Result<()> {
    let output = AnalyzeOutput {
        total_requests: results.len(),
        flagged_requests: flagged(results).len(),
        results,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
