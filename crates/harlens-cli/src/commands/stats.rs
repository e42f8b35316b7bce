use crate::{OutputFormat, csv_field};
use anyhow::Result;
use harlens_core::analysis::StatsReport;
use std::path::Path;

/// Load a HAR file and compute the chart aggregates
pub fn stats_report(file: &Path, top_n: usize) -> Result<StatsReport> {
    let records = super::load_records(file)?;
    Ok(StatsReport::build(&records, top_n))
}

pub fn execute(file: &Path, top_n: usize, format: OutputFormat) -> Result<()> {
    tracing::info!("Extracting statistics from HAR file: {}", file.display());

    let report = stats_report(file, top_n)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => output_table(&report),
        OutputFormat::Pretty => output_pretty(&report),
    }

    Ok(())
}

fn output_pretty(report: &StatsReport) {
    use console::style;

    println!("\n{}", style("HAR Statistics").bold().cyan());
    println!("{}", style("==============").cyan());
    println!("  Total Requests: {}", report.total_requests);

    if !report.slowest_requests.is_empty() {
        println!(
            "\n{}",
            style(format!(
                "Top {} Slowest Requests (timing breakdown):",
                report.slowest_requests.len()
            ))
            .bold()
        );
        for (i, req) in report.slowest_requests.iter().enumerate() {
            println!(
                "  {}. [{:.2} ms] {} {} - {}",
                i + 1,
                req.time,
                req.method,
                req.status,
                req.short_url
            );
            let t = &req.timings;
            println!(
                "       dns {:.2} | connect {:.2} | ssl {:.2} | wait {:.2} | receive {:.2} (phases {:.2})",
                t.dns,
                t.connect,
                t.ssl,
                t.wait,
                t.receive,
                t.total()
            );
        }
    }

    if !report.status_distribution.is_empty() {
        println!("\n{}", style("Status Code Distribution:").bold());
        for bucket in &report.status_distribution {
            let share = bucket.count as f64 * 100.0 / report.total_requests as f64;
            println!("  {}: {} ({:.1}%)", bucket.category, bucket.count, share);
        }
    }

    if !report.domain_load.is_empty() {
        println!("\n{}", style("Top Domains by Total Load Time:").bold());
        for load in &report.domain_load {
            println!(
                "  {:<40} {:>10.2} ms ({} requests)",
                load.domain, load.total_time, load.request_count
            );
        }
    }

    println!(); // trailing newline
}

fn output_table(report: &StatsReport) {
    println!("section,key,value");
    println!("summary,total_requests,{}", report.total_requests);
    for req in &report.slowest_requests {
        println!("slowest,{},{:.2}", csv_field(&req.url), req.time);
    }
    for bucket in &report.status_distribution {
        println!("status,{},{}", bucket.category, bucket.count);
    }
    for load in &report.domain_load {
        println!("domain,{},{:.2}", csv_field(&load.domain), load.total_time);
    }
}
