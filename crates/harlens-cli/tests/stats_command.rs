use assert_cmd::Command;
use harlens_cli::commands::stats::stats_report;
use predicates::prelude::*;
use std::path::PathBuf;

/// Helper to get path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(filename)
}

#[allow(deprecated)]
fn get_harlens_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("harlens")
}

#[test]
fn test_stats_report_slowest_requests() {
    let report = stats_report(&fixture_path("sample.har"), 10).unwrap();

    assert_eq!(report.total_requests, 3);

    let times: Vec<f64> = report.slowest_requests.iter().map(|r| r.time).collect();
    assert_eq!(times, vec![900.5, 700.0, 80.0]);

    let slowest = &report.slowest_requests[0];
    assert_eq!(slowest.url, "https://api.example.com/orders");
    assert_eq!(slowest.status_category, "5xx");
    assert_eq!(slowest.timings.wait, 650.0);
    assert_eq!(slowest.timings.receive, 172.0);
}

#[test]
fn test_stats_report_unknown_timings_count_as_zero() {
    let report = stats_report(&fixture_path("sample.har"), 10).unwrap();

    let logo = &report.slowest_requests[1];
    assert_eq!(logo.url, "https://cdn.example.com/logo.png");
    assert_eq!(logo.timings.ssl, 0.0);
    assert_eq!(logo.timings.receive, 0.0);
    assert_eq!(logo.timings.dns, 350.0);
}

#[test]
fn test_stats_report_status_and_domains() {
    let report = stats_report(&fixture_path("sample.har"), 10).unwrap();

    let buckets: Vec<(&str, usize)> = report
        .status_distribution
        .iter()
        .map(|b| (b.category.as_str(), b.count))
        .collect();
    assert_eq!(buckets, vec![("2xx", 1), ("4xx", 1), ("5xx", 1)]);

    assert_eq!(report.domain_load.len(), 2);
    assert_eq!(report.domain_load[0].domain, "api.example.com");
    assert_eq!(report.domain_load[0].total_time, 980.5);
    assert_eq!(report.domain_load[0].request_count, 2);
    assert_eq!(report.domain_load[1].domain, "cdn.example.com");
}

#[test]
fn test_stats_report_top_limit() {
    let report = stats_report(&fixture_path("sample.har"), 1).unwrap();

    assert_eq!(report.slowest_requests.len(), 1);
    assert_eq!(report.domain_load.len(), 1);
    // Distribution is never truncated
    assert_eq!(report.status_distribution.len(), 3);
}

#[test]
fn test_stats_report_no_entries() {
    let report = stats_report(&fixture_path("no-entries.har"), 10).unwrap();

    assert_eq!(report.total_requests, 0);
    assert!(report.slowest_requests.is_empty());
    assert!(report.status_distribution.is_empty());
    assert!(report.domain_load.is_empty());
}

#[test]
fn test_stats_command_pretty() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("stats").arg(fixture_path("sample.har"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("HAR Statistics"))
        .stdout(predicate::str::contains("Total Requests: 3"))
        .stdout(predicate::str::contains(
            "dns 5.00 | connect 20.00 | ssl 12.00 | wait 650.00 | receive 172.00 (phases 859.00)",
        ))
        .stdout(predicate::str::contains("Status Code Distribution:"))
        .stdout(predicate::str::contains("api.example.com"));
}

#[test]
fn test_stats_command_json() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("stats")
        .arg(fixture_path("sample.har"))
        .arg("--format")
        .arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["total_requests"], 3);
    assert_eq!(json["slowest_requests"][0]["time"], 900.5);
    assert_eq!(json["domain_load"][0]["domain"], "api.example.com");
}

#[test]
fn test_stats_command_missing_file() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("stats").arg(fixture_path("missing.har"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("HAR file not found"));
}
