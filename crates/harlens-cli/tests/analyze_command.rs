use assert_cmd::Command;
use harlens_cli::commands::analyze::analyze_har;
use harlens_rules::{RuleId, Severity, Thresholds};
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

/// Test that analyze_har returns one result per entry with the expected findings
#[test]
fn test_analyze_har_findings_per_request() {
    // Arrange
    let fixture = fixture_path("sample.har");

    // Act
    let results = analyze_har(&fixture, Thresholds::default()).unwrap();

    // Assert
    assert_eq!(results.len(), 3);
    assert!(results[0].findings.is_empty());

    let ids: Vec<RuleId> = results[1].findings.iter().map(|f| f.rule_id).collect();
    assert_eq!(
        ids,
        vec![
            RuleId::SlowTtfb,
            RuleId::LargePayload,
            RuleId::ServerError,
            RuleId::RedirectChain,
        ]
    );

    let severities: Vec<Severity> = results[2].findings.iter().map(|f| f.severity).collect();
    assert_eq!(
        severities,
        vec![Severity::Warning, Severity::Medium, Severity::Low]
    );
}

/// Test that unknown body size (-1) never counts as a large payload
#[test]
fn test_analyze_har_unknown_size_not_flagged() {
    let results = analyze_har(&fixture_path("sample.har"), Thresholds::default()).unwrap();

    assert_eq!(results[2].record.response_size, -1);
    assert!(
        results[2]
            .findings
            .iter()
            .all(|f| f.rule_id != RuleId::LargePayload)
    );
}

/// Test that custom thresholds change which rules fire
#[test]
fn test_analyze_har_custom_thresholds() {
    let thresholds = Thresholds {
        ttfb_ms: 40.0,
        ..Default::default()
    };

    let results = analyze_har(&fixture_path("sample.har"), thresholds).unwrap();

    assert_eq!(results[0].findings.len(), 1);
    assert_eq!(results[0].findings[0].rule_id, RuleId::SlowTtfb);
}

#[test]
fn test_analyze_prints_sorted_report() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("analyze").arg(fixture_path("sample.har"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "POST https://api.example.com/orders",
        ))
        .stdout(predicate::str::contains(concat!(
            "   [CRITICAL] Error Response: HTTP 503\n",
            "   [WARNING] Slow TTFB: 650 ms\n",
            "   [WARNING] Large Payload: 2.00 MB\n",
            "   [INFO] Redirected: 40 ms",
        )))
        .stdout(predicate::str::contains(concat!(
            "   [WARNING] Error Response: HTTP 404\n",
            "   [MEDIUM] Connect Time High: 600 ms\n",
            "   [LOW] DNS Lookup Slow: 350 ms",
        )))
        .stdout(predicate::str::contains("/users").not());
}

#[test]
fn test_analyze_clean_file_reports_no_issues() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("analyze").arg(fixture_path("clean.har"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "No rule violations found in this HAR file.",
        ));
}

#[test]
fn test_analyze_file_without_entries_reports_no_issues() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("analyze").arg(fixture_path("no-entries.har"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "No rule violations found in this HAR file.",
        ));
}

#[test]
fn test_analyze_details_flag() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("analyze")
        .arg(fixture_path("sample.har"))
        .arg("--details");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Suggestion:"))
        .stdout(predicate::str::contains("Next steps:"))
        .stdout(predicate::str::contains(
            "   Status: 503 | Time: 900.5 ms | TTFB: 650 ms",
        ));
}

#[test]
fn test_analyze_json_output() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("--format")
        .arg("json")
        .arg("analyze")
        .arg(fixture_path("sample.har"));

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["total_requests"], 3);
    assert_eq!(json["flagged_requests"], 2);
    assert_eq!(json["results"][1]["findings"][2]["rule_id"], "5xx Error");
    assert_eq!(json["results"][1]["findings"][2]["severity"], "critical");
    assert!(json.get("summary").is_none());
}

#[test]
fn test_analyze_table_output() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("--format")
        .arg("table")
        .arg("analyze")
        .arg(fixture_path("sample.har"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "method,url,rule_id,severity,message\n",
        ))
        .stdout(predicate::str::contains(
            "POST,https://api.example.com/orders,5xx Error,critical,Error Response: HTTP 503",
        ));
}

#[test]
fn test_analyze_summarize_without_key_still_reports() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.env_remove("OPENAI_API_KEY")
        .arg("analyze")
        .arg(fixture_path("sample.har"))
        .arg("--summarize");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "[CRITICAL] Error Response: HTTP 503",
        ))
        .stdout(predicate::str::contains("Summary failed:"));
}

#[test]
fn test_analyze_missing_file() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("analyze").arg(fixture_path("does-not-exist.har"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("HAR file not found"));
}

#[test]
fn test_analyze_blank_file() {
    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("analyze").arg(fixture_path("blank.har"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("HAR file is empty"));
}

#[test]
fn test_analyze_invalid_json() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.har");
    std::fs::write(&path, "{\"log\": [").unwrap();

    let mut cmd = Command::new(get_harlens_bin());
    cmd.arg("analyze").arg(&path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse HAR file"));
}
