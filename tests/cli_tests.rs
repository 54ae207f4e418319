use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const ANALYZE_REQUEST: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/analyze_request.json");
const ASSESSMENTS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/assessments.json");

/// Run the binary from an empty directory so no stray `.env` or
/// `risk_analyzer.*` file is picked up.
fn run(args: &[&str], stdin: Option<&str>) -> Output {
    let workdir = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_project-risk-analyzer"))
        .args(args)
        .current_dir(workdir.path())
        .env_remove("RISK_ANALYZER_CONFIG")
        .env("RISK_ANALYZER_LOGGING__LEVEL", "error")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(body) = stdin {
            pipe.write_all(body.as_bytes()).unwrap();
        }
    }
    child.wait_with_output().unwrap()
}

fn envelope(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_analyze_demo_request() {
    let output = run(&["analyze", "--input", ANALYZE_REQUEST], None);
    assert_eq!(output.status.code(), Some(0));

    let body = envelope(&output);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["risk_score"], 58.5);
    assert_eq!(body["data"]["risk_level"], "medium");
    assert!(body.get("message").is_none());
}

#[test]
fn test_analyze_reads_stdin() {
    let request = std::fs::read_to_string(ANALYZE_REQUEST).unwrap();
    let output = run(&["analyze"], Some(&request));
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(envelope(&output)["data"]["risk_score"], 58.5);
}

#[test]
fn test_empty_factor_set_exits_with_validation_code() {
    let output = run(&["analyze"], Some(r#"{"risk_factors": {}}"#));
    assert_eq!(output.status.code(), Some(2));

    let body = envelope(&output);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Risk factors cannot be empty");
    assert!(body.get("data").is_none());
}

#[test]
fn test_malformed_json_exits_with_validation_code() {
    let output = run(&["analyze"], Some("{\"risk_factors\": "));
    assert_eq!(output.status.code(), Some(2));

    let body = envelope(&output);
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON request"));
}

#[test]
fn test_missing_input_file_is_a_failure() {
    let output = run(&["analyze", "--input", "no-such-request.json"], None);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(envelope(&output)["status"], "error");
}

#[test]
fn test_missing_config_file_is_a_failure() {
    let output = run(&["--config", "no-such-config.toml", "weights"], None);
    assert_eq!(output.status.code(), Some(1));

    let body = envelope(&output);
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Configuration error"));
}

#[test]
fn test_assess_reports_and_skips_invalid_entries() {
    let output = run(&["assess", "--input", ASSESSMENTS], None);
    assert_eq!(output.status.code(), Some(0));

    let body = envelope(&output);
    assert_eq!(body["status"], "success");
    let report = &body["data"];
    assert_eq!(report["assessments"].as_array().unwrap().len(), 2);
    assert_eq!(report["assessments"][0]["id"], 1);
    assert_eq!(report["assessments"][1]["id"], 2);

    let rejected = report["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["index"], 2);
    assert!(rejected[0]["message"]
        .as_str()
        .unwrap()
        .starts_with("Missing required risk factors"));
    assert_eq!(report["summary"]["total"], 2);
}

#[test]
fn test_weights_table() {
    let output = run(&["weights"], None);
    assert_eq!(output.status.code(), Some(0));

    let body = envelope(&output);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["factor"], "technical_complexity");
}

#[test]
fn test_demo_config_is_accepted() {
    let config = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/risk_analyzer.toml");
    let output = run(
        &["--config", config.to_str().unwrap(), "analyze", "--input", ANALYZE_REQUEST],
        None,
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(envelope(&output)["status"], "success");
}
