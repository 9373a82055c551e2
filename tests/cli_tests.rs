//! Integration tests for the tfinspect CLI
//!
//! These tests run the built binary against fixture plans.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to a fixture plan
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run tfinspect from an empty directory so no config file is discovered
fn run_tfinspect(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    Command::new(env!("CARGO_BIN_EXE_tfinspect"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("TFINSPECT_CONFIG")
        .env_remove("TFINSPECT_COLOR")
        .env_remove("TFINSPECT_SHOW_DIFF")
        .env_remove("TFINSPECT_MAX_ADDRESS_WIDTH")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help() {
    let output = run_tfinspect(&["--help"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("summary"));
}

#[test]
fn test_list_json_filters_by_action() {
    let input = fixture("oneofeach.tfplan");
    let output = run_tfinspect(&[
        "--input",
        input.to_str().unwrap(),
        "--output",
        "json",
        "list",
        "--action",
        "replace",
    ]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let changes = value["changes"].as_array().unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0]["address"], "aws_iam_policy.policy3");
    assert_eq!(changes[0]["actions"], serde_json::json!(["delete", "create"]));
    assert!(value["generated_at"].is_string());
}

#[test]
fn test_list_text_without_color() {
    let input = fixture("modules.tfplan");
    let output = run_tfinspect(&["--no-color", "--input", input.to_str().unwrap(), "list"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("module.global.aws_iam_role.role"));
    assert!(!stdout.contains('\u{1b}'));
    assert!(stdout.contains("Plan: 4 to add, 0 to change, 0 to destroy."));
}

#[test]
fn test_show_prints_diff() {
    let input = fixture("oneofeach.tfplan");
    let output = run_tfinspect(&[
        "--no-color",
        "--input",
        input.to_str().unwrap(),
        "show",
        "aws_iam_policy.policy5",
        "--section",
        "actions",
    ]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("- resource \"aws_iam_policy\" \"policy5\" {"));
    assert!(!stdout.contains("~ resource \"aws_iam_policy\" \"policy5\""));
}

#[test]
fn test_show_unknown_address_fails() {
    let input = fixture("oneofeach.tfplan");
    let output = run_tfinspect(&["--input", input.to_str().unwrap(), "show", "aws_s3_bucket.nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no change found"));
}

#[test]
fn test_summary_json() {
    let input = fixture("empty.tfplan");
    let output = run_tfinspect(&["--output", "json", "--input", input.to_str().unwrap(), "summary"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        value["summary"],
        "No changes. Your infrastructure matches the configuration."
    );
    assert!(value["totals"].is_null());
}

#[test]
fn test_malformed_plan_fails_without_output() {
    let input = fixture("shallow_close.tfplan");
    let output = run_tfinspect(&["--input", input.to_str().unwrap(), "list"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_validate_reports_legend() {
    let input = fixture("oneofeach.tfplan");
    let output = run_tfinspect(&["--no-color", "--input", input.to_str().unwrap(), "validate"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Legend symbols: + ~ - -/+"));
}

#[test]
fn test_strip_removes_escapes() {
    let colored = fixture("oneofeachansi.tfplan");
    let output = run_tfinspect(&["--input", colored.to_str().unwrap(), "strip"]);
    assert!(output.status.success());
    let plain = std::fs::read_to_string(fixture("oneofeach.tfplan")).unwrap();
    assert_eq!(stdout(&output).trim_end(), plain.trim_end());
}
