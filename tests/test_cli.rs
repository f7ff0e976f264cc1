use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_grid-filters")
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(bin())
        .args(["--color", "never"])
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("GRID_FILTERS_CONFIG")
        .output()
        .expect("failed to run binary")
}

#[test]
fn test_list_json_for_one_type() {
    let output = run(&["list", "--type", "bool?", "--format", "json"]);
    assert!(output.status.success());

    let entries: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let methods: Vec<&str> = entries
        .as_array()
        .expect("array")
        .iter()
        .map(|entry| entry["method"].as_str().expect("method"))
        .collect();

    assert_eq!(methods, vec!["equals", "not-equals"]);
    assert_eq!(entries[0]["filter"], "BooleanFilter");
}

#[test]
fn test_list_text_is_a_table() {
    let output = run(&["list", "-t", "string"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("StringEndsWithFilter"));
    assert!(stdout.contains("5 registrations"));
}

#[test]
fn test_parse_reports_each_value() {
    let output = run(&["parse", "--kind", "u8", "255", "", "7"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("-> 255"));
    assert!(lines[1].contains("null"));
}

#[test]
fn test_parse_json_reports_status_per_value() {
    let output = run(&["parse", "-k", "decimal", "-F", "json", "12.50", "1_000"]);
    assert!(!output.status.success());

    let outcomes: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(outcomes[0]["status"], "value");
    assert_eq!(outcomes[0]["raw"], "12.50");
    assert_eq!(outcomes[1]["status"], "error");
}

#[test]
fn test_parse_failure_sets_exit_status() {
    let output = run(&["parse", "--kind", "u8", "1", "256"]);
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("error \"256\""));
}

#[test]
fn test_resolve_uses_config_file() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("filters.toml");
    fs::write(
        &config,
        concat!(
            "[[register]]\ntype = \"Money\"\nmethod = \"equals\"\n",
            "filter = \"number\"\nkind = \"decimal\"\n",
        ),
    )
    .expect("write config");

    let output = run(&[
        "--config",
        config.to_str().expect("utf8 path"),
        "resolve",
        "--type",
        "Money?",
        "--method",
        "EQUALS",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(stdout.trim(), "Money equals -> NumberFilter<decimal>");
}

#[test]
fn test_resolve_without_registration_fails() {
    let output = run(&["resolve", "--type", "bool", "--method", "contains"]);
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("No filter registered for bool contains"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("bad.toml");
    fs::write(
        &config,
        "[[register]]\ntype = \"bool\"\nmethod = \"less-than\"\nfilter = \"number\"\n",
    )
    .expect("write config");

    let output = run(&["--config", config.to_str().expect("utf8 path"), "list"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("Failed to apply filter registrations"));
    assert!(stderr.contains("cannot compare values of type 'bool'"));
}
