// classify_flow.rs - End-to-end tests for the `admit` binary.
//
// Flow:
//   1. Write goal drafts (JSON / YAML) into a temp project
//   2. Run `admit classify` with and without config / flags
//   3. Check the printed verdict and the exit status

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const VALID_DRAFT: &str = r#"{
    "description": "Ship feature X",
    "observable_return": "Feature X passes 95% of acceptance tests by March 1",
    "external_verification": "QA test suite report",
    "time_horizon_days": 30,
    "reversibility": true,
    "resource_constraints": { "time": 20, "energy": 50, "attention": 60 }
}"#;

const VAGUE_DRAFT: &str = r#"{
    "description": "Get fit",
    "observable_return": "get better",
    "external_verification": null,
    "time_horizon_days": 90,
    "reversibility": true,
    "resource_constraints": { "time": 10, "energy": 40, "attention": 20 }
}"#;

fn admit(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_admit"))
        .arg("--project-root")
        .arg(project)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn valid_draft_is_admissible_as_json() {
    let project = TempDir::new().unwrap();
    let draft = project.path().join("goal.json");
    fs::write(&draft, VALID_DRAFT).unwrap();

    let output = admit(
        project.path(),
        &["classify", draft.to_str().unwrap(), "--format", "json", "--check"],
    );
    assert!(output.status.success());
    let verdict = stdout_json(&output);
    assert_eq!(verdict["status"], "admissible");
    assert_eq!(verdict["goal"]["time_horizon_days"], 30);
    assert_eq!(verdict["goal"]["external_verification"], "QA test suite report");
}

#[test]
fn vague_draft_fails_check_with_soft_reasons() {
    let project = TempDir::new().unwrap();
    let draft = project.path().join("goal.json");
    fs::write(&draft, VAGUE_DRAFT).unwrap();

    let output = admit(
        project.path(),
        &["classify", draft.to_str().unwrap(), "--format", "json", "--check"],
    );
    assert!(!output.status.success());
    let verdict = stdout_json(&output);
    assert_eq!(verdict["status"], "ambiguous");
    assert_eq!(verdict["missing"], serde_json::json!([]));
    let reasons: Vec<&str> = verdict["reasons"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap())
        .collect();
    assert!(reasons
        .iter()
        .any(|r| r.starts_with("observable_return: avoid vague words")));
    assert!(String::from_utf8_lossy(&output.stderr).contains("goal is ambiguous"));
}

#[test]
fn legacy_rule_set_from_flag_rejects_vague_draft() {
    let project = TempDir::new().unwrap();
    let draft = project.path().join("goal.json");
    fs::write(&draft, VAGUE_DRAFT).unwrap();

    let output = admit(
        project.path(),
        &[
            "classify",
            draft.to_str().unwrap(),
            "--ruleset",
            "legacy",
            "--format",
            "json",
        ],
    );
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "rejected");
}

#[test]
fn project_config_selects_rule_set_and_format() {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join(".admit")).unwrap();
    fs::write(
        project.path().join(".admit/config.toml"),
        "[classifier]\nruleset = \"legacy\"\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();
    let draft = project.path().join("goal.json");
    fs::write(&draft, VAGUE_DRAFT).unwrap();

    let output = admit(project.path(), &["classify", draft.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["status"], "rejected");
}

#[test]
fn config_can_point_at_a_rule_set_file() {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join(".admit")).unwrap();
    fs::write(
        project.path().join(".admit/config.toml"),
        "[classifier]\nruleset = \".admit/short-horizon.toml\"\n",
    )
    .unwrap();
    fs::write(
        project.path().join(".admit/short-horizon.toml"),
        r#"
name = "short-horizon"

[[rules]]
id = "time_horizon_days.too_long"
field = "time_horizon_days"
severity = "hard"
message = "more than two weeks"
check = { kind = "above", value = 14 }
"#,
    )
    .unwrap();
    let draft = project.path().join("goal.json");
    fs::write(&draft, VALID_DRAFT).unwrap();

    let output = admit(
        project.path(),
        &["classify", draft.to_str().unwrap(), "--format", "json"],
    );
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({
            "status": "rejected",
            "reasons": ["time_horizon_days: more than two weeks"]
        })
    );
}

#[test]
fn yaml_draft_with_missing_fields_prints_text() {
    let project = TempDir::new().unwrap();
    let draft = project.path().join("goal.yaml");
    fs::write(&draft, "description: Learn Rust\nreversibility: true\n").unwrap();

    let output = admit(project.path(), &["classify", draft.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Status: ambiguous (rule set: current)"));
    assert!(stdout.contains("Next constraints:"));
    assert!(stdout.contains("Observable return (observable_return)"));
    assert!(stdout.contains("Resource constraints (resource_constraints)"));
    assert!(stdout.contains("Missing required fields: observable_return"));
}

#[test]
fn stdin_draft_with_trace() {
    let project = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_admit"))
        .arg("--project-root")
        .arg(project.path())
        .args(["classify", "-", "--format", "json", "--trace"])
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(VALID_DRAFT.replace("30", "50000").as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let trace = stdout_json(&output);
    assert_eq!(trace["ruleset"], "current");
    assert_eq!(trace["verdict"]["status"], "rejected");
    let fired: Vec<&str> = trace["steps"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["outcome"] == "fired")
        .map(|s| s["rule"].as_str().unwrap())
        .collect();
    assert_eq!(fired, vec!["time_horizon_days.too_long"]);
}

#[test]
fn unknown_rule_set_is_an_error() {
    let project = TempDir::new().unwrap();
    let draft = project.path().join("goal.json");
    fs::write(&draft, VALID_DRAFT).unwrap();

    let output = admit(
        project.path(),
        &["classify", draft.to_str().unwrap(), "--ruleset", "strictest"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown rule set 'strictest'"));
}

#[test]
fn rules_and_fields_listings() {
    let project = TempDir::new().unwrap();

    let output = admit(project.path(), &["rules", "--ruleset", "legacy", "--format", "json"]);
    assert!(output.status.success());
    let ruleset = stdout_json(&output);
    assert_eq!(ruleset["name"], "legacy");
    assert!(!ruleset["rules"].as_array().unwrap().is_empty());

    let output = admit(project.path(), &["fields"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("resource_constraints.attention"));
    assert!(stdout.contains("Attention budget"));
}
