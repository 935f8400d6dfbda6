use std::fs;
use std::process::{Command, Output};

use serde_json::Value;

fn axiom(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_axiom"))
        .args(args)
        .output()
        .expect("failed to run axiom binary")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn compute_prints_default_state() {
    let state = stdout_json(&axiom(&["compute"]));
    assert_eq!(state["intelligence"], 10.0);
    assert_eq!(state["foundation"]["C_pressure"], 1.0);
}

#[test]
fn flags_override_parameters() {
    let state = stdout_json(&axiom(&["compute", "--purpose", "2", "--n", "2"]));
    assert_eq!(state["n"], 2);
    assert_eq!(state["intelligence"], 102.0);
}

#[test]
fn evolve_prints_history() {
    let out = stdout_json(&axiom(&["evolve", "--steps", "3"]));
    assert_eq!(out["history"].as_array().map(Vec::len), Some(4));
    assert_eq!(out["history"][3]["n"], 4);
}

#[test]
fn predict_applies_drift() {
    let out = stdout_json(&axiom(&["predict", "--steps", "2", "--pressure-per-step", "-0.25"]));
    assert_eq!(out["trajectory"][2]["foundation"]["C_pressure"], 0.5);
}

#[test]
fn predict_strengthens_purpose() {
    let out = stdout_json(&axiom(&[
        "predict",
        "--steps",
        "1",
        "--purpose-multiplier-per-step",
        "2",
    ]));
    assert_eq!(out["trajectory"][1]["cognitive"]["Y_purpose"], 2.0);
    assert_eq!(out["analysis"]["intelligence"]["trend"], "increasing");
}

#[test]
fn invalid_parameter_exits_with_field_messages() {
    let output = axiom(&["compute", "--subjectivity", "1.5", "--pressure", "0"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("- pressure must be >= 0.01, got 0"));
    assert!(stderr.contains("- subjectivity must be <= 1, got 1.5"));
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_tool_fails() {
    let output = axiom(&["tool", "teleport"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown tool: teleport"));
}

#[test]
fn tool_runs_with_json_args() {
    let out = stdout_json(&axiom(&[
        "tool",
        "apply_pressure",
        "--args",
        r#"{"pressure_delta": 1.5}"#,
    ]));
    assert_eq!(out["new_state"]["foundation"]["C_pressure"], 2.5);
}

#[test]
fn tools_lists_every_name() {
    let names = stdout_json(&axiom(&["tools"]));
    let names = names.as_array().expect("array of names");
    assert_eq!(names.len(), 12);
    assert!(names.contains(&Value::from("detect_collapse_risk")));
}

#[test]
fn config_file_is_overridden_by_flags() {
    let path = std::env::temp_dir().join(format!("axiom-cli-{}.json", std::process::id()));
    fs::write(&path, r#"{"purpose": 3.0, "time": 2.0}"#).unwrap();
    let path_str = path.to_string_lossy().into_owned();

    let state = stdout_json(&axiom(&["compute", "--config", &path_str, "--time", "1"]));
    fs::remove_file(&path).ok();

    assert_eq!(state["cognitive"]["Y_purpose"], 3.0);
    assert_eq!(state["cognitive"]["Z_time"], 1.0);
    assert_eq!(state["intelligence"], 30.0);
}
