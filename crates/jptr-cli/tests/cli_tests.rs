//! Integration tests for the `jptr` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary, including stdin/stdout piping, file I/O, output
//! formatting, and error exits.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

/// Helper: path to the value.json fixture.
fn value_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/value.json")
}

fn jptr() -> Command {
    Command::cargo_bin("jptr").unwrap()
}

/// Helper: run with the given args and stdin, parse stdout as JSON.
fn run_json(args: &[&str], stdin: &str) -> Value {
    let output = jptr()
        .args(args)
        .write_stdin(stdin)
        .output()
        .expect("jptr should run");
    assert!(
        output.status.success(),
        "jptr {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// get
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn get_stdin_to_stdout() {
    let out = run_json(&["get", "/a/1"], r#"{"a":[1,2,3]}"#);
    assert_eq!(out, json!(2));
}

#[test]
fn get_from_file_with_escaped_tokens() {
    jptr()
        .args(["get", "/a~1b/m~0n", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn get_root_returns_whole_document() {
    let out = run_json(&["get", "", "-i", sample_json_path()], "");
    assert_eq!(out["scores"], json!([95, 87, 92]));
    assert_eq!(out["profile"]["city"], json!("Oslo"));
}

#[test]
fn get_missing_member_fails() {
    jptr()
        .args(["get", "/nope"])
        .write_stdin(r#"{"a":1}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to get '/nope'"))
        .stderr(predicate::str::contains("no member named 'nope'"));
}

// ─────────────────────────────────────────────────────────────────────────────
// add / replace / remove
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn add_inserts_into_array() {
    let out = run_json(&["add", "/a/1", "9"], r#"{"a":[1,2,3]}"#);
    assert_eq!(out, json!({"a": [1, 9, 2, 3]}));
}

#[test]
fn add_append_token() {
    let out = run_json(&["add", "/-", r#"{"k":true}"#], "[1,2]");
    assert_eq!(out, json!([1, 2, {"k": true}]));
}

#[test]
fn add_negative_number_value() {
    let out = run_json(&["add", "/n", "-5"], "{}");
    assert_eq!(out, json!({"n": -5}));
}

#[test]
fn add_value_from_file() {
    let out = run_json(
        &["add", "/profile/extra", "--value-file", value_json_path(), "-i", sample_json_path()],
        "",
    );
    assert_eq!(out["profile"]["extra"], json!({"nested": [1, 2, {"deep": null}]}));
}

#[test]
fn add_index_out_of_range_fails() {
    jptr()
        .args(["add", "/5", "0"])
        .write_stdin("[1,2]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn replace_overwrites_in_place() {
    let out = run_json(&["replace", "/a/1", "9"], r#"{"a":[1,2,3]}"#);
    assert_eq!(out, json!({"a": [1, 9, 3]}));
}

#[test]
fn replace_root_fails() {
    jptr()
        .args(["replace", "", "1"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not permitted on the root pointer"));
}

#[test]
fn remove_shifts_array() {
    let out = run_json(&["remove", "/a/1"], r#"{"a":[1,2,3]}"#);
    assert_eq!(out, json!({"a": [1, 3]}));
}

#[test]
fn remove_preserves_member_order() {
    let output = jptr()
        .args(["remove", "/b", "--compact"])
        .write_stdin(r#"{"c":3,"b":2,"a":1}"#)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "{\"c\":3,\"a\":1}\n");
}

#[test]
fn edit_file_to_file() {
    let output_path = std::env::temp_dir().join("jptr-test-edit-output.json");
    let _ = std::fs::remove_file(&output_path);

    jptr()
        .args(["replace", "/name", r#""Bob""#, "-i", sample_json_path(), "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout("");

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let value: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["name"], json!("Bob"));
    assert_eq!(value["scores"], json!([95, 87, 92]));

    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Input validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn malformed_pointer_fails() {
    jptr()
        .args(["get", "a/b"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON pointer"));
}

#[test]
fn invalid_document_fails() {
    jptr()
        .args(["get", "/a"])
        .write_stdin("not json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn invalid_value_fails() {
    jptr()
        .args(["add", "/a", "{unquoted}"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Value is not valid JSON"));
}

#[test]
fn add_without_value_is_a_usage_error() {
    jptr().args(["add", "/a"]).write_stdin("{}").assert().failure();
}

#[test]
fn missing_input_file_fails() {
    jptr()
        .args(["get", "", "-i", "/nonexistent/doc.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Output formatting and logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compact_flag_prints_single_line() {
    jptr()
        .args(["get", "/profile", "--compact", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("{\"city\":\"Oslo\",\"tags\":[\"x\",\"y\"]}\n");
}

#[test]
fn default_output_is_pretty() {
    jptr()
        .args(["get", "/profile/tags", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("[\n  \"x\",\n  \"y\"\n]\n");
}

#[test]
fn verbose_logs_go_to_stderr() {
    jptr()
        .args(["-vv", "get", "/a"])
        .env_remove("RUST_LOG")
        .write_stdin(r#"{"a":1}"#)
        .assert()
        .success()
        .stdout("1\n")
        .stderr(predicate::str::contains("get '/a': ok"));
}

// ─────────────────────────────────────────────────────────────────────────────
// tokens / escape
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tokens_prints_decoded_tokens() {
    jptr()
        .args(["tokens", "/a~1b/m~0n//~01"])
        .assert()
        .success()
        .stdout("[\"a/b\",\"m~n\",\"\",\"~1\"]\n");
}

#[test]
fn tokens_of_root_is_empty() {
    jptr().args(["tokens", ""]).assert().success().stdout("[]\n");
}

#[test]
fn escape_builds_pointer() {
    jptr()
        .args(["escape", "a/b", "m~n", "-"])
        .assert()
        .success()
        .stdout("/a~1b/m~0n/-\n");
}

#[test]
fn help_lists_subcommands() {
    jptr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("replace"))
        .stdout(predicate::str::contains("escape"));
}
