//! End-to-end tests for the abacus binary.
//!
//! Each test spawns the real binary and asserts on its stdout, stderr, and
//! exit status. Environment variables that change output shape are cleared
//! in the helper so tests are insensitive to the invoking shell.

use assert_cmd::Command;
use predicates::prelude::*;

fn abacus_cmd() -> Command {
    let mut cmd = Command::cargo_bin("abacus").unwrap();
    cmd.env_remove("ABACUS_JSON");
    cmd.env_remove("ABACUS_HISTORY_FILE");
    cmd.env("NO_COLOR", "1");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap()
}

// Eval

#[test]
fn test_eval_prints_result() {
    abacus_cmd()
        .args(["eval", "1 + 2 * 3"])
        .assert()
        .success()
        .stdout("7\n");
}

#[test]
fn test_eval_alias() {
    abacus_cmd()
        .args(["e", "10 % 4"])
        .assert()
        .success()
        .stdout("2\n");
}

#[test]
fn test_eval_string_concatenation() {
    abacus_cmd()
        .args(["eval", "\"n=\" + 4"])
        .assert()
        .success()
        .stdout("n=4\n");
}

#[test]
fn test_eval_builtin_constants() {
    abacus_cmd()
        .args(["eval", "pi - 3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.14159265358979312"));
}

#[test]
fn test_eval_error_prints_caret_to_stderr() {
    abacus_cmd()
        .args(["eval", "3 + foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Undefined variable: foo"))
        .stderr(predicate::str::contains("3 + foo"))
        .stderr(predicate::str::contains("----^"));
}

#[test]
fn test_eval_empty_expression_fails() {
    abacus_cmd()
        .args(["eval", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty expression"));
}

// JSON output

#[test]
fn test_eval_json_success_shape() {
    let json = stdout_json(abacus_cmd().args(["eval", "2 + 2", "--json"]));
    assert_eq!(json["ok"], true);
    assert_eq!(json["value"], "4");
}

#[test]
fn test_eval_json_error_shape() {
    let mut cmd = abacus_cmd();
    cmd.args(["eval", "3 + foo", "--json"]);
    cmd.assert().failure();

    let json = stdout_json(abacus_cmd().args(["eval", "3 + foo", "--json"]));
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["kind"], "semantic");
    assert_eq!(json["error"]["message"], "Undefined variable: foo");
    assert_eq!(json["error"]["column"], 4);
}

#[test]
fn test_eval_json_via_environment() {
    let json = stdout_json(abacus_cmd().env("ABACUS_JSON", "1").args(["eval", "1 + 1"]));
    assert_eq!(json["ok"], true);
    assert_eq!(json["value"], "2");
}

// Dumps

#[test]
fn test_tokens_dump_one_json_line_per_token() {
    let output = abacus_cmd().args(["tokens", "10 + foo"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["kind"], "Number");
    assert_eq!(first["lexeme"], "10");
    assert_eq!(first["span"]["start"], 0);
}

#[test]
fn test_tokens_dump_reports_lexical_errors() {
    abacus_cmd()
        .args(["tokens", "1 = 2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unexpected character"));
}

#[test]
fn test_ast_dump_is_json() {
    let json = stdout_json(abacus_cmd().args(["ast", "1 + 2 * 3"]));
    assert!(json.get("Binary").is_some());
}

#[test]
fn test_ast_dump_reports_syntax_errors() {
    abacus_cmd()
        .args(["ast", "(1 + 2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("odd number of brackets"));
}

// REPL

#[test]
fn test_repl_evaluates_and_quits() {
    abacus_cmd()
        .env("ABACUS_NO_HISTORY", "1")
        .arg("repl")
        .write_stdin("1 + 2\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn test_repl_set_binding_persists() {
    abacus_cmd()
        .env("ABACUS_NO_HISTORY", "1")
        .arg("repl")
        .write_stdin(":set x 21\nx * 2\n:q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("x = 21"))
        .stdout(predicate::str::contains("42"));
}

// Meta

#[test]
fn test_completions_bash() {
    abacus_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abacus"));
}

#[test]
fn test_version_flag() {
    abacus_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("abacus"));
}
