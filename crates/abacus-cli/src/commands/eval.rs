//! Eval command - one-shot expression evaluation

use abacus_runtime::{evaluate, EvalError};
use anyhow::Result;
use colored::Colorize;

/// Evaluate a single expression and print the result
///
/// On success the result value prints to stdout. On failure the caret
/// rendering prints to stderr and an error bubbles up so the process exits
/// non-zero. With `json` set, both outcomes print as single-line JSON on
/// stdout instead.
pub fn run(expression: &str, json: bool) -> Result<()> {
    match evaluate(expression) {
        Ok(value) => {
            if json {
                let line = serde_json::json!({ "ok": true, "value": value.to_string() });
                println!("{}", line);
            } else {
                println!("{}", value);
            }
            Ok(())
        }
        Err(err) => {
            if json {
                println!("{}", error_json(&err));
            } else {
                eprintln!("{}", render_error(&err, expression));
            }
            Err(anyhow::anyhow!("Evaluation failed"))
        }
    }
}

/// JSON form of an evaluation error: kind, message, and optional column
fn error_json(err: &EvalError) -> serde_json::Value {
    serde_json::json!({
        "ok": false,
        "error": {
            "kind": err.kind().as_str(),
            "message": err.to_string(),
            "column": err.column(),
        }
    })
}

/// Format an error with its caret rendering for terminal display
fn render_error(err: &EvalError, expression: &str) -> String {
    format!("{}: {}", "error".red().bold(), err.pretty(expression))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_simple_expression() {
        assert!(run("1 + 2", false).is_ok());
    }

    #[test]
    fn test_run_reports_failure() {
        assert!(run("1 +", false).is_err());
    }

    #[test]
    fn test_run_json_failure_still_errors() {
        assert!(run("3 + foo", true).is_err());
    }

    #[test]
    fn test_error_json_shape() {
        let err = evaluate("3 + foo").unwrap_err();
        let json = error_json(&err);
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["kind"], "semantic");
        assert_eq!(json["error"]["column"], 4);
        assert_eq!(json["error"]["message"], "Undefined variable: foo");
    }

    #[test]
    fn test_error_json_without_column() {
        let err = evaluate("   ").unwrap_err();
        let json = error_json(&err);
        assert_eq!(json["error"]["kind"], "semantic");
        assert_eq!(json["error"]["column"], serde_json::Value::Null);
    }

    #[test]
    fn test_render_error_includes_caret() {
        colored::control::set_override(false);
        let err = evaluate("3 + foo").unwrap_err();
        let rendered = render_error(&err, "3 + foo");
        assert!(rendered.contains("Undefined variable: foo"));
        assert!(rendered.ends_with("----^"));
        colored::control::unset_override();
    }
}
