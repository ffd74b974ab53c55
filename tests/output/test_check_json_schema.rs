// Contract tests for `check --json` output shape

use marklint_output::json::JsonFormatter;
use marklint_output::OutputFormatter;

use super::common::{check_sources, HUD, PLAYER};

fn check_json(files: &[(&str, &str)]) -> serde_json::Value {
    let out = JsonFormatter.format_check(&check_sources(files));
    serde_json::from_str(&out).expect("check output must be valid JSON")
}

#[test]
fn test_top_level_fields() {
    let json = check_json(&[("Assets/Player.cs", PLAYER)]);
    for key in ["version", "command", "status", "files_analyzed", "errors", "info"] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(json["command"], "check");
    assert_eq!(json["status"], "error");
    assert_eq!(json["files_analyzed"], serde_json::json!(["Assets/Player.cs"]));
}

#[test]
fn test_diagnostic_fields() {
    let json = check_json(&[("Assets/UI/Hud.cs", HUD)]);
    let first = &json["errors"][0];
    for key in [
        "code", "rule", "severity", "category", "message", "args", "file", "line", "column",
        "end_line", "end_column", "fix_hint", "fixable",
    ] {
        assert!(first.get(key).is_some(), "missing diagnostic key {key}");
    }
    assert_eq!(first["code"], "UFT0004");
    assert_eq!(first["rule"], "handler-accessor");
    assert_eq!(first["severity"], "ERROR");
    assert_eq!(first["args"], serde_json::json!(["Score"]));
    assert_eq!(first["fixable"], false);
}

#[test]
fn test_clean_project() {
    let json = check_json(&[("A.cs", "public class A { }\n")]);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["errors"], serde_json::json!([]));
    assert_eq!(json["info"]["files_generated"], 0);
    assert!(json["info"].get("files_with_syntax_errors").is_none());
}

#[test]
fn test_syntax_errors_listed() {
    let json = check_json(&[("Broken.cs", "public class { int\n")]);
    assert_eq!(
        json["info"]["files_with_syntax_errors"],
        serde_json::json!(["Broken.cs"])
    );
}
