// Tests for `marklint check`

use std::fs;

use super::common::{run_marklint, setup_unity_project, HUD, PLAYER, PLAYER_FIXED};

#[test]
fn test_check_reports_violations() {
    let dir = setup_unity_project(&[("Assets/Scripts/Player.cs", PLAYER)]);
    let out = run_marklint(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("error[UFT0002]"), "{stdout}");
    assert!(stdout.contains("error[UFT0001]"), "{stdout}");
    assert!(stdout.contains("Assets/Scripts/Player.cs:12:13"), "{stdout}");
}

#[test]
fn test_check_clean_project_is_silent() {
    let dir = setup_unity_project(&[("Assets/Player.cs", PLAYER_FIXED)]);
    let out = run_marklint(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_check_json() {
    let dir = setup_unity_project(&[("Assets/UI/Hud.cs", HUD)]);
    let out = run_marklint(dir.path(), &["check", "--json"]);
    assert_eq!(out.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let codes: Vec<_> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, vec!["UFT0004", "UFT0005"]);
}

#[test]
fn test_check_paths_limit_reporting_not_resolution() {
    let dir = setup_unity_project(&[
        (
            "Assets/Player.cs",
            "using UnityFastTools;\npublic partial class Player { [GetComponentProperty] private Rigidbody _body; }\n",
        ),
        (
            "Assets/Movement/Player.Movement.cs",
            "public partial class Player { void Jump() { _body.WakeUp(); } }\n",
        ),
        ("Assets/UI/Hud.cs", HUD),
    ]);
    let out = run_marklint(dir.path(), &["check", "--json", "Assets/Movement"]);
    assert_eq!(out.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(
        json["files_analyzed"],
        serde_json::json!(["Assets/Movement/Player.Movement.cs"])
    );
    assert_eq!(json["errors"][0]["code"], "UFT0001");
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
}

#[test]
fn test_check_honours_ignore_file_and_config() {
    let dir = setup_unity_project(&[
        ("Assets/Player.cs", PLAYER_FIXED),
        ("Library/Cache/Player.cs", PLAYER),
        ("Assets/Plugins/Hud.cs", HUD),
        (".marklintignore", "Library/\n"),
        (
            ".marklint/marklint.json",
            r#"{ "version": "0.3.0", "ignore_patterns": ["Assets/Plugins/**"] }"#,
        ),
    ]);
    let out = run_marklint(dir.path(), &["check"]);
    assert_eq!(
        out.status.code(),
        Some(0),
        "{}",
        String::from_utf8_lossy(&out.stdout)
    );
}

#[test]
fn test_check_from_subdirectory_uses_project_root() {
    let dir = setup_unity_project(&[
        ("Assets/Scripts/Player.cs", PLAYER),
        (".marklint/marklint.json", r#"{ "version": "0.3.0" }"#),
    ]);
    let sub = dir.path().join("Assets/Scripts");
    let out = run_marklint(&sub, &["check", "--json"]);
    assert_eq!(out.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["errors"][0]["file"], "Assets/Scripts/Player.cs");
}

#[test]
fn test_generated_files_are_not_reported() {
    let dir = setup_unity_project(&[("Assets/Player.g.cs", PLAYER)]);
    let out = run_marklint(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(0));

    fs::write(
        dir.path().join("Assets/Other.cs"),
        format!("// <auto-generated/>\n{PLAYER}"),
    )
    .unwrap();
    assert_eq!(run_marklint(dir.path(), &["check"]).status.code(), Some(0));
}
