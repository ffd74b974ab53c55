// Tests for `marklint fix`: plans by default, writes with --apply

use std::fs;

use super::common::{run_marklint, setup_unity_project, HUD, PLAYER, PLAYER_FIXED};

#[test]
fn test_fix_without_apply_leaves_files() {
    let dir = setup_unity_project(&[("Assets/Player.cs", PLAYER)]);
    let out = run_marklint(dir.path(), &["fix"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Fix plan: 2 violations in 1 file"), "{stdout}");
    assert!(stdout.contains("+ public partial class Player : MonoBehaviour"));
    assert_eq!(fs::read_to_string(dir.path().join("Assets/Player.cs")).unwrap(), PLAYER);
}

#[test]
fn test_fix_apply_rewrites_and_rechecks() {
    let dir = setup_unity_project(&[("Assets/Player.cs", PLAYER)]);
    let out = run_marklint(dir.path(), &["fix", "--apply", "--json"]);
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["actions_applied"], 2);
    assert_eq!(json["actions_failed"], 0);
    assert_eq!(json["recheck_clean"], true);
    assert_eq!(json["files_modified"], serde_json::json!(["Assets/Player.cs"]));

    assert_eq!(
        fs::read_to_string(dir.path().join("Assets/Player.cs")).unwrap(),
        PLAYER_FIXED
    );
    assert_eq!(run_marklint(dir.path(), &["check"]).status.code(), Some(0));
}

#[test]
fn test_fix_single_rule() {
    let dir = setup_unity_project(&[("Assets/Player.cs", PLAYER)]);
    let out = run_marklint(dir.path(), &["fix", "--apply", "--rule", "uft0002", "--json"]);
    // UFT0001 remains after re-check.
    assert_eq!(out.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["actions_applied"], 1);
    assert_eq!(json["recheck_errors"], 1);

    let source = fs::read_to_string(dir.path().join("Assets/Player.cs")).unwrap();
    assert!(source.contains("public partial class Player"));
    assert!(source.contains("_body.AddForce"));
}

#[test]
fn test_fix_leaves_unfixable_violations() {
    let dir = setup_unity_project(&[("Assets/UI/Hud.cs", HUD)]);
    let out = run_marklint(dir.path(), &["fix"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "No violations to fix.\n");

    let applied = run_marklint(dir.path(), &["fix", "--apply"]);
    assert_eq!(applied.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&applied.stdout).contains("Re-check: 2 errors remaining"));
}

#[test]
fn test_fix_rejects_bad_rule() {
    let dir = setup_unity_project(&[("Assets/Player.cs", PLAYER)]);
    let unknown = run_marklint(dir.path(), &["fix", "--rule", "E001"]);
    assert_eq!(unknown.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&unknown.stderr).contains("unknown rule code"));

    let unfixable = run_marklint(dir.path(), &["fix", "--rule", "UFT0004"]);
    assert_eq!(unfixable.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&unfixable.stderr).contains("no automatic fix"));
}
