// Exit code contract: 0 clean, 1 violations, 2 usage or setup error

use super::common::{run_marklint, setup_unity_project, PLAYER};

#[test]
fn test_empty_project_is_clean() {
    let dir = setup_unity_project(&[]);
    assert_eq!(run_marklint(dir.path(), &["check"]).status.code(), Some(0));
}

#[test]
fn test_violations_exit_1() {
    let dir = setup_unity_project(&[("Player.cs", PLAYER)]);
    assert_eq!(run_marklint(dir.path(), &["check"]).status.code(), Some(1));
}

#[test]
fn test_missing_path_exit_2() {
    let dir = setup_unity_project(&[]);
    let out = run_marklint(dir.path(), &["check", "Nope"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("path not found"));
}

#[test]
fn test_usage_error_exit_2() {
    let dir = setup_unity_project(&[]);
    assert_eq!(run_marklint(dir.path(), &["frobnicate"]).status.code(), Some(2));
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let dir = setup_unity_project(&[("Player.cs", PLAYER), (".marklint/marklint.json", "{ nope")]);
    let out = run_marklint(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to read config"));
}
