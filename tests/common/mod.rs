/// Shared test helpers for all marklint integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use marklint_enforce::engine::EnforcementEngine;
use marklint_enforce::types::CheckResult;
use marklint_parsers::csharp::{CSharpParser, SourceFile};
use tempfile::TempDir;

/// A MonoBehaviour with one violation of each fixable rule.
#[allow(dead_code)]
pub const PLAYER: &str = "\
using UnityEngine;
using UnityFastTools;

namespace Game
{
    public class Player : MonoBehaviour
    {
        [GetComponentProperty] private Rigidbody _body;

        void FixedUpdate()
        {
            _body.AddForce(Vector3.up);
        }
    }
}
";

/// Clean counterpart of [`PLAYER`].
#[allow(dead_code)]
pub const PLAYER_FIXED: &str = "\
using UnityEngine;
using UnityFastTools;

namespace Game
{
    public partial class Player : MonoBehaviour
    {
        [GetComponentProperty] private Rigidbody _body;

        void FixedUpdate()
        {
            CachedBody.AddForce(Vector3.up);
        }
    }
}
";

/// Accessor-shape violations only; nothing fixable.
#[allow(dead_code)]
pub const HUD: &str = "\
using UnityFastTools;

namespace Game.UI
{
    public partial class Hud
    {
        [UnityHandler] public int Score { set { } }
        [GetComponent] public Canvas Canvas { get; init; }
    }
}
";

/// Write `files` into a fresh directory. Returns the TempDir; hold it to keep
/// the directory alive.
#[allow(dead_code)]
pub fn setup_unity_project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let full = dir.path().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full, content).unwrap();
    }
    dir
}

/// Get path to compiled marklint binary.
///
/// Builds the binary if it doesn't exist yet.
#[allow(dead_code)]
pub fn marklint_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("marklint");
    if !path.exists() {
        let status = Command::new("cargo")
            .args(["build", "-p", "marklint-cli"])
            .status()
            .expect("Failed to build marklint");
        assert!(status.success(), "Failed to build marklint binary");
    }
    path
}

/// Run marklint in `dir` with `args`.
#[allow(dead_code)]
pub fn run_marklint(dir: &Path, args: &[&str]) -> Output {
    Command::new(marklint_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run marklint")
}

/// Parse in-memory sources as one project.
#[allow(dead_code)]
pub fn parse_sources(files: &[(&str, &str)]) -> Vec<SourceFile> {
    let mut parser = CSharpParser::new();
    files
        .iter()
        .map(|(path, source)| parser.parse_source(Path::new(path), source).unwrap())
        .collect()
}

/// Check in-memory sources with default settings.
#[allow(dead_code)]
pub fn check_sources(files: &[(&str, &str)]) -> CheckResult {
    EnforcementEngine::new().check(&parse_sources(files))
}

/// Diagnostic codes in report order.
#[allow(dead_code)]
pub fn codes(result: &CheckResult) -> Vec<&str> {
    result.errors.iter().map(|d| d.code.as_str()).collect()
}
