// Contract tests for `fix --json` plan output

use marklint_enforce::engine::EnforcementEngine;
use marklint_output::json::JsonFormatter;
use marklint_output::OutputFormatter;

use super::common::{parse_sources, PLAYER};

#[test]
fn test_fix_plan_json() {
    let files = parse_sources(&[("Assets/Player.cs", PLAYER)]);
    let result = EnforcementEngine::new().plan_fixes(&files, None);
    let json: serde_json::Value =
        serde_json::from_str(&JsonFormatter.format_fix(&result)).unwrap();

    assert_eq!(json["command"], "fix");
    assert_eq!(json["violations_addressed"], 2);
    assert_eq!(json["files_affected"], 1);

    let plan = &json["plans"][0];
    assert_eq!(plan["code"], "UFT0002");
    assert_eq!(plan["title"], "Make type partial");
    assert_eq!(plan["equivalence_key"], "Make type partial");
    assert_eq!(plan["target_name"], "Player");
    let action = &plan["actions"][0];
    assert_eq!(action["file"], "Assets/Player.cs");
    assert_eq!(action["line"], 6);
    assert_eq!(action["old_text"], "public class Player : MonoBehaviour");
    assert_eq!(action["new_text"], "public partial class Player : MonoBehaviour");

    assert_eq!(json["plans"][1]["actions"][0]["new_text"], "CachedBody.AddForce(Vector3.up);");
}
