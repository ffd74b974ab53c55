// Tests for fix planning and application: fixed sources re-check clean

use marklint_enforce::engine::EnforcementEngine;
use marklint_enforce::rules::RuleId;

use super::common::{parse_sources, PLAYER, PLAYER_FIXED};

#[test]
fn test_apply_all_fixes_matches_expected_source() {
    let files = parse_sources(&[("Assets/Player.cs", PLAYER)]);
    let fixes = EnforcementEngine::new().apply_fixes(&files, None);
    assert_eq!(fixes.len(), 1);
    assert_eq!(fixes[0].source, PLAYER_FIXED);
}

#[test]
fn test_fixed_source_rechecks_clean() {
    let files = parse_sources(&[("Assets/Player.cs", PLAYER_FIXED)]);
    let result = EnforcementEngine::new().check(&files);
    assert!(result.errors.is_empty());
    assert_eq!(result.status, "ok");
}

#[test]
fn test_partial_fix_on_unmodified_class() {
    let source = "using UnityFastTools;\n\nclass Bare\n{\n    [UnityHandler] int P => 1;\n}\n";
    let files = parse_sources(&[("Bare.cs", source)]);
    let fixes = EnforcementEngine::new().apply_fixes(&files, Some(RuleId::PartialRequirement));
    assert_eq!(
        fixes[0].source,
        "using UnityFastTools;\n\npartial class Bare\n{\n    [UnityHandler] int P => 1;\n}\n"
    );
}

#[test]
fn test_fix_plans_are_per_violation() {
    let source = "using UnityFastTools;\n\
                  public partial class P\n\
                  {\n\
                      [GetComponentProperty] private Rigidbody _a;\n\
                      void M() { _a.Sleep(); _a.WakeUp(); }\n\
                  }\n";
    let files = parse_sources(&[("P.cs", source)]);
    let result = EnforcementEngine::new().plan_fixes(&files, None);
    assert_eq!(result.violations_addressed, 2);
    assert!(result
        .plans
        .iter()
        .all(|p| p.equivalence_key == "Replace field usage with property"));

    let fixes = EnforcementEngine::new().apply_fixes(&files, None);
    assert!(fixes[0]
        .source
        .contains("void M() { CachedA.Sleep(); CachedA.WakeUp(); }"));
}
