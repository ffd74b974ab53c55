// Tests for UFT0002: types with marked members must be partial

use super::common::{check_sources, codes, PLAYER};

#[test]
/// A marked field on a non-partial class is reported at the class name.
fn test_non_partial_class_reported() {
    let result = check_sources(&[("Assets/Player.cs", PLAYER)]);
    let partial: Vec<_> = result.errors.iter().filter(|d| d.code == "UFT0002").collect();
    assert_eq!(partial.len(), 1);
    assert_eq!(partial[0].message, "Class 'Player' should be partial");
    assert_eq!(partial[0].file, "Assets/Player.cs");
    assert_eq!((partial[0].line, partial[0].column), (6, 18));
    assert!(partial[0].fixable);
}

#[test]
/// Every marker kind on a property triggers the requirement.
fn test_marked_properties_require_partial() {
    for marker in ["UnityHandler", "GetComponent", "GetComponentProperty"] {
        let source = format!(
            "using UnityFastTools;\npublic class C {{ [{marker}] public int P {{ get; set; }} }}\n"
        );
        let result = check_sources(&[("C.cs", &source)]);
        assert_eq!(codes(&result), vec!["UFT0002"], "marker {marker}");
    }
}

#[test]
/// Records, interfaces and enums are not checked.
fn test_other_type_kinds_ignored() {
    let result = check_sources(&[(
        "Other.cs",
        "using UnityFastTools;\n\
         public interface I { [UnityHandler] int P { get; } }\n\
         public record R { [UnityHandler] public int P { get; } }\n",
    )]);
    assert!(result.errors.is_empty(), "{:?}", codes(&result));
}

#[test]
/// One partial declaration is enough to make the rule pass for that declaration.
fn test_partial_declaration_is_clean() {
    let result = check_sources(&[(
        "C.cs",
        "using UnityFastTools;\npublic sealed partial class C { [UnityHandler] public int P { get; } }\n",
    )]);
    assert!(result.errors.is_empty());
}

#[test]
/// A method before the marked member abandons the type under default settings.
fn test_method_first_skips_type() {
    let result = check_sources(&[(
        "C.cs",
        "using UnityFastTools;\npublic class C { void M() { } [UnityHandler] public int P { get; } }\n",
    )]);
    assert!(result.errors.is_empty());
}
