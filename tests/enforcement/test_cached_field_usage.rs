// Tests for UFT0001: [GetComponentProperty] fields referenced outside their declaration

use super::common::{check_sources, codes, PLAYER};

#[test]
/// The use inside a method is reported; the declaration is not.
fn test_usage_reported_declaration_not() {
    let result = check_sources(&[("Assets/Player.cs", PLAYER)]);
    let usages: Vec<_> = result.errors.iter().filter(|d| d.code == "UFT0001").collect();
    assert_eq!(usages.len(), 1);
    assert_eq!(usages[0].line, 12);
    assert_eq!(usages[0].column, 13);
    assert_eq!(usages[0].category, "Usage");
    assert_eq!(usages[0].fix_hint.as_deref(), Some("use `CachedBody` instead"));
}

#[test]
/// Unmarked fields with the same name in other types are untouched.
fn test_same_name_in_other_type_not_reported() {
    let result = check_sources(&[(
        "Two.cs",
        "using UnityFastTools;\n\
         public partial class A { [GetComponentProperty] private Rigidbody _body; }\n\
         public class B { private Rigidbody _body; void M() { _body = null; } }\n",
    )]);
    assert!(result.errors.is_empty(), "{:?}", codes(&result));
}

#[test]
/// Usage in a nested type resolves to the enclosing type's field.
fn test_usage_from_nested_type() {
    let result = check_sources(&[(
        "Outer.cs",
        "using UnityFastTools;\n\
         public partial class Outer\n\
         {\n\
             [GetComponentProperty] private Rigidbody _body;\n\
             partial class Inner { void M() { var b = _body; } }\n\
         }\n",
    )]);
    assert_eq!(codes(&result), vec!["UFT0001"]);
    assert_eq!(result.errors[0].line, 5);
}

#[test]
/// Lambdas and local functions inside members count as usages.
fn test_usage_in_lambda() {
    let result = check_sources(&[(
        "L.cs",
        "using UnityFastTools;\n\
         public partial class L\n\
         {\n\
             [GetComponentProperty] private Rigidbody _body;\n\
             System.Action Reset => () => _body.Sleep();\n\
         }\n",
    )]);
    assert_eq!(codes(&result), vec!["UFT0001"]);
}
