// Tests for marker resolution through namespaces, usings and aliases

use super::common::{check_sources, codes};

fn class_with(prelude: &str, attribute: &str) -> String {
    format!("{prelude}\npublic class C {{ [{attribute}] public int P {{ get; set; }} }}\n")
}

#[test]
fn test_written_forms_that_resolve() {
    let cases = [
        ("using UnityFastTools;", "UnityHandler"),
        ("using UnityFastTools;", "UnityHandlerAttribute"),
        ("", "UnityFastTools.UnityHandler"),
        ("", "global::UnityFastTools.UnityHandlerAttribute"),
        ("using Uft = UnityFastTools;", "Uft.UnityHandler"),
        ("using H = UnityFastTools.UnityHandlerAttribute;", "H"),
        ("global using UnityFastTools;", "UnityHandler"),
    ];
    for (prelude, attribute) in cases {
        let result = check_sources(&[("C.cs", &class_with(prelude, attribute))]);
        assert_eq!(codes(&result), vec!["UFT0002"], "{prelude} [{attribute}]");
    }
}

#[test]
fn test_written_forms_that_do_not_resolve() {
    let cases = [
        ("", "UnityHandler"),
        ("using UnityEngine;", "UnityHandler"),
        ("using Other = UnityEngine;", "Other.UnityHandler"),
    ];
    for (prelude, attribute) in cases {
        let result = check_sources(&[("C.cs", &class_with(prelude, attribute))]);
        assert!(result.errors.is_empty(), "{prelude} [{attribute}]");
    }
}

#[test]
fn test_using_in_another_file_does_not_leak() {
    let result = check_sources(&[
        ("A.cs", "using UnityFastTools;\npublic partial class A { }\n"),
        ("B.cs", &class_with("", "UnityHandler")),
    ]);
    assert!(result.errors.is_empty());
}

#[test]
fn test_code_inside_marker_namespace() {
    let result = check_sources(&[(
        "C.cs",
        "namespace UnityFastTools.Samples\n{\n    public class C { [UnityHandler] public int P { get; set; } }\n}\n",
    )]);
    assert_eq!(codes(&result), vec!["UFT0002"]);
}
