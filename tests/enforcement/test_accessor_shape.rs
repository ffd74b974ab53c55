// Tests for UFT0003–UFT0005: accessor shape of marked properties and indexers

use super::common::{check_sources, codes, HUD};

#[test]
fn test_handler_without_getter_and_accessor_without_setter() {
    let result = check_sources(&[("Assets/UI/Hud.cs", HUD)]);
    assert_eq!(codes(&result), vec!["UFT0004", "UFT0005"]);
    assert_eq!(
        result.errors[0].message,
        "Property 'Score' with [UnityHandler] attribute should have a get accessor"
    );
    assert_eq!(
        result.errors[1].message,
        "Property 'Canvas' with [GetComponent] attribute should have a setter"
    );
    assert!(result.errors.iter().all(|d| !d.fixable));
}

#[test]
fn test_indexer_reports_each_marker() {
    let result = check_sources(&[(
        "Grid.cs",
        "using UnityFastTools;\n\
         public partial class Grid\n\
         {\n\
             [UnityHandler]\n\
             [GetComponent]\n\
             public int this[int x, int y] { get => 0; set { } }\n\
         }\n",
    )]);
    assert_eq!(codes(&result), vec!["UFT0003", "UFT0003"]);
    // Reported at the attributes, not the indexer.
    assert_eq!(result.errors[0].line, 4);
    assert_eq!(result.errors[1].line, 5);
}

#[test]
fn test_well_formed_properties_are_clean() {
    let result = check_sources(&[(
        "Ok.cs",
        "using UnityFastTools;\n\
         public partial class Ok\n\
         {\n\
             [UnityHandler] public int A => 1;\n\
             [UnityHandler] public int B { get { return 1; } }\n\
             [GetComponent] public Canvas C { get; private set; }\n\
         }\n",
    )]);
    assert!(result.errors.is_empty(), "{:?}", codes(&result));
}
