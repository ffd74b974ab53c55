// Human formatter over real engine results

use marklint_output::human::HumanFormatter;
use marklint_output::OutputFormatter;

use super::common::{check_sources, HUD, PLAYER};

#[test]
fn test_clean_check_prints_nothing() {
    let result = check_sources(&[("A.cs", "public class A { }\n")]);
    assert!(HumanFormatter.format_check(&result).is_empty());
}

#[test]
fn test_check_lists_each_diagnostic() {
    let result = check_sources(&[("Assets/Player.cs", PLAYER), ("Assets/UI/Hud.cs", HUD)]);
    let out = HumanFormatter.format_check(&result);
    assert!(out.contains("error[UFT0002]: Class 'Player' should be partial\n  --> Assets/Player.cs:6:18"));
    assert!(out.contains("error[UFT0001]: Field '_body'"));
    assert!(out.contains("  --> Assets/UI/Hud.cs:7:"));
    assert!(out.contains("4 errors in 2 files (2 analyzed)"));
}
