use marklint_enforce::engine;
use marklint_enforce::rules::RuleId;
use marklint_output::OutputFormatter;

/// Run `marklint explain <code>`: describe one rule.
pub fn run(formatter: &dyn OutputFormatter, code: String) -> i32 {
    let Some(rule) = RuleId::from_code(&code) else {
        let known: Vec<&str> = RuleId::ALL.iter().map(|r| r.code()).collect();
        eprintln!("marklint explain: unknown rule code: {}", code);
        eprintln!("  known codes: {}", known.join(", "));
        return 2;
    };

    let output = formatter.format_explain(&engine::explain(rule));
    if !output.is_empty() {
        println!("{}", output);
    }
    0
}
