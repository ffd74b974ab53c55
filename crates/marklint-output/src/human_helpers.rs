use marklint_enforce::types::{Diagnostic, FixPlan};

pub(crate) fn format_diagnostic_human(d: &Diagnostic) -> String {
    let severity_label = match d.severity.as_str() {
        "ERROR" => "error",
        "WARNING" => "warning",
        _ => "note",
    };

    let mut out = format!(
        "{}[{}]: {}\n  --> {}:{}:{}\n",
        severity_label, d.code, d.message, d.file, d.line, d.column,
    );

    if let Some(fix) = &d.fix_hint {
        out.push_str(&format!("   = fix: {}\n", fix));
    }
    if d.fixable {
        out.push_str(&format!("   = run `marklint fix --rule {}` to apply\n", d.code));
    }

    out
}

pub(crate) fn format_plan_human(plan: &FixPlan) -> String {
    let mut out = format!("[{}] {} on `{}`\n", plan.code, plan.title, plan.target_name);
    out.push_str(&format!("  Cause: {}\n", plan.cause));
    for action in &plan.actions {
        out.push_str(&format!("  Fix {}:{}:\n", action.file, action.line));
        out.push_str(&format!("    - {}\n    + {}\n", action.old_text, action.new_text));
    }
    out
}

/// `1 error`, `3 errors`, `2 fixes`.
pub(crate) fn plural(count: usize, noun: &str) -> String {
    match count {
        1 => format!("{} {}", count, noun),
        _ if noun.ends_with('x') => format!("{} {}es", count, noun),
        _ => format!("{} {}s", count, noun),
    }
}
