use crate::human_helpers::{format_diagnostic_human, format_plan_human, plural};
use crate::OutputFormatter;
use marklint_enforce::types::{CheckResult, ExplainResult, FixApplyResult, FixResult};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        if result.errors.is_empty() {
            return String::new(); // Clean check = empty stdout
        }

        let mut out = String::new();
        for d in &result.errors {
            out.push_str(&format_diagnostic_human(d));
        }

        let files_with_errors = {
            let mut files: Vec<&str> = result.errors.iter().map(|d| d.file.as_str()).collect();
            files.sort_unstable();
            files.dedup();
            files.len()
        };
        out.push_str(&format!(
            "\n{} in {} ({} analyzed)\n",
            plural(result.errors.len(), "error"),
            plural(files_with_errors, "file"),
            result.files_analyzed.len(),
        ));
        if !result.info.files_with_syntax_errors.is_empty() {
            out.push_str(&format!(
                "note: syntax errors in {}\n",
                result.info.files_with_syntax_errors.join(", ")
            ));
        }
        out
    }

    fn format_fix(&self, result: &FixResult) -> String {
        if result.plans.is_empty() {
            return "No violations to fix.\n".to_string();
        }
        let mut out = format!(
            "Fix plan: {} in {}\n\n",
            plural(result.violations_addressed as usize, "violation"),
            plural(result.files_affected as usize, "file"),
        );
        for plan in &result.plans {
            out.push_str(&format_plan_human(plan));
            out.push('\n');
        }
        out.push_str("Run with --apply to write these changes.\n");
        out
    }

    fn format_fix_apply(&self, result: &FixApplyResult) -> String {
        let mut out = format!(
            "Applied {}, {} failed, {} modified\n",
            plural(result.actions_applied as usize, "fix"),
            result.actions_failed,
            plural(result.files_modified.len(), "file"),
        );
        for detail in result.details.iter().filter(|d| d.status != "applied") {
            out.push_str(&format!(
                "  {} {}:{} {}",
                detail.code, detail.file, detail.line, detail.status
            ));
            if let Some(error) = &detail.error {
                out.push_str(&format!(": {}", error));
            }
            out.push('\n');
        }
        if result.recheck_clean {
            out.push_str("Re-check: clean\n");
        } else {
            out.push_str(&format!(
                "Re-check: {} remaining (run `marklint check`)\n",
                plural(result.recheck_errors as usize, "error"),
            ));
        }
        out
    }

    fn format_explain(&self, result: &ExplainResult) -> String {
        let mut out = format!("{} ({}): {}\n", result.code, result.rule, result.title);
        out.push_str(&format!(
            "  category: {}  severity: {}\n",
            result.category, result.severity,
        ));
        out.push_str(&format!("  message: {}\n\n", result.message_format));
        out.push_str(&format!("{}\n", result.summary));
        if let Some(fix) = &result.fix {
            out.push_str(&format!("\nFix available: {}\n", fix));
        }
        out
    }
}
