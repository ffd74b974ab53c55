//! Output formatters for marklint command results.
//!
//! Provides two output modes:
//! - **JSON** (`--json`): Machine-readable structured output
//! - **Human** (default): Compiler-style diagnostics for terminal users

pub mod human;
pub(crate) mod human_helpers;
pub mod json;

use marklint_enforce::types::{CheckResult, ExplainResult, FixApplyResult, FixResult};

pub trait OutputFormatter {
    fn format_check(&self, result: &CheckResult) -> String;
    fn format_fix(&self, result: &FixResult) -> String;
    fn format_fix_apply(&self, result: &FixApplyResult) -> String;
    fn format_explain(&self, result: &ExplainResult) -> String;
}

/// Pick the formatter for the global `--json` flag.
pub fn formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(json::JsonFormatter)
    } else {
        Box::new(human::HumanFormatter)
    }
}
