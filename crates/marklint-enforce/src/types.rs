use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error"
    pub files_analyzed: Vec<String>,
    pub errors: Vec<Diagnostic>,
    pub info: CheckInfo,
}

/// A reported violation, resolved to a file position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub rule: String,
    pub severity: String, // "ERROR"
    pub category: String,
    pub message: String,
    /// Positional message arguments.
    pub args: Vec<String>,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub fix_hint: Option<String>,
    pub fixable: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckInfo {
    /// Generated files: indexed for resolution, never reported on.
    pub files_generated: u32,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub files_with_syntax_errors: Vec<String>,
}

// --- Fix command types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixResult {
    pub version: String,
    pub command: String,
    pub violations_addressed: u32,
    pub files_affected: u32,
    pub plans: Vec<FixPlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixPlan {
    pub code: String,
    pub title: String,
    pub equivalence_key: String,
    pub target_name: String,
    pub cause: String,
    pub actions: Vec<FixAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixAction {
    pub file: String,
    pub line: u32,
    pub old_text: String,
    pub new_text: String,
    pub description: String,
}

// --- Fix apply result types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixApplyResult {
    pub version: String,
    pub command: String,
    pub actions_applied: u32,
    pub actions_failed: u32,
    pub files_modified: Vec<String>,
    pub recheck_clean: bool,
    pub recheck_errors: u32,
    pub details: Vec<FixApplyDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixApplyDetail {
    pub file: String,
    pub line: u32,
    pub code: String,
    pub status: String, // "applied" | "failed"
    pub error: Option<String>,
}

// --- Explain command types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResult {
    pub version: String,
    pub command: String,
    pub code: String,
    pub rule: String,
    pub title: String,
    pub category: String,
    pub severity: String,
    pub message_format: String,
    pub summary: String,
    pub fix: Option<String>,
}
