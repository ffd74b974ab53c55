use std::path::PathBuf;

use marklint_core::config::{EnforceConfig, MarklintConfig};
use marklint_core::semantic::SemanticModel;
use marklint_core::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};
use marklint_parsers::csharp::SourceFile;
use marklint_parsers::semantic::ProjectIndex;
use rayon::prelude::*;

use crate::fix_generator::{self, BatchFix};
use crate::naming::cached_property_name;
use crate::rules::RuleId;
use crate::types::{
    CheckInfo, CheckResult, Diagnostic, ExplainResult, FixApplyDetail, FixResult,
};
use crate::violations::{self, Violation};

/// Evaluate every rule that applies to one node.
pub fn check_node(
    node: SyntaxNode<'_>,
    model: &dyn SemanticModel,
    config: &EnforceConfig,
) -> Vec<Violation> {
    match node.kind() {
        SyntaxKind::ClassDeclaration | SyntaxKind::StructDeclaration => {
            violations::check_partial_requirement(node, model, config)
                .into_iter()
                .collect()
        }
        SyntaxKind::IdentifierName => violations::check_cached_field_usage(node, model)
            .into_iter()
            .collect(),
        SyntaxKind::IndexerDeclaration => violations::check_indexer_markers(node, model),
        SyntaxKind::PropertyDeclaration => violations::check_property_accessors(node, model),
        _ => Vec::new(),
    }
}

/// Evaluate every rule over a whole tree, in source order.
pub fn check_tree(
    tree: &SyntaxTree,
    model: &dyn SemanticModel,
    config: &EnforceConfig,
) -> Vec<Violation> {
    let mut found: Vec<Violation> = tree
        .root()
        .descendants()
        .flat_map(|node| check_node(node, model, config))
        .collect();
    found.sort_by_key(|v| (v.range.start, v.rule));
    found
}

/// Violations of one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub generated: bool,
    pub has_syntax_errors: bool,
    pub violations: Vec<Violation>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Rewritten source for one file after a batch fix.
#[derive(Debug, Clone)]
pub struct FileFix {
    pub path: PathBuf,
    pub source: String,
    pub details: Vec<FixApplyDetail>,
}

impl FileFix {
    pub fn changed(&self) -> bool {
        self.details.iter().any(|d| d.status == "applied")
    }
}

/// Drives rule evaluation and fixing across a project.
pub struct EnforcementEngine {
    config: EnforceConfig,
}

impl EnforcementEngine {
    pub fn new() -> Self {
        Self {
            config: EnforceConfig::default(),
        }
    }

    /// Create an engine configured from a `MarklintConfig`.
    pub fn with_config(config: &MarklintConfig) -> Self {
        Self {
            config: config.enforce.clone(),
        }
    }

    pub fn config(&self) -> &EnforceConfig {
        &self.config
    }

    /// Index all files, then evaluate every non-generated file in parallel.
    pub fn analyze(&self, files: &[SourceFile]) -> Vec<FileReport> {
        let index = ProjectIndex::build(files.iter().map(|f| &f.tree));
        self.analyze_with(files, &index)
    }

    /// Like [`EnforcementEngine::analyze`] with a caller-supplied model.
    pub fn analyze_with(&self, files: &[SourceFile], model: &dyn SemanticModel) -> Vec<FileReport> {
        files
            .par_iter()
            .map(|file| {
                let violations = if file.generated {
                    tracing::debug!(path = %file.path.display(), "generated file, not reported");
                    Vec::new()
                } else {
                    check_tree(&file.tree, model, &self.config)
                };
                let shown = file.path.display().to_string();
                let diagnostics = violations
                    .iter()
                    .map(|v| to_diagnostic(v, &shown, &file.tree))
                    .collect();
                tracing::debug!(path = %shown, violations = violations.len(), "file checked");
                FileReport {
                    path: file.path.clone(),
                    generated: file.generated,
                    has_syntax_errors: file.has_errors,
                    violations,
                    diagnostics,
                }
            })
            .collect()
    }

    pub fn check(&self, files: &[SourceFile]) -> CheckResult {
        check_result(&self.analyze(files))
    }

    /// Fix plans for every fixable violation, optionally limited to one rule.
    pub fn plan_fixes(&self, files: &[SourceFile], rule: Option<RuleId>) -> FixResult {
        let index = ProjectIndex::build(files.iter().map(|f| &f.tree));
        self.plan_fixes_with(files, &index, rule)
    }

    pub fn plan_fixes_with(
        &self,
        files: &[SourceFile],
        model: &dyn SemanticModel,
        rule: Option<RuleId>,
    ) -> FixResult {
        let reports = self.analyze_with(files, model);
        let mut plans = Vec::new();
        let mut files_affected = 0;
        for (file, report) in files.iter().zip(&reports) {
            let file_plans = fix_generator::generate_fix_plans(
                &file.path.display().to_string(),
                &file.tree,
                &report.violations,
                rule,
            );
            if !file_plans.is_empty() {
                files_affected += 1;
            }
            plans.extend(file_plans);
        }
        FixResult {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "fix".to_string(),
            violations_addressed: plans.len() as u32,
            files_affected,
            plans,
        }
    }

    /// Apply all fixable violations per file. Only files with at least one
    /// fixable violation are returned; writing them out is up to the caller.
    pub fn apply_fixes(&self, files: &[SourceFile], rule: Option<RuleId>) -> Vec<FileFix> {
        let index = ProjectIndex::build(files.iter().map(|f| &f.tree));
        self.apply_fixes_with(files, &index, rule)
    }

    pub fn apply_fixes_with(
        &self,
        files: &[SourceFile],
        model: &dyn SemanticModel,
        rule: Option<RuleId>,
    ) -> Vec<FileFix> {
        let reports = self.analyze_with(files, model);
        files
            .par_iter()
            .zip(reports.par_iter())
            .filter_map(|(file, report)| {
                let batch: BatchFix =
                    fix_generator::apply_all(&file.tree, &report.violations, rule);
                if batch.applied.is_empty() && batch.failed.is_empty() {
                    return None;
                }
                let shown = file.path.display().to_string();
                Some(FileFix {
                    path: file.path.clone(),
                    source: batch.tree.to_string(),
                    details: fix_generator::apply_details(&shown, &file.tree, &batch),
                })
            })
            .collect()
    }
}

impl Default for EnforcementEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate file reports into the `check` command result.
pub fn check_result(reports: &[FileReport]) -> CheckResult {
    let errors: Vec<Diagnostic> = reports
        .iter()
        .flat_map(|r| r.diagnostics.iter().cloned())
        .collect();
    let info = CheckInfo {
        files_generated: reports.iter().filter(|r| r.generated).count() as u32,
        files_with_syntax_errors: reports
            .iter()
            .filter(|r| r.has_syntax_errors)
            .map(|r| r.path.display().to_string())
            .collect(),
    };
    CheckResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: "check".to_string(),
        status: if errors.is_empty() { "ok" } else { "error" }.to_string(),
        files_analyzed: reports
            .iter()
            .filter(|r| !r.generated)
            .map(|r| r.path.display().to_string())
            .collect(),
        errors,
        info,
    }
}

/// Describe a rule for the `explain` command.
pub fn explain(rule: RuleId) -> ExplainResult {
    ExplainResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: "explain".to_string(),
        code: rule.code().to_string(),
        rule: rule.name().to_string(),
        title: rule.title().to_string(),
        category: rule.category().to_string(),
        severity: rule.severity().to_string(),
        message_format: rule.message_format().to_string(),
        summary: rule.summary().to_string(),
        fix: rule.fix_title().map(str::to_string),
    }
}

pub fn to_diagnostic(violation: &Violation, file: &str, tree: &SyntaxTree) -> Diagnostic {
    let rule = violation.rule;
    let start = tree.line_col(violation.range.start);
    let end = tree.line_col(violation.range.end);
    let fix_hint = match rule {
        RuleId::CachedFieldUsage => violation
            .args
            .first()
            .map(|field| format!("use `{}` instead", cached_property_name(field))),
        RuleId::PartialRequirement => Some("add the `partial` modifier".to_string()),
        RuleId::IndexerMarker => Some("remove the attribute from the indexer".to_string()),
        RuleId::HandlerAccessor => Some("add a `get` accessor".to_string()),
        RuleId::AccessorSetter => Some("add a `set` accessor".to_string()),
    };
    Diagnostic {
        code: rule.code().to_string(),
        rule: rule.name().to_string(),
        severity: rule.severity().to_string(),
        category: rule.category().to_string(),
        message: violation.message(),
        args: violation.args.clone(),
        file: file.to_string(),
        line: start.line,
        column: start.column,
        end_line: end.line,
        end_column: end.column,
        fix_hint,
        fixable: rule.fix_title().is_some(),
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
