use marklint_core::syntax::{NodeId, NodeOrToken, SyntaxKind, SyntaxTree, TokenKind};

use crate::naming::cached_property_name;
use crate::rules::RuleId;
use crate::types::{FixAction, FixApplyDetail, FixPlan};
use crate::violations::Violation;

/// Result of running one recipe.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    pub title: &'static str,
    pub equivalence_key: &'static str,
    pub tree: SyntaxTree,
    /// The rewritten node, `None` when the recipe left the tree unchanged.
    pub changed: Option<NodeId>,
}

/// Append `partial` to a type declaration's modifiers.
///
/// Existing modifiers, members and trivia are untouched. Already-partial
/// types, unknown ids and non-type nodes come back unchanged.
pub fn add_partial_modifier(tree: &SyntaxTree, target: NodeId) -> SyntaxTree {
    let Some(node) = tree.node(target) else {
        return tree.clone();
    };
    if !node.kind().is_type_declaration() {
        return tree.clone();
    }
    let Some(modifiers) = node.child_of_kind(SyntaxKind::ModifierList) else {
        return tree.clone();
    };
    if modifiers.child_token_with_text("partial").is_some() {
        return tree.clone();
    }

    let mut editor = tree.edit();
    if modifiers.last_token().is_some() {
        editor.insert_token(modifiers.id(), usize::MAX, TokenKind::Keyword, " ", "partial");
        return editor.finish();
    }

    // Empty modifier list: `partial` takes over the trivia in front of the
    // type keyword, which is then separated from it by a single space.
    let next = node
        .elements()
        .skip_while(|e| !matches!(e, NodeOrToken::Node(n) if *n == modifiers))
        .skip(1)
        .find_map(|e| match e {
            NodeOrToken::Token(t) => Some(t),
            NodeOrToken::Node(n) => n.first_token(),
        });
    let Some(next) = next else {
        return tree.clone();
    };
    editor.insert_token(
        modifiers.id(),
        0,
        TokenKind::Keyword,
        next.leading_trivia(),
        "partial",
    );
    editor.set_leading_trivia(next.id(), " ");
    editor.finish()
}

/// Replace one identifier use with the generated cached property name,
/// keeping its trivia.
pub fn replace_field_with_property(tree: &SyntaxTree, target: NodeId) -> SyntaxTree {
    let Some(node) = tree.node(target) else {
        return tree.clone();
    };
    if node.kind() != SyntaxKind::IdentifierName {
        return tree.clone();
    }
    let Some(token) = node.first_token() else {
        return tree.clone();
    };

    let mut editor = tree.edit();
    editor.set_token_text(token.id(), &cached_property_name(token.text()));
    editor.finish()
}

/// Run the recipe matching a violation. `None` for rules without a fix.
pub fn fix_violation(tree: &SyntaxTree, violation: &Violation) -> Option<FixOutcome> {
    let title = violation.rule.fix_title()?;
    let rewritten = match violation.rule {
        RuleId::PartialRequirement => add_partial_modifier(tree, violation.target),
        RuleId::CachedFieldUsage => replace_field_with_property(tree, violation.target),
        _ => return None,
    };
    let changed = (rewritten != *tree).then_some(violation.target);
    Some(FixOutcome {
        title,
        equivalence_key: title,
        tree: rewritten,
        changed,
    })
}

/// Result of fixing many violations in one tree.
#[derive(Debug, Clone)]
pub struct BatchFix {
    pub tree: SyntaxTree,
    pub applied: Vec<Violation>,
    pub failed: Vec<Violation>,
}

/// Apply every fixable violation, one after another, to the same tree.
///
/// Ids survive edits, so each violation still names its node after earlier
/// fixes. Violations whose recipe changes nothing are reported as failed;
/// rules without a fix are ignored.
pub fn apply_all(tree: &SyntaxTree, violations: &[Violation], rule: Option<RuleId>) -> BatchFix {
    let mut current = tree.clone();
    let mut applied = Vec::new();
    let mut failed = Vec::new();

    for violation in violations {
        if rule.is_some_and(|r| r != violation.rule) {
            continue;
        }
        let Some(outcome) = fix_violation(&current, violation) else {
            continue;
        };
        if outcome.changed.is_some() {
            current = outcome.tree;
            applied.push(violation.clone());
        } else {
            failed.push(violation.clone());
        }
    }

    BatchFix {
        tree: current,
        applied,
        failed,
    }
}

/// Describe the fix for each fixable violation of one file without applying it.
pub fn generate_fix_plans(
    file: &str,
    tree: &SyntaxTree,
    violations: &[Violation],
    rule: Option<RuleId>,
) -> Vec<FixPlan> {
    let source = tree.to_string();
    violations
        .iter()
        .filter(|v| rule.map_or(true, |r| r == v.rule))
        .filter_map(|v| {
            let outcome = fix_violation(tree, v)?;
            outcome.changed?;
            let line = tree.line_col(v.range.start).line;
            let rewritten = outcome.tree.to_string();
            let target_name = v.args.first().cloned().unwrap_or_default();
            let (cause, description) = match v.rule {
                RuleId::PartialRequirement => (
                    format!("Type `{target_name}` has marked members but is not partial"),
                    format!("Add `partial` to `{target_name}`"),
                ),
                _ => (
                    format!("Field `{target_name}` is shadowed by a generated cached property"),
                    format!(
                        "Replace `{target_name}` with `{}`",
                        cached_property_name(&target_name)
                    ),
                ),
            };
            Some(FixPlan {
                code: v.rule.code().to_string(),
                title: outcome.title.to_string(),
                equivalence_key: outcome.equivalence_key.to_string(),
                target_name,
                cause,
                actions: vec![FixAction {
                    file: file.to_string(),
                    line,
                    old_text: source_line(&source, line),
                    new_text: source_line(&rewritten, line),
                    description,
                }],
            })
        })
        .collect()
}

/// Per-violation status lines for an applied batch.
pub fn apply_details(file: &str, tree: &SyntaxTree, batch: &BatchFix) -> Vec<FixApplyDetail> {
    let detail = |v: &Violation, status: &str, error: Option<String>| FixApplyDetail {
        file: file.to_string(),
        line: tree.line_col(v.range.start).line,
        code: v.rule.code().to_string(),
        status: status.to_string(),
        error,
    };
    let mut details: Vec<_> = batch
        .applied
        .iter()
        .map(|v| detail(v, "applied", None))
        .chain(batch.failed.iter().map(|v| {
            detail(v, "failed", Some("target no longer matches the violation".to_string()))
        }))
        .collect();
    details.sort_by_key(|d| d.line);
    details
}

/// 1-based line of `source`, trimmed.
fn source_line(source: &str, line: u32) -> String {
    source
        .lines()
        .nth(line.saturating_sub(1) as usize)
        .unwrap_or_default()
        .trim()
        .to_string()
}
