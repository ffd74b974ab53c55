//! One predicate per convention.
//!
//! Predicates take a node and a [`SemanticModel`] and return the violations
//! found on that node. Anything the model cannot resolve means the rule does
//! not apply; predicates never fail.

use marklint_core::config::EnforceConfig;
use marklint_core::markers::MarkerKind;
use marklint_core::semantic::{SemanticModel, Symbol};
use marklint_core::syntax::{NodeId, SyntaxKind, SyntaxNode, TextRange};

use crate::rules::RuleId;

/// A rule hit on a node. `range` is where it is reported; `target` is the
/// node a fix would rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: RuleId,
    pub target: NodeId,
    pub range: TextRange,
    pub args: Vec<String>,
}

impl Violation {
    pub fn message(&self) -> String {
        self.rule.format_message(&self.args)
    }
}

/// UFT0002: a class or struct with a marked field or property must be partial.
///
/// Members are scanned in order. Meeting a member that is neither a field nor
/// a property abandons the type when `skip_types_with_other_members` is set.
/// An attribute the model cannot resolve abandons the type as well.
pub fn check_partial_requirement(
    node: SyntaxNode<'_>,
    model: &dyn SemanticModel,
    config: &EnforceConfig,
) -> Option<Violation> {
    if !matches!(
        node.kind(),
        SyntaxKind::ClassDeclaration | SyntaxKind::StructDeclaration
    ) {
        return None;
    }
    let name = node.name_token()?;
    let body = node.child_of_kind(SyntaxKind::DeclarationList)?;

    let mut needs_partial = false;
    'members: for member in body.children() {
        if !matches!(
            member.kind(),
            SyntaxKind::FieldDeclaration | SyntaxKind::PropertyDeclaration
        ) {
            if config.skip_types_with_other_members {
                return None;
            }
            continue;
        }
        for attribute in member.attributes() {
            let class = model.attribute_class(attribute)?;
            if MarkerKind::from_qualified_name(&class).is_some_and(|k| k.requires_partial_type()) {
                needs_partial = true;
                break 'members;
            }
        }
    }

    if !needs_partial || is_partial(node) {
        return None;
    }
    Some(Violation {
        rule: RuleId::PartialRequirement,
        target: node.id(),
        range: name.text_range(),
        args: vec![name.text().to_string()],
    })
}

/// UFT0001: a `[GetComponentProperty]` field referenced anywhere but its own
/// declaration.
pub fn check_cached_field_usage(
    node: SyntaxNode<'_>,
    model: &dyn SemanticModel,
) -> Option<Violation> {
    if node.kind() != SyntaxKind::IdentifierName {
        return None;
    }
    let parent = node.parent()?;
    if matches!(
        parent.kind(),
        SyntaxKind::VariableDeclaration | SyntaxKind::Attribute
    ) {
        return None;
    }

    let Symbol::Field(field) = model.symbol(node)? else {
        return None;
    };
    if !field.has_marker(MarkerKind::CachedField) || in_own_declaration(node, &field.name) {
        return None;
    }

    let token = node.first_token()?;
    Some(Violation {
        rule: RuleId::CachedFieldUsage,
        target: node.id(),
        range: node.text_range(),
        args: vec![token.text().to_string()],
    })
}

/// UFT0003: every accessor-shape marker on an indexer, reported at the attribute.
pub fn check_indexer_markers(node: SyntaxNode<'_>, model: &dyn SemanticModel) -> Vec<Violation> {
    if node.kind() != SyntaxKind::IndexerDeclaration {
        return Vec::new();
    }
    let this = node
        .child_token_with_text("this")
        .map_or("this", |t| t.text());

    node.attributes()
        .filter_map(|attribute| {
            let class = model.attribute_class(attribute)?;
            let marker = MarkerKind::from_qualified_name(&class)?;
            marker.forbidden_on_indexer().then(|| Violation {
                rule: RuleId::IndexerMarker,
                target: attribute.id(),
                range: attribute.text_range(),
                args: vec![this.to_string(), class],
            })
        })
        .collect()
}

/// UFT0004 and UFT0005: accessor shape of marked properties. Each attribute is
/// evaluated on its own, so one property can produce both.
pub fn check_property_accessors(
    node: SyntaxNode<'_>,
    model: &dyn SemanticModel,
) -> Vec<Violation> {
    if node.kind() != SyntaxKind::PropertyDeclaration {
        return Vec::new();
    }
    let Some(name) = node.name_token() else {
        return Vec::new();
    };

    let accessors: Vec<&str> = node
        .child_of_kind(SyntaxKind::AccessorList)
        .map(|list| {
            list.children_of_kind(SyntaxKind::AccessorDeclaration)
                .filter_map(accessor_keyword)
                .collect()
        })
        .unwrap_or_default();
    let has_getter = accessors.contains(&"get")
        || node.child_of_kind(SyntaxKind::ArrowExpressionClause).is_some();
    let has_setter = accessors.contains(&"set");

    node.attributes()
        .filter_map(|attribute| {
            let rule = match model.marker(attribute)? {
                MarkerKind::Handler if !has_getter => RuleId::HandlerAccessor,
                MarkerKind::ComponentAccessor if !has_setter => RuleId::AccessorSetter,
                _ => return None,
            };
            Some(Violation {
                rule,
                target: node.id(),
                range: name.text_range(),
                args: vec![name.text().to_string()],
            })
        })
        .collect()
}

pub fn is_partial(declaration: SyntaxNode<'_>) -> bool {
    declaration
        .child_of_kind(SyntaxKind::ModifierList)
        .is_some_and(|m| m.child_token_with_text("partial").is_some())
}

fn accessor_keyword<'t>(accessor: SyntaxNode<'t>) -> Option<&'t str> {
    accessor
        .child_tokens()
        .map(|t| t.text())
        .find(|t| matches!(*t, "get" | "set" | "init" | "add" | "remove"))
}

/// Whether `identifier` sits inside the field declaration that declares `name`.
fn in_own_declaration(identifier: SyntaxNode<'_>, name: &str) -> bool {
    identifier
        .ancestors()
        .filter(|a| a.kind() == SyntaxKind::FieldDeclaration)
        .any(|field| {
            field
                .children_of_kind(SyntaxKind::VariableDeclaration)
                .flat_map(|d| d.children_of_kind(SyntaxKind::VariableDeclarator))
                .any(|d| d.name_token().is_some_and(|t| t.text() == name))
        })
}
