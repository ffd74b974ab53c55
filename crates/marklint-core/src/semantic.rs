//! Symbol resolution as a capability.
//!
//! Rules never look symbols up themselves; they ask a [`SemanticModel`]. Any
//! answer of `None` means "could not resolve" and rules treat it as "does not
//! apply".

use crate::markers::MarkerKind;
use crate::syntax::SyntaxNode;

/// Resolution queries the rules depend on.
///
/// Implementors must be `Send + Sync`; rule evaluation is spread across rayon
/// worker threads.
pub trait SemanticModel: Send + Sync {
    /// Fully-qualified class name of the attribute an `Attribute` node applies.
    fn attribute_class(&self, attribute: SyntaxNode<'_>) -> Option<String>;

    /// Symbol an `IdentifierName` node refers to.
    fn symbol(&self, identifier: SyntaxNode<'_>) -> Option<Symbol>;

    /// Marker denoted by an `Attribute` node, if any.
    fn marker(&self, attribute: SyntaxNode<'_>) -> Option<MarkerKind> {
        self.attribute_class(attribute)
            .and_then(|name| MarkerKind::from_qualified_name(&name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Field(FieldSymbol),
    /// A local variable or parameter shadowing anything declared on the type.
    Local { name: String },
    Type { qualified_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSymbol {
    pub name: String,
    /// Fully-qualified name of the declaring type.
    pub containing_type: String,
    /// Fully-qualified class names of the attributes applied to the field.
    pub attributes: Vec<String>,
}

impl FieldSymbol {
    pub fn has_marker(&self, kind: MarkerKind) -> bool {
        self.attributes.iter().any(|a| a == kind.qualified_name())
    }
}
