//! Project-wide symbol index.
//!
//! [`ProjectIndex`] is built once from every parsed file and answers the
//! [`SemanticModel`] queries the rules make. It knows the project's declared
//! types, the fields of each type (partial declarations merged under one
//! fully-qualified name) and the marker attribute classes, and resolves names
//! the way C# does: enclosing types, then each enclosing namespace with its
//! `using` directives, then the global namespace. Field lookups also follow
//! base classes declared in the project, and member access resolves the
//! receiver from the declared type of the local, parameter or field it names.

use std::collections::{HashMap, HashSet};

use marklint_core::markers::MarkerKind;
use marklint_core::semantic::{FieldSymbol, SemanticModel, Symbol};
use marklint_core::syntax::{
    NodeOrToken, SyntaxKind, SyntaxNode, SyntaxToken, SyntaxTree, TokenKind,
};

const ATTRIBUTE_SUFFIX: &str = "Attribute";
const GLOBAL_ALIAS: &str = "global::";

#[derive(Debug, Clone, Default)]
pub struct ProjectIndex {
    /// Fully-qualified names of every resolvable type.
    types: HashSet<String>,
    /// Fields keyed by the fully-qualified name of their declaring type.
    fields: HashMap<String, Vec<FieldSymbol>>,
    /// Declared type of each field whose type is a project type, keyed by
    /// (declaring type, field name).
    field_types: HashMap<(String, String), String>,
    /// Base types from each type's base list that resolve to project types.
    bases: HashMap<String, Vec<String>>,
}

impl ProjectIndex {
    /// Index all trees of a project. Marker classes are always known.
    pub fn build<'a>(trees: impl IntoIterator<Item = &'a SyntaxTree>) -> Self {
        let trees: Vec<&SyntaxTree> = trees.into_iter().collect();
        let mut index = Self::default();
        index
            .types
            .extend(MarkerKind::ALL.iter().map(|k| k.qualified_name().to_string()));

        for tree in &trees {
            for node in tree.root().descendants() {
                if node.kind().is_type_declaration() {
                    if let Some(name) = qualified_type_name(node) {
                        index.types.insert(name);
                    }
                }
            }
        }

        // Base lists and field types resolve against the complete type set.
        let mut bases: HashMap<String, Vec<String>> = HashMap::new();
        for tree in &trees {
            for node in tree.root().descendants() {
                if !node.kind().is_type_declaration() {
                    continue;
                }
                let (Some(name), Some(list)) = (
                    qualified_type_name(node),
                    node.child_of_kind(SyntaxKind::Other("base_list")),
                ) else {
                    continue;
                };
                let resolved: Vec<String> = list
                    .children()
                    .filter_map(written_type_name)
                    .filter_map(|written| index.resolve_type(&[written], node))
                    .collect();
                if !resolved.is_empty() {
                    bases.entry(name).or_default().extend(resolved);
                }
            }
        }

        let mut fields: HashMap<String, Vec<FieldSymbol>> = HashMap::new();
        let mut field_types = HashMap::new();
        for tree in &trees {
            for field in tree.root().descendants() {
                if field.kind() != SyntaxKind::FieldDeclaration {
                    continue;
                }
                let Some(containing_type) = declaring_type(field).and_then(qualified_type_name)
                else {
                    continue;
                };
                let attributes: Vec<String> = field
                    .attributes()
                    .filter_map(|a| index.attribute_class(a))
                    .collect();
                let Some(declaration) = field.child_of_kind(SyntaxKind::VariableDeclaration) else {
                    continue;
                };
                let field_type = match declaration.elements().next() {
                    Some(NodeOrToken::Node(ty)) => written_type_name(ty)
                        .and_then(|written| index.resolve_type(&[written], field)),
                    _ => None,
                };
                for declarator in declaration.children_of_kind(SyntaxKind::VariableDeclarator) {
                    let Some(name) = declarator.name_token() else {
                        continue;
                    };
                    if let Some(ty) = &field_type {
                        field_types.insert(
                            (containing_type.clone(), name.text().to_string()),
                            ty.clone(),
                        );
                    }
                    fields
                        .entry(containing_type.clone())
                        .or_default()
                        .push(FieldSymbol {
                            name: name.text().to_string(),
                            containing_type: containing_type.clone(),
                            attributes: attributes.clone(),
                        });
                }
            }
        }
        index.fields = fields;
        index.field_types = field_types;
        index.bases = bases;

        tracing::debug!(
            files = trees.len(),
            types = index.types.len(),
            field_owners = index.fields.len(),
            "project index built"
        );
        index
    }

    /// Register types that live outside the project, such as classes from
    /// referenced assemblies.
    pub fn with_known_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn contains_type(&self, qualified_name: &str) -> bool {
        self.types.contains(qualified_name)
    }

    /// Fields declared on a type across all of its partial declarations.
    pub fn fields_of(&self, qualified_type: &str) -> &[FieldSymbol] {
        self.fields
            .get(qualified_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Base types of a type that are declared in the project.
    pub fn bases_of(&self, qualified_type: &str) -> &[String] {
        self.bases
            .get(qualified_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Field `name` on a type or, failing that, on its base types.
    pub fn field_in(&self, qualified_type: &str, name: &str) -> Option<FieldSymbol> {
        let mut seen = HashSet::new();
        let mut pending = vec![qualified_type.to_string()];
        while let Some(ty) = pending.pop() {
            if !seen.insert(ty.clone()) {
                continue;
            }
            if let Some(field) = self.fields_of(&ty).iter().find(|f| f.name == name) {
                return Some(field.clone());
            }
            pending.extend(self.bases_of(&ty).iter().rev().cloned());
        }
        None
    }

    fn field_of(&self, owner: SyntaxNode<'_>, name: &str) -> Option<FieldSymbol> {
        self.field_in(&qualified_type_name(owner)?, name)
    }

    /// Type of the expression in front of a member access.
    fn receiver_type(&self, receiver: NodeOrToken<'_>, context: SyntaxNode<'_>) -> Option<String> {
        let receiver = match receiver {
            NodeOrToken::Node(n) => n,
            NodeOrToken::Token(t) => {
                let owner = context
                    .ancestors()
                    .find(|a| a.kind().is_type_declaration())
                    .and_then(qualified_type_name)?;
                return match t.text() {
                    "this" => Some(owner),
                    "base" => self.bases_of(&owner).first().cloned(),
                    _ => None,
                };
            }
        };
        match receiver.kind() {
            SyntaxKind::IdentifierName => self.type_of(receiver),
            SyntaxKind::QualifiedName | SyntaxKind::AliasQualifiedName => {
                self.resolve_type(&[written_type_name(receiver)?], context)
            }
            SyntaxKind::MemberAccessExpression => receiver
                .children()
                .last()
                .filter(|n| n.kind() == SyntaxKind::IdentifierName)
                .and_then(|member| self.type_of(member))
                .or_else(|| {
                    let written: String = receiver.tokens().map(|t| t.text()).collect();
                    self.resolve_type(&[written], context)
                }),
            _ => None,
        }
    }

    /// Project type an identifier evaluates to: the declared type of a local,
    /// parameter or field, or the type it names.
    fn type_of(&self, identifier: SyntaxNode<'_>) -> Option<String> {
        match self.symbol(identifier)? {
            Symbol::Local { name } => {
                let declared = local_declaration(identifier, &name).and_then(declared_type)?;
                self.resolve_type(&[declared], identifier)
            }
            Symbol::Field(field) => self
                .field_types
                .get(&(field.containing_type, field.name))
                .cloned(),
            Symbol::Type { qualified_name } => Some(qualified_name),
        }
    }

    /// Resolve a written type name against the scopes visible from `context`.
    /// Candidates are tried in order at each scope before moving outward.
    fn resolve_type(&self, candidates: &[String], context: SyntaxNode<'_>) -> Option<String> {
        for owner in context.ancestors().filter(|a| a.kind().is_type_declaration()) {
            let Some(owner) = qualified_type_name(owner) else {
                continue;
            };
            for candidate in candidates {
                let qualified = format!("{owner}.{candidate}");
                if self.types.contains(&qualified) {
                    return Some(qualified);
                }
            }
        }

        for scope in scopes(context) {
            for candidate in candidates {
                let qualified = qualify(&scope.prefix, candidate);
                if self.types.contains(&qualified) {
                    return Some(qualified);
                }
            }
            for candidate in candidates {
                for using in &scope.usings {
                    if let Some(qualified) = self.resolve_through(using, candidate) {
                        return Some(qualified);
                    }
                }
            }
        }
        None
    }

    fn resolve_through(&self, using: &Using, candidate: &str) -> Option<String> {
        match using {
            Using::Alias { alias, target } => {
                if candidate == alias {
                    return Some(target.clone());
                }
                let rest = candidate.strip_prefix(alias.as_str())?.strip_prefix('.')?;
                let qualified = format!("{target}.{rest}");
                self.types.contains(&qualified).then_some(qualified)
            }
            Using::Namespace(namespace) => {
                let qualified = format!("{namespace}.{candidate}");
                self.types.contains(&qualified).then_some(qualified)
            }
        }
    }
}

impl SemanticModel for ProjectIndex {
    fn attribute_class(&self, attribute: SyntaxNode<'_>) -> Option<String> {
        if attribute.kind() != SyntaxKind::Attribute {
            return None;
        }
        let name = attribute.children().find(|c| is_type_name(c.kind()))?;
        let written: String = name.tokens().map(|t| t.text()).collect();
        if written.is_empty() || written.ends_with('.') {
            return None;
        }

        if let Some(absolute) = written.strip_prefix(GLOBAL_ALIAS) {
            let found = attribute_candidates(absolute)
                .into_iter()
                .find(|c| self.types.contains(c));
            return Some(found.unwrap_or_else(|| with_attribute_suffix(absolute)));
        }

        let resolved = self.resolve_type(&attribute_candidates(&written), attribute);
        if resolved.is_none() {
            tracing::debug!(attribute = %written, "attribute class not found, using written name");
        }
        Some(resolved.unwrap_or_else(|| with_attribute_suffix(&written)))
    }

    fn symbol(&self, identifier: SyntaxNode<'_>) -> Option<Symbol> {
        if identifier.kind() != SyntaxKind::IdentifierName {
            return None;
        }
        let name = identifier.first_token()?.text();
        if name.is_empty() {
            return None;
        }

        let parent = identifier.parent()?;
        match parent.kind() {
            SyntaxKind::MemberAccessExpression => {
                let receiver = parent.elements().next()?;
                let is_receiver = matches!(receiver, NodeOrToken::Node(n) if n == identifier);
                if !is_receiver {
                    let owner = self.receiver_type(receiver, identifier)?;
                    return self.field_in(&owner, name).map(Symbol::Field);
                }
            }
            SyntaxKind::QualifiedName | SyntaxKind::AliasQualifiedName => return None,
            _ => {}
        }

        if declares_local(identifier, name) {
            return Some(Symbol::Local {
                name: name.to_string(),
            });
        }

        for owner in identifier.ancestors().filter(|a| a.kind().is_type_declaration()) {
            if let Some(field) = self.field_of(owner, name) {
                return Some(Symbol::Field(field));
            }
        }

        self.resolve_type(&[name.to_string()], identifier)
            .map(|qualified_name| Symbol::Type { qualified_name })
    }
}

/// Fully-qualified name of a type declaration, including enclosing
/// namespaces and types.
pub fn qualified_type_name(node: SyntaxNode<'_>) -> Option<String> {
    let mut parts = vec![node.name_token()?.text().to_string()];
    for ancestor in node.ancestors() {
        if ancestor.kind().is_type_declaration() {
            parts.push(ancestor.name_token()?.text().to_string());
        }
    }
    parts.reverse();

    let mut namespaces = namespace_declarations(node)
        .into_iter()
        .filter_map(namespace_name)
        .collect::<Vec<_>>();
    namespaces.extend(parts);
    Some(namespaces.join("."))
}

/// Type declaration owning a direct member.
fn declaring_type(member: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let list = member.parent()?;
    let owner = list.parent()?;
    (list.kind() == SyntaxKind::DeclarationList && owner.kind().is_type_declaration())
        .then_some(owner)
}

/// Whether `name` is declared as a local, parameter or pattern variable
/// within the member enclosing `identifier`.
fn declares_local(identifier: SyntaxNode<'_>, name: &str) -> bool {
    local_declaration(identifier, name).is_some()
}

/// The token declaring local `name` within the member enclosing `identifier`.
fn local_declaration<'t>(identifier: SyntaxNode<'t>, name: &str) -> Option<SyntaxToken<'t>> {
    let member = identifier
        .ancestors()
        .find(|a| a.parent().is_some_and(|p| p.kind() == SyntaxKind::DeclarationList))?;
    if member.kind() == SyntaxKind::FieldDeclaration || member.kind().is_type_declaration() {
        return None;
    }

    member.tokens().find(|t| {
        let parent = t.parent();
        t.kind() == TokenKind::Identifier
            && t.text() == name
            && parent != member
            && !matches!(
                parent.kind(),
                SyntaxKind::IdentifierName
                    | SyntaxKind::GenericName
                    | SyntaxKind::AttributeArgument
                    | SyntaxKind::Other("argument")
            )
    })
}

/// Type written in front of a declared local or parameter name. `None` for
/// `var` and predefined types.
fn declared_type(name: SyntaxToken<'_>) -> Option<String> {
    let mut holder = name.parent();
    let mut anchor = NodeOrToken::Token(name);
    if holder.kind() == SyntaxKind::VariableDeclarator {
        anchor = NodeOrToken::Node(holder);
        holder = holder.parent()?;
    }
    let elements: Vec<_> = holder.elements().collect();
    let at = elements.iter().position(|e| *e == anchor)?;
    match elements.get(at.checked_sub(1)?)? {
        NodeOrToken::Node(ty) => written_type_name(*ty),
        NodeOrToken::Token(_) => None,
    }
}

/// A type name as written, generic arguments dropped.
fn written_type_name(node: SyntaxNode<'_>) -> Option<String> {
    match node.kind() {
        SyntaxKind::GenericName => node.name_token().map(|t| t.text().to_string()),
        kind if is_type_name(kind) => {
            let written: String = node.tokens().map(|t| t.text()).collect();
            (!written.is_empty()).then_some(written)
        }
        _ => None,
    }
}

fn is_type_name(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IdentifierName
            | SyntaxKind::QualifiedName
            | SyntaxKind::GenericName
            | SyntaxKind::AliasQualifiedName
    )
}

fn attribute_candidates(written: &str) -> Vec<String> {
    vec![format!("{written}{ATTRIBUTE_SUFFIX}"), written.to_string()]
}

fn with_attribute_suffix(written: &str) -> String {
    if written.ends_with(ATTRIBUTE_SUFFIX) {
        written.to_string()
    } else {
        format!("{written}{ATTRIBUTE_SUFFIX}")
    }
}

fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn namespace_name(namespace: SyntaxNode<'_>) -> Option<String> {
    let name = namespace.children().find(|c| is_type_name(c.kind()))?;
    let text: String = name.tokens().map(|t| t.text()).collect();
    (!text.is_empty()).then_some(text)
}

/// Namespace declarations enclosing `node`, outermost first. A file-scoped
/// namespace applies even when the front end places it beside the types.
fn namespace_declarations(node: SyntaxNode<'_>) -> Vec<SyntaxNode<'_>> {
    let mut declarations: Vec<_> = node.ancestors().filter(|a| a.kind().is_namespace()).collect();
    let has_file_scoped = declarations
        .iter()
        .any(|d| d.kind() == SyntaxKind::FileScopedNamespaceDeclaration);
    if !has_file_scoped {
        let root = node.ancestors().last().unwrap_or(node);
        if let Some(file_scoped) = root.child_of_kind(SyntaxKind::FileScopedNamespaceDeclaration) {
            declarations.push(file_scoped);
        }
    }
    declarations.reverse();
    declarations
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Using {
    Namespace(String),
    Alias { alias: String, target: String },
}

fn parse_using(directive: SyntaxNode<'_>) -> Option<Using> {
    let tokens: Vec<&str> = directive.tokens().map(|t| t.text()).collect();
    let start = tokens.iter().position(|t| *t == "using")? + 1;
    let end = tokens.iter().rposition(|t| *t == ";").unwrap_or(tokens.len());
    let text = tokens.get(start..end)?;
    if matches!(text.first(), Some(&"static") | Some(&"unsafe")) {
        return None;
    }
    match text.iter().position(|t| *t == "=") {
        Some(eq) => {
            let alias = text[..eq].concat();
            let target = text[eq + 1..].concat();
            let target = target.strip_prefix(GLOBAL_ALIAS).unwrap_or(&target).to_string();
            (!alias.is_empty() && !target.is_empty()).then_some(Using::Alias { alias, target })
        }
        None => {
            let namespace = text.concat();
            let namespace = namespace.strip_prefix(GLOBAL_ALIAS).unwrap_or(&namespace);
            (!namespace.is_empty()).then(|| Using::Namespace(namespace.to_string()))
        }
    }
}

fn usings_of(scope: SyntaxNode<'_>) -> Vec<Using> {
    scope
        .children_of_kind(SyntaxKind::UsingDirective)
        .filter_map(parse_using)
        .collect()
}

struct Scope {
    /// Namespace prefix, empty for the global namespace.
    prefix: String,
    usings: Vec<Using>,
}

/// Lookup scopes visible from `node`, innermost first.
fn scopes(node: SyntaxNode<'_>) -> Vec<Scope> {
    let root = node.ancestors().last().unwrap_or(node);
    let mut scopes = vec![Scope {
        prefix: String::new(),
        usings: usings_of(root),
    }];

    let mut prefix = String::new();
    for declaration in namespace_declarations(node) {
        let Some(name) = namespace_name(declaration) else {
            continue;
        };
        for segment in name.split('.') {
            prefix = qualify(&prefix, segment);
            scopes.push(Scope {
                prefix: prefix.clone(),
                usings: Vec::new(),
            });
        }
        if let Some(innermost) = scopes.last_mut() {
            innermost.usings = usings_of(declaration);
        }
    }

    scopes.reverse();
    scopes
}

#[cfg(test)]
#[path = "semantic_tests.rs"]
mod tests;
