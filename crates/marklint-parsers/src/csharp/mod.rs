use std::path::{Path, PathBuf};

use marklint_core::syntax::{SyntaxKind, SyntaxTree, TokenKind, TreeBuilder};
use rayon::prelude::*;
use tree_sitter::{Language, Node, Parser, Tree};

/// Declarations whose `modifier` children are grouped into a `ModifierList`.
const DECLARATIONS_WITH_MODIFIERS: &[&str] = &[
    "class_declaration",
    "struct_declaration",
    "interface_declaration",
    "record_declaration",
    "record_struct_declaration",
    "enum_declaration",
    "field_declaration",
    "property_declaration",
    "indexer_declaration",
    "method_declaration",
    "constructor_declaration",
    "destructor_declaration",
    "accessor_declaration",
    "event_field_declaration",
    "event_declaration",
    "delegate_declaration",
    "operator_declaration",
    "conversion_operator_declaration",
];

/// Parents whose `name` field is a declared name rather than a use.
const DECLARED_NAME_PARENTS: &[&str] = &[
    "class_declaration",
    "struct_declaration",
    "interface_declaration",
    "record_declaration",
    "record_struct_declaration",
    "enum_declaration",
    "enum_member_declaration",
    "delegate_declaration",
    "property_declaration",
    "method_declaration",
    "constructor_declaration",
    "destructor_declaration",
    "event_declaration",
    "local_function_statement",
    "variable_declarator",
    "parameter",
    "type_parameter",
    "catch_declaration",
    "declaration_expression",
    "tuple_element",
    "using_directive",
    "argument",
    "attribute_argument",
];

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("language error: {0}")]
    Language(String),
    #[error("parse failed")]
    ParseFailed,
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A parsed C# source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub tree: SyntaxTree,
    /// The tree-sitter tree contained ERROR or MISSING nodes.
    pub has_errors: bool,
    /// Tool-generated source; indexed for resolution but never reported on.
    pub generated: bool,
}

pub struct CSharpParser {
    parser: Parser,
}

impl CSharpParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn parse(&mut self, source: &str) -> Result<SyntaxTree, ParseError> {
        let raw = self.parse_raw(source)?;
        Ok(lower(&raw, source))
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<SourceFile, ParseError> {
        let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_source(path, &source)
    }

    pub fn parse_source(&mut self, path: &Path, source: &str) -> Result<SourceFile, ParseError> {
        let raw = self.parse_raw(source)?;
        let has_errors = raw.root_node().has_error();
        if has_errors {
            tracing::debug!(path = %path.display(), "syntax errors, using recovered tree");
        }
        Ok(SourceFile {
            path: path.to_path_buf(),
            tree: lower(&raw, source),
            has_errors,
            generated: is_generated(path, source),
        })
    }

    fn parse_raw(&mut self, source: &str) -> Result<Tree, ParseError> {
        let lang: Language = tree_sitter_c_sharp::LANGUAGE.into();
        self.parser
            .set_language(&lang)
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        self.parser
            .parse(source, None)
            .ok_or(ParseError::ParseFailed)
    }
}

impl Default for CSharpParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse many files in parallel, one parser per rayon worker.
pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<SourceFile, ParseError>> {
    paths
        .par_iter()
        .map_init(CSharpParser::new, |parser, path| parser.parse_file(path))
        .collect()
}

/// Whether a file is generator output, by name or by its header comment.
pub fn is_generated(path: &Path, source: &str) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    const GENERATED_SUFFIXES: &[&str] = &[".g.cs", ".g.i.cs", ".generated.cs", ".designer.cs"];
    if GENERATED_SUFFIXES.iter().any(|s| name.ends_with(s)) {
        return true;
    }

    source
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .take_while(|l| l.is_empty() || l.starts_with("//"))
        .any(|l| l.contains("<auto-generated") || l.contains("<autogenerated"))
}

fn lower(raw: &Tree, source: &str) -> SyntaxTree {
    let mut lowering = Lowering {
        source,
        builder: TreeBuilder::new(SyntaxKind::CompilationUnit),
        pos: 0,
    };
    lowering.lower_children(raw.root_node());
    let trailing = &source[lowering.pos..];
    lowering.builder.finish(trailing)
}

struct Lowering<'s> {
    source: &'s str,
    builder: TreeBuilder,
    /// End of the last emitted token; everything between it and the next
    /// token becomes that token's leading trivia.
    pos: usize,
}

impl Lowering<'_> {
    fn token(&mut self, kind: TokenKind, node: Node<'_>) {
        let start = node.start_byte().max(self.pos);
        let end = node.end_byte().max(start);
        let leading = &self.source[self.pos..start];
        let text = &self.source[start..end];
        self.builder.token(kind, leading, text);
        self.pos = end;
    }

    fn lower_node(&mut self, node: Node<'_>, field: Option<&str>, parent: &str) {
        if node.is_extra() {
            return;
        }
        match node.kind() {
            "modifier" => return self.token(TokenKind::Keyword, node),
            "identifier" => {
                if is_declared_name(parent, field) {
                    self.token(TokenKind::Identifier, node);
                } else {
                    self.builder.start_node(SyntaxKind::IdentifierName);
                    self.token(TokenKind::Identifier, node);
                    self.builder.finish_node();
                }
                return;
            }
            _ => {}
        }

        if node.child_count() == 0 {
            self.token(leaf_kind(node), node);
            return;
        }

        self.builder.start_node(syntax_kind(node.kind()));
        self.lower_children(node);
        self.builder.finish_node();
    }

    fn lower_children(&mut self, node: Node<'_>) {
        let parent = node.kind();
        let children: Vec<(Node<'_>, Option<&'static str>)> = (0..node.child_count())
            .filter_map(|i| {
                let child = node.child(i)?;
                // Comments and directives such as `#region` become trivia.
                (!child.is_extra()).then(|| (child, node.field_name_for_child(i as u32)))
            })
            .collect();

        let mut needs_modifiers = DECLARATIONS_WITH_MODIFIERS.contains(&parent);
        let mut iter = children.into_iter();
        while let Some((child, field)) = iter.next() {
            if needs_modifiers && child.kind() != "attribute_list" {
                needs_modifiers = false;
                self.builder.start_node(SyntaxKind::ModifierList);
                let mut current = Some((child, field));
                while let Some((c, _)) = current {
                    if c.kind() != "modifier" {
                        break;
                    }
                    self.token(TokenKind::Keyword, c);
                    current = iter.next();
                }
                self.builder.finish_node();
                if let Some((c, f)) = current {
                    self.lower_node(c, f, parent);
                }
                continue;
            }
            self.lower_node(child, field, parent);
        }
    }
}

fn is_declared_name(parent: &str, field: Option<&str>) -> bool {
    match (parent, field) {
        ("generic_name", _) => true,
        ("foreach_statement", Some("left")) => true,
        ("lambda_expression", Some("parameters")) => true,
        ("using_directive", Some("alias")) => true,
        (_, Some("name")) => DECLARED_NAME_PARENTS.contains(&parent),
        _ => false,
    }
}

fn leaf_kind(node: Node<'_>) -> TokenKind {
    let kind = node.kind();
    if !node.is_named() {
        return if kind.starts_with(|c: char| c.is_alphabetic() || c == '_') {
            TokenKind::Keyword
        } else {
            TokenKind::Punctuation
        };
    }
    match kind {
        "predefined_type" | "implicit_type" | "this" | "base" => TokenKind::Keyword,
        k if k.contains("literal") || k.starts_with("string") => TokenKind::Literal,
        _ => TokenKind::Other,
    }
}

fn syntax_kind(kind: &'static str) -> SyntaxKind {
    match kind {
        "compilation_unit" => SyntaxKind::CompilationUnit,
        "using_directive" => SyntaxKind::UsingDirective,
        "namespace_declaration" => SyntaxKind::NamespaceDeclaration,
        "file_scoped_namespace_declaration" => SyntaxKind::FileScopedNamespaceDeclaration,
        "class_declaration" => SyntaxKind::ClassDeclaration,
        "struct_declaration" => SyntaxKind::StructDeclaration,
        "interface_declaration" => SyntaxKind::InterfaceDeclaration,
        "record_declaration" | "record_struct_declaration" => SyntaxKind::RecordDeclaration,
        "enum_declaration" => SyntaxKind::EnumDeclaration,
        "declaration_list" => SyntaxKind::DeclarationList,
        "attribute_list" => SyntaxKind::AttributeList,
        "attribute" => SyntaxKind::Attribute,
        "attribute_argument_list" => SyntaxKind::AttributeArgumentList,
        "attribute_argument" => SyntaxKind::AttributeArgument,
        "field_declaration" => SyntaxKind::FieldDeclaration,
        "variable_declaration" => SyntaxKind::VariableDeclaration,
        "variable_declarator" => SyntaxKind::VariableDeclarator,
        "property_declaration" => SyntaxKind::PropertyDeclaration,
        "indexer_declaration" => SyntaxKind::IndexerDeclaration,
        "accessor_list" => SyntaxKind::AccessorList,
        "accessor_declaration" => SyntaxKind::AccessorDeclaration,
        "arrow_expression_clause" => SyntaxKind::ArrowExpressionClause,
        "method_declaration" => SyntaxKind::MethodDeclaration,
        "constructor_declaration" => SyntaxKind::ConstructorDeclaration,
        "parameter_list" => SyntaxKind::ParameterList,
        "parameter" => SyntaxKind::Parameter,
        "local_declaration_statement" => SyntaxKind::LocalDeclarationStatement,
        "block" => SyntaxKind::Block,
        "generic_name" => SyntaxKind::GenericName,
        "qualified_name" => SyntaxKind::QualifiedName,
        "alias_qualified_name" => SyntaxKind::AliasQualifiedName,
        "member_access_expression" => SyntaxKind::MemberAccessExpression,
        "this_expression" => SyntaxKind::ThisExpression,
        other => SyntaxKind::Other(other),
    }
}
