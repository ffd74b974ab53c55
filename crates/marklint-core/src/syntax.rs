//! Lossless syntax trees.
//!
//! A [`SyntaxTree`] keeps nodes and tokens in two arenas. Each token owns the
//! trivia (whitespace, comments, directives) that precedes it, and the tree
//! owns whatever trails the last token, so rendering a tree reproduces its
//! source byte for byte.
//!
//! Trees are immutable. [`TreeEditor`] produces a modified copy in which every
//! pre-existing [`NodeId`] and [`TokenId`] still refers to the same element,
//! which is what lets independent rewrites be applied one after another.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    CompilationUnit,
    UsingDirective,
    NamespaceDeclaration,
    FileScopedNamespaceDeclaration,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    RecordDeclaration,
    EnumDeclaration,
    DeclarationList,
    /// Always present on declarations, possibly empty.
    ModifierList,
    AttributeList,
    Attribute,
    AttributeArgumentList,
    AttributeArgument,
    FieldDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    PropertyDeclaration,
    IndexerDeclaration,
    AccessorList,
    AccessorDeclaration,
    ArrowExpressionClause,
    MethodDeclaration,
    ConstructorDeclaration,
    ParameterList,
    Parameter,
    LocalDeclarationStatement,
    Block,
    /// An identifier in expression or type position (a use, not a declaration).
    IdentifierName,
    GenericName,
    QualifiedName,
    AliasQualifiedName,
    MemberAccessExpression,
    ThisExpression,
    /// Anything the model does not name, tagged with the front end's kind.
    Other(&'static str),
}

impl SyntaxKind {
    pub fn is_type_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration
                | SyntaxKind::StructDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::RecordDeclaration
                | SyntaxKind::EnumDeclaration
        )
    }

    pub fn is_namespace(self) -> bool {
        matches!(
            self,
            SyntaxKind::NamespaceDeclaration | SyntaxKind::FileScopedNamespaceDeclaration
        )
    }

    /// Declarations that introduce a scope for locals and parameters.
    pub fn is_member_body_owner(self) -> bool {
        matches!(
            self,
            SyntaxKind::MethodDeclaration
                | SyntaxKind::ConstructorDeclaration
                | SyntaxKind::PropertyDeclaration
                | SyntaxKind::IndexerDeclaration
                | SyntaxKind::AccessorDeclaration
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Punctuation,
    Literal,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(u32);

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxElement {
    Node(NodeId),
    Token(TokenId),
}

/// Byte range into the rendered source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains_range(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// 1-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    kind: SyntaxKind,
    parent: Option<NodeId>,
    children: Vec<SyntaxElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenData {
    kind: TokenKind,
    text: String,
    leading_trivia: String,
    parent: NodeId,
}

fn advance(text: &str, offset: &mut usize, line_starts: &mut Vec<usize>) {
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            line_starts.push(*offset + i + 1);
        }
    }
    *offset += text.len();
}

#[derive(Debug, Clone)]
struct SourceMap {
    token_starts: Vec<usize>,
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceMap {
    fn build(tree: &SyntaxTree) -> Self {
        let mut token_starts = vec![0; tree.tokens.len()];
        let mut line_starts = vec![0];
        let mut offset = 0;

        for id in tree.tokens_in_order(SyntaxTree::ROOT) {
            let data = &tree.tokens[id.index()];
            advance(&data.leading_trivia, &mut offset, &mut line_starts);
            token_starts[id.index()] = offset;
            advance(&data.text, &mut offset, &mut line_starts);
        }
        advance(&tree.trailing_trivia, &mut offset, &mut line_starts);

        Self {
            token_starts,
            line_starts,
            len: offset,
        }
    }
}

/// An immutable, lossless syntax tree.
#[derive(Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    tokens: Vec<TokenData>,
    trailing_trivia: String,
    source_map: OnceLock<SourceMap>,
}

impl SyntaxTree {
    const ROOT: NodeId = NodeId(0);

    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode {
            tree: self,
            id: Self::ROOT,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<SyntaxNode<'_>> {
        (id.index() < self.nodes.len()).then_some(SyntaxNode { tree: self, id })
    }

    pub fn token(&self, id: TokenId) -> Option<SyntaxToken<'_>> {
        (id.index() < self.tokens.len()).then_some(SyntaxToken { tree: self, id })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn trailing_trivia(&self) -> &str {
        &self.trailing_trivia
    }

    /// Length in bytes of the rendered source.
    pub fn text_len(&self) -> usize {
        self.source_map().len
    }

    /// Translate a byte offset into a 1-based line/column pair.
    pub fn line_col(&self, offset: usize) -> LineCol {
        let map = self.source_map();
        let line = match map.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        LineCol {
            line: line as u32 + 1,
            column: (offset - map.line_starts[line]) as u32 + 1,
        }
    }

    /// Start an edit session on a copy of this tree.
    pub fn edit(&self) -> TreeEditor {
        TreeEditor {
            tree: SyntaxTree {
                nodes: self.nodes.clone(),
                tokens: self.tokens.clone(),
                trailing_trivia: self.trailing_trivia.clone(),
                source_map: OnceLock::new(),
            },
        }
    }

    fn source_map(&self) -> &SourceMap {
        self.source_map.get_or_init(|| SourceMap::build(self))
    }

    fn tokens_in_order(&self, id: NodeId) -> Vec<TokenId> {
        let mut out = Vec::new();
        let mut stack = vec![SyntaxElement::Node(id)];
        while let Some(element) = stack.pop() {
            match element {
                SyntaxElement::Token(t) => out.push(t),
                SyntaxElement::Node(n) => {
                    stack.extend(self.nodes[n.index()].children.iter().rev().copied());
                }
            }
        }
        out
    }
}

impl PartialEq for SyntaxTree {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.tokens == other.tokens
            && self.trailing_trivia == other.trailing_trivia
    }
}

impl Eq for SyntaxTree {}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("nodes", &self.nodes.len())
            .field("tokens", &self.tokens.len())
            .field("text", &self.to_string())
            .finish()
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.tokens_in_order(Self::ROOT) {
            let data = &self.tokens[id.index()];
            f.write_str(&data.leading_trivia)?;
            f.write_str(&data.text)?;
        }
        f.write_str(&self.trailing_trivia)
    }
}

/// A borrowed handle to a node.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

/// A borrowed handle to a token.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'t> {
    tree: &'t SyntaxTree,
    id: TokenId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeOrToken<'t> {
    Node(SyntaxNode<'t>),
    Token(SyntaxToken<'t>),
}

impl<'t> SyntaxNode<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        let tree = self.tree;
        self.data().parent.map(|id| SyntaxNode { tree, id })
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode<'t>> {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    pub fn elements(&self) -> impl Iterator<Item = NodeOrToken<'t>> + 't {
        let tree = self.tree;
        tree.nodes[self.id.index()]
            .children
            .iter()
            .map(move |element| match *element {
                SyntaxElement::Node(id) => NodeOrToken::Node(SyntaxNode { tree, id }),
                SyntaxElement::Token(id) => NodeOrToken::Token(SyntaxToken { tree, id }),
            })
    }

    pub fn children(&self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        self.elements().filter_map(|e| match e {
            NodeOrToken::Node(n) => Some(n),
            NodeOrToken::Token(_) => None,
        })
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken<'t>> + 't {
        self.elements().filter_map(|e| match e {
            NodeOrToken::Token(t) => Some(t),
            NodeOrToken::Node(_) => None,
        })
    }

    pub fn children_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        self.children().filter(move |n| n.kind() == kind)
    }

    pub fn child_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode<'t>> {
        self.children_of_kind(kind).next()
    }

    /// First direct child token with the given text.
    pub fn child_token_with_text(&self, text: &str) -> Option<SyntaxToken<'t>> {
        self.child_tokens().find(|t| t.text() == text)
    }

    /// Declared name of a type, member, declarator or parameter: the first
    /// identifier token directly under this node.
    pub fn name_token(&self) -> Option<SyntaxToken<'t>> {
        self.child_tokens().find(|t| t.kind() == TokenKind::Identifier)
    }

    /// `Attribute` nodes applied directly to this declaration.
    pub fn attributes(&self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        self.children_of_kind(SyntaxKind::AttributeList)
            .flat_map(|list| list.children_of_kind(SyntaxKind::Attribute))
    }

    /// Preorder traversal, starting with this node.
    pub fn descendants(&self) -> Descendants<'t> {
        Descendants {
            tree: self.tree,
            stack: vec![self.id],
        }
    }

    /// All tokens under this node, in source order.
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken<'t>> + 't {
        let tree = self.tree;
        tree.tokens_in_order(self.id)
            .into_iter()
            .map(move |id| SyntaxToken { tree, id })
    }

    pub fn first_token(&self) -> Option<SyntaxToken<'t>> {
        self.tokens().next()
    }

    pub fn last_token(&self) -> Option<SyntaxToken<'t>> {
        self.tokens().last()
    }

    /// Source text without the leading trivia of the first token.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens().enumerate() {
            if i > 0 {
                out.push_str(token.leading_trivia());
            }
            out.push_str(token.text());
        }
        out
    }

    /// Source text including the leading trivia of the first token.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        for token in self.tokens() {
            out.push_str(token.leading_trivia());
            out.push_str(token.text());
        }
        out
    }

    pub fn text_range(&self) -> TextRange {
        match (self.first_token(), self.last_token()) {
            (Some(first), Some(last)) => {
                TextRange::new(first.text_range().start, last.text_range().end)
            }
            _ => self
                .parent()
                .map(|p| TextRange::empty(p.text_range().start))
                .unwrap_or_default(),
        }
    }

    pub fn location(&self) -> LineCol {
        self.tree.line_col(self.text_range().start)
    }

    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id.index()]
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.id, self.text())
    }
}

impl<'t> SyntaxToken<'t> {
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn kind(&self) -> TokenKind {
        self.data().kind
    }

    pub fn text(&self) -> &'t str {
        &self.data().text
    }

    pub fn leading_trivia(&self) -> &'t str {
        &self.data().leading_trivia
    }

    pub fn parent(&self) -> SyntaxNode<'t> {
        SyntaxNode {
            tree: self.tree,
            id: self.data().parent,
        }
    }

    pub fn text_range(&self) -> TextRange {
        let start = self.tree.source_map().token_starts[self.id.index()];
        TextRange::new(start, start + self.data().text.len())
    }

    pub fn location(&self) -> LineCol {
        self.tree.line_col(self.text_range().start)
    }

    fn data(&self) -> &'t TokenData {
        &self.tree.tokens[self.id.index()]
    }
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.id, self.text())
    }
}

/// Preorder node iterator returned by [`SyntaxNode::descendants`].
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = SyntaxNode<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = &self.tree.nodes[id.index()].children;
        self.stack.extend(children.iter().rev().filter_map(|e| match e {
            SyntaxElement::Node(n) => Some(*n),
            SyntaxElement::Token(_) => None,
        }));
        Some(SyntaxNode {
            tree: self.tree,
            id,
        })
    }
}

/// Incremental constructor for [`SyntaxTree`]s.
///
/// The root node is opened by [`TreeBuilder::new`] and closed by
/// [`TreeBuilder::finish`]; unbalanced `finish_node` calls never close it.
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    tokens: Vec<TokenData>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new(root: SyntaxKind) -> Self {
        Self {
            nodes: vec![NodeData {
                kind: root,
                parent: None,
                children: Vec::new(),
            }],
            tokens: Vec::new(),
            stack: vec![SyntaxTree::ROOT],
        }
    }

    /// Node currently receiving children.
    pub fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(SyntaxTree::ROOT)
    }

    pub fn start_node(&mut self, kind: SyntaxKind) -> NodeId {
        let parent = self.current();
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(SyntaxElement::Node(id));
        self.stack.push(id);
        id
    }

    pub fn finish_node(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn token(&mut self, kind: TokenKind, leading_trivia: &str, text: &str) -> TokenId {
        let parent = self.current();
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(TokenData {
            kind,
            text: text.to_string(),
            leading_trivia: leading_trivia.to_string(),
            parent,
        });
        self.nodes[parent.index()].children.push(SyntaxElement::Token(id));
        id
    }

    pub fn finish(self, trailing_trivia: impl Into<String>) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            tokens: self.tokens,
            trailing_trivia: trailing_trivia.into(),
            source_map: OnceLock::new(),
        }
    }
}

/// Copy-on-write editing session started by [`SyntaxTree::edit`].
///
/// Existing ids stay valid; edits against unknown ids are rejected and
/// leave the tree untouched.
pub struct TreeEditor {
    tree: SyntaxTree,
}

impl TreeEditor {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn set_token_text(&mut self, token: TokenId, text: &str) -> bool {
        let Some(data) = self.tree.tokens.get_mut(token.index()) else {
            return false;
        };
        data.text = text.to_string();
        self.tree.source_map = OnceLock::new();
        true
    }

    pub fn set_leading_trivia(&mut self, token: TokenId, trivia: &str) -> bool {
        let Some(data) = self.tree.tokens.get_mut(token.index()) else {
            return false;
        };
        data.leading_trivia = trivia.to_string();
        self.tree.source_map = OnceLock::new();
        true
    }

    /// Insert a token as the `index`-th child of `parent` (clamped to the end).
    pub fn insert_token(
        &mut self,
        parent: NodeId,
        index: usize,
        kind: TokenKind,
        leading_trivia: &str,
        text: &str,
    ) -> Option<TokenId> {
        let children_len = self.tree.nodes.get(parent.index())?.children.len();
        let id = TokenId(self.tree.tokens.len() as u32);
        self.tree.tokens.push(TokenData {
            kind,
            text: text.to_string(),
            leading_trivia: leading_trivia.to_string(),
            parent,
        });
        self.tree.nodes[parent.index()]
            .children
            .insert(index.min(children_len), SyntaxElement::Token(id));
        self.tree.source_map = OnceLock::new();
        Some(id)
    }

    pub fn finish(self) -> SyntaxTree {
        self.tree
    }
}

#[cfg(test)]
#[path = "syntax_tests.rs"]
mod tests;
