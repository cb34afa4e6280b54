use std::sync::Arc;

use crate::document::Document;
use crate::error::{NavError, NavResult};
use crate::provider::TreeProvider;
use crate::syntax::{SyntaxNode, SyntaxTree};
use crate::text::{Position, Range};

use super::rules::NodeRules;

/// Read-only view over the tree of one document snapshot.
///
/// The tree is fetched once on construction, so every query made through one
/// `TreeQuery` sees the same parse.
pub struct TreeQuery<'a> {
    provider: Arc<dyn TreeProvider>,
    document: &'a Document,
    rules: &'a NodeRules,
    tree: Arc<SyntaxTree>,
}

impl<'a> TreeQuery<'a> {
    pub fn new(
        provider: Arc<dyn TreeProvider>,
        document: &'a Document,
        rules: &'a NodeRules,
    ) -> NavResult<Self> {
        let tree = provider.tree(document)?;
        if tree.is_empty() {
            return Err(NavError::provider(format!(
                "empty syntax tree for {}",
                document.uri()
            )));
        }
        Ok(Self {
            provider,
            document,
            rules,
            tree,
        })
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn rules(&self) -> &'a NodeRules {
        self.rules
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        self.tree.root()
    }

    /// Smallest node at `position`
    pub fn node_at(&self, position: Position) -> NavResult<SyntaxNode<'_>> {
        self.node_at_range(Range::empty(position))
    }

    /// Smallest node covering `range`, as reported by the provider
    pub fn node_at_range(&self, range: Range) -> NavResult<SyntaxNode<'_>> {
        let id = self.provider.node_at_location(self.document, range)?;
        self.tree
            .get(id)
            .ok_or_else(|| NavError::no_node_found(range.start))
    }

    /// Pre-order walk over the subtrees that overlap `line`
    pub fn walk_line(&self, line: usize) -> LineWalk<'_> {
        LineWalk::new(self.root(), line)
    }

    /// Statement-level nodes whose span starts or ends on `line`, in pre-order
    pub fn line_nodes(&self, line: usize) -> NavResult<Vec<SyntaxNode<'_>>> {
        self.document.line(line)?;
        Ok(self
            .walk_line(line)
            .filter(|node| node.start().line == line || node.end().line == line)
            .filter(|node| self.is_candidate(node))
            .collect())
    }

    /// Statement-level nodes whose span starts on `line`, in pre-order
    pub fn line_start_nodes(&self, line: usize) -> NavResult<Vec<SyntaxNode<'_>>> {
        self.document.line(line)?;
        Ok(self
            .walk_line(line)
            .filter(|node| node.start().line == line)
            .filter(|node| self.is_candidate(node))
            .collect())
    }

    /// First statement-level node in document order starting after `line`
    pub fn next_start_node(&self, line: usize) -> Option<SyntaxNode<'_>> {
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if node.start().line > line && self.is_candidate(&node) {
                return Some(node);
            }
            // A subtree ending on or before `line` cannot start after it
            stack.extend(
                node.children()
                    .rev()
                    .filter(|child| child.end().line > line && !NodeRules::is_comment(child.kind())),
            );
        }
        None
    }

    /// Last statement-level node in document order ending before `line`
    pub fn prev_end_node(&self, line: usize) -> Option<SyntaxNode<'_>> {
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if node.end().line < line && self.is_candidate(&node) {
                return Some(node);
            }
            stack.extend(
                node.children()
                    .filter(|child| child.start().line < line && !NodeRules::is_comment(child.kind())),
            );
        }
        None
    }

    fn is_candidate(&self, node: &SyntaxNode<'_>) -> bool {
        !node.is_root() && !self.rules.exclude_node(node.kind())
    }
}

/// Stack-based pre-order iterator over the nodes overlapping one line.
///
/// Children are only entered when their span touches the line, and comment
/// subtrees are never entered. The root is always yielded first.
pub struct LineWalk<'t> {
    stack: Vec<SyntaxNode<'t>>,
    line: usize,
}

impl<'t> LineWalk<'t> {
    pub fn new(root: SyntaxNode<'t>, line: usize) -> Self {
        Self {
            stack: vec![root],
            line,
        }
    }
}

impl<'t> Iterator for LineWalk<'t> {
    type Item = SyntaxNode<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let line = self.line;
        self.stack.extend(node.children().rev().filter(|child| {
            child.range().touches_line(line) && !NodeRules::is_comment(child.kind())
        }));
        Some(node)
    }
}
