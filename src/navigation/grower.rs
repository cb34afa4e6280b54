use crate::document::Document;
use crate::error::{NavError, NavResult};
use crate::syntax::SyntaxNode;
use crate::text::Range;

use super::query::TreeQuery;
use super::rules::NodeRules;

/// Ascends from a token to the node that forms a whole statement.
///
/// A node is a statement when it is not a bare token, not a look-through
/// wrapper, and it reaches both edges of its lines. An edge counts as reached
/// when same-line siblings (trailing comments, `;`, further `a; b` parts)
/// carry the range there.
pub struct StatementGrower<'q, 'a> {
    query: &'q TreeQuery<'a>,
}

impl<'q, 'a> StatementGrower<'q, 'a> {
    pub fn new(query: &'q TreeQuery<'a>) -> Self {
        Self { query }
    }

    fn document(&self) -> &'a Document {
        self.query.document()
    }

    /// Smallest ancestor-or-self of `node` that is a complete statement.
    ///
    /// The root is never a statement: growing into it fails with
    /// `NoValidNode` for the line `node` starts on.
    pub fn grow_to_statement<'t>(&self, node: SyntaxNode<'t>) -> NavResult<SyntaxNode<'t>> {
        let mut current = node;
        while self.needs_growth(&current)? {
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }
        if current.is_root() {
            return Err(NavError::no_valid_node(node.start().line));
        }
        Ok(current)
    }

    /// Range of the statement around `node`, including same-line siblings
    /// that complete it such as trailing comments.
    pub fn statement_range(&self, node: SyntaxNode<'_>) -> NavResult<Range> {
        let statement = self.grow_to_statement(node)?;
        let head = self.extend_to_line_start(&statement)?;
        let tail = self.extend_to_line_end(&statement)?;

        let mut range = statement.range();
        for extension in [head, tail].into_iter().flatten() {
            range = range.union(&extension);
        }
        Ok(range)
    }

    fn needs_growth(&self, node: &SyntaxNode<'_>) -> NavResult<bool> {
        if node.is_root() {
            return Ok(false);
        }
        if node.child_count() == 0 || NodeRules::is_comment(node.kind()) {
            return Ok(true);
        }
        if self.query.rules().is_wrapper(node.kind()) {
            return Ok(true);
        }
        if self.extend_to_line_end(node)?.is_none() {
            return Ok(true);
        }
        Ok(self.extend_to_line_start(node)?.is_none())
    }

    /// Walk following siblings that start on the line where the range ends,
    /// until the range reaches that line's trimmed end.
    fn extend_to_line_end(&self, node: &SyntaxNode<'_>) -> NavResult<Option<Range>> {
        let mut range = node.range();
        let mut current = *node;
        loop {
            let line = self.document().line(range.end.line)?;
            if range.end.column >= line.trimmed_end() {
                return Ok(Some(range));
            }
            match current.next_sibling() {
                Some(sibling) if sibling.start().line == range.end.line => {
                    range = range.union(&sibling.range());
                    current = sibling;
                }
                _ => return Ok(None),
            }
        }
    }

    /// Mirror of `extend_to_line_end` towards the first non-whitespace column
    fn extend_to_line_start(&self, node: &SyntaxNode<'_>) -> NavResult<Option<Range>> {
        let mut range = node.range();
        let mut current = *node;
        loop {
            let line = self.document().line(range.start.line)?;
            if range.start.column <= line.first_non_whitespace() {
                return Ok(Some(range));
            }
            match current.prev_sibling() {
                Some(sibling) if sibling.end().line == range.start.line => {
                    range = range.union(&sibling.range());
                    current = sibling;
                }
                _ => return Ok(None),
            }
        }
    }
}
