use crate::error::NavResult;
use crate::syntax::SyntaxNode;

use super::query::TreeQuery;

/// Decides which lines hold no statement.
///
/// A line is empty when its text is blank. With tree-aware lines enabled, a
/// line is also empty when no statement-level node starts on it, which makes
/// comment-only lines transparent to navigation.
pub struct LineClassifier<'q, 'a> {
    query: &'q TreeQuery<'a>,
}

impl<'q, 'a> LineClassifier<'q, 'a> {
    pub fn new(query: &'q TreeQuery<'a>) -> Self {
        Self { query }
    }

    pub fn is_line_empty(&self, line: usize) -> NavResult<bool> {
        if self.query.document().line(line)?.is_empty_or_whitespace() {
            return Ok(true);
        }
        if !self.query.rules().tree_aware_lines() {
            return Ok(false);
        }
        Ok(self.query.line_start_nodes(line)?.is_empty())
    }

    /// True for comment nodes and look-through wrappers
    pub fn exclude_node(&self, node: &SyntaxNode<'_>) -> bool {
        self.query.rules().exclude_node(node.kind())
    }

    /// First non-empty line at or after `from`
    pub fn next_non_empty_line(&self, from: usize) -> NavResult<Option<usize>> {
        for line in from..self.query.document().line_count() {
            if !self.is_line_empty(line)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Last non-empty line strictly before `before`
    pub fn prev_non_empty_line(&self, before: usize) -> NavResult<Option<usize>> {
        let before = before.min(self.query.document().line_count());
        for line in (0..before).rev() {
            if !self.is_line_empty(line)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}
