use crate::document::Document;
use crate::error::{NavError, NavResult};
use crate::provider::{ProviderHandle, TreeProvider};
use crate::syntax::SyntaxNode;
use crate::text::{Position, Range, clamp_to_range};

use std::sync::Arc;

use super::classifier::LineClassifier;
use super::grower::StatementGrower;
use super::query::TreeQuery;
use super::rules::NodeRules;

/// Direction of a statement motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Motion {
    Next,
    Previous,
}

/// Line-anchored jump targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoTo {
    NextNonEmptyLineStart,
    NextStart,
    PrevNonEmptyLineStart,
    PrevEnd,
}

/// Statement navigation over one document snapshot.
///
/// Construct one per request; it holds the tree that was current when it was
/// built and must not outlive an edit of the document.
pub struct Navigator<'a> {
    query: TreeQuery<'a>,
}

impl<'a> Navigator<'a> {
    /// Navigator backed by the process-wide provider.
    ///
    /// Fails with `UninitializedProvider` if the handle was never activated.
    pub fn new(
        handle: &ProviderHandle,
        document: &'a Document,
        rules: &'a NodeRules,
    ) -> NavResult<Self> {
        Self::with_provider(handle.get()?, document, rules)
    }

    pub fn with_provider(
        provider: Arc<dyn TreeProvider>,
        document: &'a Document,
        rules: &'a NodeRules,
    ) -> NavResult<Self> {
        Ok(Self {
            query: TreeQuery::new(provider, document, rules)?,
        })
    }

    pub fn query(&self) -> &TreeQuery<'a> {
        &self.query
    }

    pub fn classifier(&self) -> LineClassifier<'_, 'a> {
        LineClassifier::new(&self.query)
    }

    pub fn grower(&self) -> StatementGrower<'_, 'a> {
        StatementGrower::new(&self.query)
    }

    fn document(&self) -> &'a Document {
        self.query.document()
    }

    /// Statement at `position`, or the next one if the cursor already sits at
    /// the end of the statement it is in.
    ///
    /// Past the last statement of the document this resolves to that last
    /// statement. Fails with `NoValidNode` when the document has none.
    pub fn resolve_statement(&self, position: Position) -> NavResult<Range> {
        self.document().line(position.line)?;

        let (clamped, statement) = match self.statement_on_line(position)? {
            Some(found) => found,
            None => match self.first_statement_after(position.line)? {
                Some(found) => found,
                None => {
                    log::debug!(
                        target: "stepstone::navigator",
                        "Nothing after line {}, falling back to the last statement",
                        position.line
                    );
                    return self
                        .last_statement_before(position.line)?
                        .map(|(_, statement)| statement)
                        .ok_or_else(|| NavError::no_valid_node(position.line));
                }
            },
        };
        if statement.end != clamped {
            return Ok(statement);
        }

        let mut line = clamped.line;
        while let Some((at, candidate)) = self.first_statement_after(line)? {
            if candidate.start > statement.start && candidate.end > statement.end {
                log::debug!(
                    target: "stepstone::navigator",
                    "At end of {statement}, advancing to {candidate}"
                );
                return Ok(candidate);
            }
            line = at.line;
        }

        log::debug!(
            target: "stepstone::navigator",
            "No statement after {statement} in {}",
            self.document().uri()
        );
        Ok(statement)
    }

    /// Statement at `position`, or the previous one if the cursor already
    /// sits at the start of the statement it is in.
    ///
    /// Before the first statement of the document this resolves to that first
    /// statement. Fails with `NoValidNode` when the document has none.
    pub fn prev_statement(&self, position: Position) -> NavResult<Range> {
        self.document().line(position.line)?;

        let (clamped, statement) = match self.statement_on_line(position)? {
            Some(found) => found,
            None => match self.last_statement_before(position.line)? {
                Some(found) => found,
                None => {
                    log::debug!(
                        target: "stepstone::navigator",
                        "Nothing before line {}, falling back to the first statement",
                        position.line
                    );
                    return self
                        .first_statement_after(position.line)?
                        .map(|(_, statement)| statement)
                        .ok_or_else(|| NavError::no_valid_node(position.line));
                }
            },
        };
        if statement.start != clamped {
            return Ok(statement);
        }

        let mut line = clamped.line;
        while let Some((at, candidate)) = self.last_statement_before(line)? {
            if candidate.end < statement.end && candidate.start < statement.start {
                log::debug!(
                    target: "stepstone::navigator",
                    "At start of {statement}, retreating to {candidate}"
                );
                return Ok(candidate);
            }
            line = at.line;
        }

        log::debug!(
            target: "stepstone::navigator",
            "No statement before {statement} in {}",
            self.document().uri()
        );
        Ok(statement)
    }

    /// Cursor target of `motion`: the end of the next statement or the start
    /// of the previous one.
    pub fn jump(&self, motion: Motion, position: Position) -> NavResult<Position> {
        let range = self.select(motion, position)?;
        Ok(match motion {
            Motion::Next => range.end,
            Motion::Previous => range.start,
        })
    }

    pub fn select(&self, motion: Motion, position: Position) -> NavResult<Range> {
        match motion {
            Motion::Next => self.resolve_statement(position),
            Motion::Previous => self.prev_statement(position),
        }
    }

    pub fn go_to(&self, target: GoTo, position: Position) -> NavResult<Position> {
        match target {
            GoTo::NextNonEmptyLineStart => Ok(self
                .next_non_empty_line_start(position.line)?
                .unwrap_or(position)),
            GoTo::PrevNonEmptyLineStart => Ok(self
                .prev_non_empty_line_start(position.line)?
                .unwrap_or(position)),
            GoTo::NextStart => self.next_start(position.line),
            GoTo::PrevEnd => self.prev_end(position.line),
        }
    }

    /// Span from the first to the last statement-level node starting on
    /// `line`, in pre-order.
    pub fn line_anchor(&self, line: usize) -> NavResult<Range> {
        let nodes = self.query.line_start_nodes(line)?;
        match (nodes.first(), nodes.last()) {
            (Some(first), Some(last)) => Ok(Range::new(first.start(), last.end())),
            _ => Err(NavError::no_valid_node(line)),
        }
    }

    /// Start of line ("SOL"), preferring the tree over the text
    pub fn line_start(&self, line: usize) -> NavResult<Position> {
        match self.line_anchor(line) {
            Ok(anchor) => Ok(anchor.start),
            Err(NavError::NoValidNode { .. }) => self.document().first_character_position(line),
            Err(e) => Err(e),
        }
    }

    /// End of line ("EOL"), preferring the tree over the text
    pub fn line_end(&self, line: usize) -> NavResult<Position> {
        match self.line_anchor(line) {
            Ok(anchor) => Ok(anchor.end),
            Err(NavError::NoValidNode { .. }) => self.document().last_character_position(line),
            Err(e) => Err(e),
        }
    }

    pub fn is_sol(&self, position: Position) -> NavResult<bool> {
        Ok(position <= self.line_start(position.line)?)
    }

    pub fn is_eol(&self, position: Position) -> NavResult<bool> {
        Ok(position >= self.line_end(position.line)?)
    }

    /// Start of the first statement-level node beginning after `line`
    pub fn next_start(&self, line: usize) -> NavResult<Position> {
        self.document().line(line)?;
        match self.query.next_start_node(line) {
            Some(node) => Ok(node.start()),
            None => self.line_end(line),
        }
    }

    /// Start of the last statement-level node that ends before `line`
    pub fn prev_end(&self, line: usize) -> NavResult<Position> {
        self.document().line(line)?;
        match self.query.prev_end_node(line) {
            Some(node) => Ok(node.start()),
            None => self.line_end(line),
        }
    }

    pub fn next_non_empty_line_start(&self, line: usize) -> NavResult<Option<Position>> {
        self.document().line(line)?;
        self.classifier()
            .next_non_empty_line(line + 1)?
            .map(|next| self.line_start(next))
            .transpose()
    }

    pub fn prev_non_empty_line_start(&self, line: usize) -> NavResult<Option<Position>> {
        self.document().line(line)?;
        self.classifier()
            .prev_non_empty_line(line)?
            .map(|prev| self.line_start(prev))
            .transpose()
    }

    /// Trimmed text of `line` as a range
    pub fn select_line(&self, line: usize) -> NavResult<Range> {
        self.document().line_text_range(line)
    }

    /// Statement on the line of `position`, or None for empty lines and
    /// lines holding nothing but comments.
    fn statement_on_line(&self, position: Position) -> NavResult<Option<(Position, Range)>> {
        if self.classifier().is_line_empty(position.line)? {
            return Ok(None);
        }
        self.statement_at(position)
    }

    /// First statement found from the first character of the non-empty lines
    /// after `line`, with the position it was resolved from.
    fn first_statement_after(&self, line: usize) -> NavResult<Option<(Position, Range)>> {
        let classifier = self.classifier();
        let mut line = line;
        while let Some(next) = classifier.next_non_empty_line(line + 1)? {
            let first = self.document().first_character_position(next)?;
            if let Some(found) = self.statement_at(first)? {
                return Ok(Some(found));
            }
            line = next;
        }
        Ok(None)
    }

    /// Mirror of `first_statement_after`, resolving from the last character of
    /// the non-empty lines before `line`.
    fn last_statement_before(&self, line: usize) -> NavResult<Option<(Position, Range)>> {
        let classifier = self.classifier();
        let mut line = line;
        while let Some(prev) = classifier.prev_non_empty_line(line)? {
            let last = self.document().last_character_position(prev)?;
            if let Some(found) = self.statement_at(last)? {
                return Ok(Some(found));
            }
            line = prev;
        }
        Ok(None)
    }

    /// Clamp `position` into its line and resolve the statement there.
    /// Returns the clamped position together with the statement range, or
    /// None when nothing on the line can anchor a statement.
    fn statement_at(&self, position: Position) -> NavResult<Option<(Position, Range)>> {
        let text = self.document().line_text_range(position.line)?;
        let clamped = clamp_to_range(position, &text);
        // At the trimmed end the cursor touches no token; look at the last one
        let probe = if clamped == text.end && clamped > text.start {
            clamped.step_back()
        } else {
            clamped
        };

        let Some(node) = self.anchor_node(probe, text.start)? else {
            return Ok(None);
        };
        match self.grower().statement_range(node) {
            Ok(range) => Ok(Some((clamped, range))),
            Err(NavError::NoValidNode { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Token the cursor belongs to
    fn anchor_node(
        &self,
        probe: Position,
        line_start: Position,
    ) -> NavResult<Option<SyntaxNode<'_>>> {
        let mut node = self.query.node_at(probe)?;

        // Between tokens: attach to the token the cursor follows
        if node.child_count() > 0 && probe > line_start {
            let text = self.document().line(probe.line)?.text();
            let token_end = text
                .get(..probe.column)
                .map_or(probe.column, |before| before.trim_end().len());
            if token_end > line_start.column {
                node = self
                    .query
                    .node_at(Position::new(probe.line, token_end).step_back())?;
            }
        }

        // A comment belongs to the statement it shares its line with
        match enclosing_comment(node) {
            Some(comment) => Ok(annotated_statement(comment)),
            None if node.is_root() => Ok(None),
            None => Ok(Some(node)),
        }
    }
}

/// Non-comment sibling sharing a line with `comment`: the one it trails,
/// else the one it leads.
fn annotated_statement(comment: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let line = comment.start().line;
    let trailed = std::iter::successors(comment.prev_sibling(), |node| node.prev_sibling())
        .take_while(|node| node.end().line == line)
        .find(|node| !NodeRules::is_comment(node.kind()));

    trailed.or_else(|| {
        let line = comment.end().line;
        std::iter::successors(comment.next_sibling(), |node| node.next_sibling())
            .take_while(|node| node.start().line == line)
            .find(|node| !NodeRules::is_comment(node.kind()))
    })
}

/// `node` itself or its nearest comment ancestor, if either is a comment
fn enclosing_comment(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
    let mut current = Some(node);
    while let Some(candidate) = current {
        if NodeRules::is_comment(candidate.kind()) {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}
