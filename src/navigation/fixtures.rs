//! Hand-built trees for navigator tests.
//!
//! `assignments` understands a tiny line-based language: each line is blank,
//! a `# comment`, or `name = value` optionally followed by `# comment`.

use std::sync::Arc;

use url::Url;

use crate::document::Document;
use crate::error::NavResult;
use crate::provider::TreeProvider;
use crate::syntax::{SyntaxTree, TreeBuilder};
use crate::text::Position;

pub(crate) fn p(line: usize, column: usize) -> Position {
    Position::new(line, column)
}

pub(crate) fn doc(text: &str) -> Document {
    Document::new(Url::parse("file:///tmp/fixture.py").unwrap(), "python", text)
}

/// Provider that always hands out the same tree
pub(crate) struct FixedTree(pub(crate) Arc<SyntaxTree>);

impl TreeProvider for FixedTree {
    fn tree(&self, _document: &Document) -> NavResult<Arc<SyntaxTree>> {
        Ok(Arc::clone(&self.0))
    }
}

pub(crate) fn fixed(tree: SyntaxTree) -> Arc<dyn TreeProvider> {
    Arc::new(FixedTree(Arc::new(tree)))
}

/// Whitespace-separated words of `text` with their byte columns
fn words(text: &str) -> Vec<(usize, usize)> {
    let mut words = Vec::new();
    let mut start = None;
    for (column, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(column),
            (true, Some(s)) => {
                words.push((s, column));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, text.len()));
    }
    words
}

pub(crate) fn assignments(text: &str) -> SyntaxTree {
    let document = doc(text);
    let mut b = TreeBuilder::new();
    b.open("module", true, p(0, 0));

    for line in 0..document.line_count() {
        let raw = document.line(line).unwrap().text();
        let (code, comment) = match raw.find('#') {
            Some(hash) => (&raw[..hash], Some(hash)),
            None => (raw, None),
        };

        let tokens = words(code);
        if let (Some(&(first, _)), Some(&(_, last))) = (tokens.first(), tokens.last()) {
            b.open("expression_statement", true, p(line, first));
            if tokens.len() == 1 {
                b.leaf("identifier", true, p(line, first), p(line, last));
            } else {
                b.open("assignment", true, p(line, first));
                for (index, &(start, end)) in tokens.iter().enumerate() {
                    let (kind, named) = match index {
                        0 => ("identifier", true),
                        1 => ("=", false),
                        _ => ("integer", true),
                    };
                    b.leaf(kind, named, p(line, start), p(line, end));
                }
                b.close(p(line, last));
            }
            b.close(p(line, last));
        }

        if let Some(hash) = comment {
            let end = document.line(line).unwrap().trimmed_end();
            b.leaf("comment", true, p(line, hash), p(line, end));
        }
    }

    b.close(document.end_position());
    b.finish().unwrap()
}
