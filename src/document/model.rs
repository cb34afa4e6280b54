use url::Url;

use crate::error::{NavError, NavResult};
use crate::text::{
    Position, Range, convert_byte_to_utf16_in_line, convert_utf16_to_byte_in_line, fnv1a_hash,
};

/// One line of a document, without its line terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    text: String,
    first_non_whitespace: usize,
    trimmed_end: usize,
}

impl TextLine {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let first_non_whitespace = text.len() - text.trim_start().len();
        let trimmed_end = text.trim_end().len();
        Self {
            text,
            first_non_whitespace,
            trimmed_end,
        }
    }

    /// Get the raw line text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte column of the first non-whitespace character.
    /// Equals the text length for whitespace-only lines.
    pub fn first_non_whitespace(&self) -> usize {
        self.first_non_whitespace
    }

    /// Byte column just after the last non-whitespace character
    pub fn trimmed_end(&self) -> usize {
        self.trimmed_end
    }

    pub fn is_empty_or_whitespace(&self) -> bool {
        self.trimmed_end == 0
    }

    /// Length of the raw text in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Snapshot of a host document for one navigation call
#[derive(Debug, Clone)]
pub struct Document {
    uri: Url,
    language_id: String,
    version: Option<i32>,
    text: String,
    content_hash: u64,
    lines: Vec<TextLine>,
}

impl Document {
    /// Create a document from its full text
    pub fn new(uri: Url, language_id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = split_lines(&text);
        Self {
            uri,
            language_id: language_id.into(),
            version: None,
            content_hash: fnv1a_hash(&text),
            text,
            lines,
        }
    }

    /// Create a document with a host version number
    pub fn with_version(
        uri: Url,
        language_id: impl Into<String>,
        text: impl Into<String>,
        version: i32,
    ) -> Self {
        let mut document = Self::new(uri, language_id, text);
        document.version = Some(version);
        document
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn language_id(&self) -> &str {
        &self.language_id
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// FNV-1a hash of the full text, computed once on construction and used
    /// to invalidate cached trees
    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line, failing with a range error outside `[0, line_count)`
    pub fn line(&self, line: usize) -> NavResult<&TextLine> {
        self.lines
            .get(line)
            .ok_or_else(|| NavError::range(line, self.lines.len()))
    }

    /// Position of the first non-whitespace character on `line`
    pub fn first_character_position(&self, line: usize) -> NavResult<Position> {
        Ok(Position::new(line, self.line(line)?.first_non_whitespace()))
    }

    /// Position just after the last non-whitespace character on `line`
    pub fn last_character_position(&self, line: usize) -> NavResult<Position> {
        Ok(Position::new(line, self.line(line)?.trimmed_end()))
    }

    /// Trimmed text range of `line`.
    ///
    /// Whitespace-only lines yield the empty range at column 0.
    pub fn line_text_range(&self, line: usize) -> NavResult<Range> {
        let text_line = self.line(line)?;
        let start = text_line.first_non_whitespace().min(text_line.trimmed_end());
        Ok(Range::new(
            Position::new(line, start),
            Position::new(line, text_line.trimmed_end()),
        ))
    }

    /// Convert a position counted in UTF-16 code units to byte columns.
    /// Columns past the end of the line clamp to the line length.
    pub fn position_from_utf16(&self, position: Position) -> NavResult<Position> {
        let text = self.line(position.line)?.text();
        let column = convert_utf16_to_byte_in_line(text, position.column).unwrap_or(text.len());
        Ok(Position::new(position.line, column))
    }

    /// Convert a byte-column position to UTF-16 code units
    pub fn position_to_utf16(&self, position: Position) -> NavResult<Position> {
        let text = self.line(position.line)?.text();
        let column = convert_byte_to_utf16_in_line(text, position.column).unwrap_or_else(|| {
            // Inside a character or past the end: count what precedes it
            text.char_indices()
                .take_while(|(index, ch)| index + ch.len_utf8() <= position.column)
                .map(|(_, ch)| ch.len_utf16())
                .sum()
        });
        Ok(Position::new(position.line, column))
    }

    /// Position at the very end of the document
    pub fn end_position(&self) -> Position {
        let last = self.lines.len().saturating_sub(1);
        let column = self.lines.last().map(TextLine::len).unwrap_or(0);
        Position::new(last, column)
    }
}

fn split_lines(text: &str) -> Vec<TextLine> {
    text.split('\n')
        .map(|line| TextLine::new(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}
