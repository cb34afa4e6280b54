use serde::{Deserialize, Serialize};
use std::fmt;
use tree_sitter::Point;

/// A line/column coordinate. Columns are byte offsets within the line.
///
/// Ordering is line-major, then column, so positions compare the way a reader
/// scans a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn is_before(&self, other: Position) -> bool {
        *self < other
    }

    pub fn is_after(&self, other: Position) -> bool {
        *self > other
    }

    pub fn is_before_or_equal(&self, other: Position) -> bool {
        *self <= other
    }

    pub fn is_after_or_equal(&self, other: Position) -> bool {
        *self >= other
    }

    /// Same line, one column to the left. Saturates at column 0.
    pub fn step_back(&self) -> Position {
        Position::new(self.line, self.column.saturating_sub(1))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<Point> for Position {
    fn from(point: Point) -> Self {
        Position::new(point.row, point.column)
    }
}

impl From<Position> for Point {
    fn from(position: Position) -> Self {
        Point::new(position.line, position.column)
    }
}

/// A line-oriented range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Build a range, swapping the endpoints if they arrive reversed.
    pub fn new(start: Position, end: Position) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Zero-width range at `position`.
    pub fn empty(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    pub fn contains_range(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest range covering both `self` and `other`.
    pub fn union(&self, other: &Range) -> Range {
        Range {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// True if any part of the range lies on `line`.
    pub fn touches_line(&self, line: usize) -> bool {
        self.start.line <= line && line <= self.end.line
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Return `position` if `range` contains it, otherwise the nearer endpoint.
pub fn clamp_to_range(position: Position, range: &Range) -> Position {
    if position < range.start {
        range.start
    } else if position > range.end {
        range.end
    } else {
        position
    }
}

/// Convert a UTF-16 column to a byte column within a line.
/// Returns None if the column lies beyond the end of the line.
#[inline]
pub fn convert_utf16_to_byte_in_line(line_text: &str, utf16_pos: usize) -> Option<usize> {
    let mut byte_offset = 0;
    let mut utf16_offset = 0;

    for ch in line_text.chars() {
        if utf16_offset >= utf16_pos {
            return Some(byte_offset);
        }
        utf16_offset += ch.len_utf16();
        byte_offset += ch.len_utf8();
    }

    (utf16_offset == utf16_pos).then_some(byte_offset)
}

/// Convert a byte column to a UTF-16 column within a line.
/// Returns None if the byte column is past the line or inside a multi-byte character.
#[inline]
pub fn convert_byte_to_utf16_in_line(line_text: &str, byte_pos: usize) -> Option<usize> {
    let mut utf16_offset = 0;
    let mut byte_count = 0;

    for ch in line_text.chars() {
        if byte_count == byte_pos {
            return Some(utf16_offset);
        }
        let ch_bytes = ch.len_utf8();
        if byte_count + ch_bytes > byte_pos {
            return None;
        }
        byte_count += ch_bytes;
        utf16_offset += ch.len_utf16();
    }

    (byte_count == byte_pos).then_some(utf16_offset)
}
