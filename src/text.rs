//! Text coordinates and hashing.
//!
//! This module provides the value types the navigator works with:
//! - `Position` / `Range` with byte columns, matching tree-sitter points
//! - UTF-16 column conversion for hosts that count in code units
//! - Content hashing for parse caching

mod hash;
pub mod position;

pub use hash::fnv1a_hash;
pub use position::{
    Position, Range, clamp_to_range, convert_byte_to_utf16_in_line, convert_utf16_to_byte_in_line,
};
