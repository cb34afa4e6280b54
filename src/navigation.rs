//! Statement navigation.
//!
//! Turns "a syntax tree + a cursor position" into the range of the enclosing
//! statement, and steps to the next or previous statement while skipping
//! blank lines and comments.
//!
//! - `rules`: which grammar tags are comments or look-through wrappers
//! - `query`: tree facade with pruned, stack-based line scans
//! - `classifier`: empty-line detection
//! - `grower`: ascent from a token to its statement
//! - `navigator`: the position-to-statement and statement-to-statement algorithms

pub mod classifier;
pub mod grower;
pub mod navigator;
pub mod query;
pub mod rules;

pub use classifier::LineClassifier;
pub use grower::StatementGrower;
pub use navigator::{GoTo, Motion, Navigator};
pub use query::{LineWalk, TreeQuery};
pub use rules::NodeRules;

#[cfg(test)]
pub(crate) mod fixtures;
