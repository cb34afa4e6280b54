//! The host document as seen by the navigator.
//!
//! The host editor owns the text; the navigator only reads lines and their
//! whitespace boundaries from this model.

pub(crate) mod model;

pub use model::{Document, TextLine};
