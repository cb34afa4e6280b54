//! Grammar management for the tree-sitter provider.
//!
//! - `LanguageRegistry`: language id to loaded `tree_sitter::Language`
//! - `ParserLoader`: loads grammars from shared libraries
//! - `detect`: picks a language id for a file path

pub mod detect;
pub mod loader;
pub mod registry;

pub use detect::{detect_from_extension, detect_language};
pub use loader::{ParserLoadError, ParserLoader, find_parser_library};
pub use registry::LanguageRegistry;
