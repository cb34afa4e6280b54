//! Error handling types for stepstone
//!
//! This module provides the error taxonomy shared by the navigator, the tree
//! provider and the configuration layer.

use std::sync::PoisonError;
use thiserror::Error;

use crate::text::Position;

/// Error type for navigation operations
#[derive(Debug, Error)]
pub enum NavError {
    /// The tree provider was used before its one-time activation
    #[error("Tree provider is not initialized; activate it before navigating")]
    UninitializedProvider,

    /// A line index outside `[0, line_count)`
    #[error("Line {line} out of bounds (document has {line_count} lines)")]
    Range { line: usize, line_count: usize },

    /// A line-anchored query found no candidate node
    #[error("No valid nodes on line {line}")]
    NoValidNode { line: usize },

    /// The provider could not resolve a node at a location
    #[error("No node found at {position}")]
    NoNodeFound { position: Position },

    /// No grammar is registered for the language
    #[error("Language not found: {language}")]
    LanguageNotFound { language: String },

    /// The tree provider failed to produce a tree
    #[error("Tree provider error: {message}")]
    Provider { message: String },

    /// Configuration error
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for navigation operations
pub type NavResult<T> = Result<T, NavError>;

/// Helper trait to convert PoisonError into a recovered guard
pub trait LockResultExt<T> {
    /// Recover the guard from a poisoned lock, logging which operation hit it.
    fn recover_poison(self, context: &str) -> NavResult<T>;
}

impl<T> LockResultExt<T> for Result<T, PoisonError<T>> {
    fn recover_poison(self, context: &str) -> NavResult<T> {
        match self {
            Ok(guard) => Ok(guard),
            Err(poisoned) => {
                log::warn!(
                    target: "stepstone::lock_recovery",
                    "Recovered from poisoned lock in {}",
                    context
                );
                Ok(poisoned.into_inner())
            }
        }
    }
}

impl NavError {
    pub fn range(line: usize, line_count: usize) -> Self {
        NavError::Range { line, line_count }
    }

    pub fn no_valid_node(line: usize) -> Self {
        NavError::NoValidNode { line }
    }

    pub fn no_node_found(position: Position) -> Self {
        NavError::NoNodeFound { position }
    }

    pub fn language_not_found(language: impl Into<String>) -> Self {
        NavError::LanguageNotFound {
            language: language.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        NavError::Provider {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        NavError::Config {
            message: message.into(),
        }
    }
}
