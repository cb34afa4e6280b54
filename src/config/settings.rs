use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-language navigation settings.
///
/// Every field is optional so that layered configs only override what they set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Shared library exporting `tree_sitter_<language>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    /// File extensions that map to this language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filetypes: Option<Vec<String>>,
    /// Grammar tags to look through instead of treating as statements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    /// Treat lines without a starting syntax node as empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_aware_lines: Option<bool>,
}

/// Top-level settings as read from `stepstone.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigatorSettings {
    /// Base directories containing `parser/<language>.<ext>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_paths: Option<Vec<String>>,
    /// Global default for tree-aware empty-line detection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_aware_lines: Option<bool>,
    /// Language id (or `_` wildcard) to language settings
    pub languages: BTreeMap<String, LanguageConfig>,
}
