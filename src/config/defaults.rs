//! Built-in configuration values for stepstone.
//!
//! The exclusion table lists, per language id, the grammar tags of grouping
//! nodes that wrap a run of statements. The navigator looks through them to
//! their children instead of landing on the wrapper itself.

use super::settings::{LanguageConfig, NavigatorSettings};
use std::collections::BTreeMap;

/// Block-like wrapper tags per language id
const EXCLUSIONS: &[(&str, &[&str])] = &[
    (
        "rust",
        &[
            "block",
            "declaration_list",
            "field_declaration_list",
            "enum_variant_list",
            "match_block",
        ],
    ),
    ("python", &["block"]),
    ("go", &["block", "statement_list"]),
    ("javascript", &["statement_block", "class_body"]),
    ("typescript", &["statement_block", "class_body"]),
    ("tsx", &["statement_block", "class_body"]),
    ("lua", &["block"]),
    ("c", &["compound_statement", "field_declaration_list"]),
    (
        "cpp",
        &["compound_statement", "declaration_list", "field_declaration_list"],
    ),
    ("java", &["block", "class_body"]),
    ("bash", &["compound_statement", "do_group"]),
];

/// Extensions for the bundled exclusion table where they differ from the id
const FILETYPES: &[(&str, &[&str])] = &[
    ("rust", &["rs"]),
    ("python", &["py", "pyi"]),
    ("go", &["go"]),
    ("javascript", &["js", "mjs", "cjs", "jsx"]),
    ("typescript", &["ts", "mts", "cts"]),
    ("tsx", &["tsx"]),
    ("lua", &["lua"]),
    ("c", &["c", "h"]),
    ("cpp", &["cc", "cpp", "cxx", "hpp", "hh"]),
    ("java", &["java"]),
    ("bash", &["sh", "bash"]),
];

/// Returns the built-in settings, the lowest configuration layer.
pub fn default_settings() -> NavigatorSettings {
    NavigatorSettings {
        search_paths: None,
        tree_aware_lines: Some(true),
        languages: default_languages(),
    }
}

fn default_languages() -> BTreeMap<String, LanguageConfig> {
    EXCLUSIONS
        .iter()
        .map(|(language, tags)| {
            let filetypes = FILETYPES
                .iter()
                .find(|(id, _)| id == language)
                .map(|(_, exts)| exts.iter().map(|ext| ext.to_string()).collect());
            let config = LanguageConfig {
                library: None,
                filetypes,
                exclude: Some(tags.iter().map(|tag| tag.to_string()).collect()),
                tree_aware_lines: None,
            };
            (language.to_string(), config)
        })
        .collect()
}
