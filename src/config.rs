pub mod defaults;
pub mod settings;
pub mod user;

pub use settings::{LanguageConfig, NavigatorSettings};
pub use user::{
    UserConfigError, UserConfigResult, load_settings_file, load_user_config, user_config_path,
};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{NavError, NavResult};

/// Key whose settings every language inherits
pub const WILDCARD_KEY: &str = "_";

/// Resolve a language key with wildcard fallback and merging.
///
/// - If both wildcard (`_`) and specific key exist: merge them
/// - If only one exists: return it
/// - If neither exists: return None
///
/// Option fields prefer the specific entry. Exclusion lists are unioned, so a
/// language extends the wildcard list rather than replacing it.
pub fn resolve_language_with_wildcard(
    map: &BTreeMap<String, LanguageConfig>,
    key: &str,
) -> Option<LanguageConfig> {
    let wildcard = map.get(WILDCARD_KEY);
    let specific = map.get(key);

    match (wildcard, specific) {
        (Some(w), Some(s)) => Some(LanguageConfig {
            library: s.library.clone().or_else(|| w.library.clone()),
            filetypes: s.filetypes.clone().or_else(|| w.filetypes.clone()),
            exclude: union_tags(w.exclude.as_ref(), s.exclude.as_ref()),
            tree_aware_lines: s.tree_aware_lines.or(w.tree_aware_lines),
        }),
        (Some(w), None) => Some(w.clone()),
        (None, Some(s)) => Some(s.clone()),
        (None, None) => None,
    }
}

fn union_tags(first: Option<&Vec<String>>, second: Option<&Vec<String>>) -> Option<Vec<String>> {
    match (first, second) {
        (None, None) => None,
        (first, second) => {
            let mut tags: Vec<String> = Vec::new();
            for tag in first.into_iter().chain(second).flatten() {
                if !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
            Some(tags)
        }
    }
}

/// Returns the default search path for parser libraries.
///
/// Uses the platform data directory (`dirs::data_dir()`), e.g.
/// `~/.local/share/stepstone` on Linux. Parsers live under `parser/` below it.
pub fn default_search_paths() -> Vec<String> {
    default_data_dir()
        .map(|d| vec![d.to_string_lossy().to_string()])
        .unwrap_or_default()
}

/// Platform data directory for stepstone
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("stepstone"))
}

/// Merge multiple settings layers in order; later layers take precedence.
/// Use this for layered config: `merge_all(&[defaults, user, explicit])`
pub fn merge_all(configs: &[Option<NavigatorSettings>]) -> Option<NavigatorSettings> {
    configs.iter().cloned().reduce(merge_settings).flatten()
}

/// Merge two settings layers, preferring values from `primary` over `fallback`
pub fn merge_settings(
    fallback: Option<NavigatorSettings>,
    primary: Option<NavigatorSettings>,
) -> Option<NavigatorSettings> {
    match (fallback, primary) {
        (None, None) => None,
        (Some(settings), None) | (None, Some(settings)) => Some(settings),
        (Some(fallback), Some(primary)) => Some(NavigatorSettings {
            search_paths: primary.search_paths.or(fallback.search_paths),
            tree_aware_lines: primary.tree_aware_lines.or(fallback.tree_aware_lines),
            languages: merge_languages(fallback.languages, primary.languages),
        }),
    }
}

fn merge_languages(
    mut fallback: BTreeMap<String, LanguageConfig>,
    primary: BTreeMap<String, LanguageConfig>,
) -> BTreeMap<String, LanguageConfig> {
    // Field-wise: a later layer replaces only the fields it sets
    for (key, primary_config) in primary {
        fallback
            .entry(key)
            .and_modify(|fallback_config| {
                if primary_config.library.is_some() {
                    fallback_config.library = primary_config.library.clone();
                }
                if primary_config.filetypes.is_some() {
                    fallback_config.filetypes = primary_config.filetypes.clone();
                }
                if primary_config.exclude.is_some() {
                    fallback_config.exclude = primary_config.exclude.clone();
                }
                if primary_config.tree_aware_lines.is_some() {
                    fallback_config.tree_aware_lines = primary_config.tree_aware_lines;
                }
            })
            .or_insert(primary_config);
    }
    fallback
}

/// Load built-in defaults, then the user config, then an explicit file.
pub fn load_layered_settings(explicit: Option<&Path>) -> NavResult<NavigatorSettings> {
    let user = load_user_config().map_err(|e| NavError::config(e.to_string()))?;
    let explicit = explicit
        .map(load_settings_file)
        .transpose()
        .map_err(|e| NavError::config(e.to_string()))?;

    Ok(
        merge_all(&[Some(defaults::default_settings()), user, explicit])
            .unwrap_or_else(defaults::default_settings),
    )
}

impl NavigatorSettings {
    /// Search paths, or the platform default when none are configured
    pub fn effective_search_paths(&self) -> Vec<String> {
        self.search_paths
            .clone()
            .unwrap_or_else(default_search_paths)
    }

    /// Settings for `language_id` after wildcard inheritance
    pub fn language(&self, language_id: &str) -> Option<LanguageConfig> {
        resolve_language_with_wildcard(&self.languages, language_id)
    }

    /// Whether empty-line detection consults the tree for `language_id`.
    /// Language → wildcard → global, defaulting to true.
    pub fn tree_aware_lines_for(&self, language_id: &str) -> bool {
        self.language(language_id)
            .and_then(|config| config.tree_aware_lines)
            .or(self.tree_aware_lines)
            .unwrap_or(true)
    }

    /// Excluded grammar tags for `language_id`
    pub fn excluded_tags_for(&self, language_id: &str) -> Vec<String> {
        self.language(language_id)
            .and_then(|config| config.exclude)
            .unwrap_or_default()
    }

    /// Language whose `filetypes` list contains `extension`
    pub fn language_for_filetype(&self, extension: &str) -> Option<String> {
        self.languages
            .iter()
            .filter(|(id, _)| id.as_str() != WILDCARD_KEY)
            .find(|(_, config)| {
                config
                    .filetypes
                    .as_ref()
                    .is_some_and(|filetypes| filetypes.iter().any(|ft| ft == extension))
            })
            .map(|(id, _)| id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn language(exclude: &[&str]) -> LanguageConfig {
        LanguageConfig {
            exclude: Some(exclude.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    fn settings_with(languages: Vec<(&str, LanguageConfig)>) -> NavigatorSettings {
        NavigatorSettings {
            languages: languages
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_settings_with_none() {
        assert!(merge_settings(None, None).is_none());
    }

    #[test]
    fn test_merge_settings_prefers_primary_scalars() {
        let fallback = NavigatorSettings {
            search_paths: Some(vec!["/fallback".to_string()]),
            tree_aware_lines: Some(true),
            ..Default::default()
        };
        let primary = NavigatorSettings {
            search_paths: None,
            tree_aware_lines: Some(false),
            ..Default::default()
        };

        let merged = merge_settings(Some(fallback), Some(primary)).unwrap();
        assert_eq!(merged.search_paths, Some(vec!["/fallback".to_string()]));
        assert_eq!(merged.tree_aware_lines, Some(false));
    }

    #[test]
    fn test_merge_languages_is_field_wise() {
        let mut base = language(&["block"]);
        base.filetypes = Some(vec!["rs".to_string()]);
        let fallback = settings_with(vec![("rust", base)]);

        let override_library = LanguageConfig {
            library: Some("/primary/rust.so".to_string()),
            ..Default::default()
        };
        let primary = settings_with(vec![("rust", override_library)]);

        let merged = merge_settings(Some(fallback), Some(primary)).unwrap();
        let rust = &merged.languages["rust"];
        assert_eq!(rust.library.as_deref(), Some("/primary/rust.so"));
        assert_eq!(rust.exclude, Some(vec!["block".to_string()]));
        assert_eq!(rust.filetypes, Some(vec!["rs".to_string()]));
    }

    #[test]
    fn test_merge_all_applies_layers_in_order() {
        let layers = [
            Some(NavigatorSettings {
                tree_aware_lines: Some(true),
                ..Default::default()
            }),
            None,
            Some(NavigatorSettings {
                tree_aware_lines: Some(false),
                ..Default::default()
            }),
        ];
        assert_eq!(merge_all(&layers).unwrap().tree_aware_lines, Some(false));
    }

    #[test]
    fn test_wildcard_exclusions_are_unioned() {
        let settings = settings_with(vec![
            ("_", language(&["declaration_list"])),
            ("rust", language(&["block", "declaration_list"])),
        ]);

        assert_eq!(
            settings.excluded_tags_for("rust"),
            vec!["declaration_list".to_string(), "block".to_string()]
        );
        assert_eq!(
            settings.excluded_tags_for("python"),
            vec!["declaration_list".to_string()]
        );
    }

    #[test]
    fn test_tree_aware_lines_resolution_order() {
        let mut settings = settings_with(vec![(
            "lua",
            LanguageConfig {
                tree_aware_lines: Some(false),
                ..Default::default()
            },
        )]);
        assert!(!settings.tree_aware_lines_for("lua"));
        assert!(settings.tree_aware_lines_for("rust"));

        settings.tree_aware_lines = Some(false);
        assert!(!settings.tree_aware_lines_for("rust"));
    }

    #[test]
    fn test_language_for_filetype_ignores_wildcard() {
        let mut wildcard = LanguageConfig::default();
        wildcard.filetypes = Some(vec!["txt".to_string()]);
        let mut python = LanguageConfig::default();
        python.filetypes = Some(vec!["py".to_string()]);
        let settings = settings_with(vec![("_", wildcard), ("python", python)]);

        assert_eq!(settings.language_for_filetype("py"), Some("python".to_string()));
        assert_eq!(settings.language_for_filetype("txt"), None);
    }

    #[test]
    fn test_defaults_resolve_rust_exclusions() {
        let settings = defaults::default_settings();
        assert!(
            settings
                .excluded_tags_for("rust")
                .contains(&"block".to_string())
        );
        assert_eq!(settings.language_for_filetype("rs"), Some("rust".to_string()));
    }
}
