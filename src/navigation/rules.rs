use std::collections::HashSet;

use crate::config::NavigatorSettings;

/// Classification rules for grammar tags of one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRules {
    wrappers: HashSet<String>,
    tree_aware_lines: bool,
}

impl Default for NodeRules {
    fn default() -> Self {
        Self {
            wrappers: HashSet::new(),
            tree_aware_lines: true,
        }
    }
}

impl NodeRules {
    pub fn new<I, S>(wrappers: I, tree_aware_lines: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            wrappers: wrappers.into_iter().map(Into::into).collect(),
            tree_aware_lines,
        }
    }

    /// Rules for `language_id` from the exclusion table in `settings`
    pub fn for_language(settings: &NavigatorSettings, language_id: &str) -> Self {
        Self::new(
            settings.excluded_tags_for(language_id),
            settings.tree_aware_lines_for(language_id),
        )
    }

    /// Comment tags across grammars: `comment`, `line_comment`, `block_comment`, ...
    pub fn is_comment(kind: &str) -> bool {
        kind.contains("comment")
    }

    /// Grouping node that is looked through in favor of its children
    pub fn is_wrapper(&self, kind: &str) -> bool {
        self.wrappers.contains(kind)
    }

    /// Comments and wrappers never count as statement-level nodes
    pub fn exclude_node(&self, kind: &str) -> bool {
        Self::is_comment(kind) || self.is_wrapper(kind)
    }

    /// Whether a line with no statement-level node starting on it is empty
    pub fn tree_aware_lines(&self) -> bool {
        self.tree_aware_lines
    }
}
