use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tree_sitter::Language;

use crate::error::{LockResultExt, NavResult};

/// Registry of loaded Tree-sitter languages, shared by every parse
#[derive(Clone, Default)]
pub struct LanguageRegistry {
    languages: Arc<Mutex<HashMap<String, Language>>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a language under `language_id`, replacing any previous grammar
    pub fn register(&self, language_id: impl Into<String>, language: Language) -> NavResult<()> {
        let language_id = language_id.into();
        let mut languages = self.languages.lock().recover_poison("registry::register")?;
        log::debug!(
            target: "stepstone::provider",
            "Registered grammar for {}",
            language_id
        );
        languages.insert(language_id, language);
        Ok(())
    }

    /// Get a language by id
    pub fn get(&self, language_id: &str) -> NavResult<Option<Language>> {
        let languages = self.languages.lock().recover_poison("registry::get")?;
        Ok(languages.get(language_id).cloned())
    }

    /// Check if a language is registered
    pub fn contains(&self, language_id: &str) -> NavResult<bool> {
        let languages = self.languages.lock().recover_poison("registry::contains")?;
        Ok(languages.contains_key(language_id))
    }

    /// All registered language ids, sorted
    pub fn language_ids(&self) -> NavResult<Vec<String>> {
        let languages = self.languages.lock().recover_poison("registry::language_ids")?;
        let mut ids: Vec<String> = languages.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
