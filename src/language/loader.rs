use libloading::{Library, Symbol};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tree_sitter::Language;

use crate::error::NavError;

/// Library file extensions tried when searching for a parser
const LIBRARY_EXTENSIONS: &[&str] = &["so", "dylib", "dll"];

/// Loads Tree-sitter grammars from shared libraries
#[derive(Default)]
pub struct ParserLoader {
    /// Loaded libraries stay alive as long as the loader, since node kinds
    /// borrow static strings from them
    loaded_libraries: HashMap<PathBuf, Library>,
}

#[derive(Debug, Error)]
pub enum ParserLoadError {
    #[error("Failed to load library: {0}")]
    Library(#[from] libloading::Error),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
}

impl From<ParserLoadError> for NavError {
    fn from(err: ParserLoadError) -> Self {
        NavError::provider(err.to_string())
    }
}

impl ParserLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `tree_sitter_<language>` from the library at `path`.
    ///
    /// Dashes in the language id become underscores in the symbol name.
    pub fn load_language(
        &mut self,
        path: &Path,
        language: &str,
    ) -> Result<Language, ParserLoadError> {
        let func_name = format!("tree_sitter_{}", language.replace('-', "_"));

        if !self.loaded_libraries.contains_key(path) {
            // SAFETY: loading a grammar library runs no initialisers beyond
            // what tree-sitter grammars are built with
            let library = unsafe { Library::new(path)? };
            log::info!(
                target: "stepstone::provider",
                "Loaded parser library {}",
                path.display()
            );
            self.loaded_libraries.insert(path.to_path_buf(), library);
        }

        let library = &self.loaded_libraries[path];

        // SAFETY: tree-sitter grammars export `const TSLanguage *tree_sitter_<name>(void)`
        let language_fn: Symbol<'_, unsafe extern "C" fn() -> Language> = unsafe {
            library
                .get(func_name.as_bytes())
                .map_err(|_| ParserLoadError::SymbolNotFound(func_name.clone()))?
        };

        Ok(unsafe { language_fn() })
    }
}

/// Find `parser/<language>.<ext>` under the first search path that has one
pub fn find_parser_library(search_paths: &[String], language: &str) -> Option<PathBuf> {
    search_paths.iter().find_map(|base| {
        LIBRARY_EXTENSIONS.iter().find_map(|ext| {
            let candidate = Path::new(base)
                .join("parser")
                .join(format!("{language}.{ext}"));
            candidate.is_file().then_some(candidate)
        })
    })
}
