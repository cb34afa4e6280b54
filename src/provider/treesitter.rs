use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use tree_sitter::Parser;
use url::Url;

use crate::config::NavigatorSettings;
use crate::document::Document;
use crate::error::{LockResultExt, NavError, NavResult};
use crate::language::{LanguageRegistry, ParserLoader, find_parser_library};
use crate::syntax::SyntaxTree;

use super::TreeProvider;

/// Cached parse result for one document
struct CachedTree {
    language_id: String,
    version: Option<i32>,
    content_hash: u64,
    tree: Arc<SyntaxTree>,
}

impl CachedTree {
    fn is_current(&self, document: &Document, content_hash: u64) -> bool {
        self.content_hash == content_hash
            && self.version == document.version()
            && self.language_id == document.language_id()
    }
}

/// Tree provider backed by tree-sitter grammars.
///
/// Trees are cached per URI and rebuilt wholesale whenever the document text,
/// version or language changes.
pub struct TreeSitterProvider {
    registry: LanguageRegistry,
    loader: Mutex<ParserLoader>,
    cache: DashMap<Url, CachedTree>,
}

impl TreeSitterProvider {
    pub fn new(registry: LanguageRegistry) -> Self {
        Self {
            registry,
            loader: Mutex::new(ParserLoader::new()),
            cache: DashMap::new(),
        }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Make sure a grammar for `language_id` is registered, loading it from
    /// the configured library or the search paths if needed.
    pub fn ensure_language(
        &self,
        settings: &NavigatorSettings,
        language_id: &str,
    ) -> NavResult<()> {
        if self.registry.contains(language_id)? {
            return Ok(());
        }

        let library = settings
            .language(language_id)
            .and_then(|config| config.library)
            .map(Into::into)
            .or_else(|| find_parser_library(&settings.effective_search_paths(), language_id))
            .ok_or_else(|| NavError::language_not_found(language_id))?;

        let language = self
            .loader
            .lock()
            .recover_poison("treesitter::ensure_language")?
            .load_language(&library, language_id)?;
        self.registry.register(language_id, language)
    }

    /// Drop the cached tree for `uri`
    pub fn invalidate(&self, uri: &Url) {
        self.cache.remove(uri);
    }

    /// Number of documents with a cached tree
    pub fn cached_documents(&self) -> usize {
        self.cache.len()
    }

    fn parse(&self, document: &Document) -> NavResult<SyntaxTree> {
        let language = self
            .registry
            .get(document.language_id())?
            .ok_or_else(|| NavError::language_not_found(document.language_id()))?;

        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| NavError::provider(e.to_string()))?;

        let tree = parser
            .parse(document.text(), None)
            .ok_or_else(|| NavError::provider(format!("failed to parse {}", document.uri())))?;

        log::debug!(
            target: "stepstone::provider",
            "Parsed {} ({} lines)",
            document.uri(),
            document.line_count()
        );
        Ok(SyntaxTree::from_tree_sitter(&tree))
    }
}

impl TreeProvider for TreeSitterProvider {
    fn tree(&self, document: &Document) -> NavResult<Arc<SyntaxTree>> {
        let content_hash = document.content_hash();

        let cached = self
            .cache
            .get(document.uri())
            .filter(|entry| entry.is_current(document, content_hash))
            .map(|entry| Arc::clone(&entry.tree));
        if let Some(tree) = cached {
            return Ok(tree);
        }

        let tree = Arc::new(self.parse(document)?);
        self.cache.insert(
            document.uri().clone(),
            CachedTree {
                language_id: document.language_id().to_string(),
                version: document.version(),
                content_hash,
                tree: Arc::clone(&tree),
            },
        );
        Ok(tree)
    }
}
