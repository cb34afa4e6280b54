//! The tree provider seam.
//!
//! A `TreeProvider` owns parsing; the navigator only asks it for the current
//! tree of a document and for the node at a location. Providers are reached
//! through a `ProviderHandle`, activated once per process.

pub mod handle;
pub mod treesitter;

pub use handle::ProviderHandle;
pub use treesitter::TreeSitterProvider;

use std::sync::Arc;

use crate::document::Document;
use crate::error::{NavError, NavResult};
use crate::syntax::{NodeId, SyntaxTree};
use crate::text::Range;

/// External collaborator that owns parse-tree construction
pub trait TreeProvider: Send + Sync {
    /// Parse tree for the current content of `document`.
    ///
    /// Two calls for an unchanged document must yield structurally identical
    /// trees, so node ids from one call stay meaningful in the other.
    fn tree(&self, document: &Document) -> NavResult<Arc<SyntaxTree>>;

    /// Smallest node covering `location` in the tree for `document`
    fn node_at_location(&self, document: &Document, location: Range) -> NavResult<NodeId> {
        let tree = self.tree(document)?;
        if tree.is_empty() {
            return Err(NavError::no_node_found(location.start));
        }
        Ok(tree.descendant_for_range(location.start, location.end).id())
    }
}
