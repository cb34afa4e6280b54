//! Arena representation of a parse tree.
//!
//! Parent, child and sibling links are `NodeId` indices into one vector, so a
//! tree can be replaced wholesale after each edit without any node handle
//! outliving it. Trees come either from tree-sitter (`SyntaxTree::from_tree_sitter`)
//! or from `TreeBuilder` for fake providers.

pub mod builder;
pub mod tree;

pub use builder::TreeBuilder;
pub use tree::{NodeData, NodeId, SyntaxNode, SyntaxTree};
