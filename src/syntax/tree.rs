use std::fmt;

use crate::text::{Position, Range};

use super::builder::TreeBuilder;

/// Index of a node inside its `SyntaxTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root is always the first node pushed into the arena
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-node data stored in the arena
#[derive(Debug, Clone)]
pub struct NodeData {
    pub(crate) kind: &'static str,
    pub(crate) named: bool,
    pub(crate) start: Position,
    pub(crate) end: Position,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
}

/// Immutable parse tree for one document version
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub(crate) nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Convert a tree-sitter tree into the arena.
    ///
    /// Uses a `TreeCursor` walk so deeply nested trees do not recurse.
    pub fn from_tree_sitter(tree: &tree_sitter::Tree) -> Self {
        let mut builder = TreeBuilder::new();
        let mut cursor = tree.walk();

        'walk: loop {
            let node = cursor.node();
            builder.open(node.kind(), node.is_named(), node.start_position().into());
            if cursor.goto_first_child() {
                continue;
            }
            builder.close(node.end_position().into());

            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
                builder.close(cursor.node().end_position().into());
            }
        }

        builder.finish_unchecked()
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        self.node(NodeId::ROOT)
    }

    /// Handle for `id`. Ids are only valid for the tree that produced them.
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        debug_assert!(id.index() < self.nodes.len(), "foreign node id {id:?}");
        SyntaxNode { tree: self, id }
    }

    /// Handle for `id`, or None if the id does not belong to this tree
    pub fn get(&self, id: NodeId) -> Option<SyntaxNode<'_>> {
        (id.index() < self.nodes.len()).then_some(SyntaxNode { tree: self, id })
    }

    /// Smallest node, named or anonymous, that covers `start..end`.
    ///
    /// A child is entered when it ends at or after `end`, ends strictly after
    /// `start`, and starts at or before `start`. A point query therefore lands
    /// on the token that *begins* at the point, not the one ending there.
    pub fn descendant_for_range(&self, start: Position, end: Position) -> SyntaxNode<'_> {
        let mut node = self.root();

        'descend: loop {
            for child in node.children() {
                if child.end() < end || child.end() <= start {
                    continue;
                }
                if start < child.start() {
                    break;
                }
                node = child;
                continue 'descend;
            }
            return node;
        }
    }

    pub fn descendant_for_position(&self, position: Position) -> SyntaxNode<'_> {
        self.descendant_for_range(position, position)
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Borrowed handle to one node of a `SyntaxTree`
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> SyntaxNode<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    /// Grammar tag, e.g. `let_declaration` or `;`
    pub fn kind(&self) -> &'static str {
        self.tree.data(self.id).kind
    }

    pub fn is_named(&self) -> bool {
        self.tree.data(self.id).named
    }

    pub fn start(&self) -> Position {
        self.tree.data(self.id).start
    }

    pub fn end(&self) -> Position {
        self.tree.data(self.id).end
    }

    pub fn range(&self) -> Range {
        Range::new(self.start(), self.end())
    }

    pub fn is_root(&self) -> bool {
        self.tree.data(self.id).parent.is_none()
    }

    pub fn parent(&self) -> Option<SyntaxNode<'t>> {
        self.link(self.tree.data(self.id).parent)
    }

    pub fn next_sibling(&self) -> Option<SyntaxNode<'t>> {
        self.link(self.tree.data(self.id).next_sibling)
    }

    pub fn prev_sibling(&self) -> Option<SyntaxNode<'t>> {
        self.link(self.tree.data(self.id).prev_sibling)
    }

    pub fn child_count(&self) -> usize {
        self.tree.data(self.id).children.len()
    }

    pub fn child(&self, index: usize) -> Option<SyntaxNode<'t>> {
        self.link(self.tree.data(self.id).children.get(index).copied())
    }

    /// Children in source order
    pub fn children(self) -> impl DoubleEndedIterator<Item = SyntaxNode<'t>> + 't {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| SyntaxNode { tree, id })
    }

    fn link(&self, id: Option<NodeId>) -> Option<SyntaxNode<'t>> {
        id.map(|id| SyntaxNode {
            tree: self.tree,
            id,
        })
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.kind(), self.range())
    }
}
