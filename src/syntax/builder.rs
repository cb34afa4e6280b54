use crate::error::{NavError, NavResult};
use crate::text::Position;

use super::tree::{NodeData, NodeId, SyntaxTree};

/// Pre-order builder for `SyntaxTree`.
///
/// Nodes are opened with their start, closed with their end, and the builder
/// links parents, children and siblings. Fake tree providers in tests build
/// their trees with it; tree-sitter trees are converted through it.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
    error: Option<String>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a node under the currently open node
    pub fn open(&mut self, kind: &'static str, named: bool, start: Position) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let parent = self.stack.last().copied();

        if parent.is_none() && !self.nodes.is_empty() {
            self.error
                .get_or_insert_with(|| format!("second root `{kind}` at {start}"));
        }
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }

        self.nodes.push(NodeData {
            kind,
            named,
            start,
            end: start,
            parent,
            children: Vec::new(),
            prev_sibling: None,
            next_sibling: None,
        });
        self.stack.push(id);
        id
    }

    /// Close the most recently opened node
    pub fn close(&mut self, end: Position) {
        match self.stack.pop() {
            Some(id) => {
                let node = &mut self.nodes[id.index()];
                if end < node.start {
                    self.error.get_or_insert_with(|| {
                        format!("`{}` ends at {end} before its start {}", node.kind, node.start)
                    });
                }
                node.end = end;
            }
            None => {
                self.error
                    .get_or_insert_with(|| format!("close at {end} without an open node"));
            }
        }
    }

    /// Open and immediately close a childless node
    pub fn leaf(&mut self, kind: &'static str, named: bool, start: Position, end: Position) -> NodeId {
        let id = self.open(kind, named, start);
        self.close(end);
        id
    }

    /// Finish the tree, rejecting unbalanced or empty input
    pub fn finish(self) -> NavResult<SyntaxTree> {
        if let Some(message) = self.error {
            return Err(NavError::provider(format!("malformed syntax tree: {message}")));
        }
        if self.nodes.is_empty() {
            return Err(NavError::provider("malformed syntax tree: no root node"));
        }
        if !self.stack.is_empty() {
            return Err(NavError::provider(format!(
                "malformed syntax tree: {} node(s) left open",
                self.stack.len()
            )));
        }
        Ok(self.finish_unchecked())
    }

    /// Finish without validation; used for trees converted from tree-sitter,
    /// which are balanced by construction.
    pub(crate) fn finish_unchecked(mut self) -> SyntaxTree {
        for index in 0..self.nodes.len() {
            let children = std::mem::take(&mut self.nodes[index].children);
            for pair in children.windows(2) {
                self.nodes[pair[0].index()].next_sibling = Some(pair[1]);
                self.nodes[pair[1].index()].prev_sibling = Some(pair[0]);
            }
            self.nodes[index].children = children;
        }
        SyntaxTree { nodes: self.nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(line: usize, column: usize) -> Position {
        Position::new(line, column)
    }

    #[test]
    fn builds_nested_tree_with_sibling_links() {
        let mut b = TreeBuilder::new();
        let root = b.open("source_file", true, p(0, 0));
        let first = b.leaf("a", true, p(0, 0), p(0, 1));
        let second = b.leaf("b", true, p(1, 0), p(1, 1));
        b.close(p(1, 1));
        let tree = b.finish().unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(root, NodeId::ROOT);
        let first = tree.node(first);
        assert_eq!(first.next_sibling().map(|n| n.id()), Some(second));
        assert_eq!(first.parent().map(|n| n.id()), Some(root));
    }

    #[test]
    fn rejects_unclosed_nodes() {
        let mut b = TreeBuilder::new();
        b.open("source_file", true, p(0, 0));
        assert!(matches!(b.finish(), Err(NavError::Provider { .. })));
    }

    #[test]
    fn rejects_second_root() {
        let mut b = TreeBuilder::new();
        b.leaf("a", true, p(0, 0), p(0, 1));
        b.leaf("b", true, p(1, 0), p(1, 1));
        assert!(b.finish().is_err());
    }

    #[test]
    fn rejects_reversed_span() {
        let mut b = TreeBuilder::new();
        b.leaf("a", true, p(2, 0), p(1, 0));
        assert!(b.finish().is_err());
    }

    #[test]
    fn rejects_empty_builder() {
        assert!(TreeBuilder::new().finish().is_err());
    }
}
