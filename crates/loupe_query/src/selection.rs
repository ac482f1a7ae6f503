use std::ops::ControlFlow;

use loupe_ast::{document::Document, node::NodeId, render::Render};
use loupe_collections::{each, Collection};

use crate::statics;

#[derive(Clone)]
/// An ordered list of nodes from a document.
///
/// A selection only refers to the nodes, the document it was made from keeps
/// ownership of them.
pub struct Selection<'doc> {
    document: &'doc Document,
    renderer: &'doc dyn Render,
    nodes: Vec<NodeId>,
}

impl<'doc> Selection<'doc> {
    pub(crate) fn new(
        document: &'doc Document,
        renderer: &'doc dyn Render,
        nodes: Vec<NodeId>,
    ) -> Self {
        Self {
            document,
            renderer,
            nodes,
        }
    }

    /// Renders the selected nodes as markup
    pub fn html(&self) -> String {
        self.renderer.render(self.document, &self.nodes)
    }

    /// Returns the decoded text of the selected nodes
    pub fn text(&self) -> String {
        statics::text(self.document, self.nodes.as_slice())
    }

    /// Returns the number of selected nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether no nodes are selected
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over the selected nodes
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Returns the node at the index of the selection
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    /// Returns the first selected node
    pub fn first(&self) -> Option<NodeId> {
        self.get(0)
    }

    /// Returns the selected nodes
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Returns the document the nodes belong to
    pub fn document(&self) -> &'doc Document {
        self.document
    }

    /// Returns whether any of the selected nodes contains `node`
    pub fn contains(&self, node: NodeId) -> bool {
        each(&self.nodes, |selected, _, _| {
            if statics::contains(self.document, *selected, node) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .is_break()
    }

    /// Returns a selection of the nodes for which `predicate` is `true`
    pub fn filter(&self, mut predicate: impl FnMut(NodeId, usize) -> bool) -> Self {
        let nodes = loupe_collections::filter(&self.nodes, |node, index, _| {
            predicate(*node, index)
        })
        .into_iter()
        .copied()
        .collect();
        Self::new(self.document, self.renderer, nodes)
    }
}

impl std::fmt::Debug for Selection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Selection").field(&self.nodes).finish()
    }
}

impl Collection for Selection<'_> {
    type Key<'a>
        = usize
    where
        Self: 'a;
    type Item = NodeId;

    fn entries(&self) -> impl Iterator<Item = (usize, &NodeId)> {
        self.nodes.iter().enumerate()
    }

    fn size(&self) -> usize {
        self.nodes.len()
    }
}

impl<'a> IntoIterator for &'a Selection<'_> {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}
