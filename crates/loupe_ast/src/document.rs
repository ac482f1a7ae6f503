//! The arena that owns every node of a tree.
use crate::node::{Kind, Node, NodeData, NodeId};

#[derive(Clone, Debug)]
/// A tree of nodes headed by a [`Kind::Root`] node.
///
/// Nodes are stored in an arena and referenced by [`NodeId`]. A node belongs to
/// the document that allocated it for the document's whole lifetime; detaching a
/// node only removes the links to it.
///
/// # Example
///
/// ```
/// use loupe_ast::{document::Document, node::NodeData};
///
/// let mut document = Document::new();
/// let p = document.append(document.root(), NodeData::element("p"));
/// let text = document.append(p, NodeData::text("hi"));
///
/// assert_eq!(document.parent(text), Some(p));
/// assert_eq!(document.children(document.root()), &[p]);
/// ```
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document containing only a root node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Root)],
        }
    }

    /// Returns the root node of the document
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Returns the number of nodes allocated by the document, attached or not
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the node for the id, if the id belongs to this document
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Returns the data of the node
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.get(id).map(Node::data)
    }

    /// Returns the type of the node
    pub fn kind(&self, id: NodeId) -> Option<Kind> {
        self.get(id).map(Node::kind)
    }

    /// Returns the parent of the node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Returns the children of the node, or an empty list if the node doesn't exist
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or_default()
    }

    /// Allocates a node without attaching it to the tree
    pub fn create(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    /// Allocates a node as the last child of `parent`.
    ///
    /// If `parent` doesn't belong to the document the node is left detached.
    pub fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let is_known = self.get(parent).is_some();
        let id = self.create(data);
        if !is_known {
            log::debug!("append: {parent:?} not in document");
            return id;
        }
        // A new node has no children, so it can't be an ancestor of `parent`
        self.nodes[parent.index()].children.push(id);
        self.nodes[id.index()].parent = Some(parent);
        id
    }

    /// Moves `child` to the end of `parent`'s children, detaching it from any
    /// previous parent.
    ///
    /// Nothing happens if either node doesn't belong to the document, or if
    /// `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            log::debug!("append_child: {child:?} or {parent:?} not in document");
            return;
        }
        if child == parent || self.ancestors(parent).any(|ancestor| ancestor == child) {
            log::debug!("append_child: {child:?} is an ancestor of {parent:?}");
            return;
        }
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Removes the node from its parent's children
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent.index()) {
            node.children.retain(|child| *child != id);
        }
        self.nodes[id.index()].parent = None;
    }

    /// Changes the parent link of the node without updating either parent's children.
    ///
    /// # Warning
    /// This only updates what the node references as its parent; the tree may become
    /// inconsistent. It exists for marking a root with a self-referencing parent, which
    /// ancestor walks treat as the top of the tree. Prefer [`Document::append_child`].
    ///
    /// Nothing happens if `parent` doesn't belong to the document, or if `id` is one of
    /// its ancestors, so that ancestor walks always end.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        if let Some(parent) = parent.filter(|parent| *parent != id) {
            if self.get(parent).is_none() || self.ancestors(parent).any(|ancestor| ancestor == id)
            {
                log::debug!("set_parent: {parent:?} can't be the parent of {id:?}");
                return;
            }
        }
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.parent = parent;
        }
    }

    /// Returns an iterator over the strict ancestors of the node, nearest first.
    ///
    /// The walk stops at a node without a parent or with itself as its parent.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            document: self,
            current: id,
        }
    }

    /// Returns a depth-first, pre-order iterator over the descendants of the node,
    /// not including the node itself.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            document: self,
            stack: self.children(id).iter().rev().copied().collect(),
        }
    }
}

/// An iterator over the ancestors of a node
pub struct Ancestors<'a> {
    document: &'a Document,
    current: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let parent = self.document.parent(self.current)?;
        if parent == self.current {
            return None;
        }
        self.current = parent;
        Some(parent)
    }
}

/// A depth-first iterator over the descendants of a node
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.document.children(current).iter().rev().copied());
        Some(current)
    }
}
