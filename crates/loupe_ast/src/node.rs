//! Node types of a [`crate::document::Document`].
use html5ever::{ns, LocalName, QualName};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
/// A reference to a node within a [`crate::document::Document`].
///
/// Ids are handed out in allocation order, so nodes from a parsed document are
/// numbered in document order.
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// The position of the node in the document's arena
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
/// An enum which specifies the type of node.
///
/// [MDN | nodeType](https://developer.mozilla.org/en-US/docs/Web/API/Node/nodeType)
pub enum Kind {
    /// The root of a document, holding the top-level nodes
    Root,
    /// An element, such as `<p>`
    Element,
    /// The text inside an element
    Text,
    /// A comment, such as `<!-- ... -->`
    Comment,
    /// A CDATA section, such as `<![CDATA[ ... ]]>`
    CData,
    /// A processing instruction, such as `<?xml-stylesheet ... ?>`
    ProcessingInstruction,
    /// A document type, such as `<!DOCTYPE html>`
    Doctype,
}

#[derive(Clone, PartialEq, Eq, Debug)]
/// The attribute of an element.
pub struct Attribute {
    /// The name of an attribute (e.g. `foo` of `foo="bar"`)
    pub name: QualName,
    /// The decoded value of an attribute (e.g. `bar` of `foo="bar"`)
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, Debug)]
/// The type of a node and its associated data.
pub enum NodeData {
    /// The root of a document.
    Root,
    /// An element. (e.g. `<a href="#">hello</a>`)
    Element {
        /// The qualified name of the element's tag.
        name: QualName,
        /// The attributes of the element, in source order.
        attrs: Vec<Attribute>,
    },
    /// A text node, holding the raw markup of the text. Entities are left encoded.
    Text(String),
    /// A comment node. (e.g. `foo` of `<!--foo-->`)
    Comment(String),
    /// A CDATA section. (e.g. `foo` of `<![CDATA[foo]]>`)
    CData(String),
    /// A processing instruction. (e.g. `<?xml-stylesheet href="a.css"?>`)
    ProcessingInstruction {
        /// The application the instruction is targeted at
        target: String,
        /// Data for the application
        data: String,
    },
    /// A document type declaration.
    Doctype {
        /// The name of the document type, such as `html`
        name: String,
        /// The public identifier, empty when omitted
        public_id: String,
        /// The system identifier, empty when omitted
        system_id: String,
    },
}

impl NodeData {
    /// Creates an HTML element with no attributes
    pub fn element(local_name: &str) -> Self {
        Self::element_with_attrs(local_name, std::iter::empty())
    }

    /// Creates an HTML element with the given attributes
    pub fn element_with_attrs<'a>(
        local_name: &str,
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self::Element {
            name: QualName::new(None, ns!(html), LocalName::from(local_name)),
            attrs: attrs
                .into_iter()
                .map(|(name, value)| Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(name)),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    /// Creates a text node from raw markup text
    pub fn text(raw: impl Into<String>) -> Self {
        Self::Text(raw.into())
    }

    /// Creates a comment node
    pub fn comment(raw: impl Into<String>) -> Self {
        Self::Comment(raw.into())
    }

    /// Returns the discriminant of the node data
    pub fn kind(&self) -> Kind {
        match self {
            Self::Root => Kind::Root,
            Self::Element { .. } => Kind::Element,
            Self::Text(_) => Kind::Text,
            Self::Comment(_) => Kind::Comment,
            Self::CData(_) => Kind::CData,
            Self::ProcessingInstruction { .. } => Kind::ProcessingInstruction,
            Self::Doctype { .. } => Kind::Doctype,
        }
    }

    /// Returns the text payload of text, comment, CDATA, and processing instruction nodes
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Text(data)
            | Self::Comment(data)
            | Self::CData(data)
            | Self::ProcessingInstruction { data, .. } => Some(data),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
/// A node of a document tree.
///
/// The parent is a back-reference used for lookup; children are owned by the
/// node in document order.
pub struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    /// Returns the node's parent, if it has one
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the node's children in document order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns whether the node has any children
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the node's type and associated data
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Returns the node's type
    pub fn kind(&self) -> Kind {
        self.data.kind()
    }

    /// Returns the qualified name of an element
    pub fn name(&self) -> Option<&QualName> {
        match &self.data {
            NodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the attributes of an element, or an empty list for other nodes
    pub fn attrs(&self) -> &[Attribute] {
        match &self.data {
            NodeData::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    /// Returns the value of the element's attribute with the given local name
    pub fn attr(&self, local_name: &str) -> Option<&str> {
        self.attrs()
            .iter()
            .find(|attr| &*attr.name.local == local_name)
            .map(|attr| attr.value.as_str())
    }
}
