//! Functions for rendering nodes back to markup
use html5ever::{ns, QualName};
use phf::phf_set;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    document::Document,
    entities::escape_attribute,
    node::{NodeData, NodeId},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
/// Options for how nodes are rendered.
pub struct RenderOptions {
    /// Render with XML rules, where any element without children is self-closing
    pub xml_mode: bool,
}

/// A renderer which serializes nodes to markup.
pub trait Render {
    /// Renders each node, and everything within it, in the given order.
    /// Rendering no nodes gives an empty string.
    fn render(&self, document: &Document, nodes: &[NodeId]) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
/// Renders HTML or XML markup, depending on its options.
///
/// # Example
///
/// ```
/// use loupe_ast::{
///     document::Document,
///     node::NodeData,
///     render::{Render, RenderOptions, Renderer},
/// };
///
/// let mut document = Document::new();
/// let p = document.append(document.root(), NodeData::element("p"));
/// document.append(p, NodeData::element("br"));
///
/// let html = Renderer::default();
/// assert_eq!(html.render(&document, &[p]), "<p><br></p>");
///
/// let xml = Renderer { options: RenderOptions { xml_mode: true } };
/// assert_eq!(xml.render(&document, &[p]), "<p><br/></p>");
/// ```
pub struct Renderer {
    /// How the markup is written
    pub options: RenderOptions,
}

/// Elements which never have contents or an end tag in HTML
static VOID_ELEMENTS: phf::Set<&'static str> = phf_set! {
    "area",
    "base",
    "basefont",
    "bgsound",
    "br",
    "col",
    "embed",
    "frame",
    "hr",
    "img",
    "input",
    "keygen",
    "link",
    "meta",
    "param",
    "source",
    "track",
    "wbr",
};

/// A step of rendering, held on an explicit stack so deep trees can't overflow
/// the call stack
enum Frame<'a> {
    /// Write the node and queue its contents
    Open(NodeId),
    /// Write the end tag of an element whose contents were written
    Close(&'a QualName),
}

impl Render for Renderer {
    fn render(&self, document: &Document, nodes: &[NodeId]) -> String {
        log::debug!(
            "rendering {} nodes, xml_mode: {}",
            nodes.len(),
            self.options.xml_mode
        );
        let mut output = String::new();
        let mut stack: Vec<Frame<'_>> = nodes.iter().rev().copied().map(Frame::Open).collect();
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Open(id) => self.open(document, id, &mut stack, &mut output),
                Frame::Close(name) => {
                    output.push_str("</");
                    push_name(name, &mut output);
                    output.push('>');
                }
            }
        }
        output
    }
}

impl Renderer {
    fn open<'a>(
        &self,
        document: &'a Document,
        id: NodeId,
        stack: &mut Vec<Frame<'a>>,
        output: &mut String,
    ) {
        let Some(node) = document.get(id) else {
            return;
        };
        let push_children = |stack: &mut Vec<Frame<'a>>| {
            stack.extend(node.children().iter().rev().copied().map(Frame::Open));
        };
        match node.data() {
            NodeData::Root => push_children(stack),
            NodeData::Element { name, attrs } => {
                output.push('<');
                push_name(name, output);
                for attr in attrs {
                    output.push(' ');
                    push_name(&attr.name, output);
                    if attr.value.is_empty() && !self.options.xml_mode {
                        continue;
                    }
                    output.push_str("=\"");
                    output.push_str(&escape_attribute(&attr.value));
                    output.push('"');
                }

                if self.is_void(name) {
                    output.push('>');
                    return;
                }
                if !node.has_children() && self.is_self_closing(name) {
                    output.push_str("/>");
                    return;
                }
                output.push('>');
                stack.push(Frame::Close(name));
                push_children(stack);
            }
            NodeData::Text(text) => output.push_str(text),
            NodeData::Comment(text) => {
                output.push_str("<!--");
                output.push_str(text);
                output.push_str("-->");
            }
            NodeData::CData(text) => {
                output.push_str("<![CDATA[");
                output.push_str(text);
                output.push_str("]]>");
            }
            NodeData::ProcessingInstruction { target, data } => {
                output.push_str("<?");
                output.push_str(target);
                if !data.is_empty() {
                    output.push(' ');
                    output.push_str(data);
                }
                output.push_str("?>");
            }
            NodeData::Doctype {
                name,
                public_id,
                system_id,
            } => {
                output.push_str("<!DOCTYPE ");
                output.push_str(name);
                if !public_id.is_empty() {
                    output.push_str(" PUBLIC \"");
                    output.push_str(public_id);
                    output.push('"');
                } else if !system_id.is_empty() {
                    output.push_str(" SYSTEM");
                }
                if !system_id.is_empty() {
                    output.push_str(" \"");
                    output.push_str(system_id);
                    output.push('"');
                }
                output.push('>');
            }
        }
    }

    fn is_void(&self, name: &QualName) -> bool {
        !self.options.xml_mode && name.ns == ns!(html) && VOID_ELEMENTS.contains(&*name.local)
    }

    /// Foreign elements, such as `<svg>` content, self-close in HTML as well
    fn is_self_closing(&self, name: &QualName) -> bool {
        self.options.xml_mode || name.ns != ns!(html)
    }
}

fn push_name(name: &QualName, output: &mut String) {
    if let Some(prefix) = &name.prefix {
        output.push_str(prefix);
        output.push(':');
    }
    output.push_str(&name.local);
}
