//! Document operations which take the document they work on explicitly.
//!
//! [`crate::Query`] binds these to the document it loaded.
use std::{borrow::Cow, ops::ControlFlow};

use loupe_ast::{
    document::Document,
    entities::decode,
    node::{NodeData, NodeId},
    render::Render,
    selectors::Select,
};
use loupe_collections::each;

use crate::{Error, Selection, Target};

/// Renders markup for the source within the document.
///
/// - A selector is resolved against the document's root and its matches rendered
/// - Nodes are rendered as given
/// - Without a source, or with an empty selector, the children of the root are rendered
///
/// When there's nothing to render the result is empty.
///
/// # Errors
/// If a selector is invalid
pub fn html(
    document: &Document,
    renderer: &dyn Render,
    selector: &dyn Select,
    source: Option<Target<'_>>,
) -> Result<String, Error> {
    let root = document.root();
    let nodes: Cow<'_, [NodeId]> = match source {
        Some(Target::Selector("")) | None if !document.children(root).is_empty() => {
            log::debug!("html: rendering children of root");
            Cow::Borrowed(document.children(root))
        }
        Some(Target::Selector("")) | None => return Ok(String::new()),
        Some(Target::Selector(query)) => {
            log::debug!("html: rendering matches of `{query}`");
            Cow::Owned(selector.select(document, query, root)?)
        }
        Some(Target::Node(node)) => Cow::Owned(vec![node]),
        Some(Target::Nodes(nodes)) => Cow::Borrowed(nodes),
    };
    Ok(renderer.render(document, &nodes))
}

/// Returns the text of the nodes and everything within them, in document order.
///
/// Text is decoded of its character references. Comments contribute nothing, while
/// CDATA sections contribute their contents as-is.
///
/// # Example
///
/// ```
/// use loupe_ast::{document::Document, node::NodeData};
/// use loupe_query::statics::text;
///
/// let mut document = Document::new();
/// let p = document.append(document.root(), NodeData::element("p"));
/// document.append(p, NodeData::text("a&amp;b"));
///
/// assert_eq!(text(&document, &[p][..]), "a&b");
/// assert_eq!(text(&document, None), "");
/// ```
pub fn text<'a>(document: &Document, nodes: impl Into<Option<&'a [NodeId]>>) -> String {
    let mut output = String::new();
    collect_text(document, nodes.into().unwrap_or_default(), &mut output);
    output
}

fn collect_text(document: &Document, nodes: &[NodeId], output: &mut String) {
    let mut stack = Vec::new();
    let _ = each(nodes, |node, _, _| {
        stack.push(*node);
        // Pre-order with an explicit stack, so deep trees can't overflow the call stack
        while let Some(id) = stack.pop() {
            let Some(node) = document.get(id) else {
                continue;
            };
            match node.data() {
                NodeData::Text(raw) => output.push_str(&decode(raw)),
                NodeData::CData(raw) => output.push_str(raw),
                NodeData::Comment(_) => {}
                _ => stack.extend(node.children().iter().rev().copied()),
            }
        }
        ControlFlow::Continue(())
    });
}

/// Returns a selection of just the document's root.
pub fn root<'doc>(document: &'doc Document, renderer: &'doc dyn Render) -> Selection<'doc> {
    Selection::new(document, renderer, vec![document.root()])
}

/// Returns whether `contained` is a descendant of `container`.
///
/// A node doesn't contain itself. The walk up from `contained` ends at a node without a
/// parent, or whose parent is itself.
///
/// # Example
///
/// ```
/// use loupe_ast::{document::Document, node::NodeData};
/// use loupe_query::statics::contains;
///
/// let mut document = Document::new();
/// let div = document.append(document.root(), NodeData::element("div"));
/// let p = document.append(div, NodeData::element("p"));
///
/// assert!(contains(&document, div, p));
/// assert!(!contains(&document, p, div));
/// assert!(!contains(&document, p, p));
/// ```
pub fn contains(document: &Document, container: NodeId, contained: NodeId) -> bool {
    if container == contained {
        return false;
    }
    document
        .ancestors(contained)
        .any(|ancestor| ancestor == container)
}
