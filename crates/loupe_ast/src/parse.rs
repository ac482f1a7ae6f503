//! Parsing markup into a [`Document`].
use std::{io::Read, path::Path};

use html5ever::{
    local_name, ns, parse_fragment, tendril::TendrilSink, LocalName, ParseOpts, QualName,
};
use rcdom::{Handle, NodeData as RcNodeData, RcDom};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use xml5ever::driver::{parse_document as parse_xml_document, XmlParseOpts};

use crate::{
    document::Document,
    entities::escape_text,
    error::ParseError,
    node::{Attribute, NodeData, NodeId},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
/// Options for how markup is parsed.
pub struct ParseOptions {
    /// Parse the markup as XML instead of as an HTML fragment
    pub xml_mode: bool,
    /// Drop text nodes which only contain whitespace
    pub ignore_whitespace: bool,
    /// Lowercase tag names when parsing as XML. HTML tag names are always lowercased.
    pub lower_case_tags: bool,
}

/// A parser which builds a [`Document`] from markup.
pub trait Parse {
    /// Parses the markup. Malformed markup is recovered from rather than rejected.
    fn parse(&self, markup: &str, options: &ParseOptions) -> Document;

    /// Reads and parses the markup of a reader.
    ///
    /// # Errors
    /// If the reader fails or doesn't contain UTF-8
    fn parse_reader(
        &self,
        reader: &mut dyn Read,
        options: &ParseOptions,
    ) -> Result<Document, ParseError> {
        let mut markup = String::new();
        reader.read_to_string(&mut markup)?;
        Ok(self.parse(&markup, options))
    }

    /// Reads and parses the markup of a file.
    ///
    /// # Errors
    /// If the file can't be read or doesn't contain UTF-8
    fn parse_path(&self, path: &Path, options: &ParseOptions) -> Result<Document, ParseError> {
        let markup = std::fs::read_to_string(path)?;
        Ok(self.parse(&markup, options))
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Parses HTML fragments with `html5ever` and XML documents with `xml5ever`.
///
/// HTML is parsed as if it were the contents of a `<body>`, so no implied
/// `<html>`, `<head>`, or `<body>` elements are added.
pub struct Html5EverParser;

impl Parse for Html5EverParser {
    fn parse(&self, markup: &str, options: &ParseOptions) -> Document {
        if options.xml_mode {
            log::debug!("parsing {} bytes as xml", markup.len());
            let dom = parse_xml_document(RcDom::default(), XmlParseOpts::default()).one(markup);
            let top_level = dom.document.children.borrow().clone();
            Builder::new(options).build(&top_level)
        } else {
            log::debug!("parsing {} bytes as html fragment", markup.len());
            let dom = parse_fragment(
                RcDom::default(),
                ParseOpts::default(),
                QualName::new(None, ns!(html), local_name!("body")),
                vec![],
                false,
            )
            .one(markup);
            // Fragments are parsed into a synthetic `<html>` context element
            let top_level = dom
                .document
                .children
                .borrow()
                .first()
                .map(|context| context.children.borrow().clone())
                .unwrap_or_default();
            Builder::new(options).build(&top_level)
        }
    }
}

/// Parses markup with [`Html5EverParser`].
///
/// # Example
///
/// ```
/// use loupe_ast::parse::{parse, ParseOptions};
///
/// let document = parse("<p>hello</p>", &ParseOptions::default());
/// assert_eq!(document.children(document.root()).len(), 1);
/// ```
pub fn parse(markup: &str, options: &ParseOptions) -> Document {
    Html5EverParser.parse(markup, options)
}

/// Copies an `rcdom` tree into a [`Document`].
struct Builder<'o> {
    options: &'o ParseOptions,
    document: Document,
}

impl<'o> Builder<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            document: Document::new(),
        }
    }

    fn build(mut self, top_level: &[Handle]) -> Document {
        let root = self.document.root();
        // Pre-order so that ids are allocated in document order
        let mut stack: Vec<(Handle, NodeId)> = top_level
            .iter()
            .rev()
            .map(|handle| (handle.clone(), root))
            .collect();
        while let Some((handle, parent)) = stack.pop() {
            let Some(data) = self.convert(&handle, parent) else {
                continue;
            };
            let id = self.document.append(parent, data);

            let children = match &handle.data {
                RcNodeData::Element {
                    template_contents, ..
                } => match &*template_contents.borrow() {
                    Some(contents) => contents.children.borrow().clone(),
                    None => handle.children.borrow().clone(),
                },
                _ => handle.children.borrow().clone(),
            };
            stack.extend(children.into_iter().rev().map(|child| (child, id)));
        }
        log::debug!("built document of {} nodes", self.document.node_count());
        self.document
    }

    fn convert(&self, handle: &Handle, parent: NodeId) -> Option<NodeData> {
        Some(match &handle.data {
            RcNodeData::Document => return None,
            RcNodeData::Doctype {
                name,
                public_id,
                system_id,
            } => NodeData::Doctype {
                name: name.to_string(),
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            },
            RcNodeData::Text { contents } => {
                let contents = contents.borrow();
                if self.options.ignore_whitespace && contents.trim().is_empty() {
                    return None;
                }
                if self.is_raw_text(parent) {
                    NodeData::Text(contents.to_string())
                } else {
                    NodeData::Text(escape_text(&contents).into_owned())
                }
            }
            RcNodeData::Comment { contents } => NodeData::Comment(contents.to_string()),
            RcNodeData::Element { name, attrs, .. } => NodeData::Element {
                name: self.element_name(name),
                attrs: attrs
                    .borrow()
                    .iter()
                    .map(|attr| Attribute {
                        name: attr.name.clone(),
                        value: attr.value.to_string(),
                    })
                    .collect(),
            },
            RcNodeData::ProcessingInstruction { target, contents } => {
                NodeData::ProcessingInstruction {
                    target: target.to_string(),
                    data: contents.to_string(),
                }
            }
        })
    }

    fn element_name(&self, name: &QualName) -> QualName {
        if self.options.xml_mode && self.options.lower_case_tags {
            QualName::new(
                name.prefix.clone(),
                name.ns.clone(),
                LocalName::from(name.local.to_ascii_lowercase()),
            )
        } else {
            name.clone()
        }
    }

    /// Whether text within the parent is kept verbatim by the HTML tokenizer
    fn is_raw_text(&self, parent: NodeId) -> bool {
        if self.options.xml_mode {
            return false;
        }
        self.document
            .get(parent)
            .and_then(|node| node.name())
            .is_some_and(|name| name.ns == ns!(html) && is_raw_text_element(&name.local))
    }
}

/// Whether the contents of an HTML element are text which isn't entity encoded
pub fn is_raw_text_element(local_name: &str) -> bool {
    matches!(
        local_name,
        "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext" | "noscript"
    )
}
