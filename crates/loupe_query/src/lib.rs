//! Load markup once, then query, serialize, and extract text from it.
//!
//! ```
//! use loupe_query::{load, Options};
//!
//! let query = load(r#"<ul><li class="a">one &amp; two</li><li>three</li></ul>"#, &Options::default());
//!
//! let items = query.select("li", None, None).unwrap();
//! assert_eq!(items.len(), 2);
//! assert_eq!(items.text(), "one & twothree");
//! assert_eq!(query.html(Some(".a".into())).unwrap(), r#"<li class="a">one &amp; two</li>"#);
//! ```
mod error;
mod query;
mod selection;
pub mod statics;
pub mod utils;

use loupe_ast::{node::NodeId, parse::ParseOptions, render::RenderOptions};
use loupe_collections::Kind;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use error::Error;
pub use query::{load, Query};
pub use selection::Selection;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
/// Options for how a document is loaded and rendered.
pub struct Options {
    /// Parse and render as XML instead of HTML
    pub xml_mode: bool,
    /// Drop text which only contains whitespace
    pub ignore_whitespace: bool,
    /// Lowercase tag names when parsing as XML
    pub lower_case_tags: bool,
}

impl Options {
    /// Returns the options relevant to parsing
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            xml_mode: self.xml_mode,
            ignore_whitespace: self.ignore_whitespace,
            lower_case_tags: self.lower_case_tags,
        }
    }

    /// Returns the options relevant to rendering
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            xml_mode: self.xml_mode,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What to query or render; either a selector or nodes of the document.
pub enum Target<'a> {
    /// A CSS selector, resolved against a scope of the document
    Selector(&'a str),
    /// A single node
    Node(NodeId),
    /// A list of nodes, used in the given order
    Nodes(&'a [NodeId]),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(value: &'a str) -> Self {
        Self::Selector(value)
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(value: &'a String) -> Self {
        Self::Selector(value)
    }
}

impl From<NodeId> for Target<'_> {
    fn from(value: NodeId) -> Self {
        Self::Node(value)
    }
}

impl<'a> From<&'a [NodeId]> for Target<'a> {
    fn from(value: &'a [NodeId]) -> Self {
        Self::Nodes(value)
    }
}

impl<'a> From<&'a Vec<NodeId>> for Target<'a> {
    fn from(value: &'a Vec<NodeId>) -> Self {
        Self::Nodes(value)
    }
}

impl<'a> From<&'a Selection<'_>> for Target<'a> {
    fn from(value: &'a Selection<'_>) -> Self {
        Self::Nodes(value.nodes())
    }
}

impl Kind for Target<'_> {
    fn is_string(&self) -> bool {
        matches!(self, Self::Selector(_))
    }
}

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}
