//! The document tree of loupe, along with the default parser, renderer, and
//! selection engine that operate on it.
//!
//! ```
//! use loupe_ast::{
//!     parse::{parse, ParseOptions},
//!     render::{Render, Renderer},
//!     selectors::{CssSelector, Select},
//! };
//!
//! let document = parse("<ul><li>a</li><li>b</li></ul>", &ParseOptions::default());
//! let items = CssSelector.select(&document, "li", document.root()).unwrap();
//! assert_eq!(Renderer::default().render(&document, &items), "<li>a</li><li>b</li>");
//! ```
pub mod document;
pub mod entities;
pub mod error;
pub mod node;
pub mod parse;
pub mod render;
pub mod selectors;

pub use document::Document;
pub use node::{Kind, Node, NodeData, NodeId};

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}
