use std::{collections::HashMap, io::Read, path::Path};

use itertools::Itertools;
use loupe_ast::{
    document::Document,
    node::NodeId,
    parse::{Html5EverParser, Parse},
    render::{Render, Renderer},
    selectors::{CssSelector, Select},
};

use crate::{statics, Error, Options, Selection, Target};

/// A document bound to the operations which query it.
///
/// Once loaded the document doesn't change, so any number of [`Selection`]s can be
/// made from it at once.
#[derive(derive_more::Debug)]
pub struct Query {
    document: Document,
    options: Options,
    #[debug(skip)]
    renderer: Box<dyn Render + Send + Sync>,
    #[debug(skip)]
    selector: Box<dyn Select + Send + Sync>,
}

/// Parses the markup and binds it to a [`Query`].
///
/// # Example
///
/// ```
/// use loupe_query::{load, Options};
///
/// let query = load("<p>hi</p>", &Options::default());
/// assert_eq!(query.html(None).unwrap(), "<p>hi</p>");
/// assert_eq!(query.html(Some("p".into())).unwrap(), "<p>hi</p>");
/// ```
pub fn load(markup: &str, options: &Options) -> Query {
    let document = Html5EverParser.parse(markup, &options.parse_options());
    Query::from_document(document, *options)
}

impl Query {
    /// Binds an existing document, using the default renderer and selector engine.
    pub fn from_document(document: Document, options: Options) -> Self {
        Self::with_collaborators(
            document,
            options,
            Renderer {
                options: options.render_options(),
            },
            CssSelector,
        )
    }

    /// Binds an existing document to the given renderer and selector engine.
    pub fn with_collaborators(
        document: Document,
        options: Options,
        renderer: impl Render + Send + Sync + 'static,
        selector: impl Select + Send + Sync + 'static,
    ) -> Self {
        Self {
            document,
            options,
            renderer: Box::new(renderer),
            selector: Box::new(selector),
        }
    }

    /// Reads and parses the markup of a reader.
    ///
    /// # Errors
    /// If the reader fails or doesn't contain UTF-8
    pub fn load_reader(reader: &mut dyn Read, options: &Options) -> Result<Self, Error> {
        let document = Html5EverParser.parse_reader(reader, &options.parse_options())?;
        Ok(Self::from_document(document, *options))
    }

    /// Reads and parses the markup of a file.
    ///
    /// # Errors
    /// If the file can't be read or doesn't contain UTF-8
    pub fn load_path(path: &Path, options: &Options) -> Result<Self, Error> {
        let document = Html5EverParser.parse_path(path, &options.parse_options())?;
        Ok(Self::from_document(document, *options))
    }

    /// Selects nodes of the document.
    ///
    /// A selector is resolved against every node of `context`, or `root` when no context
    /// is given. A selector given as the context is first resolved against `root`. The
    /// root defaults to the document's root.
    ///
    /// Matches of a selector are in document order without duplicates. Nodes given as
    /// the target are selected as-is.
    ///
    /// # Errors
    /// If a selector is invalid
    ///
    /// # Example
    ///
    /// ```
    /// use loupe_query::{load, Options, Target};
    ///
    /// let query = load("<div><p>a</p></div><p>b</p>", &Options::default());
    /// let all = query.select("p", None, None).unwrap();
    /// assert_eq!(all.len(), 2);
    ///
    /// let nested = query.select("p", Some("div".into()), None).unwrap();
    /// assert_eq!(nested.text(), "a");
    /// ```
    pub fn select<'a>(
        &self,
        selector: impl Into<Target<'a>>,
        context: Option<Target<'a>>,
        root: Option<NodeId>,
    ) -> Result<Selection<'_>, Error> {
        let root = root.unwrap_or_else(|| self.document.root());
        let query = match selector.into() {
            Target::Selector(query) => query,
            Target::Node(node) => return Ok(self.selection(vec![node])),
            Target::Nodes(nodes) => return Ok(self.selection(nodes.to_vec())),
        };

        let scopes = match context {
            None => vec![root],
            Some(Target::Selector(context)) => {
                self.selector.select(&self.document, context, root)?
            }
            Some(Target::Node(node)) => vec![node],
            Some(Target::Nodes(nodes)) => nodes.to_vec(),
        };
        log::debug!("select: resolving `{query}` against {} scopes", scopes.len());

        let matches = scopes
            .iter()
            .map(|scope| self.selector.select(&self.document, query, *scope))
            .flatten_ok()
            .collect::<Result<Vec<_>, _>>()?;
        if scopes.len() <= 1 {
            return Ok(self.selection(matches));
        }

        let order: HashMap<NodeId, usize> = self
            .document
            .descendants(self.document.root())
            .enumerate()
            .map(|(index, node)| (node, index))
            .collect();
        let matches = matches
            .into_iter()
            .unique()
            .sorted_by_key(|node| order.get(node).copied().unwrap_or(usize::MAX))
            .collect();
        Ok(self.selection(matches))
    }

    /// Renders markup for the source, or for the whole document when there's no source.
    ///
    /// # Errors
    /// If a selector is invalid
    pub fn html(&self, source: Option<Target<'_>>) -> Result<String, Error> {
        statics::html(&self.document, &*self.renderer, &*self.selector, source)
    }

    /// Returns the decoded text of the nodes and everything within them.
    pub fn text<'a>(&self, nodes: impl Into<Option<&'a [NodeId]>>) -> String {
        statics::text(&self.document, nodes)
    }

    /// Returns a selection of just the document's root.
    pub fn root(&self) -> Selection<'_> {
        statics::root(&self.document, &*self.renderer)
    }

    /// Returns whether `contained` is a descendant of `container`.
    pub fn contains(&self, container: NodeId, contained: NodeId) -> bool {
        statics::contains(&self.document, container, contained)
    }

    /// Returns the loaded document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the options the document was loaded with
    pub fn options(&self) -> &Options {
        &self.options
    }

    fn selection(&self, nodes: Vec<NodeId>) -> Selection<'_> {
        Selection::new(&self.document, &*self.renderer, nodes)
    }
}

#[cfg(test)]
mod tests {
    use loupe_ast::{
        document::Document,
        error::SelectError,
        node::{NodeData, NodeId},
        render::Render,
        selectors::Select,
    };
    use pretty_assertions::assert_eq;

    use super::{load, Query};
    use crate::{Error, Options, Target};

    const MARKUP: &str = r#"<div id="a"><p>one</p><div id="b"><p>two</p></div></div><p>three</p>"#;

    #[test]
    fn html_without_source_matches_selector() -> Result<(), Error> {
        let query = load("<p>hi</p>", &Options::default());
        let whole = query.html(None)?;
        assert_eq!(whole, query.html(Some("p".into()))?);
        insta::assert_snapshot!(whole, @"<p>hi</p>");
        Ok(())
    }

    #[test]
    fn select_with_context() -> Result<(), Error> {
        let query = load(MARKUP, &Options::default());
        assert_eq!(query.select("p", None, None)?.text(), "onetwothree");

        // Both `div`s match the context, yet `two` is only selected once
        let nested = query.select("p", Some("div".into()), None)?;
        assert_eq!(nested.len(), 2);
        assert_eq!(nested.text(), "onetwo");

        let b = query.select("#b", None, None)?.first();
        let within_b = query.select("p", b.map(Target::Node), None)?;
        assert_eq!(within_b.text(), "two");

        let within_root = query.select("p", None, b)?;
        assert_eq!(within_root.text(), "two");
        Ok(())
    }

    #[test]
    fn select_nodes_as_is() -> Result<(), Error> {
        let query = load(MARKUP, &Options::default());
        let top = query.document().children(query.document().root()).to_vec();
        let selection = query.select(&top, None, None)?;
        assert_eq!(selection.nodes(), top.as_slice());

        let reversed: Vec<NodeId> = top.iter().rev().copied().collect();
        assert_eq!(query.select(&reversed, None, None)?.nodes(), reversed.as_slice());
        Ok(())
    }

    #[test]
    fn select_invalid() {
        let query = load(MARKUP, &Options::default());
        assert!(matches!(
            query.select("p[", None, None),
            Err(Error::Select(_))
        ));
        assert!(matches!(
            query.select("p", Some(">>".into()), None),
            Err(Error::Select(_))
        ));
    }

    #[test]
    fn bound_operations() -> Result<(), Error> {
        let query = load("<p>a &amp; b</p><!-- c -->", &Options::default());
        let root = query.root();
        assert_eq!(root.nodes(), &[query.document().root()]);
        assert_eq!(query.text(root.nodes()), "a & b");

        let p = query.select("p", None, None)?.nodes()[0];
        assert!(query.contains(query.document().root(), p));
        assert!(!query.contains(p, p));
        assert_eq!(query.html(Some(p.into()))?, "<p>a &amp; b</p>");
        insta::assert_snapshot!(query.html(None)?, @"<p>a &amp; b</p><!-- c -->");
        Ok(())
    }

    #[test]
    fn xml_mode() -> Result<(), Error> {
        let options = Options {
            xml_mode: true,
            ..Options::default()
        };
        let query = load("<feed><entry/><entry><title>t</title></entry></feed>", &options);
        assert_eq!(query.options(), &options);
        insta::assert_snapshot!(
            query.html(Some("entry".into()))?,
            @"<entry/><entry><title>t</title></entry>"
        );
        Ok(())
    }

    #[test]
    fn ignore_whitespace() -> Result<(), Error> {
        let options = Options {
            ignore_whitespace: true,
            ..Options::default()
        };
        let query = load("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>", &options);
        insta::assert_snapshot!(query.html(None)?, @"<ul><li>a</li><li>b</li></ul>");
        Ok(())
    }

    #[test]
    fn load_reader() -> Result<(), Error> {
        let mut markup = "<b>read</b>".as_bytes();
        let query = Query::load_reader(&mut markup, &Options::default())?;
        assert_eq!(query.html(None)?, "<b>read</b>");
        Ok(())
    }

    struct Upper;
    impl Render for Upper {
        fn render(&self, document: &Document, nodes: &[NodeId]) -> String {
            nodes
                .iter()
                .filter_map(|node| document.get(*node)?.name())
                .map(|name| name.local.to_uppercase())
                .collect()
        }
    }

    struct Children;
    impl Select for Children {
        fn select(
            &self,
            document: &Document,
            _selector: &str,
            scope: NodeId,
        ) -> Result<Vec<NodeId>, SelectError> {
            Ok(document.children(scope).to_vec())
        }
    }

    #[test]
    fn custom_collaborators() -> Result<(), Error> {
        let mut document = Document::new();
        let root = document.root();
        let a = document.append(root, NodeData::element("a"));
        document.append(a, NodeData::element("i"));
        document.append(root, NodeData::element("b"));

        let query = Query::with_collaborators(document, Options::default(), Upper, Children);
        assert_eq!(query.html(None)?, "AB");
        assert_eq!(query.html(Some("anything".into()))?, "AB");
        assert_eq!(query.select("anything", Some(a.into()), None)?.html(), "I");
        Ok(())
    }

    #[test]
    fn shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Query>();
    }
}
