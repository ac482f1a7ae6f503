//! CSS selection over a [`Document`], using the `selectors` crate.
use cssparser::{CowRcStr, SourceLocation, ToCss};
use html5ever::{local_name, ns, LocalName, Namespace};
use selectors::{
    attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint},
    matching::{self, ElementSelectorFlags, MatchingContext},
    parser::{ParseRelative, SelectorParseErrorKind},
    NthIndexCache, OpaqueElement, SelectorList,
};

use crate::{
    document::Document,
    error::SelectError,
    node::{Kind, Node, NodeData, NodeId},
};

/// A selection engine which finds the nodes matching a selector.
pub trait Select {
    /// Returns the elements within `scope`, excluding `scope` itself, that match
    /// `selector`. Matches are given in document order.
    ///
    /// # Errors
    /// If the selector is invalid
    fn select(
        &self,
        document: &Document,
        selector: &str,
        scope: NodeId,
    ) -> Result<Vec<NodeId>, SelectError>;
}

#[derive(Clone, Copy, Debug, Default)]
/// Selects elements with CSS selectors.
///
/// Supports the selectors of the `selectors` crate along with the `:link`,
/// `:any-link`, `:checked`, `:disabled`, and `:enabled` pseudo-classes.
pub struct CssSelector;

impl Select for CssSelector {
    fn select(
        &self,
        document: &Document,
        selector: &str,
        scope: NodeId,
    ) -> Result<Vec<NodeId>, SelectError> {
        let selector = Selector::new(selector)?;
        let matches = selector.select(document, scope);
        log::debug!("selector matched {} elements", matches.len());
        Ok(matches)
    }
}

/// A parsed list of selectors.
pub struct Selector(SelectorList<SelectorImpl>);

impl Selector {
    /// # Errors
    /// If the selector fails to parse
    pub fn new(selector: &str) -> Result<Self, SelectError> {
        let parser_input = &mut cssparser::ParserInput::new(selector);
        let parser = &mut cssparser::Parser::new(parser_input);

        SelectorList::parse(&Parser, parser, ParseRelative::No)
            .map(Self)
            .map_err(|err| SelectError {
                selector: selector.to_string(),
                reason: format!("{:?}", err.kind),
                line: err.location.line,
                column: err.location.column,
            })
    }

    /// Returns whether the node is an element matching the selector
    pub fn matches(&self, document: &Document, id: NodeId) -> bool {
        let Some(element) = ElementRef::new(document, id) else {
            return false;
        };
        self.matches_with_scope_and_cache(&element, None, &mut NthIndexCache::default())
    }

    /// Returns the matching elements within `scope`, excluding `scope`, in document order
    pub fn select(&self, document: &Document, scope: NodeId) -> Vec<NodeId> {
        let scope_element = ElementRef::new(document, scope);
        let mut nth_index_cache = NthIndexCache::default();
        document
            .descendants(scope)
            .filter_map(|id| ElementRef::new(document, id))
            .filter(|element| {
                self.matches_with_scope_and_cache(element, scope_element, &mut nth_index_cache)
            })
            .map(|element| element.id)
            .collect()
    }

    fn matches_with_scope_and_cache(
        &self,
        element: &ElementRef,
        scope: Option<ElementRef>,
        nth_index_cache: &mut NthIndexCache,
    ) -> bool {
        let context = &mut MatchingContext::new(
            matching::MatchingMode::Normal,
            None,
            nth_index_cache,
            matching::QuirksMode::NoQuirks,
            matching::NeedsSelectorFlags::No,
            matching::IgnoreNthChildForInvalidation::No,
        );
        context.scope_element = scope.map(|x| selectors::Element::opaque(&x));
        self.0
             .0
            .iter()
            .any(|s| matching::matches_selector(s, 0, None, element, context))
    }
}

#[derive(Clone, Copy)]
/// An element of a document, as seen by the selector engine
struct ElementRef<'a> {
    document: &'a Document,
    id: NodeId,
    node: &'a Node,
}

impl<'a> ElementRef<'a> {
    fn new(document: &'a Document, id: NodeId) -> Option<Self> {
        let node = document.get(id)?;
        (node.kind() == Kind::Element).then_some(Self { document, id, node })
    }

    fn local_name(&self) -> Option<&LocalName> {
        self.node.name().map(|name| &name.local)
    }

    fn element_siblings(&self) -> &'a [NodeId] {
        self.document
            .parent(self.id)
            .map(|parent| self.document.children(parent))
            .unwrap_or_default()
    }

    fn position(&self) -> Option<usize> {
        self.element_siblings()
            .iter()
            .position(|sibling| *sibling == self.id)
    }

    fn is_form_control(&self) -> bool {
        self.node.name().is_some_and(|name| {
            name.ns == ns!(html)
                && matches!(
                    name.local,
                    local_name!("button")
                        | local_name!("input")
                        | local_name!("select")
                        | local_name!("textarea")
                        | local_name!("optgroup")
                        | local_name!("option")
                        | local_name!("fieldset")
                )
        })
    }
}

impl std::fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("name", &self.local_name())
            .finish()
    }
}

impl selectors::Element for ElementRef<'_> {
    type Impl = SelectorImpl;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self.node)
    }

    fn parent_element(&self) -> Option<Self> {
        Self::new(self.document, self.document.parent(self.id)?)
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let position = self.position()?;
        self.element_siblings()[..position]
            .iter()
            .rev()
            .find_map(|id| Self::new(self.document, *id))
    }

    fn next_sibling_element(&self) -> Option<Self> {
        let position = self.position()?;
        self.element_siblings()[position + 1..]
            .iter()
            .find_map(|id| Self::new(self.document, *id))
    }

    fn first_element_child(&self) -> Option<Self> {
        self.node
            .children()
            .iter()
            .find_map(|id| Self::new(self.document, *id))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        self.node.name().is_some_and(|name| name.ns == ns!(html))
    }

    fn has_local_name(
        &self,
        local_name: &<Self::Impl as selectors::SelectorImpl>::BorrowedLocalName,
    ) -> bool {
        self.local_name().is_some_and(|name| *name == local_name.0)
    }

    fn has_namespace(
        &self,
        ns: &<Self::Impl as selectors::SelectorImpl>::BorrowedNamespaceUrl,
    ) -> bool {
        self.node.name().is_some_and(|name| &name.ns == ns)
    }

    fn is_same_type(&self, other: &Self) -> bool {
        match (self.node.name(), other.node.name()) {
            (Some(name), Some(other_name)) => {
                name.local == other_name.local && name.ns == other_name.ns
            }
            _ => false,
        }
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&<Self::Impl as selectors::SelectorImpl>::NamespaceUrl>,
        local_name: &<Self::Impl as selectors::SelectorImpl>::LocalName,
        operation: &AttrSelectorOperation<&<Self::Impl as selectors::SelectorImpl>::AttrValue>,
    ) -> bool {
        let attrs = self.node.attrs();
        match ns {
            NamespaceConstraint::Any => attrs.iter().any(|attr| {
                attr.name.local == local_name.0 && operation.eval_str(&attr.value)
            }),
            NamespaceConstraint::Specific(ns) => attrs.iter().any(|attr| {
                &&attr.name.ns == ns
                    && attr.name.local == local_name.0
                    && operation.eval_str(&attr.value)
            }),
        }
    }

    fn match_non_ts_pseudo_class(
        &self,
        pc: &<Self::Impl as selectors::SelectorImpl>::NonTSPseudoClass,
        _context: &mut MatchingContext<Self::Impl>,
    ) -> bool {
        match pc {
            PseudoClass::Link | PseudoClass::AnyLink => self.is_link(),
            PseudoClass::Checked => {
                let Some(name) = self.local_name() else {
                    return false;
                };
                match *name {
                    local_name!("input") => {
                        self.node.attr("checked").is_some()
                            && self.node.attr("type").is_some_and(|kind| {
                                kind.eq_ignore_ascii_case("checkbox")
                                    || kind.eq_ignore_ascii_case("radio")
                            })
                    }
                    local_name!("option") => self.node.attr("selected").is_some(),
                    _ => false,
                }
            }
            PseudoClass::Disabled => {
                self.is_form_control() && self.node.attr("disabled").is_some()
            }
            PseudoClass::Enabled => {
                self.is_form_control() && self.node.attr("disabled").is_none()
            }
        }
    }

    fn match_pseudo_element(
        &self,
        pe: &<Self::Impl as selectors::SelectorImpl>::PseudoElement,
        _context: &mut MatchingContext<Self::Impl>,
    ) -> bool {
        match *pe {}
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        self.local_name().is_some_and(|name| {
            matches!(
                *name,
                local_name!("a") | local_name!("area") | local_name!("link")
            )
        }) && self.node.attr("href").is_some()
    }

    fn is_html_slot_element(&self) -> bool {
        false
    }

    fn has_id(
        &self,
        id: &<Self::Impl as selectors::SelectorImpl>::Identifier,
        case_sensitivity: CaseSensitivity,
    ) -> bool {
        self.node
            .attr("id")
            .is_some_and(|self_id| case_sensitivity.eq(id.0.as_bytes(), self_id.as_bytes()))
    }

    fn has_class(
        &self,
        name: &<Self::Impl as selectors::SelectorImpl>::Identifier,
        case_sensitivity: CaseSensitivity,
    ) -> bool {
        self.node.attr("class").is_some_and(|class| {
            class
                .split_ascii_whitespace()
                .any(|class| case_sensitivity.eq(name.0.as_bytes(), class.as_bytes()))
        })
    }

    fn imported_part(
        &self,
        _name: &<Self::Impl as selectors::SelectorImpl>::Identifier,
    ) -> Option<<Self::Impl as selectors::SelectorImpl>::Identifier> {
        None
    }

    fn is_part(&self, _name: &<Self::Impl as selectors::SelectorImpl>::Identifier) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.node
            .children()
            .iter()
            .all(|child| match self.document.data(*child) {
                Some(NodeData::Element { .. }) => false,
                Some(NodeData::Text(text) | NodeData::CData(text)) => text.is_empty(),
                _ => true,
            })
    }

    fn is_root(&self) -> bool {
        self.document
            .parent(self.id)
            .and_then(|parent| self.document.kind(parent))
            == Some(Kind::Root)
    }
}

#[derive(Debug, Clone)]
/// The types used for parsing and matching selectors
pub struct SelectorImpl;

#[derive(Eq, PartialEq, Clone, Default)]
/// A local name or identifier within a selector
pub struct CssLocalName(LocalName);

#[derive(Eq, PartialEq, Debug, Clone)]
/// The value of an attribute selector
pub struct AttributeValue(String);

#[derive(Eq, PartialEq, Clone)]
#[allow(missing_docs)]
/// The supported pseudo-classes which aren't tree-structural
pub enum PseudoClass {
    AnyLink,
    Link,
    Checked,
    Disabled,
    Enabled,
}

#[derive(Eq, PartialEq, Clone)]
/// Pseudo-elements never match a node of the document
pub enum PseudoElement {}

struct Parser;

impl selectors::SelectorImpl for SelectorImpl {
    type AttrValue = AttributeValue;
    type Identifier = CssLocalName;
    type LocalName = CssLocalName;
    type NamespacePrefix = CssLocalName;
    type NamespaceUrl = Namespace;
    type BorrowedNamespaceUrl = Namespace;
    type BorrowedLocalName = CssLocalName;

    type NonTSPseudoClass = PseudoClass;
    type PseudoElement = PseudoElement;

    type ExtraMatchingData<'a> = ();
}

impl<'i> selectors::parser::Parser<'i> for Parser {
    type Impl = SelectorImpl;
    type Error = SelectorParseErrorKind<'i>;

    fn parse_is_and_where(&self) -> bool {
        true
    }

    fn parse_non_ts_pseudo_class(
        &self,
        location: SourceLocation,
        name: CowRcStr<'i>,
    ) -> Result<PseudoClass, cssparser::ParseError<'i, Self::Error>> {
        Ok(match name.to_ascii_lowercase().as_str() {
            "any-link" => PseudoClass::AnyLink,
            "link" => PseudoClass::Link,
            "checked" => PseudoClass::Checked,
            "disabled" => PseudoClass::Disabled,
            "enabled" => PseudoClass::Enabled,
            _ => {
                return Err(location.new_custom_error(
                    SelectorParseErrorKind::UnsupportedPseudoClassOrElement(name),
                ))
            }
        })
    }
}

impl<'a> From<&'a str> for AttributeValue {
    fn from(value: &'a str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for AttributeValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ToCss for AttributeValue {
    fn to_css<W>(&self, dest: &mut W) -> std::fmt::Result
    where
        W: std::fmt::Write,
    {
        cssparser::serialize_string(&self.0, dest)
    }
}

impl<'a> From<&'a str> for CssLocalName {
    fn from(value: &'a str) -> Self {
        Self(value.into())
    }
}

impl ToCss for CssLocalName {
    fn to_css<W>(&self, dest: &mut W) -> std::fmt::Result
    where
        W: std::fmt::Write,
    {
        dest.write_str(&self.0)
    }
}

impl selectors::parser::PseudoElement for PseudoElement {
    type Impl = SelectorImpl;
}

impl ToCss for PseudoElement {
    fn to_css<W>(&self, dest: &mut W) -> std::fmt::Result
    where
        W: std::fmt::Write,
    {
        dest.write_str(&self.to_css_string())
    }

    fn to_css_string(&self) -> String {
        match *self {}
    }
}

impl selectors::parser::NonTSPseudoClass for PseudoClass {
    type Impl = SelectorImpl;

    fn is_active_or_hover(&self) -> bool {
        false
    }

    fn is_user_action_state(&self) -> bool {
        false
    }

    fn visit<V>(&self, _visitor: &mut V) -> bool
    where
        V: selectors::visitor::SelectorVisitor<Impl = Self::Impl>,
    {
        true
    }
}

impl ToCss for PseudoClass {
    fn to_css<W>(&self, dest: &mut W) -> std::fmt::Result
    where
        W: std::fmt::Write,
    {
        dest.write_str(&self.to_css_string())
    }

    fn to_css_string(&self) -> String {
        match self {
            Self::Link => ":link",
            Self::AnyLink => ":any-link",
            Self::Checked => ":checked",
            Self::Disabled => ":disabled",
            Self::Enabled => ":enabled",
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{CssSelector, Select, Selector};
    use crate::{
        document::Document,
        parse::{parse, ParseOptions},
    };

    fn select_names(document: &Document, selector: &str) -> Vec<String> {
        CssSelector
            .select(document, selector, document.root())
            .expect("valid selector")
            .into_iter()
            .filter_map(|id| {
                let node = document.get(id)?;
                let name = node.name()?.local.to_string();
                Some(match node.attr("id") {
                    Some(id) => format!("{name}#{id}"),
                    None => name,
                })
            })
            .collect()
    }

    const MARKUP: &str = r#"
        <div id="a" class="box main">
            <p id="b">one</p>
            <p id="c" class="note">two</p>
            <a id="d" href="/">link</a>
            <a id="e">anchor</a>
        </div>
        <section id="f"><p id="g"></p></section>
    "#;

    #[test]
    fn selects_in_document_order() {
        let document = parse(MARKUP, &ParseOptions::default());
        assert_eq!(select_names(&document, "p"), ["p#b", "p#c", "p#g"]);
        assert_eq!(select_names(&document, "#g, #a"), ["div#a", "p#g"]);
        assert_eq!(select_names(&document, ".main > .note"), ["p#c"]);
        assert_eq!(select_names(&document, "div p:first-child"), ["p#b"]);
        assert_eq!(select_names(&document, "p + p"), ["p#c"]);
        assert_eq!(select_names(&document, "p:empty"), ["p#g"]);
        assert_eq!(select_names(&document, ":root"), ["div#a", "section#f"]);
        assert!(select_names(&document, "table").is_empty());
    }

    #[test]
    fn selects_attributes_and_classes() {
        let document = parse(MARKUP, &ParseOptions::default());
        assert_eq!(select_names(&document, "[href]"), ["a#d"]);
        assert_eq!(select_names(&document, "[id^=a]"), ["div#a"]);
        assert_eq!(select_names(&document, ".box"), ["div#a"]);
        assert_eq!(select_names(&document, ":link"), ["a#d"]);
        assert_eq!(select_names(&document, "a:not(:any-link)"), ["a#e"]);
        assert_eq!(select_names(&document, ":is(#g, #a)"), ["div#a", "p#g"]);
    }

    #[test]
    fn selects_form_states() {
        let document = parse(
            r#"<input id="x" type="checkbox" checked><input id="y" disabled><select><option id="z" selected></option></select>"#,
            &ParseOptions::default(),
        );
        assert_eq!(select_names(&document, ":checked"), ["input#x", "option#z"]);
        assert_eq!(select_names(&document, ":disabled"), ["input#y"]);
        assert_eq!(select_names(&document, "input:enabled"), ["input#x"]);
    }

    #[test]
    fn selects_within_scope() {
        let document = parse(MARKUP, &ParseOptions::default());
        let section = CssSelector
            .select(&document, "section", document.root())
            .expect("valid selector")[0];
        let within = CssSelector
            .select(&document, "p", section)
            .expect("valid selector");
        assert_eq!(within.len(), 1);
        assert!(CssSelector
            .select(&document, "section", section)
            .expect("valid selector")
            .is_empty());
    }

    #[test]
    fn invalid_selector() {
        let document = parse(MARKUP, &ParseOptions::default());
        let err = CssSelector
            .select(&document, "p[", document.root())
            .expect_err("selector is unterminated");
        assert_eq!(err.selector, "p[");
        assert!(Selector::new(":unknown-pseudo").is_err());
        assert!(Selector::new("").is_err());
    }

    #[test]
    fn matches() {
        let document = parse(MARKUP, &ParseOptions::default());
        let selector = Selector::new("div.box").expect("valid selector");
        let div = document.children(document.root())[1];
        assert!(selector.matches(&document, div));
        assert!(!selector.matches(&document, document.root()));
    }
}
