//! Implements a builder DSL for creating HTML trees through a series of methods.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{Attribute, Child, Document, Element, ElementKind, IntoAttribute, Node};

/// Attributes forced onto a [`Builder::css`] link after the caller's.
pub const CSS_ATTRIBUTES: &[(&str, &str)] = &[("type", "text/css"), ("rel", "stylesheet")];

/// Attributes forced onto a [`Builder::js`] script after the caller's.
pub const JS_ATTRIBUTES: &[(&str, &str)] = &[("type", "text/javascript"), ("charset", "utf-8")];

/// A builder for creating elements using a bump allocator.
///
/// # Example
///
/// ```
/// use tagtree::{bumpalo::Bump, builder::Builder};
///
/// let bump = Bump::new();
/// let b = Builder::new(&bump);
/// let list = b.ul([]).add((b.li([]).add("a"), b.li([]).add("b")));
/// assert_eq!(list.render(0), "<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n");
/// ```
#[derive(Clone, Copy)]
pub struct Builder<'bump> {
    bump: &'bump Bump,
}
impl<'bump> Builder<'bump> {
    /// Create a new builder with the given bump allocator.
    pub fn new(bump: &'bump Bump) -> Self {
        Self { bump }
    }

    /// Get a reference to the bump allocator.
    pub fn bump(&self) -> &'bump Bump {
        self.bump
    }

    /// Create a keyword-style attribute from a value that implements [IntoAttribute].
    pub fn attr(&self, value: impl IntoAttribute<'bump>) -> Attribute<'bump> {
        value.into_attribute(self.bump)
    }

    /// Create attributes from a mapping. Keys and values are taken verbatim.
    pub fn attrs<K: AsRef<str>, V: AsRef<str>>(
        &self,
        mapping: impl IntoIterator<Item = (K, V)>,
    ) -> BumpVec<'bump, Attribute<'bump>> {
        BumpVec::from_iter_in(
            mapping
                .into_iter()
                .map(|(k, v)| Attribute::new(self.bump, k.as_ref(), v.as_ref())),
            self.bump,
        )
    }

    /// Create a text node.
    pub fn text(&self, text: &str) -> Node<'bump> {
        Node::text(self.bump, text)
    }

    /// Create a sequence of children from an iterator of nodes.
    pub fn sequence<N: Into<Node<'bump>>>(&self, nodes: impl IntoIterator<Item = N>) -> Child<'bump> {
        Child::from_iter(self.bump, nodes)
    }

    /// Create an element from a name, layout kind and attributes.
    pub fn tag(
        &self,
        name: &str,
        kind: ElementKind,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
    ) -> Element<'bump> {
        Element::new(self.bump, name, kind).with_attributes(attributes)
    }

    /// Create an element, looking up its layout kind with [`ElementKind::for_tag`].
    pub fn element(
        &self,
        name: &str,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
    ) -> Element<'bump> {
        self.tag(name, ElementKind::for_tag(name), attributes)
    }

    /// Create a stylesheet `link`. `href`, `type` and `rel` are set after
    /// `attributes`, so they win over caller-supplied values.
    pub fn css(
        &self,
        url: &str,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
    ) -> Element<'bump> {
        self.link(attributes)
            .with_attribute(("href", url))
            .with_attributes(self.attrs(CSS_ATTRIBUTES.iter().copied()))
    }

    /// Create a `script` that loads `url`. `src`, `type` and `charset` are set
    /// after `attributes`, so they win over caller-supplied values.
    pub fn js(
        &self,
        url: &str,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
    ) -> Element<'bump> {
        self.script(attributes)
            .with_attribute(("src", url))
            .with_attributes(self.attrs(JS_ATTRIBUTES.iter().copied()))
    }

    /// Create a doctype declaration with a list of attributes.
    pub fn doctype(&self, attributes: impl IntoIterator<Item = Attribute<'bump>>) -> Element<'bump> {
        self.tag("!DOCTYPE", ElementKind::Doctype, attributes)
    }

    /// Create an empty document.
    ///
    /// This is a convenience wrapper around [`Document::new`].
    pub fn document(&self) -> Document<'bump> {
        Document::new(self.bump)
    }

    /// Create a document with a doctype declaration followed by the given element.
    ///
    /// This is a convenience wrapper around [`Document::new_with_doctype`].
    pub fn document_with_doctype(&self, element: impl Into<Node<'bump>>) -> Document<'bump> {
        Document::new_with_doctype(self.bump, element)
    }
}

impl ElementKind {
    /// Look up the layout kind for a tag name.
    ///
    /// Names outside the built-in tables are treated as [`ElementKind::Explicit`].
    pub fn for_tag(name: &str) -> Self {
        if name.eq_ignore_ascii_case("!DOCTYPE") {
            ElementKind::Doctype
        } else if SELF_CLOSING_TAGS.contains(&name) {
            ElementKind::SelfClosing
        } else {
            ElementKind::Explicit
        }
    }
}

macro_rules! tag_builders {
    ($kind:ident, $table:ident, $desc:literal: $($tag_ident:ident),*) => {
        impl<'bump> Builder<'bump> {
            $(
                #[doc = concat!("Create ", $desc, " element with the tag name `", stringify!($tag_ident), "` and a list of attributes.")]
                pub fn $tag_ident(
                    &self,
                    attributes: impl IntoIterator<Item = Attribute<'bump>>,
                ) -> Element<'bump> {
                    self.tag(stringify!($tag_ident), ElementKind::$kind, attributes)
                }
            )*
        }
        #[doc = concat!("A list of all ", $desc, " tags.")]
        pub const $table: &[&str] = &[$(stringify!($tag_ident)),*];
    };
}
tag_builders! {
    SelfClosing, SELF_CLOSING_TAGS, "a self-closing":
    body, form, hr, head, html, link, meta, nav, ul, input
}
tag_builders! {
    Explicit, EXPLICIT_CLOSE_TAGS, "an explicitly closed":
    a, b, button, em, div, h1, h2, h3, h4, h5, h6, i, label, li,
    ol, p, pre, strong, script, span, textarea, title
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pairs<'a>(element: &'a Element<'_>) -> Vec<(&'a str, &'a str)> {
        element
            .attributes()
            .iter()
            .map(|a| (a.key.as_str(), a.value.as_str()))
            .collect()
    }

    #[test]
    fn paragraph_with_text() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        assert_eq!(b.p([]).add("Hello").render(0), "<p>Hello</p>\n");
    }

    #[test]
    fn css_forces_link_attributes() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        let link = b.css("style.css", []);
        assert_eq!(
            pairs(&link),
            [
                ("href", "style.css"),
                ("type", "text/css"),
                ("rel", "stylesheet")
            ]
        );
        assert_eq!(
            link.render(0),
            "<link href=\"style.css\" type=\"text/css\" rel=\"stylesheet\"/>\n"
        );
    }

    #[test]
    fn css_overrides_caller_values() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        let link = b.css(
            "style.css",
            [b.attr(("rel", "alternate")), b.attr(("href", "other.css"))],
        );
        assert_eq!(link.attr("rel"), Some("stylesheet"));
        assert_eq!(link.attr("href"), Some("style.css"));
        assert_eq!(link.attr("type"), Some("text/css"));
        assert_eq!(link.attributes().len(), 3);
    }

    #[test]
    fn js_forces_script_attributes() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        let script = b.js("app.js", [b.attr("defer"), b.attr(("type", "module"))]);
        assert_eq!(
            pairs(&script),
            [
                ("defer", ""),
                ("type", "text/javascript"),
                ("src", "app.js"),
                ("charset", "utf-8")
            ]
        );
        assert_eq!(
            script.render(0),
            "<script defer=\"\" type=\"text/javascript\" src=\"app.js\" charset=\"utf-8\"></script>\n"
        );
    }

    #[test]
    fn doctype_html() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        assert_eq!(b.doctype([b.attr("html")]).render(0), "<!DOCTYPE html>\n\n");
    }

    #[test]
    fn mapping_attributes_merge_in_order() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        let input = b
            .input(b.attrs([("type", "text"), ("name", "q")]))
            .with_attributes(b.attrs([("name", "search")]))
            .with_attribute(("cls", "wide"));
        assert_eq!(
            input.render(0),
            "<input type=\"text\" name=\"search\" class=\"wide\"/>\n"
        );
    }

    #[rstest]
    #[case("ul", ElementKind::SelfClosing)]
    #[case("meta", ElementKind::SelfClosing)]
    #[case("li", ElementKind::Explicit)]
    #[case("script", ElementKind::Explicit)]
    #[case("section", ElementKind::Explicit)]
    #[case("!DOCTYPE", ElementKind::Doctype)]
    fn kind_lookup(#[case] name: &str, #[case] expected: ElementKind) {
        assert_eq!(ElementKind::for_tag(name), expected);
    }

    #[test]
    fn builders_match_tables() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        assert_eq!(b.div([]).kind(), ElementKind::Explicit);
        assert_eq!(b.body([]).kind(), ElementKind::SelfClosing);
        assert!(SELF_CLOSING_TAGS
            .iter()
            .all(|t| !EXPLICIT_CLOSE_TAGS.contains(t)));
    }

    #[test]
    fn generic_element_uses_lookup() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        assert_eq!(b.element("hr", []).render(0), "<hr/>\n");
        assert_eq!(b.element("section", []).render(0), "<section></section>\n");
    }

    #[test]
    fn sequence_from_iterator() {
        let bump = Bump::new();
        let b = Builder::new(&bump);
        let ul = b.ul([]).add(b.sequence(["x", "y"].map(|s| b.li([]).add(s))));
        assert_eq!(ul.render(0), "<ul>\n  <li>x</li>\n  <li>y</li>\n</ul>\n");
    }
}
