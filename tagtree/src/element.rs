use std::fmt;

use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::attribute::upsert;
use crate::{Attribute, IntoAttribute, IntoChild, Node, RenderOptions};

/// How an element is laid out when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    /// Rendered as `<name/>` when it has no children.
    SelfClosing,
    /// Always rendered with an explicit close tag. A lone text child sits
    /// flush against the tags.
    Explicit,
    /// A `<!DOCTYPE ...>` declaration. Attributes with empty values are
    /// rendered as bare keywords and children are ignored.
    Doctype,
}

/// A tag in the tree.
///
/// Elements keep a reference to the bump allocator they were created with, so
/// children can be added fluently.
#[derive(Clone)]
pub struct Element<'bump> {
    bump: &'bump Bump,
    name: BumpString<'bump>,
    kind: ElementKind,
    attributes: BumpVec<'bump, Attribute<'bump>>,
    children: BumpVec<'bump, Node<'bump>>,
}
impl<'bump> Element<'bump> {
    /// Create an element with no attributes or children.
    pub fn new(bump: &'bump Bump, name: &str, kind: ElementKind) -> Self {
        Element {
            bump,
            name: BumpString::from_str_in(name, bump),
            kind,
            attributes: BumpVec::new_in(bump),
            children: BumpVec::new_in(bump),
        }
    }

    /// Get the bump allocator backing this element.
    pub fn bump(&self) -> &'bump Bump {
        self.bump
    }

    /// Get the tag name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the layout kind.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Get the attributes, in the order their keys were first set.
    pub fn attributes(&self) -> &[Attribute<'bump>] {
        self.attributes.as_slice()
    }

    /// Get the value of the attribute with the given key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key.as_str() == key)
            .map(|a| a.value.as_str())
    }

    /// Get the children.
    pub fn children(&self) -> &[Node<'bump>] {
        self.children.as_slice()
    }

    /// Set an attribute. An existing attribute with the same key has its value
    /// replaced.
    pub fn set_attribute(&mut self, attribute: impl IntoAttribute<'bump>) -> &mut Self {
        upsert(&mut self.attributes, attribute.into_attribute(self.bump));
        self
    }

    /// Set an attribute, returning the element.
    pub fn with_attribute(mut self, attribute: impl IntoAttribute<'bump>) -> Self {
        self.set_attribute(attribute);
        self
    }

    /// Set each attribute in turn. Later keys overwrite earlier ones.
    pub fn with_attributes(
        mut self,
        attributes: impl IntoIterator<Item = Attribute<'bump>>,
    ) -> Self {
        for attribute in attributes {
            upsert(&mut self.attributes, attribute);
        }
        self
    }

    /// Append a child in place.
    pub fn push(&mut self, child: impl IntoChild<'bump>) -> &mut Self {
        child.into_child(self.bump).append_to(&mut self.children);
        self
    }

    /// Append a child, returning the element.
    ///
    /// Text and numbers become text nodes, `None` is ignored, and sequences are
    /// flattened one level. Pass a tuple to add several children at once.
    pub fn add(mut self, child: impl IntoChild<'bump>) -> Self {
        self.push(child);
        self
    }

    /// Append a child only if `condition` holds.
    pub fn add_if(self, condition: bool, child: impl IntoChild<'bump>) -> Self {
        if condition {
            self.add(child)
        } else {
            self
        }
    }

    /// Write the element and its descendants to `writer`, indented to `depth`.
    pub fn write(
        &self,
        writer: &mut dyn fmt::Write,
        options: &RenderOptions,
        depth: usize,
    ) -> fmt::Result {
        options.write_indent(writer, depth)?;
        match (self.kind, self.children.as_slice()) {
            (ElementKind::Doctype, _) => {
                writer.write_str("<!DOCTYPE")?;
                for attribute in self.attributes.iter() {
                    let Attribute { key, value } = attribute;
                    if attribute.is_bare() {
                        write!(writer, " {}", key.as_str())?;
                    } else {
                        write!(writer, " {}=\"{}\"", key.as_str(), value.as_str())?;
                    }
                }
                writer.write_str(">\n\n")
            }
            (ElementKind::SelfClosing, []) => {
                self.write_start(writer)?;
                writer.write_str("/>\n")
            }
            (ElementKind::Explicit, []) => {
                self.write_start(writer)?;
                writeln!(writer, "></{}>", self.name.as_str())
            }
            (ElementKind::Explicit, [Node::Text { text }]) => {
                self.write_start(writer)?;
                writeln!(writer, ">{}</{}>", text.as_str(), self.name.as_str())
            }
            (_, children) => {
                self.write_start(writer)?;
                writer.write_str(">\n")?;
                for child in children {
                    child.write(writer, options, depth + 1)?;
                }
                options.write_indent(writer, depth)?;
                writeln!(writer, "</{}>", self.name.as_str())
            }
        }
    }

    /// Write `<name` followed by the attributes.
    fn write_start(&self, writer: &mut dyn fmt::Write) -> fmt::Result {
        write!(writer, "<{}", self.name.as_str())?;
        for Attribute { key, value } in self.attributes.iter() {
            write!(writer, " {}=\"{}\"", key.as_str(), value.as_str())?;
        }
        Ok(())
    }

    /// Render the element at `depth` with the default options.
    pub fn render(&self, depth: usize) -> String {
        self.render_with(&RenderOptions::default(), depth)
    }

    /// Render the element at `depth` with the given options.
    pub fn render_with(&self, options: &RenderOptions, depth: usize) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = self.write(&mut output, options, depth);
        output
    }
}
impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, &RenderOptions::default(), 0)
    }
}
impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name.as_str())
            .field("kind", &self.kind)
            .field("attributes", &self.attributes)
            .field("children", &self.children)
            .finish()
    }
}
impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.attributes == other.attributes
            && self.children == other.children
    }
}
impl Eq for Element<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attr;
    use rstest::rstest;

    fn element<'bump>(bump: &'bump Bump, name: &str, kind: ElementKind) -> Element<'bump> {
        Element::new(bump, name, kind)
    }

    #[rstest]
    #[case(0, "<hr/>\n")]
    #[case(1, "  <hr/>\n")]
    #[case(3, "      <hr/>\n")]
    fn childless_self_closing_element(#[case] depth: usize, #[case] expected: &str) {
        let bump = Bump::new();
        let hr = element(&bump, "hr", ElementKind::SelfClosing);
        assert_eq!(hr.render(depth), expected);
    }

    #[test]
    fn self_closing_element_with_attributes() {
        let bump = Bump::new();
        let meta = element(&bump, "meta", ElementKind::SelfClosing)
            .with_attribute(("charset", "utf-8"))
            .with_attribute(("name", "x"));
        assert_eq!(meta.render(0), "<meta charset=\"utf-8\" name=\"x\"/>\n");
    }

    #[test]
    fn self_closing_element_with_children_opens_and_closes() {
        let bump = Bump::new();
        let ul = element(&bump, "ul", ElementKind::SelfClosing)
            .add(element(&bump, "hr", ElementKind::SelfClosing));
        assert_eq!(ul.render(1), "  <ul>\n    <hr/>\n  </ul>\n");
    }

    #[test]
    fn self_closing_element_does_not_inline_text() {
        let bump = Bump::new();
        let nav = element(&bump, "nav", ElementKind::SelfClosing).add("x");
        assert_eq!(nav.render(1), "  <nav>\nx  </nav>\n");
    }

    #[rstest]
    #[case(0, "<div></div>\n")]
    #[case(2, "    <div></div>\n")]
    fn empty_explicit_element(#[case] depth: usize, #[case] expected: &str) {
        let bump = Bump::new();
        assert_eq!(
            element(&bump, "div", ElementKind::Explicit).render(depth),
            expected
        );
    }

    #[rstest]
    #[case(0, "<p class=\"lead\">Hello</p>\n")]
    #[case(1, "  <p class=\"lead\">Hello</p>\n")]
    fn explicit_element_inlines_single_text_child(#[case] depth: usize, #[case] expected: &str) {
        let bump = Bump::new();
        let p = element(&bump, "p", ElementKind::Explicit)
            .with_attribute(("cls", "lead"))
            .add("Hello");
        assert_eq!(p.render(depth), expected);
    }

    #[test]
    fn explicit_element_with_two_text_children_is_not_inlined() {
        let bump = Bump::new();
        let p = element(&bump, "p", ElementKind::Explicit).add(("a", "b"));
        assert_eq!(p.render(0), "<p>\nab</p>\n");
    }

    #[test]
    fn explicit_element_with_single_element_child_is_wrapped() {
        let bump = Bump::new();
        let div = element(&bump, "div", ElementKind::Explicit)
            .add(element(&bump, "span", ElementKind::Explicit).add("x"));
        assert_eq!(div.render(0), "<div>\n  <span>x</span>\n</div>\n");
    }

    #[test]
    fn doctype_renders_bare_keywords_and_blank_line() {
        let bump = Bump::new();
        let doctype = element(&bump, "!DOCTYPE", ElementKind::Doctype)
            .with_attribute("html")
            .with_attribute(("lang", "en"));
        assert_eq!(doctype.render(0), "<!DOCTYPE html lang=\"en\">\n\n");
        assert_eq!(doctype.render(1), "  <!DOCTYPE html lang=\"en\">\n\n");
    }

    #[test]
    fn attribute_values_are_not_escaped() {
        let bump = Bump::new();
        let a = element(&bump, "a", ElementKind::Explicit)
            .with_attribute(("title", "\"<x>\""))
            .add("<b>");
        assert_eq!(a.render(0), "<a title=\"\"<x>\"\"><b></a>\n");
    }

    #[test]
    fn add_if_only_adds_when_true() {
        let bump = Bump::new();
        let div = element(&bump, "div", ElementKind::Explicit)
            .add_if(false, "hidden")
            .add_if(true, "shown");
        assert_eq!(div.children().len(), 1);
        assert_eq!(div.children()[0].as_text(), Some("shown"));
    }

    #[test]
    fn with_attributes_is_last_write_wins() {
        let bump = Bump::new();
        let div = element(&bump, "div", ElementKind::Explicit).with_attributes([
            attr(&bump, ("id", "a")),
            attr(&bump, ("title", "t")),
            attr(&bump, ("id", "b")),
        ]);
        assert_eq!(div.attr("id"), Some("b"));
        assert_eq!(div.render(0), "<div id=\"b\" title=\"t\"></div>\n");
    }

    #[test]
    fn each_element_owns_its_children() {
        let bump = Bump::new();
        let first = element(&bump, "li", ElementKind::Explicit).add("one");
        let second = element(&bump, "li", ElementKind::Explicit);
        assert_eq!(first.children().len(), 1);
        assert!(second.children().is_empty());
    }

    #[test]
    fn push_appends_in_place() {
        let bump = Bump::new();
        let mut ol = element(&bump, "ol", ElementKind::Explicit);
        for i in 1..=2 {
            ol.push(element(&bump, "li", ElementKind::Explicit).add(i));
        }
        assert_eq!(ol.render(0), "<ol>\n  <li>1</li>\n  <li>2</li>\n</ol>\n");
    }
}
