use std::fmt;

use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{builder::Builder, IntoChild, Node, RenderOptions};

/// The top-level container of a tree.
///
/// Besides the children that are rendered, a document stores head tags and a
/// title. These are *not* rendered by the document: a page-assembly step reads
/// them through [`Document::head_tags`] and [`Document::title`] and places them
/// inside its own `<head>`.
pub struct Document<'bump> {
    bump: &'bump Bump,
    children: BumpVec<'bump, Node<'bump>>,
    head_tags: BumpVec<'bump, Node<'bump>>,
    title: Option<BumpString<'bump>>,
    options: RenderOptions,
}
impl<'bump> Document<'bump> {
    /// Create an empty document.
    pub fn new(bump: &'bump Bump) -> Self {
        Document {
            bump,
            children: BumpVec::new_in(bump),
            head_tags: BumpVec::new_in(bump),
            title: None,
            options: RenderOptions::default(),
        }
    }

    /// Create a new document with a doctype declaration followed by the given element.
    ///
    /// This is equivalent to `Document::new(bump).add((b.doctype([b.attr("html")]), element))`.
    pub fn new_with_doctype(bump: &'bump Bump, element: impl Into<Node<'bump>>) -> Self {
        let b = Builder::new(bump);
        let element: Node<'bump> = element.into();
        Self::new(bump).add((b.doctype([b.attr("html")]), element))
    }

    /// Get the bump allocator backing this document.
    pub fn bump(&self) -> &'bump Bump {
        self.bump
    }

    /// Replace the render options used by [`Document::render`].
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Get the children, in render order.
    pub fn children(&self) -> &[Node<'bump>] {
        self.children.as_slice()
    }

    /// Append a child in place.
    pub fn push(&mut self, child: impl IntoChild<'bump>) -> &mut Self {
        child.into_child(self.bump).append_to(&mut self.children);
        self
    }

    /// Append a child, returning the document. See [`crate::Element::add`].
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

    /// Register a tag for the page's `<head>`.
    pub fn add_head_tag(&mut self, tag: impl Into<Node<'bump>>) -> &mut Self {
        self.head_tags.push(tag.into());
        self
    }

    /// Register several tags for the page's `<head>`, in order.
    pub fn add_head_tags<N: Into<Node<'bump>>>(
        &mut self,
        tags: impl IntoIterator<Item = N>,
    ) -> &mut Self {
        self.head_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Get the registered head tags.
    pub fn head_tags(&self) -> &[Node<'bump>] {
        self.head_tags.as_slice()
    }

    /// Get the title, if one was set.
    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().map(|t| t.as_str())
    }

    /// Set the title.
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = Some(BumpString::from_str_in(title, self.bump));
        self
    }

    /// Set the title, returning the document.
    pub fn with_title(mut self, title: &str) -> Self {
        self.set_title(title);
        self
    }

    /// Render the children to a string. Top-level children start at depth 0.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Write the rendered document to a writer.
    pub fn write(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
        tracing::debug!(
            "Rendering document with {} nodes ({} head tags)",
            self.children.len(),
            self.head_tags.len()
        );
        writer.write_all(self.render().as_bytes())
    }
}
impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.children.iter() {
            child.write(f, &self.options, 0)?;
        }
        Ok(())
    }
}
impl fmt::Debug for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("children", &self.children)
            .field("head_tags", &self.head_tags)
            .field("title", &self.title())
            .field("options", &self.options)
            .finish()
    }
}
