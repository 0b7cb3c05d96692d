use std::fmt;

use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::{Element, RenderOptions};

/// A node in the tree: either a tag or a run of literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'bump> {
    /// A tag element.
    Element(Element<'bump>),
    /// A text node. Rendered verbatim, with no indentation and no trailing newline.
    Text {
        /// The text of the node.
        text: BumpString<'bump>,
    },
}
impl<'bump> Node<'bump> {
    /// Create a text node.
    pub fn text(bump: &'bump Bump, text: &str) -> Self {
        Node::Text {
            text: BumpString::from_str_in(text, bump),
        }
    }

    /// Get the element if this is an [`Element`](Node::Element).
    pub fn as_element(&self) -> Option<&Element<'bump>> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text { .. } => None,
        }
    }

    /// Get the text if this is a [`Text`](Node::Text) node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text { text } => Some(text.as_str()),
            Node::Element(_) => None,
        }
    }

    /// Returns `true` if the node is [`Text`](Node::Text).
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Write the node and its descendants to `writer`, indented to `depth`.
    pub fn write(
        &self,
        writer: &mut dyn fmt::Write,
        options: &RenderOptions,
        depth: usize,
    ) -> fmt::Result {
        match self {
            Node::Element(element) => element.write(writer, options, depth),
            Node::Text { text } => writer.write_str(text.as_str()),
        }
    }

    /// Render the node at `depth` with the default options.
    pub fn render(&self, depth: usize) -> String {
        self.render_with(&RenderOptions::default(), depth)
    }

    /// Render the node at `depth` with the given options.
    pub fn render_with(&self, options: &RenderOptions, depth: usize) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = self.write(&mut output, options, depth);
        output
    }
}
impl<'bump> From<Element<'bump>> for Node<'bump> {
    fn from(element: Element<'bump>) -> Self {
        Node::Element(element)
    }
}
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, &RenderOptions::default(), 0)
    }
}

/// A value classified for appending to a parent's children.
///
/// Sequences are flattened one level: their members are appended as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Child<'bump> {
    /// Nothing to append.
    #[default]
    Empty,
    /// Scalar text, appended as a [`Node::Text`].
    Text(BumpString<'bump>),
    /// A single node.
    Node(Node<'bump>),
    /// Already-built nodes, appended in order.
    Sequence(BumpVec<'bump, Node<'bump>>),
}
impl<'bump> Child<'bump> {
    /// Create a sequence from an iterator of nodes. This is how lazily
    /// generated children are added.
    pub fn from_iter<N: Into<Node<'bump>>>(
        bump: &'bump Bump,
        iter: impl IntoIterator<Item = N>,
    ) -> Self {
        Child::Sequence(BumpVec::from_iter_in(iter.into_iter().map(Into::into), bump))
    }

    pub(crate) fn append_to(self, nodes: &mut BumpVec<'bump, Node<'bump>>) {
        match self {
            Child::Empty => {}
            Child::Text(text) => nodes.push(Node::Text { text }),
            Child::Node(node) => nodes.push(node),
            Child::Sequence(sequence) => nodes.extend(sequence),
        }
    }
}

/// Trait for values that can be added as children of an element or document.
///
/// Tuples act as argument lists: each member is classified on its own, so
/// `div.add(("Total: ", 3, None::<&str>))` appends two text nodes.
pub trait IntoChild<'bump> {
    /// Classify this value using the given bump allocator.
    fn into_child(self, bump: &'bump Bump) -> Child<'bump>;
}
impl<'bump> IntoChild<'bump> for Child<'bump> {
    fn into_child(self, _bump: &'bump Bump) -> Child<'bump> {
        self
    }
}
impl<'bump> IntoChild<'bump> for Node<'bump> {
    fn into_child(self, _bump: &'bump Bump) -> Child<'bump> {
        Child::Node(self)
    }
}
impl<'bump> IntoChild<'bump> for Element<'bump> {
    fn into_child(self, _bump: &'bump Bump) -> Child<'bump> {
        Child::Node(Node::Element(self))
    }
}
impl<'bump> IntoChild<'bump> for &str {
    fn into_child(self, bump: &'bump Bump) -> Child<'bump> {
        Child::Text(BumpString::from_str_in(self, bump))
    }
}
impl<'bump> IntoChild<'bump> for String {
    fn into_child(self, bump: &'bump Bump) -> Child<'bump> {
        Child::Text(BumpString::from_str_in(&self, bump))
    }
}
impl<'bump> IntoChild<'bump> for &String {
    fn into_child(self, bump: &'bump Bump) -> Child<'bump> {
        Child::Text(BumpString::from_str_in(self, bump))
    }
}
impl<'bump, T: IntoChild<'bump>> IntoChild<'bump> for Option<T> {
    fn into_child(self, bump: &'bump Bump) -> Child<'bump> {
        match self {
            Some(value) => value.into_child(bump),
            None => Child::Empty,
        }
    }
}
impl<'bump, T: Into<Node<'bump>>> IntoChild<'bump> for Vec<T> {
    fn into_child(self, bump: &'bump Bump) -> Child<'bump> {
        Child::from_iter(bump, self)
    }
}
impl<'bump, T: Into<Node<'bump>>, const N: usize> IntoChild<'bump> for [T; N] {
    fn into_child(self, bump: &'bump Bump) -> Child<'bump> {
        Child::from_iter(bump, self)
    }
}
impl<'bump> IntoChild<'bump> for BumpVec<'bump, Node<'bump>> {
    fn into_child(self, _bump: &'bump Bump) -> Child<'bump> {
        Child::Sequence(self)
    }
}

macro_rules! scalar_children {
    ($fmt:literal: $($ty:ty),*) => {
        $(
            impl<'bump> IntoChild<'bump> for $ty {
                fn into_child(self, bump: &'bump Bump) -> Child<'bump> {
                    Child::Text(bumpalo::format!(in bump, $fmt, self))
                }
            }
        )*
    };
}
scalar_children!("{}": i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
// Floats keep their fractional part (`3.0`, not `3`), matching JSON numbers.
scalar_children!("{:?}": f32, f64);

macro_rules! tuple_children {
    ($($name:ident),+) => {
        impl<'bump, $($name: IntoChild<'bump>),+> IntoChild<'bump> for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_child(self, bump: &'bump Bump) -> Child<'bump> {
                let ($($name,)+) = self;
                let mut nodes = BumpVec::new_in(bump);
                $($name.into_child(bump).append_to(&mut nodes);)+
                Child::Sequence(nodes)
            }
        }
    };
}
tuple_children!(A);
tuple_children!(A, B);
tuple_children!(A, B, C);
tuple_children!(A, B, C, D);
tuple_children!(A, B, C, D, E);
tuple_children!(A, B, C, D, E, F);
tuple_children!(A, B, C, D, E, F, G);
tuple_children!(A, B, C, D, E, F, G, H);
tuple_children!(A, B, C, D, E, F, G, H, I);
tuple_children!(A, B, C, D, E, F, G, H, I, J);
tuple_children!(A, B, C, D, E, F, G, H, I, J, K);
tuple_children!(A, B, C, D, E, F, G, H, I, J, K, L);
