//! Owned types that use standard heap allocation.
//!
//! These types are useful for interoperability with systems that require
//! owned data (like serde serialization or Lua bindings). They can be
//! converted to bump-allocated types using the `into_bump` methods.

use bumpalo::Bump;

use crate::{Attribute, Element, ElementKind, Node};

/// An owned attribute using standard heap allocation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnedAttribute {
    /// The key of the attribute.
    pub key: String,
    /// The value of the attribute.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: String,
}
impl OwnedAttribute {
    /// Create a new owned attribute with a key and value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        OwnedAttribute {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Convert this owned attribute into a bump-allocated attribute.
    ///
    /// The key and value are taken verbatim.
    pub fn into_bump<'bump>(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::new(bump, &self.key, &self.value)
    }
}
impl From<(&str, &str)> for OwnedAttribute {
    fn from((key, value): (&str, &str)) -> Self {
        OwnedAttribute::new(key, value)
    }
}
impl From<&Attribute<'_>> for OwnedAttribute {
    fn from(attribute: &Attribute<'_>) -> Self {
        OwnedAttribute::new(attribute.key.as_str(), attribute.value.as_str())
    }
}

/// An owned node using standard heap allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum OwnedNode {
    /// A tag element.
    Element {
        /// The name of the tag.
        name: String,
        /// The layout kind. When absent, it is looked up from the name.
        #[cfg_attr(feature = "serde", serde(default))]
        kind: Option<ElementKind>,
        /// The attributes of the tag.
        #[cfg_attr(feature = "serde", serde(default))]
        attributes: Vec<OwnedAttribute>,
        /// The children of the tag.
        #[cfg_attr(feature = "serde", serde(default))]
        children: Vec<OwnedNode>,
    },
    /// A text node.
    Text {
        /// The text of the node.
        text: String,
    },
}
impl OwnedNode {
    /// Convert this owned node into a bump-allocated node.
    pub fn into_bump<'bump>(self, bump: &'bump Bump) -> Node<'bump> {
        match self {
            OwnedNode::Element {
                name,
                kind,
                attributes,
                children,
            } => {
                let kind = kind.unwrap_or_else(|| ElementKind::for_tag(&name));
                let mut element = Element::new(bump, &name, kind)
                    .with_attributes(attributes.into_iter().map(|a| a.into_bump(bump)));
                for child in children {
                    element.push(child.into_bump(bump));
                }
                Node::Element(element)
            }
            OwnedNode::Text { text } => Node::text(bump, &text),
        }
    }
}
impl From<&Node<'_>> for OwnedNode {
    fn from(node: &Node<'_>) -> Self {
        match node {
            Node::Element(element) => OwnedNode::Element {
                name: element.name().to_string(),
                kind: Some(element.kind()),
                attributes: element.attributes().iter().map(Into::into).collect(),
                children: element.children().iter().map(Into::into).collect(),
            },
            Node::Text { text } => OwnedNode::Text {
                text: text.as_str().to_string(),
            },
        }
    }
}
impl From<String> for OwnedNode {
    fn from(text: String) -> Self {
        OwnedNode::Text { text }
    }
}
impl From<&str> for OwnedNode {
    fn from(text: &str) -> Self {
        OwnedNode::Text {
            text: text.to_string(),
        }
    }
}

impl Node<'_> {
    /// Copy this node and its descendants onto the heap.
    pub fn to_owned_node(&self) -> OwnedNode {
        self.into()
    }
}
