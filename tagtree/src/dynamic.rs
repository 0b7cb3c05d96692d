//! Classification of untyped values (JSON) into children.
//!
//! Statically typed callers go through [`IntoChild`](crate::IntoChild), where
//! unsupported types fail to compile. Values whose shape is only known at
//! runtime are classified here instead, and unsupported ones are rejected with
//! [`Error::UnsupportedChildType`].

use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use serde::Deserialize;
use serde_json::Value;

use crate::{Child, Document, Element, Error, Node, OwnedNode, Result};

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unsupported(parent: &str, found: String) -> Error {
    tracing::debug!(parent, found = %found, "rejected unsupported child");
    Error::UnsupportedChildType {
        parent: parent.to_string(),
        found,
    }
}

fn node_from_json<'bump>(bump: &'bump Bump, value: &Value) -> Option<Node<'bump>> {
    if !value.is_object() {
        return None;
    }
    OwnedNode::deserialize(value)
        .ok()
        .map(|node| node.into_bump(bump))
}

impl<'bump> Child<'bump> {
    /// Classify a JSON value as a child of `parent`.
    ///
    /// Strings and numbers become text, `null` is ignored, an object must be a
    /// serialized [`OwnedNode`], and an array is flattened one level with every
    /// member required to be a node object.
    pub fn from_json(bump: &'bump Bump, parent: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Child::Empty),
            Value::String(text) => Ok(Child::Text(BumpString::from_str_in(text, bump))),
            Value::Number(number) => Ok(Child::Text(bumpalo::format!(in bump, "{}", number))),
            Value::Object(_) => node_from_json(bump, value)
                .map(Child::Node)
                .ok_or_else(|| unsupported(parent, json_type(value).to_string())),
            Value::Array(items) => {
                let mut nodes = BumpVec::with_capacity_in(items.len(), bump);
                for item in items {
                    let node = node_from_json(bump, item).ok_or_else(|| {
                        unsupported(parent, format!("{} in array", json_type(item)))
                    })?;
                    nodes.push(node);
                }
                Ok(Child::Sequence(nodes))
            }
            Value::Bool(_) => Err(unsupported(parent, json_type(value).to_string())),
        }
    }
}

impl<'bump> Element<'bump> {
    /// Append a JSON value as a child. See [`Child::from_json`].
    pub fn try_add_json(self, value: &Value) -> Result<Self> {
        let child = Child::from_json(self.bump(), self.name(), value)?;
        Ok(self.add(child))
    }
}

impl<'bump> Document<'bump> {
    /// Append a JSON value as a child. See [`Child::from_json`].
    pub fn try_add_json(self, value: &Value) -> Result<Self> {
        let child = Child::from_json(self.bump(), "document", value)?;
        Ok(self.add(child))
    }
}
