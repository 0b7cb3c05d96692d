#![deny(missing_docs)]
//! A crate for building HTML documents as a runtime tree of tags and rendering
//! them to indented text.
//!
//! Elements are created through [builder::Builder], children are attached with
//! [Element::add] (or [Element::add_if] for conditional content), and the tree
//! is rendered with [Node::render], [Element::render] or [Document::render].
//!
//! All allocations are done through a bump allocator ([bumpalo::Bump]) which must be passed
//! to all element-creating functions.
//!
//! Text and attribute values are emitted verbatim: nothing is escaped.
//!
//! # Example
//!
//! ```
//! use tagtree::{bumpalo::Bump, builder::Builder};
//!
//! let bump = Bump::new();
//! let b = Builder::new(&bump);
//! let doc = b.document().add(
//!     b.div([b.attr(("cls", "container"))])
//!         .add(b.h1([]).add("Hello, World!"))
//!         .add_if(false, b.p([]).add("hidden")),
//! );
//! assert_eq!(
//!     doc.render(),
//!     "<div class=\"container\">\n  <h1>Hello, World!</h1>\n</div>\n"
//! );
//! ```

pub mod builder;

// Re-export bumpalo for convenience
pub use bumpalo;

mod attribute;
pub use attribute::{attr, Attribute, IntoAttribute};

mod document;
pub use document::Document;

mod element;
pub use element::{Element, ElementKind};

mod error;
pub use error::{Error, Result};

mod node;
pub use node::{Child, IntoChild, Node};

mod options;
pub use options::RenderOptions;

mod owned;
pub use owned::{OwnedAttribute, OwnedNode};

#[cfg(feature = "serde")]
mod dynamic;
