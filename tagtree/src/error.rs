/// Errors produced while assembling a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A value passed to `add` could not be classified as text, a node,
    /// nothing, or a sequence of nodes.
    #[error("cannot add item to {parent} of type {found}")]
    UnsupportedChildType {
        /// The name of the element (or `document`) the item was added to.
        parent: String,
        /// A description of the offending value's type.
        found: String,
    },
}

/// A [`Result`](std::result::Result) using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
