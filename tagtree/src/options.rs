use std::borrow::Cow;
use std::fmt;

/// Options controlling how a tree is turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// The string emitted once per depth level (default: two spaces).
    pub indent: Cow<'static, str>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: Cow::Borrowed("  "),
        }
    }
}

impl RenderOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation unit.
    pub fn indent(mut self, indent: impl Into<Cow<'static, str>>) -> Self {
        self.indent = indent.into();
        self
    }

    pub(crate) fn write_indent(&self, writer: &mut dyn fmt::Write, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            writer.write_str(&self.indent)?;
        }
        Ok(())
    }
}
