use bumpalo::collections::String as BumpString;
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

/// A key-value pair for an HTML attribute.
///
/// Values are always strings. An empty value is rendered as `key=""` on
/// ordinary tags and as a bare keyword on a doctype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'bump> {
    /// The key of the attribute.
    pub key: BumpString<'bump>,
    /// The value of the attribute.
    pub value: BumpString<'bump>,
}

impl<'bump> Attribute<'bump> {
    /// Create an attribute with the key and value taken verbatim.
    ///
    /// This is how mapping-style attributes are merged.
    pub fn new(bump: &'bump Bump, key: &str, value: &str) -> Self {
        Attribute {
            key: BumpString::from_str_in(key, bump),
            value: BumpString::from_str_in(value, bump),
        }
    }

    /// Create a keyword-style attribute.
    ///
    /// `cls` is renamed to `class`, and a missing value becomes the empty string.
    pub fn keyword(bump: &'bump Bump, key: &str, value: Option<&str>) -> Self {
        let key = if key == "cls" { "class" } else { key };
        Self::new(bump, key, value.unwrap_or_default())
    }

    /// Create an attribute with no value, e.g. `html` in `<!DOCTYPE html>`.
    pub fn bare(bump: &'bump Bump, key: &str) -> Self {
        Self::keyword(bump, key, None)
    }

    /// Returns `true` if the attribute has an empty value.
    pub fn is_bare(&self) -> bool {
        self.value.is_empty()
    }
}

/// Insert `attribute`, replacing the value of an existing attribute with the
/// same key in place.
pub(crate) fn upsert<'bump>(
    attributes: &mut BumpVec<'bump, Attribute<'bump>>,
    attribute: Attribute<'bump>,
) {
    match attributes.iter_mut().find(|a| a.key == attribute.key) {
        Some(existing) => existing.value = attribute.value,
        None => attributes.push(attribute),
    }
}

/// Create an attribute from a value that implements [IntoAttribute].
pub fn attr<'bump>(bump: &'bump Bump, value: impl IntoAttribute<'bump>) -> Attribute<'bump> {
    value.into_attribute(bump)
}

/// Trait for types that can be converted into an Attribute with a bump allocator.
///
/// Everything except [Attribute] itself goes through [Attribute::keyword].
pub trait IntoAttribute<'bump> {
    /// Convert this value into an Attribute using the given bump allocator.
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump>;
}
impl<'bump> IntoAttribute<'bump> for Attribute<'bump> {
    fn into_attribute(self, _bump: &'bump Bump) -> Attribute<'bump> {
        self
    }
}
impl<'bump> IntoAttribute<'bump> for &str {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::bare(bump, self)
    }
}
impl<'bump> IntoAttribute<'bump> for (&str, &str) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::keyword(bump, self.0, Some(self.1))
    }
}
impl<'bump> IntoAttribute<'bump> for (&str, String) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::keyword(bump, self.0, Some(&self.1))
    }
}
impl<'bump> IntoAttribute<'bump> for (String, &str) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::keyword(bump, &self.0, Some(self.1))
    }
}
impl<'bump> IntoAttribute<'bump> for (String, String) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::keyword(bump, &self.0, Some(&self.1))
    }
}
impl<'bump> IntoAttribute<'bump> for (&str, Option<&str>) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::keyword(bump, self.0, self.1)
    }
}
impl<'bump> IntoAttribute<'bump> for (&str, Option<String>) {
    fn into_attribute(self, bump: &'bump Bump) -> Attribute<'bump> {
        Attribute::keyword(bump, self.0, self.1.as_deref())
    }
}
