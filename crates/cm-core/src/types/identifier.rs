//! Identifier and replacement token types.
//!
//! Class names and element IDs live in separate namespaces: a class named
//! `main` and an element ID named `main` are distinct identifiers and may be
//! assigned different replacement tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The namespace an identifier belongs to.
///
/// # Examples
///
/// ```
/// use cm_core::IdentifierKind;
///
/// assert_eq!(IdentifierKind::ClassName.label(), "class");
/// assert_eq!(IdentifierKind::ElementId.css_prefix(), '#');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// A CSS class name (`class="x"`, `.x { }`).
    ClassName,
    /// An element ID (`id="x"`, `#x { }`).
    ElementId,
}

impl IdentifierKind {
    /// Both kinds, in the order they are reported.
    pub const ALL: [Self; 2] = [Self::ClassName, Self::ElementId];

    /// Short human-readable label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ClassName => "class",
            Self::ElementId => "id",
        }
    }

    /// The selector sigil used for this kind in stylesheets.
    #[inline]
    #[must_use]
    pub const fn css_prefix(self) -> char {
        match self {
            Self::ClassName => '.',
            Self::ElementId => '#',
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A class name or element ID as written in source text.
///
/// # Examples
///
/// ```
/// use cm_core::{Identifier, IdentifierKind};
///
/// let id = Identifier::new(IdentifierKind::ElementId, "header");
/// assert_eq!(id.to_string(), "#header");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// Which namespace the identifier belongs to.
    pub kind: IdentifierKind,
    /// The identifier text.
    pub name: String,
}

impl Identifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(kind: IdentifierKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.css_prefix(), self.name)
    }
}

/// A generated string substituted for exactly one identifier.
///
/// # Examples
///
/// ```
/// use cm_core::ReplacementToken;
///
/// let token = ReplacementToken::new("aZ3kQ9xB");
/// assert_eq!(token.as_str(), "aZ3kQ9xB");
/// assert_eq!(token.len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplacementToken(String);

impl ReplacementToken {
    /// Wraps a generated string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the token length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for an empty token.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ReplacementToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ReplacementToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for ReplacementToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(IdentifierKind::ClassName.to_string(), "class");
        assert_eq!(IdentifierKind::ElementId.to_string(), "id");
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&IdentifierKind::ClassName).unwrap(),
            r#""class_name""#
        );
        assert_eq!(
            serde_json::to_string(&IdentifierKind::ElementId).unwrap(),
            r#""element_id""#
        );
    }

    #[test]
    fn test_identifier_display() {
        assert_eq!(
            Identifier::new(IdentifierKind::ClassName, "card").to_string(),
            ".card"
        );
    }

    #[test]
    fn test_same_text_different_kind_is_distinct() {
        let class = Identifier::new(IdentifierKind::ClassName, "main");
        let id = Identifier::new(IdentifierKind::ElementId, "main");
        assert_ne!(class, id);
    }

    #[test]
    fn test_token_serializes_as_plain_string() {
        let token = ReplacementToken::new("Qx81bTzA");
        assert_eq!(serde_json::to_string(&token).unwrap(), r#""Qx81bTzA""#);
    }
}
