//! Identifier extraction from raw file content.
//!
//! Extraction is textual: it recognizes class names and element IDs only in
//! the syntactic contexts listed in [`MARKUP_PATTERNS`](crate::patterns::MARKUP_PATTERNS)
//! and [`STYLESHEET_PATTERN`](crate::patterns::STYLESHEET_PATTERN). Anything
//! else, including malformed quoting, is silently skipped.

use cm_core::{ContentType, IdentifierKind, IdentifierSet};

use crate::error::PatternError;
use crate::patterns::{kind_for_sigil, markup_patterns, stylesheet_pattern};

/// Distinct identifiers found in one file, per namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Class names in first-seen order.
    pub class_names: IdentifierSet,
    /// Element IDs in first-seen order.
    pub element_ids: IdentifierSet,
}

impl Extraction {
    /// Returns the set for one namespace.
    #[must_use]
    pub const fn get(&self, kind: IdentifierKind) -> &IdentifierSet {
        match kind {
            IdentifierKind::ClassName => &self.class_names,
            IdentifierKind::ElementId => &self.element_ids,
        }
    }

    fn insert(&mut self, kind: IdentifierKind, name: &str) {
        match kind {
            IdentifierKind::ClassName => self.class_names.insert(name),
            IdentifierKind::ElementId => self.element_ids.insert(name),
        };
    }

    /// Adds every identifier from `other`, keeping first-seen order.
    pub fn merge(&mut self, other: &Self) {
        self.class_names.extend_from(&other.class_names);
        self.element_ids.extend_from(&other.element_ids);
    }

    /// Total identifiers across both namespaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.class_names.len() + self.element_ids.len()
    }

    /// Returns `true` if nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_names.is_empty() && self.element_ids.is_empty()
    }
}

/// Extracts identifiers using the variant selected by `content_type`.
///
/// # Errors
///
/// Returns [`PatternError`] only if the pattern set fails to compile.
///
/// # Examples
///
/// ```
/// use cm_core::ContentType;
/// use cm_patterns::extract;
///
/// let found = extract(r#"<p class="box" id="main"></p>"#, ContentType::Markup)?;
/// assert!(found.class_names.contains("box"));
/// assert!(found.element_ids.contains("main"));
///
/// let found = extract(".box { color: blue; } #main { top: 0; }", ContentType::Stylesheet)?;
/// assert!(found.class_names.contains("box"));
/// assert!(found.element_ids.contains("main"));
/// # Ok::<(), cm_patterns::PatternError>(())
/// ```
pub fn extract(content: &str, content_type: ContentType) -> Result<Extraction, PatternError> {
    match content_type {
        ContentType::Markup => extract_markup(content),
        ContentType::Stylesheet => extract_stylesheet(content),
    }
}

/// Extracts identifiers from HTML or JavaScript content.
///
/// # Errors
///
/// Returns [`PatternError`] only if the pattern set fails to compile.
pub fn extract_markup(content: &str) -> Result<Extraction, PatternError> {
    let mut found = Extraction::default();

    for pattern in markup_patterns()? {
        for caps in pattern.regex.captures_iter(content) {
            if let Some(name) = caps.get(1) {
                found.insert(pattern.source.kind, name.as_str());
            }
        }
    }

    Ok(found)
}

/// Extracts identifiers from CSS content.
///
/// # Errors
///
/// Returns [`PatternError`] only if the pattern fails to compile.
pub fn extract_stylesheet(content: &str) -> Result<Extraction, PatternError> {
    let mut found = Extraction::default();

    for caps in stylesheet_pattern()?.captures_iter(content) {
        let (Some(sigil), Some(name)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if let Some(kind) = kind_for_sigil(sigil.as_str()) {
            found.insert(kind, name.as_str());
        }
    }

    Ok(found)
}
