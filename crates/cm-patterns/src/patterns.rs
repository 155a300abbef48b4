//! Pre-compiled pattern tables for class and ID references.
//!
//! This module provides the pattern source tables ([`MARKUP_PATTERNS`] and
//! [`STYLESHEET_PATTERN`]) and lazily compiled, globally cached
//! [`MarkupPattern`]/[`Regex`] sets built from them.
//!
//! Every markup pattern captures the identifier in group 1 and knows how to
//! re-emit the surrounding syntax around a replacement token, normalizing
//! quotes to `"`.

use std::sync::OnceLock;

use cm_core::IdentifierKind;
use regex::Regex;

use crate::error::PatternError;

/// Source description of one markup/script pattern.
#[derive(Debug, Clone, Copy)]
pub struct PatternSource {
    /// Stable name used in errors and logs.
    pub name: &'static str,
    /// Namespace the captured identifier belongs to.
    pub kind: IdentifierKind,
    /// Regular expression; group 1 is the identifier.
    pub regex: &'static str,
    /// Text emitted before the replacement token.
    pub prefix: &'static str,
    /// Text emitted after the replacement token.
    pub suffix: &'static str,
}

/// Markup/script patterns, applied in this order.
///
/// | Name | Matches |
/// |------|---------|
/// | `class_attribute` | `class="x"`, `class='x'` |
/// | `class_name_property` | `className="x"` |
/// | `query_selector` | `querySelector(".x")` |
/// | `query_selector_all` | `querySelectorAll(".x")` |
/// | `get_elements_by_class_name` | `getElementsByClassName("x")` |
/// | `id_attribute` | `id="x"`, `id='x'` |
/// | `get_element_by_id` | `getElementById("x")` |
///
/// The attribute value is captured whole, so `class="a b"` yields the single
/// identifier `a b`.
pub const MARKUP_PATTERNS: &[PatternSource] = &[
    PatternSource {
        name: "class_attribute",
        kind: IdentifierKind::ClassName,
        regex: r#"\bclass=["']([^"']+)["']"#,
        prefix: "class=\"",
        suffix: "\"",
    },
    PatternSource {
        name: "class_name_property",
        kind: IdentifierKind::ClassName,
        regex: r#"\bclassName=["']([^"']+)["']"#,
        prefix: "className=\"",
        suffix: "\"",
    },
    PatternSource {
        name: "query_selector",
        kind: IdentifierKind::ClassName,
        regex: r#"\bquerySelector\(["']\.([^"']+)["']\)"#,
        prefix: "querySelector(\".",
        suffix: "\")",
    },
    PatternSource {
        name: "query_selector_all",
        kind: IdentifierKind::ClassName,
        regex: r#"\bquerySelectorAll\(["']\.([^"']+)["']\)"#,
        prefix: "querySelectorAll(\".",
        suffix: "\")",
    },
    PatternSource {
        name: "get_elements_by_class_name",
        kind: IdentifierKind::ClassName,
        regex: r#"\bgetElementsByClassName\(["']([^"']+)["']\)"#,
        prefix: "getElementsByClassName(\"",
        suffix: "\")",
    },
    PatternSource {
        name: "id_attribute",
        kind: IdentifierKind::ElementId,
        regex: r#"\bid=["']([^"']+)["']"#,
        prefix: "id=\"",
        suffix: "\"",
    },
    PatternSource {
        name: "get_element_by_id",
        kind: IdentifierKind::ElementId,
        regex: r#"\bgetElementById\(["']([^"']+)["']\)"#,
        prefix: "getElementById(\"",
        suffix: "\")",
    },
];

/// Stylesheet selector pattern.
///
/// # Capture Groups
///
/// 1. The sigil: `.` for class names, `#` for element IDs
/// 2. The identifier, restricted to letters, digits, `-` and `_`
/// 3. The boundary: whitespace or one of `{ : ,`
///
/// The boundary is required so `.card` never matches the prefix of
/// `.cardholder`.
pub const STYLESHEET_PATTERN: &str = r"([.#])([a-zA-Z0-9_-]+)(\s|[{:,])";

/// Name of [`STYLESHEET_PATTERN`] in errors.
pub const STYLESHEET_PATTERN_NAME: &str = "stylesheet_selector";

/// A compiled markup/script pattern.
#[derive(Debug)]
pub struct MarkupPattern {
    /// The source this pattern was compiled from.
    pub source: PatternSource,
    /// The compiled expression.
    pub regex: Regex,
}

impl MarkupPattern {
    /// Renders the syntax around `token`, e.g. `class="token"`.
    #[must_use]
    pub fn render(&self, token: &str) -> String {
        let mut out =
            String::with_capacity(self.source.prefix.len() + token.len() + self.source.suffix.len());
        out.push_str(self.source.prefix);
        out.push_str(token);
        out.push_str(self.source.suffix);
        out
    }
}

/// Global cache for the compiled markup patterns.
static COMPILED_MARKUP: OnceLock<Vec<MarkupPattern>> = OnceLock::new();

/// Global cache for the compiled stylesheet pattern.
static COMPILED_STYLESHEET: OnceLock<Regex> = OnceLock::new();

/// Returns the compiled markup/script patterns in application order.
///
/// The patterns are compiled once and cached for all subsequent calls.
///
/// # Errors
///
/// Returns [`PatternError::Compile`] if a pattern fails to compile.
pub fn markup_patterns() -> Result<&'static [MarkupPattern], PatternError> {
    if let Some(patterns) = COMPILED_MARKUP.get() {
        return Ok(patterns);
    }

    let compiled = MARKUP_PATTERNS
        .iter()
        .map(|source| {
            compile(source.name, source.regex).map(|regex| MarkupPattern {
                source: *source,
                regex,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(COMPILED_MARKUP.get_or_init(|| compiled))
}

/// Returns the compiled stylesheet selector pattern.
///
/// # Errors
///
/// Returns [`PatternError::Compile`] if the pattern fails to compile.
pub fn stylesheet_pattern() -> Result<&'static Regex, PatternError> {
    if let Some(regex) = COMPILED_STYLESHEET.get() {
        return Ok(regex);
    }

    let regex = compile(STYLESHEET_PATTERN_NAME, STYLESHEET_PATTERN)?;
    Ok(COMPILED_STYLESHEET.get_or_init(|| regex))
}

/// Maps a stylesheet sigil to its identifier kind.
#[inline]
#[must_use]
pub fn kind_for_sigil(sigil: &str) -> Option<IdentifierKind> {
    match sigil {
        "." => Some(IdentifierKind::ClassName),
        "#" => Some(IdentifierKind::ElementId),
        _ => None,
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, PatternError> {
    Regex::new(pattern).map_err(|source| PatternError::Compile { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_markup_patterns_compile() {
        let patterns = markup_patterns().unwrap();
        assert_eq!(patterns.len(), MARKUP_PATTERNS.len());
        for pattern in patterns {
            assert_eq!(
                pattern.regex.captures_len(),
                2,
                "{} must capture exactly one group",
                pattern.source.name
            );
        }
    }

    #[test]
    fn test_stylesheet_pattern_compiles() {
        let regex = stylesheet_pattern().unwrap();
        assert_eq!(regex.captures_len(), 4);
    }

    #[test]
    fn test_pattern_names_are_unique() {
        let mut names: Vec<&str> = MARKUP_PATTERNS.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MARKUP_PATTERNS.len());
    }

    #[test]
    fn test_render_normalizes_quotes() {
        let patterns = markup_patterns().unwrap();
        let class = patterns
            .iter()
            .find(|p| p.source.name == "class_attribute")
            .unwrap();
        assert_eq!(class.render("Ab12Cd34"), r#"class="Ab12Cd34""#);

        let qs = patterns
            .iter()
            .find(|p| p.source.name == "query_selector")
            .unwrap();
        assert_eq!(qs.render("Ab12Cd34"), r#"querySelector(".Ab12Cd34")"#);
    }

    #[test]
    fn test_kind_for_sigil() {
        assert_eq!(kind_for_sigil("."), Some(IdentifierKind::ClassName));
        assert_eq!(kind_for_sigil("#"), Some(IdentifierKind::ElementId));
        assert_eq!(kind_for_sigil("@"), None);
    }
}
