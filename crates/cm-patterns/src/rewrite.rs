//! Identifier substitution in raw file content.
//!
//! Each pattern is applied in a single pass: every match is looked up in the
//! mapping, mapped identifiers are replaced by their token, and unmapped
//! matches are emitted verbatim. Text outside the recognized contexts is
//! never touched.

use cm_core::{ContentType, IdentifierKind};
use regex::Captures;

use crate::error::PatternError;
use crate::patterns::{kind_for_sigil, markup_patterns, stylesheet_pattern};

/// Read-only access to the identifier → token mapping.
///
/// The rewriter only needs lookups, so the finalized mapping type lives
/// downstream and implements this trait.
pub trait TokenLookup {
    /// Returns the replacement token for `name` in the given namespace.
    fn token_for(&self, kind: IdentifierKind, name: &str) -> Option<&str>;
}

/// Result of rewriting one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten text.
    pub content: String,
    /// Number of references that were substituted.
    pub replacements: usize,
}

impl Rewrite {
    /// Returns `true` if at least one reference was substituted.
    #[inline]
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.replacements > 0
    }
}

/// Rewrites content using the variant selected by `content_type`.
///
/// # Errors
///
/// Returns [`PatternError`] only if the pattern set fails to compile.
pub fn rewrite<L>(content: &str, content_type: ContentType, lookup: &L) -> Result<Rewrite, PatternError>
where
    L: TokenLookup + ?Sized,
{
    match content_type {
        ContentType::Markup => rewrite_markup(content, lookup),
        ContentType::Stylesheet => rewrite_stylesheet(content, lookup),
    }
}

/// Rewrites class and ID references in HTML or JavaScript content.
///
/// Substituted references are re-emitted with double quotes.
///
/// # Errors
///
/// Returns [`PatternError`] only if the pattern set fails to compile.
pub fn rewrite_markup<L>(content: &str, lookup: &L) -> Result<Rewrite, PatternError>
where
    L: TokenLookup + ?Sized,
{
    let mut current = content.to_owned();
    let mut replacements = 0;

    for pattern in markup_patterns()? {
        let kind = pattern.source.kind;
        let next = pattern
            .regex
            .replace_all(&current, |caps: &Captures<'_>| {
                match caps.get(1).and_then(|m| lookup.token_for(kind, m.as_str())) {
                    Some(token) => {
                        replacements += 1;
                        pattern.render(token)
                    }
                    None => whole_match(caps),
                }
            })
            .into_owned();
        current = next;
    }

    Ok(Rewrite {
        content: current,
        replacements,
    })
}

/// Rewrites `.class` and `#id` selectors in CSS content.
///
/// The boundary character after the selector is preserved.
///
/// # Errors
///
/// Returns [`PatternError`] only if the pattern fails to compile.
pub fn rewrite_stylesheet<L>(content: &str, lookup: &L) -> Result<Rewrite, PatternError>
where
    L: TokenLookup + ?Sized,
{
    let mut replacements = 0;

    let content = stylesheet_pattern()?
        .replace_all(content, |caps: &Captures<'_>| {
            let (Some(sigil), Some(name), Some(boundary)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                return whole_match(caps);
            };
            let token = kind_for_sigil(sigil.as_str())
                .and_then(|kind| lookup.token_for(kind, name.as_str()));
            match token {
                Some(token) => {
                    replacements += 1;
                    format!("{}{token}{}", sigil.as_str(), boundary.as_str())
                }
                None => whole_match(caps),
            }
        })
        .into_owned();

    Ok(Rewrite {
        content,
        replacements,
    })
}

fn whole_match(caps: &Captures<'_>) -> String {
    caps.get(0)
        .map_or_else(String::new, |m| m.as_str().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Table(Vec<(IdentifierKind, &'static str, &'static str)>);

    impl TokenLookup for Table {
        fn token_for(&self, kind: IdentifierKind, name: &str) -> Option<&str> {
            self.0
                .iter()
                .find(|(k, n, _)| *k == kind && *n == name)
                .map(|(_, _, token)| *token)
        }
    }

    fn class(name: &'static str, token: &'static str) -> (IdentifierKind, &'static str, &'static str) {
        (IdentifierKind::ClassName, name, token)
    }

    fn id(name: &'static str, token: &'static str) -> (IdentifierKind, &'static str, &'static str) {
        (IdentifierKind::ElementId, name, token)
    }

    #[test]
    fn test_markup_rewrites_all_contexts() {
        let table = Table(vec![class("menu", "M1"), id("app", "A1")]);
        let input = r#"<ul class='menu' id="app"></ul>
<script>
el.className="menu";
document.querySelector('.menu');
document.querySelectorAll(".menu");
document.getElementsByClassName("menu");
document.getElementById('app');
</script>"#;
        let out = rewrite_markup(input, &table).unwrap();
        let expected = r#"<ul class="M1" id="A1"></ul>
<script>
el.className="M1";
document.querySelector(".M1");
document.querySelectorAll(".M1");
document.getElementsByClassName("M1");
document.getElementById("A1");
</script>"#;
        assert_eq!(out.content, expected);
        assert_eq!(out.replacements, 7);
        assert!(out.changed());
    }

    #[test]
    fn test_markup_leaves_unmapped_matches_verbatim() {
        let table = Table(vec![class("known", "K")]);
        let input = r"<i class='unknown'></i><b class='known'></b>";
        let out = rewrite_markup(input, &table).unwrap();
        assert_eq!(out.content, r#"<i class='unknown'></i><b class="K"></b>"#);
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn test_markup_namespace_separation() {
        let table = Table(vec![class("foo", "CLS"), id("foo", "IDT")]);
        let out = rewrite_markup(r#"<div class="foo" id="foo">"#, &table).unwrap();
        assert_eq!(out.content, r#"<div class="CLS" id="IDT">"#);

        let only_class = Table(vec![class("foo", "CLS")]);
        let out = rewrite_markup(r#"<div id="foo">"#, &only_class).unwrap();
        assert_eq!(out.content, r#"<div id="foo">"#);
        assert!(!out.changed());
    }

    #[test]
    fn test_markup_no_false_positives_in_text() {
        let table = Table(vec![class("header", "H"), id("header", "I")]);
        let input = r#"<!-- header --><p>header</p><script>var s = "header";</script>"#;
        let out = rewrite_markup(input, &table).unwrap();
        assert_eq!(out.content, input);
    }

    #[test]
    fn test_markup_identifier_is_literal_not_pattern() {
        let table = Table(vec![class("a.b", "T")]);
        let out = rewrite_markup(r#"<p class="axb"></p><p class="a.b"></p>"#, &table).unwrap();
        assert_eq!(out.content, r#"<p class="axb"></p><p class="T"></p>"#);
    }

    #[test]
    fn test_markup_multi_class_attribute_is_single_unit() {
        let table = Table(vec![class("a b", "AB"), class("a", "A")]);
        let out = rewrite_markup(r#"<p class="a b"></p><p class="a"></p>"#, &table).unwrap();
        assert_eq!(out.content, r#"<p class="AB"></p><p class="A"></p>"#);
    }

    #[test]
    fn test_token_equal_to_other_identifier_does_not_cascade() {
        let table = Table(vec![class("one", "two"), class("two", "three")]);
        let out = rewrite_markup(r#"<p class="one"></p><p class="two"></p>"#, &table).unwrap();
        assert_eq!(out.content, r#"<p class="two"></p><p class="three"></p>"#);
    }

    #[test]
    fn test_stylesheet_prefix_collision() {
        let table = Table(vec![class("card", "C4rd")]);
        let out = rewrite_stylesheet(".card{color:red} .cardholder{color:blue}", &table).unwrap();
        assert_eq!(out.content, ".C4rd{color:red} .cardholder{color:blue}");
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn test_stylesheet_preserves_boundaries() {
        let table = Table(vec![class("a", "X"), class("b", "Y"), id("main", "Z")]);
        let out = rewrite_stylesheet(".a,.b{}\n#main:hover {}\n.a\t{}", &table).unwrap();
        assert_eq!(out.content, ".X,.Y{}\n#Z:hover {}\n.X\t{}");
        assert_eq!(out.replacements, 4);
    }

    #[test]
    fn test_stylesheet_namespace_separation() {
        let table = Table(vec![id("foo", "IDT")]);
        let out = rewrite_stylesheet(".foo { } #foo { }", &table).unwrap();
        assert_eq!(out.content, ".foo { } #IDT { }");
    }

    #[test]
    fn test_dispatch_by_content_type() {
        let table = Table(vec![class("box", "B")]);
        let css = rewrite(".box { }", ContentType::Stylesheet, &table).unwrap();
        assert_eq!(css.content, ".B { }");

        let html = rewrite(".box { }", ContentType::Markup, &table).unwrap();
        assert_eq!(html.content, ".box { }");
    }
}
