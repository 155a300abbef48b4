//! Textual class/id pattern matching for HTML, JavaScript, and CSS.
//!
//! This crate provides the two content-type-specific halves of the
//! obfuscation pipeline:
//!
//! - [`extract`] finds the class names and element IDs referenced in a file
//! - [`rewrite`] substitutes mapped identifiers with their tokens
//!
//! Both operate on raw text with fixed regular expressions, not on a parsed
//! syntax tree. Only the contexts below are recognized:
//!
//! | Content | Pattern | Namespace |
//! |---------|---------|-----------|
//! | Markup/script | `class="x"`, `className="x"` | class |
//! | Markup/script | `querySelector(".x")`, `querySelectorAll(".x")` | class |
//! | Markup/script | `getElementsByClassName("x")` | class |
//! | Markup/script | `id="x"`, `getElementById("x")` | id |
//! | Stylesheet | `.x` followed by whitespace or `{ : ,` | class |
//! | Stylesheet | `#x` followed by whitespace or `{ : ,` | id |
//!
//! # Example
//!
//! ```
//! use cm_core::{ContentType, IdentifierKind};
//! use cm_patterns::{TokenLookup, extract, rewrite};
//!
//! struct One;
//!
//! impl TokenLookup for One {
//!     fn token_for(&self, kind: IdentifierKind, name: &str) -> Option<&str> {
//!         (kind == IdentifierKind::ClassName && name == "box").then_some("Xy12Zq90")
//!     }
//! }
//!
//! let html = r#"<p class='box'></p>"#;
//! let found = extract(html, ContentType::Markup)?;
//! assert!(found.class_names.contains("box"));
//!
//! let out = rewrite(html, ContentType::Markup, &One)?;
//! assert_eq!(out.content, r#"<p class="Xy12Zq90"></p>"#);
//! # Ok::<(), cm_patterns::PatternError>(())
//! ```
//!
//! # Performance
//!
//! Patterns are compiled once into process-wide `OnceLock` caches and each
//! pattern makes one pass over the content, independent of mapping size.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
mod extract;
pub mod patterns;
mod rewrite;

pub use error::PatternError;
pub use extract::{Extraction, extract, extract_markup, extract_stylesheet};
pub use rewrite::{Rewrite, TokenLookup, rewrite, rewrite_markup, rewrite_stylesheet};
