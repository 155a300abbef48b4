//! Domain types for the cm-obfuscate tool.
//!
//! # Module Organization
//!
//! - [`identifier`] - Identifier kinds, identifiers, and replacement tokens
//! - [`set`] - Insertion-ordered identifier sets
//! - [`file`] - Content types and file records
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use cm_core::{ContentType, FileRecord, IdentifierKind, IdentifierSet, ReplacementToken};
//! ```

pub mod file;
pub mod identifier;
pub mod set;

pub use file::{ContentType, FileRecord};
pub use identifier::{Identifier, IdentifierKind, ReplacementToken};
pub use set::IdentifierSet;
