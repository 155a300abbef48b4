//! Core types, errors, and configuration for the cm-obfuscate tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Error types for configuration loading
//! - Configuration structures
//! - Domain types (`Identifier`, `IdentifierKind`, `ReplacementToken`, `FileRecord`)
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{Config, DEFAULT_TOKEN_LENGTH, MAX_TOKEN_LENGTH};
pub use error::ConfigError;
pub use hash::{FxHashMap, FxHashSet, fx_hash_set};
pub use types::{
    ContentType, FileRecord, Identifier, IdentifierKind, IdentifierSet, ReplacementToken,
};
