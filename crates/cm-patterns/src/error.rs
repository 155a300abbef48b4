//! Error types for the cm-patterns crate.
//!
//! This module provides the [`PatternError`] type for errors that can occur
//! while compiling the identifier patterns.

/// Errors that can occur while preparing pattern sets.
///
/// Extraction and rewriting never fail on input text: content that does not
/// match a pattern is skipped. The only failure mode is a pattern that does
/// not compile.
///
/// # Examples
///
/// ```
/// use cm_patterns::PatternError;
///
/// fn handle_error(err: PatternError) {
///     match err {
///         PatternError::Compile { name, .. } => eprintln!("pattern {name} did not compile"),
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// A regular expression failed to compile.
    #[error("failed to compile pattern '{name}': {source}")]
    Compile {
        /// The pattern's name in its table.
        name: &'static str,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}
