//! Error types for the cm-pipeline crate.
//!
//! This module provides [`PipelineError`] for failures during a run and
//! [`MappingError`] for failures while assigning replacement tokens.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cm_core::Identifier;

/// Errors that can occur while building the identifier mapping.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// No unused token could be generated for an identifier.
    ///
    /// Only reachable with very short token lengths, where the alphanumeric
    /// token space is smaller than the number of identifiers.
    #[error(
        "no unused token of length {length} for '{identifier}' after {attempts} attempts"
    )]
    TokenSpaceExhausted {
        /// The identifier that could not be assigned.
        identifier: Identifier,
        /// Configured token length.
        length: usize,
        /// How many tokens were drawn before giving up.
        attempts: usize,
    },

    /// More identifiers were found than distinct tokens exist at the
    /// configured length.
    #[error(
        "{needed} identifiers need distinct tokens but only {available} exist at length {length}; \
         raise --token-length"
    )]
    TokenSpaceTooSmall {
        /// Configured token length.
        length: usize,
        /// Identifiers that need a token.
        needed: usize,
        /// Distinct tokens of `length` characters.
        available: u128,
    },
}

/// Errors that can occur during a pipeline run.
///
/// # Error Recovery Strategy
///
/// - **File errors** ([`PipelineError::Read`], [`PipelineError::Write`]):
///   any I/O failure on a listed file. Log, skip the file, continue the run.
/// - **Everything else**: fatal, propagated to the caller.
///
/// # Examples
///
/// ```
/// use std::io;
/// use cm_pipeline::PipelineError;
///
/// let err = PipelineError::read("index.html", io::Error::from(io::ErrorKind::NotFound));
/// assert!(err.is_recoverable());
/// assert!(err.is_not_found());
/// assert_eq!(err.path().map(|p| p.as_str()), Some("index.html"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to read a listed file.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to overwrite a listed file.
    #[error("failed to write file {path}: {source}")]
    Write {
        /// The path of the file that couldn't be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The pattern set failed to compile.
    #[error(transparent)]
    Pattern(#[from] cm_patterns::PatternError),

    /// Token assignment failed.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] cm_core::ConfigError),

    /// Failed to walk an input directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// A discovered path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),
}

impl PipelineError {
    /// Creates a new [`PipelineError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`PipelineError::Write`] error.
    #[inline]
    pub fn write(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the run can continue past this error.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }

    /// Returns `true` if the run must stop.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => Some(path.as_path()),
            Self::Pattern(_)
            | Self::Mapping(_)
            | Self::Config(_)
            | Self::Walk(_)
            | Self::NonUtf8Path(_) => None,
        }
    }

    /// Returns the I/O error kind for file errors.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Returns `true` if a listed file did not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error() {
        let err = PipelineError::read("a.html", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
        assert!(err.is_not_found());
        assert!(err.to_string().contains("a.html"));
    }

    #[test]
    fn test_write_error_any_kind_is_recoverable() {
        let err = PipelineError::write("b.css", io::Error::other("disk full"));
        assert!(err.is_recoverable());
        assert_eq!(err.path().map(Utf8Path::as_str), Some("b.css"));
        assert_eq!(err.io_kind(), Some(io::ErrorKind::Other));
    }

    #[test]
    fn test_mapping_error_is_fatal() {
        let err = PipelineError::from(MappingError::TokenSpaceExhausted {
            identifier: Identifier::new(cm_core::IdentifierKind::ClassName, "card"),
            length: 1,
            attempts: 64,
        });
        assert!(err.is_fatal());
        assert!(err.path().is_none());
        assert!(err.io_kind().is_none());
        assert!(err.to_string().contains("'.card'"));
    }

    #[test]
    fn test_non_utf8_is_fatal() {
        let err = PipelineError::NonUtf8Path(std::path::PathBuf::from("x"));
        assert!(err.is_fatal());
    }
}
