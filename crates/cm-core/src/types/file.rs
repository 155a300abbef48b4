//! File records and content types.
//!
//! A file's content type decides which extractor and rewriter variant
//! applies to it. Stylesheets are recognized by extension; every other file
//! is handled as markup/script.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// The syntactic family of a file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// HTML, JavaScript, and anything else that is not a stylesheet.
    #[default]
    Markup,
    /// CSS.
    Stylesheet,
}

impl ContentType {
    /// Classifies a path using the given stylesheet extensions.
    ///
    /// Extensions are compared ASCII-case-insensitively and without the
    /// leading dot.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use cm_core::ContentType;
    ///
    /// let css = ["css".to_owned()];
    /// assert_eq!(ContentType::from_path(Utf8Path::new("a/b.css"), &css), ContentType::Stylesheet);
    /// assert_eq!(ContentType::from_path(Utf8Path::new("a/b.js"), &css), ContentType::Markup);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path, stylesheet_extensions: &[String]) -> Self {
        let is_stylesheet = path.extension().is_some_and(|ext| {
            stylesheet_extensions
                .iter()
                .any(|css| css.trim_start_matches('.').eq_ignore_ascii_case(ext))
        });
        if is_stylesheet {
            Self::Stylesheet
        } else {
            Self::Markup
        }
    }

    /// Human-readable label.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Markup => "markup",
            Self::Stylesheet => "stylesheet",
        }
    }
}

/// A file scheduled for processing together with its content type.
///
/// Records are scoped to one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path of the file as given (or as discovered by a directory walk).
    pub path: Utf8PathBuf,
    /// Which extractor/rewriter variant applies.
    pub content_type: ContentType,
}

impl FileRecord {
    /// Creates a record, classifying the path by extension.
    #[must_use]
    pub fn classify(path: impl Into<Utf8PathBuf>, stylesheet_extensions: &[String]) -> Self {
        let path = path.into();
        let content_type = ContentType::from_path(&path, stylesheet_extensions);
        Self { path, content_type }
    }
}
