//! Input resolution and directory traversal.
//!
//! Explicit file arguments are used as given. Directory arguments are
//! expanded with [`FileWalker`], which uses the `ignore` crate to honor
//! `.gitignore` patterns and collects files whose extension is listed in
//! [`Config::walk_extensions`](cm_core::Config::walk_extensions).
//!
//! # Examples
//!
//! ```ignore
//! use cm_core::Config;
//! use cm_pipeline::resolve_inputs;
//! use camino::Utf8PathBuf;
//!
//! let files = resolve_inputs(&[Utf8PathBuf::from("site")], &Config::default())?;
//! for file in &files {
//!     println!("{} ({})", file.path, file.content_type.label());
//! }
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use cm_core::{Config, FileRecord, fx_hash_set};
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::PipelineError;

/// Discovers web source files in a directory tree.
///
/// Paths are returned sorted by file name within each directory so runs
/// over the same tree see files in the same order.
#[derive(Debug)]
pub struct FileWalker {
    /// The root directory to walk.
    root: Utf8PathBuf,
    /// Extensions to collect, without the leading dot.
    extensions: Vec<String>,
    /// Directory names to skip below the root.
    skip_dirs: Vec<String>,
}

impl FileWalker {
    /// Creates a walker rooted at `root`, configured from `config`.
    #[must_use]
    pub fn new(root: &Utf8Path, config: &Config) -> Self {
        Self {
            root: root.to_owned(),
            extensions: config.walk_extensions.clone(),
            skip_dirs: config.skip_dirs.clone(),
        }
    }

    /// Collects all matching file paths under the root.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Walk`] if directory traversal fails.
    /// Returns [`PipelineError::NonUtf8Path`] if a non-UTF-8 path is encountered.
    pub fn collect_paths(&self) -> Result<Vec<Utf8PathBuf>, PipelineError> {
        let mut paths = Vec::new();

        for result in self.build_walker() {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let utf8_path = Utf8Path::from_path(path)
                .ok_or_else(|| PipelineError::NonUtf8Path(path.to_owned()))?;

            if !self.has_wanted_extension(utf8_path) || self.should_skip_path(utf8_path) {
                continue;
            }

            paths.push(utf8_path.to_owned());
        }

        Ok(paths)
    }

    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            .standard_filters(true)
            .follow_links(false)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
    }

    fn has_wanted_extension(&self, path: &Utf8Path) -> bool {
        path.extension().is_some_and(|ext| {
            self.extensions
                .iter()
                .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
    }

    /// Checks directory components below the root against the skip list.
    fn should_skip_path(&self, path: &Utf8Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let Some(parent) = relative.parent() else {
            return false;
        };
        parent
            .components()
            .any(|component| self.skip_dirs.iter().any(|d| d == component.as_str()))
    }
}

/// Turns command-line inputs into an ordered, duplicate-free file list.
///
/// Files are kept in argument order; each directory contributes its walked
/// files at its position. Paths that do not exist are kept so the pipeline
/// can report them as missing.
///
/// # Errors
///
/// Returns a fatal [`PipelineError`] if walking a directory fails.
pub fn resolve_inputs(
    inputs: &[Utf8PathBuf],
    config: &Config,
) -> Result<Vec<FileRecord>, PipelineError> {
    let mut seen = fx_hash_set();
    let mut records = Vec::with_capacity(inputs.len());

    for input in inputs {
        let paths = if input.is_dir() {
            let found = FileWalker::new(input, config).collect_paths()?;
            debug!(dir = %input, count = found.len(), "Expanded directory");
            found
        } else {
            vec![input.clone()]
        };

        for path in paths {
            if seen.insert(path.clone()) {
                let record = FileRecord::classify(path, &config.stylesheet_extensions);
                records.push(record);
            }
        }
    }

    Ok(records)
}
