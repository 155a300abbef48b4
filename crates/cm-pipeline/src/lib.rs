//! Two-pass identifier obfuscation over a list of web source files.
//!
//! This crate drives the full pipeline: it scans every file for class names
//! and element IDs, assigns each distinct identifier one random token, and
//! then rewrites every file in place using that single frozen mapping.
//!
//! # Overview
//!
//! The main entry point is [`Pipeline`], which combines:
//!
//! - [`resolve_inputs`]/[`FileWalker`]: input list and directory expansion
//! - [`cm_patterns`]: per-content-type extraction and rewriting
//! - [`MappingBuilder`]: token assignment with [`RandomNameGenerator`]
//! - [`RunStats`]: counters for the final report
//! - [`PipelineObserver`]: progress events, logged by [`TracingObserver`]
//!
//! # Example
//!
//! ```ignore
//! use cm_core::Config;
//! use cm_pipeline::{Pipeline, TracingObserver};
//! use camino::Utf8PathBuf;
//!
//! let inputs = vec![Utf8PathBuf::from("index.html"), Utf8PathBuf::from("style.css")];
//! let pipeline = Pipeline::from_inputs(Config::default(), &inputs)?;
//! let report = pipeline.run(&mut TracingObserver)?;
//!
//! println!("Rewrote {} files", report.stats.files_rewritten);
//! for (path, error) in &report.errors {
//!     eprintln!("{path}: {error}");
//! }
//! ```
//!
//! # Phases
//!
//! ```text
//! Pipeline::run
//!     │
//!     ├── scan    read + extract every file, union into global sets
//!     │
//!     ├── build   MappingBuilder assigns tokens, then freezes the Mapping
//!     │
//!     └── rewrite read + rewrite + overwrite every file with the frozen Mapping
//! ```
//!
//! The build phase completes before any file is rewritten, so an identifier
//! gets the same token in every file. A file that fails to read or write is
//! reported and skipped; files already rewritten are not rolled back.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
mod generator;
mod mapping;
mod observer;
mod stats;
mod walker;

pub use error::{MappingError, PipelineError};
pub use generator::{NameGenerator, RandomNameGenerator};
pub use mapping::{MAX_TOKEN_ATTEMPTS, Mapping, MappingBuilder};
pub use observer::{Phase, PipelineEvent, PipelineObserver, TracingObserver};
pub use stats::RunStats;
pub use walker::{FileWalker, resolve_inputs};

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use cm_core::{Config, FileRecord, IdentifierKind};
use cm_patterns::{Extraction, extract, rewrite};
use tracing::info;

/// Result of a pipeline run.
#[derive(Debug)]
pub struct RunReport {
    /// The mapping used for the run.
    pub mapping: Mapping,
    /// Final counters.
    pub stats: RunStats,
    /// Per-file failures, in the order they happened.
    pub errors: Vec<(Utf8PathBuf, PipelineError)>,
}

/// The two-pass scan/rewrite pipeline.
///
/// Generic over the [`NameGenerator`] so tests can supply fixed tokens.
///
/// # Examples
///
/// ```ignore
/// use cm_core::{Config, FileRecord};
/// use cm_pipeline::Pipeline;
///
/// let config = Config { seed: Some(1), ..Config::default() };
/// let files = vec![FileRecord::classify("a.html", &config.stylesheet_extensions)];
/// let report = Pipeline::new(config, files)?.scan(&mut |_: &_| {})?;
/// ```
#[derive(Debug)]
pub struct Pipeline<G = RandomNameGenerator> {
    config: Config,
    files: Vec<FileRecord>,
    generator: G,
}

impl Pipeline<RandomNameGenerator> {
    /// Creates a pipeline over an explicit file list.
    ///
    /// Tokens are seeded from [`Config::seed`] when set.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the configuration is invalid.
    pub fn new(config: Config, files: Vec<FileRecord>) -> Result<Self, PipelineError> {
        let generator = RandomNameGenerator::from_seed_option(config.seed);
        Self::with_generator(config, files, generator)
    }

    /// Creates a pipeline from command-line style inputs.
    ///
    /// Directories are expanded with [`FileWalker`]; files are used as given.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the configuration is invalid, or
    /// a walk error if a directory cannot be traversed.
    pub fn from_inputs(config: Config, inputs: &[Utf8PathBuf]) -> Result<Self, PipelineError> {
        config.validate()?;
        let files = resolve_inputs(inputs, &config)?;
        Self::new(config, files)
    }
}

impl<G: NameGenerator> Pipeline<G> {
    /// Creates a pipeline with a custom token generator.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the configuration is invalid.
    pub fn with_generator(
        config: Config,
        files: Vec<FileRecord>,
        generator: G,
    ) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            config,
            files,
            generator,
        })
    }

    /// The files this pipeline will process, in order.
    #[must_use]
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// The run configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the scan and build phases without modifying any file.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`PipelineError`]; per-file read failures are
    /// collected in [`RunReport::errors`] instead.
    pub fn scan<O>(self, observer: &mut O) -> Result<RunReport, PipelineError>
    where
        O: PipelineObserver + ?Sized,
    {
        info!(files = self.files.len(), "Starting dry run");
        let (mapping, stats, errors) = self.scan_and_build(observer)?;
        observer.on_event(&PipelineEvent::Complete { stats: &stats });
        Ok(RunReport {
            mapping,
            stats,
            errors,
        })
    }

    /// Runs all three phases, overwriting each file in place.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`PipelineError`]; per-file read and write failures
    /// are collected in [`RunReport::errors`] instead.
    pub fn run<O>(self, observer: &mut O) -> Result<RunReport, PipelineError>
    where
        O: PipelineObserver + ?Sized,
    {
        info!(files = self.files.len(), "Starting run");
        let files = self.files.clone();
        let (mapping, mut stats, mut errors) = self.scan_and_build(observer)?;

        for file in &files {
            match rewrite_file(file, &mapping) {
                Ok(replacements) => {
                    stats.files_rewritten += 1;
                    if replacements > 0 {
                        stats.files_changed += 1;
                    }
                    stats.replacements += replacements as u64;
                    observer.on_event(&PipelineEvent::Rewritten { file, replacements });
                }
                Err(error) if error.is_recoverable() => {
                    stats.rewrite_failures += 1;
                    record_failure(observer, &mut errors, Phase::Rewrite, &file.path, error);
                }
                Err(error) => return Err(error),
            }
        }

        observer.on_event(&PipelineEvent::Complete { stats: &stats });
        Ok(RunReport {
            mapping,
            stats,
            errors,
        })
    }

    /// Pass one and the build phase.
    #[allow(clippy::type_complexity)]
    fn scan_and_build<O>(
        self,
        observer: &mut O,
    ) -> Result<(Mapping, RunStats, Vec<(Utf8PathBuf, PipelineError)>), PipelineError>
    where
        O: PipelineObserver + ?Sized,
    {
        let mut stats = RunStats::new(self.files.len());
        let mut errors = Vec::new();
        let mut global = Extraction::default();

        for file in &self.files {
            match scan_file(file) {
                Ok(found) => {
                    stats.files_scanned += 1;
                    observer.on_event(&PipelineEvent::Scanned {
                        file,
                        class_names: found.class_names.len(),
                        element_ids: found.element_ids.len(),
                    });
                    global.merge(&found);
                }
                Err(error) if error.is_recoverable() => {
                    stats.scan_failures += 1;
                    record_failure(observer, &mut errors, Phase::Scan, &file.path, error);
                }
                Err(error) => return Err(error),
            }
        }

        let mut builder = MappingBuilder::new(self.generator, self.config.token_length);
        builder.assign_extraction(&global)?;
        let mapping = builder.finish();

        stats.class_names = mapping.count(IdentifierKind::ClassName) as u64;
        stats.element_ids = mapping.count(IdentifierKind::ElementId) as u64;
        observer.on_event(&PipelineEvent::MappingBuilt { mapping: &mapping });

        Ok((mapping, stats, errors))
    }
}

fn scan_file(file: &FileRecord) -> Result<Extraction, PipelineError> {
    let content = read(&file.path)?;
    Ok(extract(&content, file.content_type)?)
}

fn rewrite_file(file: &FileRecord, mapping: &Mapping) -> Result<usize, PipelineError> {
    let content = read(&file.path)?;
    let rewritten = rewrite(&content, file.content_type, mapping)?;
    fs::write(&file.path, &rewritten.content)
        .map_err(|source| PipelineError::write(file.path.clone(), source))?;
    Ok(rewritten.replacements)
}

fn read(path: &Utf8Path) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|source| PipelineError::read(path, source))
}

fn record_failure<O>(
    observer: &mut O,
    errors: &mut Vec<(Utf8PathBuf, PipelineError)>,
    phase: Phase,
    path: &Utf8Path,
    error: PipelineError,
) where
    O: PipelineObserver + ?Sized,
{
    observer.on_event(&PipelineEvent::FileFailed {
        phase,
        path,
        error: &error,
    });
    errors.push((path.to_owned(), error));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        let config = Config {
            token_length: 0,
            ..Config::default()
        };
        let err = Pipeline::new(config, Vec::new()).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_empty_file_list() {
        let report = Pipeline::new(Config::default(), Vec::new())
            .unwrap()
            .run(&mut TracingObserver)
            .unwrap();
        assert!(report.mapping.is_empty());
        assert!(report.errors.is_empty());
        assert_eq!(report.stats, RunStats::default());
    }

    #[test]
    fn test_files_accessor_preserves_order() {
        let css = vec!["css".to_owned()];
        let files = vec![
            FileRecord::classify("b.css", &css),
            FileRecord::classify("a.html", &css),
        ];
        let pipeline = Pipeline::new(Config::default(), files).unwrap();
        let paths: Vec<&str> = pipeline.files().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["b.css", "a.html"]);
        assert_eq!(pipeline.config().token_length, 8);
    }
}
