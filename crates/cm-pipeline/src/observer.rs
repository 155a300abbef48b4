//! Run progress events and observers.
//!
//! The pipeline reports progress through a [`PipelineObserver`] passed in by
//! the caller instead of logging directly. [`TracingObserver`] forwards
//! events to `tracing`; tests can pass a closure that records them.

use camino::Utf8Path;
use cm_core::{FileRecord, IdentifierKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::PipelineError;
use crate::mapping::Mapping;
use crate::stats::RunStats;

/// The pass a file operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Pass one: read and extract.
    Scan,
    /// Pass two: read, rewrite, and overwrite.
    Rewrite,
}

impl Phase {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Rewrite => "rewrite",
        }
    }
}

/// A progress event emitted during a run.
///
/// Events are emitted in this order:
/// 1. [`Scanned`](Self::Scanned) or [`FileFailed`](Self::FileFailed) per file
/// 2. [`MappingBuilt`](Self::MappingBuilt) once
/// 3. [`Rewritten`](Self::Rewritten) or [`FileFailed`](Self::FileFailed) per file (full runs only)
/// 4. [`Complete`](Self::Complete) once
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    /// A file was read and its identifiers extracted.
    Scanned {
        /// The file.
        file: &'a FileRecord,
        /// Distinct class names found in this file.
        class_names: usize,
        /// Distinct element IDs found in this file.
        element_ids: usize,
    },

    /// The mapping was finalized.
    MappingBuilt {
        /// The frozen mapping.
        mapping: &'a Mapping,
    },

    /// A file was rewritten in place.
    Rewritten {
        /// The file.
        file: &'a FileRecord,
        /// References substituted in this file.
        replacements: usize,
    },

    /// A file could not be read or written and was skipped.
    FileFailed {
        /// Which pass failed.
        phase: Phase,
        /// The failing path.
        path: &'a Utf8Path,
        /// The error.
        error: &'a PipelineError,
    },

    /// The run finished.
    Complete {
        /// Final counters.
        stats: &'a RunStats,
    },
}

/// Receives [`PipelineEvent`]s.
pub trait PipelineObserver {
    /// Called for each event, in order.
    fn on_event(&mut self, event: &PipelineEvent<'_>);
}

impl<F> PipelineObserver for F
where
    F: FnMut(&PipelineEvent<'_>),
{
    fn on_event(&mut self, event: &PipelineEvent<'_>) {
        self(event);
    }
}

/// Forwards events to `tracing`.
///
/// Per-file progress is logged at `debug`, failures at `error` (naming the
/// path), and the run summary at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_event(&mut self, event: &PipelineEvent<'_>) {
        match event {
            PipelineEvent::Scanned {
                file,
                class_names,
                element_ids,
            } => {
                debug!(
                    path = %file.path,
                    content_type = file.content_type.label(),
                    class_names,
                    element_ids,
                    "Scanned file"
                );
            }
            PipelineEvent::MappingBuilt { mapping } => {
                debug!(
                    class_names = mapping.count(IdentifierKind::ClassName),
                    element_ids = mapping.count(IdentifierKind::ElementId),
                    "Built replacement mapping"
                );
            }
            PipelineEvent::Rewritten { file, replacements } => {
                debug!(path = %file.path, replacements, "Processed file");
            }
            PipelineEvent::FileFailed { phase, path, error } => {
                error!(phase = phase.label(), path = %path, error = %error, "File skipped");
            }
            PipelineEvent::Complete { stats } => {
                info!(
                    files = stats.files_total,
                    rewritten = stats.files_rewritten,
                    replacements = stats.replacements,
                    class_names = stats.class_names,
                    element_ids = stats.element_ids,
                    failures = stats.scan_failures + stats.rewrite_failures,
                    "Class names and IDs have been replaced"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer_receives_events() {
        let stats = RunStats::new(1);
        let mut seen = Vec::new();
        let mut observer = |event: &PipelineEvent<'_>| {
            if let PipelineEvent::Complete { stats } = event {
                seen.push(stats.files_total);
            }
        };
        observer.on_event(&PipelineEvent::Complete { stats: &stats });
        assert_eq!(seen, [1]);
    }

    #[test]
    fn test_tracing_observer_accepts_every_event() {
        let file = FileRecord::classify("a.css", &["css".to_owned()]);
        let mapping = Mapping::default();
        let stats = RunStats::new(1);
        let error = PipelineError::read("a.css", std::io::Error::from(std::io::ErrorKind::NotFound));

        let mut observer = TracingObserver;
        observer.on_event(&PipelineEvent::Scanned {
            file: &file,
            class_names: 1,
            element_ids: 0,
        });
        observer.on_event(&PipelineEvent::MappingBuilt { mapping: &mapping });
        observer.on_event(&PipelineEvent::Rewritten {
            file: &file,
            replacements: 2,
        });
        observer.on_event(&PipelineEvent::FileFailed {
            phase: Phase::Rewrite,
            path: &file.path,
            error: &error,
        });
        observer.on_event(&PipelineEvent::Complete { stats: &stats });
    }

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::Scan.label(), "scan");
        assert_eq!(Phase::Rewrite.label(), "rewrite");
    }
}
