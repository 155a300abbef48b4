//! Run statistics.
//!
//! The pipeline is single-threaded, so [`RunStats`] is a plain counter
//! struct updated in place and copied into the final report.

use serde::{Deserialize, Serialize};

/// Counters describing one pipeline run.
///
/// # Examples
///
/// ```
/// use cm_pipeline::RunStats;
///
/// let stats = RunStats { files_total: 3, files_rewritten: 2, rewrite_failures: 1, ..RunStats::default() };
/// assert!(stats.has_failures());
/// assert!(!stats.is_complete());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Files in the input list.
    pub files_total: u64,
    /// Files read and scanned in pass one.
    pub files_scanned: u64,
    /// Files overwritten in pass two.
    pub files_rewritten: u64,
    /// Rewritten files whose content actually changed.
    pub files_changed: u64,
    /// References substituted across all files.
    pub replacements: u64,
    /// Files that failed in pass one.
    pub scan_failures: u64,
    /// Files that failed in pass two.
    pub rewrite_failures: u64,
    /// Distinct class names in the mapping.
    pub class_names: u64,
    /// Distinct element IDs in the mapping.
    pub element_ids: u64,
}

impl RunStats {
    /// Creates stats for a run over `files_total` files.
    #[must_use]
    pub fn new(files_total: usize) -> Self {
        Self {
            files_total: files_total as u64,
            ..Self::default()
        }
    }

    /// Returns `true` if any file failed in either pass.
    #[inline]
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.scan_failures > 0 || self.rewrite_failures > 0
    }

    /// Returns `true` if every listed file was rewritten.
    #[inline]
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.files_rewritten == self.files_total
    }

    /// Distinct identifiers across both namespaces.
    #[inline]
    #[must_use]
    pub const fn identifiers(&self) -> u64 {
        self.class_names + self.element_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_total_only() {
        let stats = RunStats::new(4);
        assert_eq!(stats.files_total, 4);
        assert_eq!(stats.files_scanned, 0);
        assert!(!stats.has_failures());
    }

    #[test]
    fn test_identifiers() {
        let stats = RunStats {
            class_names: 3,
            element_ids: 2,
            ..RunStats::default()
        };
        assert_eq!(stats.identifiers(), 5);
    }

    #[test]
    fn test_empty_run_is_complete() {
        assert!(RunStats::new(0).is_complete());
    }

    #[test]
    fn test_serialization() {
        let stats = RunStats::new(2);
        let json = serde_json::to_string(&stats).unwrap();
        let parsed: RunStats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, parsed);
    }
}
