//! Batch extraction over a directory of raw inputs
//!
//! Map stage: one record per input file, optionally on the rayon pool.
//! Reduce stage: sequential, in sorted input order, so the dataset row
//! order never depends on completion order.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::Extractor;
use crate::experiment::Dataset;
use crate::{Error, Result};

/// An input that produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedInput {
    /// Path of the skipped input
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: String,
}

/// Result of extracting a batch of inputs.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// One row per input that could be read
    pub dataset: Dataset,
    /// Inputs excluded from the dataset
    pub skipped: Vec<SkippedInput>,
}

impl BatchOutcome {
    /// Number of inputs that produced a record.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.dataset.len()
    }

    /// Number of inputs that were skipped.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Total number of inputs seen.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded() + self.skipped_count()
    }
}

impl Extractor {
    /// Extract every file with the given extension in `dir`.
    ///
    /// Files are processed in file-name order. Unreadable inputs and inputs
    /// whose technology cannot be determined are logged and skipped; the
    /// batch continues.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputUnavailable`] if the directory itself cannot be
    /// listed
    pub fn extract_dir<P: AsRef<Path>>(&self, dir: P, extension: &str) -> Result<BatchOutcome> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|source| Error::InputUnavailable {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::InputUnavailable {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let matches_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension));
            if matches_ext && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        info!(dir = %dir.display(), inputs = paths.len(), "extracting inputs");
        Ok(self.extract_paths(&paths))
    }

    /// Extract an explicit list of inputs, keeping their order.
    #[must_use]
    pub fn extract_paths(&self, paths: &[PathBuf]) -> BatchOutcome {
        let results = self.map_paths(paths);

        let mut records = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for (path, result) in paths.iter().zip(results) {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping input");
                    skipped.push(SkippedInput {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let outcome = BatchOutcome {
            dataset: Dataset::new(records),
            skipped,
        };
        info!(
            succeeded = outcome.succeeded(),
            skipped = outcome.skipped_count(),
            "batch extraction finished"
        );
        outcome
    }

    #[cfg(feature = "parallel")]
    fn map_paths(&self, paths: &[PathBuf]) -> Vec<Result<crate::experiment::ExperimentRecord>> {
        use rayon::prelude::*;

        // Indexed collect keeps input order regardless of completion order
        paths.par_iter().map(|p| self.extract_file(p)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn map_paths(&self, paths: &[PathBuf]) -> Vec<Result<crate::experiment::ExperimentRecord>> {
        paths.iter().map(|p| self.extract_file(p)).collect()
    }
}
