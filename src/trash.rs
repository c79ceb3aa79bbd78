//! Recoverable disposal of the `old` bucket.
//!
//! Purging never unlinks anything. Entries are handed to the operating
//! system's trash, so a purge the user regrets can be undone from the
//! desktop. The disposal backend sits behind a trait so tests can observe
//! exactly what would be trashed without touching the real trash.

use std::fs;
use std::path::{Path, PathBuf};

use crate::age_category::AgeBucket;
use crate::output::OutputFormatter;

/// Error raised when the platform trash rejects an entry.
#[derive(Debug)]
pub struct DisposalError {
    message: String,
}

impl DisposalError {
    /// Creates a disposal error with the given reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DisposalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DisposalError {}

/// Destination for entries leaving the tracked directory for good.
pub trait TrashDisposer {
    /// Sends a single entry to the trash.
    fn dispose(&self, path: &Path) -> Result<(), DisposalError>;
}

/// Disposer backed by the operating system's trash.
pub struct SystemTrash;

impl TrashDisposer for SystemTrash {
    fn dispose(&self, path: &Path) -> Result<(), DisposalError> {
        trash::delete(path).map_err(|e| DisposalError::new(e.to_string()))
    }
}

/// Represents the result of purging the old bucket.
#[derive(Debug)]
pub struct PurgeReport {
    /// Number of entries sent to the trash.
    pub disposed_entries: usize,
    /// Entries that could not be disposed.
    pub failed_disposals: Vec<(PathBuf, String)>,
}

impl PurgeReport {
    /// Creates a new empty purge report.
    fn new() -> Self {
        Self {
            disposed_entries: 0,
            failed_disposals: Vec::new(),
        }
    }

    /// Returns true if every entry made it to the trash.
    pub fn is_complete_success(&self) -> bool {
        self.failed_disposals.is_empty()
    }
}

/// Empties the `old` bucket into the trash.
pub struct TrashPurger;

impl TrashPurger {
    /// Sends every entry inside the `old` bucket to the trash.
    ///
    /// The bucket directory itself stays in place, and the `recent` and
    /// `aged` buckets are never touched. The purge is best-effort: an entry
    /// the trash rejects is reported and left where it is, and the rest of
    /// the bucket is still processed.
    pub fn purge_old_bucket(base_path: &Path, disposer: &dyn TrashDisposer) -> PurgeReport {
        let mut report = PurgeReport::new();
        let bucket_path = base_path.join(AgeBucket::Old.dir_name());

        let entries: Vec<PathBuf> = match fs::read_dir(&bucket_path) {
            Ok(entries) => entries.filter_map(|e| e.ok()).map(|e| e.path()).collect(),
            Err(e) => {
                report
                    .failed_disposals
                    .push((bucket_path, format!("Failed to read bucket: {}", e)));
                return report;
            }
        };

        let pb = OutputFormatter::create_progress_bar(entries.len() as u64);
        for entry_path in entries {
            if let Some(name) = entry_path.file_name() {
                pb.set_message(name.to_string_lossy().to_string());
            }
            match disposer.dispose(&entry_path) {
                Ok(()) => {
                    report.disposed_entries += 1;
                }
                Err(e) => {
                    report.failed_disposals.push((entry_path, e.to_string()));
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        report
    }
}
