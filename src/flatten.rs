//! Flattening pass that lifts bucket contents back into the base directory.
//!
//! Buckets are re-derived from modification times on every run, so each run
//! starts by moving whatever a previous run filed away back up to the base
//! directory. Those entries then go through classification again alongside
//! everything else, which is what lets an entry migrate from `recent` to
//! `aged` to `old` as it ages.

use std::fs;
use std::path::{Path, PathBuf};

use crate::age_category::AgeBucket;

/// Represents the result of a flattening pass.
#[derive(Debug)]
pub struct FlattenReport {
    /// Number of entries moved back into the base directory.
    pub returned_entries: usize,
    /// Entries left in their bucket because the base directory already
    /// holds something with the same name.
    pub skipped_entries: Vec<(PathBuf, String)>,
    /// Entries that could not be moved.
    pub failed_entries: Vec<(PathBuf, String)>,
}

impl FlattenReport {
    /// Creates a new empty flatten report.
    fn new() -> Self {
        Self {
            returned_entries: 0,
            skipped_entries: Vec::new(),
            failed_entries: Vec::new(),
        }
    }

    /// Returns the total number of entries processed.
    #[allow(dead_code)]
    pub fn total_processed(&self) -> usize {
        self.returned_entries + self.skipped_entries.len() + self.failed_entries.len()
    }

    /// Returns true if the pass emptied every bucket.
    pub fn is_complete_success(&self) -> bool {
        self.skipped_entries.is_empty() && self.failed_entries.is_empty()
    }
}

/// Moves previously bucketed entries back into the base directory.
pub struct Flattener;

impl Flattener {
    /// Empties each bucket directory into the base directory.
    ///
    /// Only the three known bucket directories are touched; loose entries in
    /// the base directory and unrelated subdirectories are left alone. The
    /// pass is best-effort: one stubborn entry never stops the rest.
    ///
    /// # Returns
    ///
    /// Returns a `FlattenReport` describing what was returned, what was
    /// skipped, and what failed.
    ///
    /// # Edge Cases Handled
    ///
    /// * **Missing bucket**: Silently treated as empty
    /// * **Name collision**: The entry stays in its bucket and is reported
    ///   as skipped, never overwriting what is already in the base directory
    /// * **Unreadable bucket**: Recorded as a failure with the error reason
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shelflife::flatten::Flattener;
    /// use std::path::Path;
    ///
    /// let report = Flattener::flatten(Path::new("/path/to/directory"));
    /// println!("Returned {} entries", report.returned_entries);
    /// ```
    pub fn flatten(base_path: &Path) -> FlattenReport {
        let mut report = FlattenReport::new();

        for bucket in AgeBucket::ALL {
            let bucket_path = base_path.join(bucket.dir_name());
            if !bucket_path.is_dir() {
                continue;
            }

            let entries = match fs::read_dir(&bucket_path) {
                Ok(entries) => entries,
                Err(e) => {
                    report
                        .failed_entries
                        .push((bucket_path, format!("Failed to read bucket: {}", e)));
                    continue;
                }
            };

            for entry in entries.filter_map(|e| e.ok()) {
                match Self::raise_entry(base_path, &entry.path()) {
                    Ok(()) => {
                        report.returned_entries += 1;
                    }
                    Err((path, reason)) => {
                        if reason.contains("already exists") {
                            report.skipped_entries.push((path, reason));
                        } else {
                            report.failed_entries.push((path, reason));
                        }
                    }
                }
            }
        }

        report
    }

    /// Moves a single entry from its bucket back into the base directory.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on success, or `Err((path, reason))` on failure.
    fn raise_entry(base_path: &Path, entry_path: &Path) -> Result<(), (PathBuf, String)> {
        let entry_name = entry_path.file_name().ok_or_else(|| {
            (
                entry_path.to_path_buf(),
                "Entry has no name component".to_string(),
            )
        })?;

        let destination = base_path.join(entry_name);

        if destination.exists() {
            return Err((
                entry_path.to_path_buf(),
                format!(
                    "{} already exists in the base directory",
                    destination.display()
                ),
            ));
        }

        fs::rename(entry_path, &destination).map_err(|e| {
            (
                entry_path.to_path_buf(),
                format!("Failed to move entry back: {}", e),
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mover::BucketMover;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_flatten_returns_bucket_contents() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        BucketMover::ensure_buckets(base_path).expect("Failed to ensure buckets");

        fs::write(base_path.join("recent").join("fresh.txt"), "fresh")
            .expect("Failed to write test file");
        fs::write(base_path.join("old").join("stale.txt"), "stale")
            .expect("Failed to write test file");

        let report = Flattener::flatten(base_path);

        assert_eq!(report.returned_entries, 2);
        assert!(report.is_complete_success());
        assert!(base_path.join("fresh.txt").exists());
        assert!(base_path.join("stale.txt").exists());
        assert!(!base_path.join("recent").join("fresh.txt").exists());
        assert!(!base_path.join("old").join("stale.txt").exists());
    }

    #[test]
    fn test_flatten_treats_missing_buckets_as_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let report = Flattener::flatten(temp_dir.path());

        assert_eq!(report.returned_entries, 0);
        assert!(report.is_complete_success());
    }

    #[test]
    fn test_flatten_empty_buckets_is_success() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        BucketMover::ensure_buckets(base_path).expect("Failed to ensure buckets");

        let report = Flattener::flatten(base_path);

        assert_eq!(report.returned_entries, 0);
        assert!(report.is_complete_success());
    }

    #[test]
    fn test_flatten_skips_name_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        BucketMover::ensure_buckets(base_path).expect("Failed to ensure buckets");

        fs::write(base_path.join("dup.txt"), "in base").expect("Failed to write base file");
        fs::write(base_path.join("aged").join("dup.txt"), "in bucket")
            .expect("Failed to write bucket file");

        let report = Flattener::flatten(base_path);

        assert_eq!(report.returned_entries, 0);
        assert_eq!(report.skipped_entries.len(), 1);
        assert!(!report.is_complete_success());

        // Both entries survive with their contents intact
        assert_eq!(
            fs::read_to_string(base_path.join("dup.txt")).expect("base file vanished"),
            "in base"
        );
        assert_eq!(
            fs::read_to_string(base_path.join("aged").join("dup.txt"))
                .expect("bucket file vanished"),
            "in bucket"
        );
    }

    #[test]
    fn test_flatten_moves_directories_whole() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        BucketMover::ensure_buckets(base_path).expect("Failed to ensure buckets");

        let nested = base_path.join("old").join("project");
        fs::create_dir(&nested).expect("Failed to create nested directory");
        fs::write(nested.join("inner.txt"), "nested").expect("Failed to write nested file");

        let report = Flattener::flatten(base_path);

        assert_eq!(report.returned_entries, 1);
        assert!(base_path.join("project").join("inner.txt").exists());
        assert!(!nested.exists());
    }

    #[test]
    fn test_flatten_leaves_loose_base_entries_alone() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        BucketMover::ensure_buckets(base_path).expect("Failed to ensure buckets");

        let loose = base_path.join("loose.txt");
        fs::write(&loose, "untouched").expect("Failed to write loose file");

        let report = Flattener::flatten(base_path);

        assert_eq!(report.returned_entries, 0);
        assert!(loose.exists());
    }
}
