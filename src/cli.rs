//! Command-line interface module for shelflife.
//!
//! This module handles all CLI-related functionality including:
//! - Run orchestration: structure, flattening, listing, classification, moves
//! - The trash prompt and purge handoff
//! - Per-entry progress lines and the end-of-run summary

use crate::age_category::{AgeBucket, AgeClassifier};
use crate::config::{CompiledExcludes, Settings};
use crate::flatten::{FlattenReport, Flattener};
use crate::mover::{BucketMover, MoveError};
use crate::output::OutputFormatter;
use crate::trash::{PurgeReport, SystemTrash, TrashDisposer, TrashPurger};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs::{self, DirEntry};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Represents a directory entry queued for classification.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    /// The name of the entry.
    pub name: String,
    /// The full path to the entry.
    pub path: PathBuf,
    /// When the entry was last modified.
    pub modified: DateTime<Utc>,
}

/// Controls whether the old bucket is purged at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeMode {
    /// Ask on stdin after the shuffle; purge only on an exact "Y".
    Prompt,
    /// Purge without asking.
    Always,
    /// Never purge.
    Never,
}

/// Represents the result of a full run.
#[derive(Debug)]
pub struct CleanReport {
    /// What the flattening pass did.
    pub flatten: FlattenReport,
    /// Number of entries moved into buckets.
    pub moved_entries: usize,
    /// Entries left in place because their bucket slot was occupied.
    pub skipped_moves: Vec<(PathBuf, String)>,
    /// Entries that could not be moved; they stay in place.
    pub failed_moves: Vec<(PathBuf, String)>,
    /// How many entries landed in each bucket.
    pub bucket_counts: HashMap<AgeBucket, usize>,
    /// What the purge did, when one ran.
    pub purge: Option<PurgeReport>,
}

/// Runs the CLI application against the given directory.
///
/// This is the main entry point for CLI operations. It loads configuration
/// from the default locations and shuffles the directory, purging the old
/// bucket according to `purge_mode`.
///
/// # Arguments
///
/// * `dir_path` - The directory to organize
/// * `purge_mode` - Whether to prompt for, force, or skip the trash purge
///
/// # Examples
///
/// ```no_run
/// use shelflife::cli::{run_cli, PurgeMode};
/// use std::path::Path;
///
/// let result = run_cli(Path::new("/path/to/directory"), PurgeMode::Prompt);
/// match result {
///     Ok(()) => println!("Run completed"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(dir_path: &Path, purge_mode: PurgeMode) -> Result<(), String> {
    run_cli_with_config(dir_path, purge_mode, None)
}

/// Runs the CLI application with an optional configuration file.
///
/// # Arguments
///
/// * `dir_path` - The directory to organize
/// * `purge_mode` - Whether to prompt for, force, or skip the trash purge
/// * `config_path` - Optional path to a configuration file
pub fn run_cli_with_config(
    dir_path: &Path,
    purge_mode: PurgeMode,
    config_path: Option<&Path>,
) -> Result<(), String> {
    let settings = Settings::load(config_path)
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let excludes = settings
        .compile()
        .map_err(|e| format!("Error compiling exclusion rules: {}", e))?;

    clean_directory(dir_path, &excludes, purge_mode, &SystemTrash).map(|_| ())
}

/// Shuffles a directory's entries into age buckets.
///
/// This function:
/// 1. Ensures the `recent`, `aged` and `old` bucket directories exist
/// 2. Flattens prior bucket contents back into the base directory
/// 3. Lists the remaining entries, oldest first
/// 4. Classifies each entry by modification time and moves it to its bucket
/// 5. Purges the old bucket to the trash according to `purge_mode`
///
/// Ages are measured against a single instant captured when the run starts,
/// so a long shuffle cannot reclassify entries mid-flight.
///
/// # Errors
///
/// The only fatal error is a base path that is missing, not a directory, or
/// where the bucket structure cannot be created; in that case nothing has
/// been moved. Everything later in the run degrades per entry instead of
/// failing the run.
pub fn clean_directory(
    base_path: &Path,
    excludes: &CompiledExcludes,
    purge_mode: PurgeMode,
    disposer: &dyn TrashDisposer,
) -> Result<CleanReport, String> {
    clean_directory_at(base_path, Utc::now(), excludes, purge_mode, disposer)
}

/// Shuffles a directory's entries, measuring ages against an explicit instant.
///
/// Behaves exactly like [`clean_directory`] but takes the classification
/// instant as an argument.
pub fn clean_directory_at(
    base_path: &Path,
    now: DateTime<Utc>,
    excludes: &CompiledExcludes,
    purge_mode: PurgeMode,
    disposer: &dyn TrashDisposer,
) -> Result<CleanReport, String> {
    println!("Organizing contents of: {}", base_path.display());

    // Structure first; an invalid base aborts before anything is touched
    BucketMover::ensure_buckets(base_path).map_err(|e| e.to_string())?;

    // Pull prior bucket contents back up so they get reclassified
    let flatten_report = Flattener::flatten(base_path);
    if flatten_report.returned_entries > 0 {
        OutputFormatter::info(&format!(
            "Returned entries from buckets: {}",
            flatten_report.returned_entries
        ));
    }
    for (path, reason) in &flatten_report.skipped_entries {
        OutputFormatter::warning(&format!("Left in bucket: {} ({})", path.display(), reason));
    }
    for (path, reason) in &flatten_report.failed_entries {
        OutputFormatter::error(&format!("Could not return {}: {}", path.display(), reason));
    }

    let (entries, unreadable) = list_entries_by_mtime(base_path, excludes);
    for (path, reason) in &unreadable {
        OutputFormatter::error(&format!("Skipping {}: {}", path.display(), reason));
    }

    let classifier = AgeClassifier::at(now);
    let mut report = CleanReport {
        flatten: flatten_report,
        moved_entries: 0,
        skipped_moves: Vec::new(),
        failed_moves: Vec::new(),
        bucket_counts: HashMap::new(),
        purge: None,
    };

    if entries.is_empty() {
        println!("No entries found to organize.");
    } else {
        println!("Entries found and organizing:");
    }

    for info in &entries {
        let bucket = classifier.classify(info.modified);
        println!(
            " - {} (modified {})",
            info.name,
            info.modified.format("%Y-%m-%d %H:%M")
        );

        match BucketMover::move_to_bucket(base_path, &info.path, bucket) {
            Ok(_) => {
                println!("   ✓ Moved to {}/", bucket.dir_name());
                report.moved_entries += 1;
                *report.bucket_counts.entry(bucket).or_insert(0) += 1;
            }
            Err(e @ MoveError::DestinationOccupied { .. }) => {
                println!("   ⚠ Skipped: {}", e);
                report.skipped_moves.push((info.path.clone(), e.to_string()));
            }
            Err(e) => {
                eprintln!("   ✗ Error: {}", e);
                report.failed_moves.push((info.path.clone(), e.to_string()));
            }
        }
    }

    if report.moved_entries > 0 {
        let rows: Vec<(&str, usize)> = AgeBucket::ALL
            .iter()
            .map(|bucket| {
                (
                    bucket.dir_name(),
                    report.bucket_counts.get(bucket).copied().unwrap_or(0),
                )
            })
            .collect();
        OutputFormatter::summary_table(&rows, report.moved_entries);
    }

    let should_purge = match purge_mode {
        PurgeMode::Always => true,
        PurgeMode::Never => false,
        PurgeMode::Prompt => confirm_purge(),
    };

    if should_purge {
        println!("Moving old entries to trash...");
        let purge_report = TrashPurger::purge_old_bucket(base_path, disposer);
        for (path, reason) in &purge_report.failed_disposals {
            OutputFormatter::error(&format!("Could not trash {}: {}", path.display(), reason));
        }
        OutputFormatter::success("Complete!");
        report.purge = Some(purge_report);
    }

    if !report.failed_moves.is_empty() || !report.flatten.failed_entries.is_empty() {
        eprintln!("\nSome entries could not be moved. Please review errors above.");
    }

    println!("Done.");

    Ok(report)
}

/// Lists the entries eligible for classification, oldest first.
///
/// Bucket directories themselves are skipped, as are entries matching the
/// exclusion rules. Entries whose modification time cannot be read are
/// returned separately with the reason; they stay where they are.
///
/// Ties on modification time are broken by name so runs are deterministic.
fn list_entries_by_mtime(
    base_path: &Path,
    excludes: &CompiledExcludes,
) -> (Vec<EntryInfo>, Vec<(PathBuf, String)>) {
    let mut entries: Vec<EntryInfo> = Vec::new();
    let mut unreadable: Vec<(PathBuf, String)> = Vec::new();

    let dir_entries = match fs::read_dir(base_path) {
        Ok(read) => read,
        Err(e) => {
            unreadable.push((
                base_path.to_path_buf(),
                format!("Failed to read directory: {}", e),
            ));
            return (entries, unreadable);
        }
    };

    for entry in dir_entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();

        // Only directories carrying a bucket name are infrastructure
        if entry.path().is_dir() && AgeBucket::from_dir_name(&name).is_some() {
            continue;
        }

        if excludes.is_excluded(&name) {
            continue;
        }

        match entry_modified_time(&entry) {
            Ok(modified) => entries.push(EntryInfo {
                name,
                path: entry.path(),
                modified,
            }),
            Err(reason) => unreadable.push((entry.path(), reason)),
        }
    }

    entries.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.name.cmp(&b.name)));

    (entries, unreadable)
}

/// Reads an entry's modification time as a UTC timestamp.
fn entry_modified_time(entry: &DirEntry) -> Result<DateTime<Utc>, String> {
    let metadata = entry
        .metadata()
        .map_err(|e| format!("Failed to read metadata: {}", e))?;
    let modified = metadata
        .modified()
        .map_err(|e| format!("Failed to read modification time: {}", e))?;
    Ok(DateTime::<Utc>::from(modified))
}

/// Asks on stdin whether to purge the old bucket.
///
/// Only an exact "Y" confirms; anything else, end of input, or a read error
/// declines. The check is case-sensitive on purpose, since the purge is the
/// one step that takes entries out of the directory.
fn confirm_purge() -> bool {
    print!("Move old entries to the trash? [Y/n]: ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().read_line(&mut answer) {
        // End of input counts as a decline
        Ok(0) => false,
        Ok(_) => answer.trim_end_matches(['\r', '\n']) == "Y",
        Err(_) => false,
    }
}
