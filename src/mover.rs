//! Bucket directory management and entry movement.
//!
//! This module owns every mutation of the tracked directory tree: creating
//! the three bucket subdirectories and moving entries into them. Moves are
//! rename-only and refuse to overwrite, so an interrupted or partially
//! failed run never loses data.

use std::fs;
use std::path::{Path, PathBuf};

use crate::age_category::AgeBucket;

/// Errors that can occur while shaping the bucket structure or moving entries.
#[derive(Debug)]
pub enum MoveError {
    /// The base directory path is invalid or doesn't exist.
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a bucket directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The destination path is already occupied, so the move was refused.
    DestinationOccupied {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Failed to move an entry into its bucket directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::DestinationOccupied {
                source: _,
                destination,
            } => {
                write!(f, "Destination {} already exists", destination.display())
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Result type for bucket structure and movement operations.
pub type MoveResult<T> = Result<T, MoveError>;

/// Moves entries into age bucket subdirectories.
///
/// This struct handles the logistics of shuffling entries within a base
/// directory. It creates bucket subdirectories as needed and moves entries
/// into them without ever overwriting what is already there.
pub struct BucketMover;

impl BucketMover {
    /// Ensures the three bucket directories exist directly under the base path.
    ///
    /// The base path itself is validated first; nothing is created when it
    /// is missing or not a directory. A regular file squatting on a bucket
    /// name makes this fail, since the bucket cannot be created beside it.
    pub fn ensure_buckets(base_path: &Path) -> MoveResult<()> {
        if !base_path.is_dir() {
            return Err(MoveError::InvalidBasePath {
                path: base_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "base path is not an existing directory",
                ),
            });
        }

        for bucket in AgeBucket::ALL {
            let bucket_path = base_path.join(bucket.dir_name());
            if !bucket_path.is_dir() {
                fs::create_dir(&bucket_path).map_err(|e| MoveError::DirectoryCreationFailed {
                    path: bucket_path.clone(),
                    source: e,
                })?;
            }
        }

        Ok(())
    }

    /// Moves an entry into its bucket directory within the base path.
    ///
    /// If the bucket directory went missing since the structure pass, it is
    /// re-created. The move is refused with `DestinationOccupied` when the
    /// bucket already holds an entry of the same name; the source is left
    /// untouched in that case.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The root directory holding the bucket subdirectories
    /// * `entry_path` - The full path of the file or directory to move
    /// * `bucket` - The bucket the entry was classified into
    ///
    /// # Returns
    ///
    /// Returns the entry's new path on success, or a `MoveError` if any
    /// operation fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shelflife::age_category::AgeBucket;
    /// use shelflife::mover::BucketMover;
    /// use std::path::Path;
    ///
    /// let result = BucketMover::move_to_bucket(
    ///     Path::new("/path/to/base"),
    ///     Path::new("/path/to/base/report.pdf"),
    ///     AgeBucket::Old,
    /// );
    ///
    /// match result {
    ///     Ok(new_path) => println!("Moved to {}", new_path.display()),
    ///     Err(e) => eprintln!("Move failed: {}", e),
    /// }
    /// ```
    pub fn move_to_bucket(
        base_path: &Path,
        entry_path: &Path,
        bucket: AgeBucket,
    ) -> MoveResult<PathBuf> {
        // Validate that the base path exists
        if !base_path.exists() {
            return Err(MoveError::InvalidBasePath {
                path: base_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "base path does not exist",
                ),
            });
        }

        let bucket_path = base_path.join(bucket.dir_name());

        // Re-create the bucket directory if it vanished mid-run
        if !bucket_path.is_dir() {
            fs::create_dir(&bucket_path).map_err(|e| MoveError::DirectoryCreationFailed {
                path: bucket_path.clone(),
                source: e,
            })?;
        }

        let entry_name = entry_path
            .file_name()
            .ok_or_else(|| MoveError::FileMoveFailure {
                source: entry_path.to_path_buf(),
                destination: bucket_path.clone(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "entry has no name component",
                ),
            })?;

        let destination_path = bucket_path.join(entry_name);

        // fs::rename silently replaces files on Unix, so refuse up front
        if destination_path.exists() {
            return Err(MoveError::DestinationOccupied {
                source: entry_path.to_path_buf(),
                destination: destination_path,
            });
        }

        fs::rename(entry_path, &destination_path).map_err(|e| MoveError::FileMoveFailure {
            source: entry_path.to_path_buf(),
            destination: destination_path.clone(),
            source_error: e,
        })?;

        Ok(destination_path)
    }
}
