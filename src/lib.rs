//! shelflife - keeps a directory's entries shelved by age
//!
//! This library provides utilities for classifying directory entries by
//! modification time, shuffling them into `recent`/`aged`/`old` bucket
//! directories, returning previously shelved entries so they can age across
//! buckets, and purging the old bucket to the system trash.

pub mod age_category;
pub mod cli;
pub mod config;
pub mod flatten;
pub mod mover;
pub mod output;
pub mod trash;

pub use age_category::{AgeBucket, AgeClassifier};
pub use config::{CompiledExcludes, ConfigError, Settings};
pub use flatten::{FlattenReport, Flattener};
pub use mover::BucketMover;
pub use trash::{SystemTrash, TrashDisposer, TrashPurger};

pub use cli::{PurgeMode, run_cli};
