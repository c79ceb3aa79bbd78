//! Exclusion configuration.
//!
//! This module provides support for keeping selected entries out of the
//! shuffle via TOML configuration files. Rules match against entry names in
//! the base directory:
//! - Exact filename matching
//! - Glob pattern matching
//! - Regex pattern matching
//! - An optional switch to leave hidden entries alone
//!
//! By default nothing is excluded; every entry in the directory is managed.
//!
//! # Configuration File Format
//!
//! ```toml
//! skip_hidden = true
//!
//! [exclude]
//! filenames = ["inbox.txt"]
//! patterns = ["*.part", "~$*"]
//! regex = ['^backup-\d+']
//! ```

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during configuration loading.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings deserialized from a TOML configuration file.
///
/// Every field has a default, so a missing or empty file means "manage
/// everything".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Whether to leave hidden entries (starting with ".") alone.
    /// Defaults to false.
    #[serde(default)]
    pub skip_hidden: bool,

    /// Rules for excluding entries from the shuffle.
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// Rules for excluding entries by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact entry names to exclude (e.g., "inbox.txt").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns to exclude (e.g., "*.part").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns to exclude (for advanced users).
    #[serde(default)]
    pub regex: Vec<String>,
}

impl Settings {
    /// Load settings from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.shelfliferc.toml` in the current directory
    /// 3. Look for `~/.config/shelflife/config.toml` in home directory
    /// 4. Fall back to default settings
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        // If explicitly specified, load from that path
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        // Try current directory
        let local_config = PathBuf::from(".shelfliferc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        // Try home directory
        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("shelflife")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        // Fall back to defaults
        Ok(Self::default())
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if the file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile settings into optimized matchers.
    ///
    /// # Errors
    ///
    /// Returns an error if any regex or glob patterns are invalid.
    pub fn compile(self) -> Result<CompiledExcludes, ConfigError> {
        CompiledExcludes::new(self)
    }
}

/// Pre-compiled exclusion matchers.
///
/// Glob and regex patterns are compiled once here so that matching each
/// directory entry doesn't reparse them.
pub struct CompiledExcludes {
    skip_hidden: bool,
    exclude_filenames: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
}

impl CompiledExcludes {
    /// Create compiled matchers from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex patterns are invalid.
    fn new(settings: Settings) -> Result<Self, ConfigError> {
        let exclude_patterns = settings
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = settings
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skip_hidden: settings.skip_hidden,
            exclude_filenames: settings.exclude.filenames.into_iter().collect(),
            exclude_patterns,
            exclude_regexes,
        })
    }

    /// Check whether an entry name should be left out of the shuffle.
    ///
    /// Checks are performed in this order, with early termination:
    /// 1. Hidden entry with `skip_hidden` set - exclude
    /// 2. Exact filename match - exclude
    /// 3. Glob pattern match - exclude
    /// 4. Regex pattern match - exclude
    /// 5. Default: manage the entry
    pub fn is_excluded(&self, entry_name: &str) -> bool {
        if self.skip_hidden && entry_name.starts_with('.') {
            return true;
        }

        if self.exclude_filenames.contains(entry_name) {
            return true;
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(entry_name))
        {
            return true;
        }

        if self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(entry_name))
        {
            return true;
        }

        false
    }
}

/// Returns the default directory to organize when none is given.
///
/// Mirrors where downloads pile up: `$HOME/Downloads`. Returns `None` when
/// the home directory cannot be determined.
pub fn default_target_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join("Downloads"))
}
