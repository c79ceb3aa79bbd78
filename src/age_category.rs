//! Age-based classification of directory entries.
//!
//! This module maps an entry's last-modification time to one of three fixed
//! buckets (`recent`, `aged`, `old`) relative to a single classification
//! instant.
//!
//! # Examples
//!
//! ```
//! use shelflife::age_category::AgeBucket;
//! use chrono::Duration;
//!
//! assert_eq!(AgeBucket::for_age(Duration::days(3)), AgeBucket::Recent);
//! assert_eq!(AgeBucket::for_age(Duration::weeks(2)), AgeBucket::Aged);
//! assert_eq!(AgeBucket::for_age(Duration::weeks(6)), AgeBucket::Old);
//! ```

use chrono::{DateTime, Duration, Utc};

/// Represents the age bucket a tracked entry belongs to.
///
/// Buckets are derived from modification time on every run and are never
/// persisted anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    /// Modified less than two weeks ago.
    Recent,
    /// Modified at least two but less than six weeks ago.
    Aged,
    /// Modified six or more weeks ago.
    Old,
}

impl AgeBucket {
    /// All buckets, youngest first.
    pub const ALL: [AgeBucket; 3] = [AgeBucket::Recent, AgeBucket::Aged, AgeBucket::Old];

    /// Returns the directory name for this bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelflife::age_category::AgeBucket;
    ///
    /// assert_eq!(AgeBucket::Recent.dir_name(), "recent");
    /// assert_eq!(AgeBucket::Old.dir_name(), "old");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            AgeBucket::Recent => "recent",
            AgeBucket::Aged => "aged",
            AgeBucket::Old => "old",
        }
    }

    /// Returns the bucket whose directory carries the given name, if any.
    ///
    /// Matching is exact; the bucket directories are always lowercase.
    pub fn from_dir_name(name: &str) -> Option<AgeBucket> {
        match name {
            "recent" => Some(AgeBucket::Recent),
            "aged" => Some(AgeBucket::Aged),
            "old" => Some(AgeBucket::Old),
            _ => None,
        }
    }

    /// Returns a human-readable description of this bucket.
    #[allow(dead_code)]
    pub fn description(&self) -> &'static str {
        match self {
            AgeBucket::Recent => "modified within the last two weeks",
            AgeBucket::Aged => "modified two to six weeks ago",
            AgeBucket::Old => "modified six or more weeks ago",
        }
    }

    /// Classifies an age into its bucket.
    ///
    /// Boundaries are half-open on the lower bound: an age of exactly two
    /// weeks is `Aged`, exactly six weeks is `Old`. Negative ages (an entry
    /// modified in the future) are `Recent`.
    pub fn for_age(age: Duration) -> AgeBucket {
        if age < Duration::weeks(2) {
            AgeBucket::Recent
        } else if age < Duration::weeks(6) {
            AgeBucket::Aged
        } else {
            AgeBucket::Old
        }
    }
}

/// Classifies modification times against a fixed instant.
///
/// The instant is captured once, so every entry in a pass is judged against
/// the same "now" even when the pass itself takes a while. This keeps a
/// boundary-straddling file from flapping between buckets mid-run.
#[derive(Debug, Clone, Copy)]
pub struct AgeClassifier {
    now: DateTime<Utc>,
}

impl AgeClassifier {
    /// Creates a classifier pinned to the current time.
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Creates a classifier pinned to an explicit instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// The instant ages are measured against.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Classifies a modification time into its bucket.
    pub fn classify(&self, modified: DateTime<Utc>) -> AgeBucket {
        AgeBucket::for_age(self.now.signed_duration_since(modified))
    }
}

impl Default for AgeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_dir_names() {
        assert_eq!(AgeBucket::Recent.dir_name(), "recent");
        assert_eq!(AgeBucket::Aged.dir_name(), "aged");
        assert_eq!(AgeBucket::Old.dir_name(), "old");
    }

    #[test]
    fn test_from_dir_name() {
        assert_eq!(AgeBucket::from_dir_name("recent"), Some(AgeBucket::Recent));
        assert_eq!(AgeBucket::from_dir_name("aged"), Some(AgeBucket::Aged));
        assert_eq!(AgeBucket::from_dir_name("old"), Some(AgeBucket::Old));
        assert_eq!(AgeBucket::from_dir_name("documents"), None);
        // Bucket directories are always lowercase
        assert_eq!(AgeBucket::from_dir_name("Recent"), None);
    }

    #[test]
    fn test_all_lists_every_bucket() {
        assert_eq!(AgeBucket::ALL.len(), 3);
        for bucket in AgeBucket::ALL {
            assert_eq!(AgeBucket::from_dir_name(bucket.dir_name()), Some(bucket));
        }
    }

    #[test]
    fn test_under_two_weeks_is_recent() {
        assert_eq!(AgeBucket::for_age(Duration::zero()), AgeBucket::Recent);
        assert_eq!(AgeBucket::for_age(Duration::days(13)), AgeBucket::Recent);
        assert_eq!(
            AgeBucket::for_age(Duration::weeks(2) - Duration::seconds(1)),
            AgeBucket::Recent
        );
    }

    #[test]
    fn test_two_week_boundary_is_aged() {
        assert_eq!(AgeBucket::for_age(Duration::weeks(2)), AgeBucket::Aged);
        assert_eq!(AgeBucket::for_age(Duration::days(14)), AgeBucket::Aged);
    }

    #[test]
    fn test_just_under_six_weeks_is_aged() {
        assert_eq!(
            AgeBucket::for_age(Duration::weeks(6) - Duration::seconds(1)),
            AgeBucket::Aged
        );
        assert_eq!(AgeBucket::for_age(Duration::days(41)), AgeBucket::Aged);
    }

    #[test]
    fn test_six_week_boundary_is_old() {
        assert_eq!(AgeBucket::for_age(Duration::weeks(6)), AgeBucket::Old);
        assert_eq!(AgeBucket::for_age(Duration::days(42)), AgeBucket::Old);
        assert_eq!(
            AgeBucket::for_age(Duration::days(42) + Duration::seconds(1)),
            AgeBucket::Old
        );
    }

    #[test]
    fn test_future_modification_time_is_recent() {
        assert_eq!(AgeBucket::for_age(Duration::days(-3)), AgeBucket::Recent);
    }

    #[test]
    fn test_classifier_measures_against_pinned_instant() {
        let now = Utc::now();
        let classifier = AgeClassifier::at(now);

        assert_eq!(
            classifier.classify(now - Duration::days(13)),
            AgeBucket::Recent
        );
        assert_eq!(
            classifier.classify(now - Duration::days(14)),
            AgeBucket::Aged
        );
        assert_eq!(
            classifier.classify(now - Duration::days(42)),
            AgeBucket::Old
        );
        assert_eq!(
            classifier.classify(now - Duration::days(42) - Duration::seconds(1)),
            AgeBucket::Old
        );
    }

    #[test]
    fn test_classifier_reports_its_instant() {
        let now = Utc::now();
        assert_eq!(AgeClassifier::at(now).now(), now);
    }
}
