//! Object filter pipeline
//!
//! Pure, order-preserving filters over the listed invalidation paths.
//! Stages compose as independent AND filters in a fixed order: version
//! exclusion, then regex, then substring. Each stage takes and returns an
//! owned sequence so the stages stay independently testable.

use regex::Regex;

use crate::error::{AppError, AppResult};

/// True iff the final `/`-delimited segment of `path` contains an ASCII
/// digit. This intentionally also catches non-version filenames that
/// happen to contain a digit (e.g. `mirrorlist2.txt`), matching the
/// long-standing behavior of the repository tooling.
pub fn is_versioned(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|segment| segment.chars().any(|c| c.is_ascii_digit()))
}

/// Criteria for selecting which listed objects get invalidated.
///
/// All supplied criteria must pass for a path to survive.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    /// Drop objects whose filename contains a digit (the default posture)
    pub exclude_versioned: bool,
    /// Keep only paths matching this pattern (unanchored), if supplied
    pub regex: Option<Regex>,
    /// Keep only paths containing this substring, if supplied
    pub substring: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw CLI values. Empty pattern strings mean the
    /// stage is skipped; a malformed regex is rejected here, before any
    /// network call.
    pub fn from_args(
        exclude_versioned: bool,
        pattern_regex: &str,
        pattern_substring: &str,
    ) -> AppResult<Self> {
        let regex = if pattern_regex.is_empty() {
            None
        } else {
            Some(Regex::new(pattern_regex).map_err(|e| {
                AppError::InvalidArgument(format!("Invalid pattern regex: {}", e))
            })?)
        };
        let substring = if pattern_substring.is_empty() {
            None
        } else {
            Some(pattern_substring.to_string())
        };
        Ok(FilterCriteria {
            exclude_versioned,
            regex,
            substring,
        })
    }

    /// Apply all stages in the fixed order, preserving input order.
    pub fn apply(&self, paths: &[String]) -> Vec<String> {
        let survivors = self.apply_version_stage(paths.to_vec());
        let survivors = self.apply_regex_stage(survivors);
        self.apply_substring_stage(survivors)
    }

    fn apply_version_stage(&self, paths: Vec<String>) -> Vec<String> {
        if !self.exclude_versioned {
            return paths;
        }
        paths.into_iter().filter(|p| !is_versioned(p)).collect()
    }

    fn apply_regex_stage(&self, paths: Vec<String>) -> Vec<String> {
        match &self.regex {
            Some(re) => paths.into_iter().filter(|p| re.is_match(p)).collect(),
            None => paths,
        }
    }

    fn apply_substring_stage(&self, paths: Vec<String>) -> Vec<String> {
        match &self.substring {
            Some(needle) => paths.into_iter().filter(|p| p.contains(needle)).collect(),
            None => paths,
        }
    }
}
