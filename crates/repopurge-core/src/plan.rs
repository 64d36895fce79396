//! Invalidation plan construction
//!
//! The plan carries exactly the final path list, in order and without
//! deduplication, plus a caller reference that is fresh per run.
//! CloudFront uses the caller reference to deduplicate: resubmitting an
//! identical batch under the same reference is a no-op, while reusing a
//! reference for a different batch is rejected.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::target::RepoTarget;

/// One batch invalidation request, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidationPlan {
    pub distribution_id: String,
    /// `/`-prefixed paths, order preserved, duplicates passed through
    pub paths: Vec<String>,
    pub caller_reference: String,
}

impl InvalidationPlan {
    /// Build a plan for the given target and final path list.
    ///
    /// Callers guarantee `paths` is non-empty; the empty-set case aborts
    /// upstream before a plan is ever constructed.
    pub fn new(target: &RepoTarget, paths: Vec<String>) -> Self {
        let first = paths.first().map(String::as_str).unwrap_or_default();
        let caller_reference = caller_reference(Utc::now(), first);
        InvalidationPlan {
            distribution_id: target.distribution_id.clone(),
            paths,
            caller_reference,
        }
    }
}

/// Caller reference scheme: tool name, UTC timestamp, first path.
/// Unique across runs with very high probability; identical reruns within
/// the same second produce the same reference, which CloudFront treats as
/// an idempotent resubmission.
fn caller_reference(now: DateTime<Utc>, first_path: &str) -> String {
    format!(
        "repopurge:{}:{}",
        now.to_rfc3339_opts(SecondsFormat::Secs, true),
        first_path
    )
}

/// Normalize a bucket key into an invalidation path by prefixing `/`.
pub fn to_invalidation_path(key: &str) -> String {
    format!("/{}", key)
}
