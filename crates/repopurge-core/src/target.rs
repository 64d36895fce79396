//! Repository targets
//!
//! Maps an (environment, repo type) pair to the bucket that holds the
//! repository and the CloudFront distribution that fronts it. The mapping
//! is an explicit table built at startup and injected into callers; both
//! tags are validated before any network call is made.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;

/// Deployment environment of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Staging,
    Prod,
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staging" => Ok(Environment::Staging),
            "prod" => Ok(Environment::Prod),
            other => Err(AppError::InvalidArgument(format!(
                "Invalid env '{}'. Must be 'staging' or 'prod'",
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Staging => write!(f, "staging"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

/// Package repository flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    Apt,
    Yum,
}

impl FromStr for RepoType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apt" => Ok(RepoType::Apt),
            "yum" => Ok(RepoType::Yum),
            other => Err(AppError::InvalidArgument(format!(
                "Invalid repo type '{}'. Must be 'apt' or 'yum'",
                other
            ))),
        }
    }
}

impl fmt::Display for RepoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoType::Apt => write!(f, "apt"),
            RepoType::Yum => write!(f, "yum"),
        }
    }
}

/// Bucket + distribution pair for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoTarget {
    /// S3 bucket the repository is served from
    pub bucket: String,
    /// CloudFront distribution fronting the bucket
    pub distribution_id: String,
}

impl RepoTarget {
    fn new(bucket: &str, distribution_id: &str) -> Self {
        RepoTarget {
            bucket: bucket.to_string(),
            distribution_id: distribution_id.to_string(),
        }
    }
}

/// Immutable (environment, repo type) -> target mapping.
///
/// Exactly one entry per valid pair. Resolution is total over the enum
/// domain; invalid tags never reach it because `FromStr` rejects them.
#[derive(Debug, Clone)]
pub struct TargetTable {
    entries: HashMap<(Environment, RepoType), RepoTarget>,
}

impl TargetTable {
    /// The built-in deployment table.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            (Environment::Staging, RepoType::Apt),
            RepoTarget::new("apt.stage.pkgcdn.net", "E1B7Q2J8KXV4TN"),
        );
        entries.insert(
            (Environment::Staging, RepoType::Yum),
            RepoTarget::new("yum.stage.pkgcdn.net", "E3F9D6W1QMZ8RY"),
        );
        entries.insert(
            (Environment::Prod, RepoType::Apt),
            RepoTarget::new("apt.pkgcdn.net", "E2N5H8T3CVL7KD"),
        );
        entries.insert(
            (Environment::Prod, RepoType::Yum),
            RepoTarget::new("yum.pkgcdn.net", "EQ4X7Z2RB9JW1S"),
        );
        TargetTable { entries }
    }

    /// Resolve the target for a validated (environment, repo type) pair.
    pub fn resolve(&self, env: Environment, repo_type: RepoType) -> &RepoTarget {
        // The builtin table covers the full enum domain.
        &self.entries[&(env, repo_type)]
    }
}
