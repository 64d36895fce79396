//! Repopurge core library
//!
//! Pure domain logic for the invalidation pipeline: target resolution,
//! the object filter pipeline, and invalidation plan construction. No
//! async code and no AWS types live here; collaborator seams are in
//! repopurge-aws.

pub mod error;
pub mod filter;
pub mod plan;
pub mod target;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use filter::{is_versioned, FilterCriteria};
pub use plan::InvalidationPlan;
pub use target::{Environment, RepoTarget, RepoType, TargetTable};
