//! Collaborator seams
//!
//! The pipeline talks to its collaborators through these traits so the
//! orchestration can be exercised with fakes. Implementations surface
//! transport and auth errors unchanged as `AppError::Collaborator`; any
//! retrying is the SDK's responsibility.

use async_trait::async_trait;

use repopurge_core::{AppResult, InvalidationPlan};

/// Read-only, paginated key listing for a named bucket.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// List every object key in the bucket, following pagination to
    /// exhaustion. No ordering guarantee.
    async fn list_keys(&self, bucket: &str) -> AppResult<Vec<String>>;
}

/// Batch CDN invalidation submission.
#[async_trait]
pub trait Invalidator: Send + Sync {
    /// Submit one invalidation batch; returns the location identifier
    /// reported by the CDN on success.
    async fn create_invalidation(&self, plan: &InvalidationPlan) -> AppResult<String>;
}
