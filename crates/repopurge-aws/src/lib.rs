//! Repopurge AWS collaborators
//!
//! Trait seams for the three vendor APIs the pipeline delegates to
//! (object listing, CDN invalidation, role assumption) and their
//! AWS-SDK-backed implementations. All orchestration logic stays in
//! repopurge-cli; this crate only wraps the SDK calls and maps their
//! errors into the domain error type.

pub mod cloudfront;
pub mod credentials;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use cloudfront::CloudFrontInvalidator;
pub use credentials::CredentialStrategy;
pub use s3::S3Lister;
pub use traits::{Invalidator, ObjectLister};

/// CloudFront distributions are managed through the us-east-1 control
/// plane; the repository buckets live there as well.
pub const AWS_REGION: &str = "us-east-1";
