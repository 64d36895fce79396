//! Error types module
//!
//! All failures in a run are terminal: either the full object set is
//! resolved and one invalidation is submitted, or nothing is submitted.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Bad repo type, environment, or filter pattern. Raised before any
    /// network call.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The filter pipeline left nothing to invalidate and no raw path
    /// bypass was supplied.
    #[error("No object matching the conditions has been found on the bucket '{bucket}'")]
    NoMatchingObjects { bucket: String },

    /// A collaborator API call failed; the underlying message is carried
    /// through unmodified. No local recovery or retry.
    #[error("{api} request failed: {message}")]
    Collaborator { api: &'static str, message: String },
}

/// Result type for pipeline operations
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn collaborator(api: &'static str, message: impl ToString) -> Self {
        AppError::Collaborator {
            api,
            message: message.to_string(),
        }
    }
}
