//! Credential strategy selection
//!
//! Production distributions live in a separate account, so invalidating
//! them requires a time-limited role exchange first; staging uses the
//! ambient identity directly. The choice is a pure function of the
//! environment tag, made once before any API call.

use repopurge_core::Environment;

/// Role granted invalidation rights on the production distributions.
const PROD_INVALIDATION_ROLE_ARN: &str =
    "arn:aws:iam::123456789012:role/repo-cloudfront-invalidation";
const ROLE_SESSION_NAME: &str = "repopurge-invalidate";

/// How the CDN client obtains its credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStrategy {
    /// Use the ambient credential chain as-is
    Ambient,
    /// Exchange the ambient identity for short-lived role credentials
    AssumeRole {
        role_arn: String,
        session_name: String,
    },
}

impl CredentialStrategy {
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Staging => CredentialStrategy::Ambient,
            Environment::Prod => CredentialStrategy::AssumeRole {
                role_arn: PROD_INVALIDATION_ROLE_ARN.to_string(),
                session_name: ROLE_SESSION_NAME.to_string(),
            },
        }
    }
}
