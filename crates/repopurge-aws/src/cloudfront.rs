//! CloudFront invalidation submitter

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::sts::AssumeRoleProvider;
use aws_config::BehaviorVersion;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
use aws_sdk_cloudfront::Client;

use repopurge_core::{AppError, AppResult, InvalidationPlan};

use crate::credentials::CredentialStrategy;
use crate::traits::Invalidator;
use crate::AWS_REGION;

/// Submits batch invalidations through the CloudFront API.
pub struct CloudFrontInvalidator {
    client: Client,
}

impl CloudFrontInvalidator {
    /// Create an invalidator whose client credentials follow the given
    /// strategy. The role exchange itself happens lazily, when the first
    /// signed request is sent.
    pub async fn new(strategy: &CredentialStrategy) -> Self {
        let region_provider =
            RegionProviderChain::first_try(aws_config::Region::new(AWS_REGION));

        let config = match strategy {
            CredentialStrategy::Ambient => {
                aws_config::defaults(BehaviorVersion::latest())
                    .region(region_provider)
                    .load()
                    .await
            }
            CredentialStrategy::AssumeRole {
                role_arn,
                session_name,
            } => {
                tracing::info!(
                    role_arn = %role_arn,
                    "Assuming role to invalidate the production distribution"
                );
                let provider = AssumeRoleProvider::builder(role_arn.as_str())
                    .session_name(session_name.as_str())
                    .region(aws_config::Region::new(AWS_REGION))
                    .build()
                    .await;
                aws_config::defaults(BehaviorVersion::latest())
                    .region(region_provider)
                    .credentials_provider(provider)
                    .load()
                    .await
            }
        };

        CloudFrontInvalidator {
            client: Client::new(&config),
        }
    }
}

#[async_trait]
impl Invalidator for CloudFrontInvalidator {
    async fn create_invalidation(&self, plan: &InvalidationPlan) -> AppResult<String> {
        let paths = Paths::builder()
            .quantity(plan.paths.len() as i32)
            .set_items(Some(plan.paths.clone()))
            .build()
            .map_err(|e| AppError::collaborator("CloudFront CreateInvalidation", e))?;

        let batch = InvalidationBatch::builder()
            .paths(paths)
            .caller_reference(plan.caller_reference.clone())
            .build()
            .map_err(|e| AppError::collaborator("CloudFront CreateInvalidation", e))?;

        let response = self
            .client
            .create_invalidation()
            .distribution_id(plan.distribution_id.clone())
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    distribution_id = %plan.distribution_id,
                    path_count = plan.paths.len(),
                    "CloudFront invalidation failed"
                );
                AppError::collaborator("CloudFront CreateInvalidation", e)
            })?;

        let location = response.location.unwrap_or_default();

        tracing::info!(
            distribution_id = %plan.distribution_id,
            path_count = plan.paths.len(),
            location = %location,
            "CloudFront invalidation created"
        );

        Ok(location)
    }
}
