//! S3 object lister

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;

use repopurge_core::{AppError, AppResult};

use crate::traits::ObjectLister;
use crate::AWS_REGION;

/// Lists repository objects through the S3 ListObjectsV2 API.
pub struct S3Lister {
    client: Client,
}

impl S3Lister {
    /// Create a lister using the ambient credential chain.
    pub async fn new() -> Self {
        let region_provider =
            RegionProviderChain::first_try(aws_config::Region::new(AWS_REGION));
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;
        S3Lister {
            client: Client::new(&config),
        }
    }
}

#[async_trait]
impl ObjectLister for S3Lister {
    async fn list_keys(&self, bucket: &str) -> AppResult<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation_token: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let mut request = self.client.list_objects_v2().bucket(bucket);
            if let Some(token) = continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    "S3 listing failed"
                );
                AppError::collaborator("S3 ListObjectsV2", e)
            })?;

            for object in response.contents() {
                if let Some(key) = object.key() {
                    keys.push(key.to_string());
                }
            }
            pages += 1;

            continuation_token = response.next_continuation_token;
            if continuation_token.is_none() {
                break;
            }
        }

        tracing::info!(
            bucket = %bucket,
            key_count = keys.len(),
            pages = pages,
            "S3 listing complete"
        );

        Ok(keys)
    }
}
