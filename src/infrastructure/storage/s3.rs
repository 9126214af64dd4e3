use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use url::Url;

use super::ObjectStorage;

#[derive(Clone)]
pub struct StorageService {
    client: Client,
    endpoint: Url,
}

impl StorageService {
    pub fn new(endpoint: &str, access_key: &str, secret_key: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).context("Invalid storage endpoint")?;
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint.as_str())
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO
            .build();

        let client = Client::from_conf(config);

        info!("✅ Connected to S3 (MinIO)");

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ObjectStorage for StorageService {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            // Uploads never overwrite; a duplicate key must fail loudly.
            .if_none_match("*")
            .send()
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to store {}/{}: {}",
                    bucket,
                    key,
                    aws_sdk_s3::Error::from(e)
                )
            })?;

        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        // Path-style addressing, same as the client configuration above.
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(bucket).extend(key.split('/'));
        }
        url.to_string()
    }

    async fn create_signed_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String> {
        let config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| anyhow!("Invalid signed URL lifetime: {}", e))?;

        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to sign URL for {}/{}: {}",
                    bucket,
                    key,
                    aws_sdk_s3::Error::from(e)
                )
            })?;

        Ok(presigned.uri().to_string())
    }
}
