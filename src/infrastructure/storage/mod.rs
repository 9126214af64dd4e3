use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

pub mod s3;

/// Blob storage collaborator. All durability is delegated through this seam;
/// the service itself owns no persistent state.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `body` at `bucket/key`. Existing objects are never overwritten;
    /// a duplicate key is an error.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<()>;

    /// Publicly fetchable URL for an object, handed to the inference
    /// collaborator as its input reference.
    fn public_url(&self, bucket: &str, key: &str) -> String;

    /// Time-limited download link for an object.
    async fn create_signed_url(&self, bucket: &str, key: &str, expires_in: Duration)
    -> Result<String>;
}
