//! Shared doubles for handler and service tests. The real collaborators are
//! exercised separately against wiremock.

use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;
use bytes::Bytes;

use crate::config::settings::AppConfig;
use crate::infrastructure::inference::{SeparationOutput, StemSeparator};
use crate::infrastructure::storage::ObjectStorage;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Default)]
pub struct MockStorage {
    pub uploads: Mutex<Vec<RecordedUpload>>,
    /// Uploads whose `bucket/key` contains this marker fail.
    pub fail_uploads_matching: Option<String>,
    pub fail_signing: bool,
}

#[async_trait]
impl ObjectStorage for MockStorage {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<()> {
        if let Some(marker) = &self.fail_uploads_matching {
            if format!("{}/{}", bucket, key).contains(marker.as_str()) {
                bail!("The resource already exists");
            }
        }

        self.uploads.lock().unwrap().push(RecordedUpload {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: body.len(),
        });

        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("http://storage.test/{}/{}", bucket, key)
    }

    async fn create_signed_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String> {
        if self.fail_signing {
            bail!("signer unavailable");
        }
        Ok(format!(
            "http://storage.test/{}/{}?expires={}",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }
}

#[derive(Default)]
pub struct MockSeparator {
    pub output: SeparationOutput,
    pub fail: bool,
    pub calls: AtomicUsize,
    /// Track bytes served by `fetch_track`, keyed by URL.
    pub tracks: HashMap<String, Bytes>,
}

#[async_trait]
impl StemSeparator for MockSeparator {
    async fn separate(&self, _audio_url: &str) -> Result<SeparationOutput> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail {
            bail!("model exploded");
        }
        Ok(self.output.clone())
    }

    async fn fetch_track(&self, url: &str) -> Result<Bytes> {
        match self.tracks.get(url) {
            Some(bytes) => Ok(bytes.clone()),
            None => bail!("no track at {}", url),
        }
    }
}

/// Separator that hands back two downloadable stems.
pub fn stems_separator() -> MockSeparator {
    let vocals = "http://model.test/out/vocals.wav".to_string();
    let accompaniment = "http://model.test/out/accompaniment.wav".to_string();

    let mut tracks = HashMap::new();
    tracks.insert(vocals.clone(), Bytes::from_static(b"RIFFvocals"));
    tracks.insert(accompaniment.clone(), Bytes::from_static(b"RIFFband"));

    MockSeparator {
        output: SeparationOutput {
            vocals: Some(vocals),
            accompaniment: Some(accompaniment),
        },
        tracks,
        ..MockSeparator::default()
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        replicate_api_url: "http://replicate.test".to_string(),
        replicate_api_token: "test-token".to_string(),
        replicate_model: "acme/splitter:abc123".to_string(),
        replicate_stems: "vocals,accompaniment".to_string(),
        minio_endpoint: "http://storage.test".to_string(),
        minio_access_key: "test-access".to_string(),
        minio_secret_key: "test-secret".to_string(),
        uploads_bucket: "audio-uploads".to_string(),
        processed_bucket: "processed-audio".to_string(),
        signed_url_ttl_secs: 3600,
    }
}

pub fn test_state(storage: Arc<MockStorage>, separator: Arc<MockSeparator>) -> AppState {
    AppState::new(test_config(), storage, separator)
}
