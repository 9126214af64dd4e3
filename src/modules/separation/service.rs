use std::time::Duration;

use bytes::Bytes;
use time::OffsetDateTime;
use tracing::info;

use super::dto::SeparationResponse;
use super::model::{Stem, StoredObject};
use crate::error::SeparationError;
use crate::state::AppState;

pub struct SeparationService;

impl SeparationService {
    /// Run one upload through the full chain: store the original, run the
    /// model, persist both stems, mint download links. Strictly sequential;
    /// the first failing step aborts the rest.
    pub async fn separate(
        state: AppState,
        file_name: &str,
        content_type: &str,
        payload: Bytes,
    ) -> Result<SeparationResponse, SeparationError> {
        let upload_key = timestamped_key(file_name);
        state
            .storage
            .put_object(
                &state.config.uploads_bucket,
                &upload_key,
                payload,
                content_type,
            )
            .await
            .map_err(|e| SeparationError::Upload(e.to_string()))?;

        info!("File uploaded successfully: {}", upload_key);

        // The model host fetches the audio itself; it only needs a URL.
        let audio_url = state
            .storage
            .public_url(&state.config.uploads_bucket, &upload_key);

        info!("Starting vocal separation");

        let output = state
            .separator
            .separate(&audio_url)
            .await
            .map_err(|e| SeparationError::Inference(e.to_string()))?;

        let (vocals_src, instrumental_src) = match (output.vocals, output.accompaniment) {
            (Some(vocals), Some(accompaniment)) => (vocals, accompaniment),
            _ => return Err(SeparationError::IncompleteOutput),
        };

        // Both tracks are pulled into memory before anything lands in the
        // processed bucket.
        let vocals_data = Self::fetch_stem(&state, Stem::Vocals, &vocals_src).await?;
        let instrumental_data =
            Self::fetch_stem(&state, Stem::Instrumental, &instrumental_src).await?;

        let timestamp = unix_millis();
        let vocals = Self::store_stem(&state, Stem::Vocals, vocals_data, timestamp).await?;
        let instrumental =
            Self::store_stem(&state, Stem::Instrumental, instrumental_data, timestamp).await?;

        let ttl = Duration::from_secs(state.config.signed_url_ttl_secs);
        let vocals_url = Self::sign(&state, &vocals, ttl).await?;
        let instrumental_url = Self::sign(&state, &instrumental, ttl).await?;

        info!("Processing complete, returning URLs");

        Ok(SeparationResponse {
            vocals_url,
            instrumental_url,
            success: true,
        })
    }

    async fn fetch_stem(
        state: &AppState,
        stem: Stem,
        source_url: &str,
    ) -> Result<Bytes, SeparationError> {
        state
            .separator
            .fetch_track(source_url)
            .await
            .map_err(|e| SeparationError::Download {
                stem,
                message: e.to_string(),
            })
    }

    async fn store_stem(
        state: &AppState,
        stem: Stem,
        data: Bytes,
        timestamp: i64,
    ) -> Result<StoredObject, SeparationError> {
        let object = StoredObject {
            bucket: state.config.processed_bucket.clone(),
            key: format!("{}-{}.wav", timestamp, stem),
            content_type: "audio/wav".to_string(),
        };

        state
            .storage
            .put_object(&object.bucket, &object.key, data, &object.content_type)
            .await
            .map_err(|e| SeparationError::Store {
                stem,
                message: e.to_string(),
            })?;

        Ok(object)
    }

    async fn sign(
        state: &AppState,
        object: &StoredObject,
        ttl: Duration,
    ) -> Result<String, SeparationError> {
        state
            .storage
            .create_signed_url(&object.bucket, &object.key, ttl)
            .await
            .map_err(|e| SeparationError::SignUrl(e.to_string()))
    }
}

fn unix_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Collision-resistant storage key: time-based prefix plus the caller's
/// file name.
fn timestamped_key(file_name: &str) -> String {
    format!("{}-{}", unix_millis(), file_name)
}
