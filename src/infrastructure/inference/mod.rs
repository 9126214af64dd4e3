use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

pub mod replicate;

/// Stem references handed back by the inference collaborator. Either field
/// may be missing when a run produced unusable output; the caller decides
/// what incomplete output means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeparationOutput {
    pub vocals: Option<String>,
    pub accompaniment: Option<String>,
}

/// Inference collaborator performing the actual source separation. The model
/// host fetches its input itself, so it is addressed by URL rather than by
/// payload.
#[async_trait]
pub trait StemSeparator: Send + Sync {
    /// Run the separation model against a publicly fetchable audio URL,
    /// blocking until the job reaches a terminal state.
    async fn separate(&self, audio_url: &str) -> Result<SeparationOutput>;

    /// Fetch one output track fully into memory.
    async fn fetch_track(&self, url: &str) -> Result<Bytes>;
}
