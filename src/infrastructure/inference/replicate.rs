use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, info};

use super::{SeparationOutput, StemSeparator};

const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct ReplicateService {
    /// Authenticated client for the predictions API.
    api: reqwest::Client,
    /// Plain client for output downloads; delivery URLs must not see the
    /// API token.
    download: reqwest::Client,
    base_url: String,
    model: String,
    stems: String,
}

#[derive(Serialize)]
struct CreatePrediction<'a> {
    version: &'a str,
    input: PredictionInput<'a>,
}

#[derive(Serialize)]
struct PredictionInput<'a> {
    audio: &'a str,
    stems: &'a str,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    id: String,
    status: PredictionStatus,
    #[serde(default)]
    output: Option<SeparationOutput>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl PredictionStatus {
    fn is_terminal(self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }
}

impl ReplicateService {
    pub fn new(base_url: &str, api_token: &str, model: &str, stems: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_token))
            .context("Invalid inference API token")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let api = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build inference API client")?;

        Ok(Self {
            api,
            download: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            stems: stems.to_string(),
        })
    }

    /// Model identifiers look like `owner/name:version`; the predictions API
    /// takes the bare version hash.
    fn version(&self) -> &str {
        match self.model.rsplit_once(':') {
            Some((_, version)) => version,
            None => &self.model,
        }
    }

    async fn create_prediction(&self, audio_url: &str) -> Result<Prediction> {
        let body = CreatePrediction {
            version: self.version(),
            input: PredictionInput {
                audio: audio_url,
                stems: &self.stems,
            },
        };

        let response = self
            .api
            .post(format!("{}/v1/predictions", self.base_url))
            // Fast jobs come back synchronously, the rest fall through to
            // polling below.
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .context("Prediction request failed")?
            .error_for_status()
            .context("Prediction request rejected")?;

        response.json().await.context("Malformed prediction")
    }

    async fn get_prediction(&self, id: &str) -> Result<Prediction> {
        let response = self
            .api
            .get(format!("{}/v1/predictions/{}", self.base_url, id))
            .send()
            .await
            .context("Prediction poll failed")?
            .error_for_status()
            .context("Prediction poll rejected")?;

        response.json().await.context("Malformed prediction")
    }
}

#[async_trait]
impl StemSeparator for ReplicateService {
    async fn separate(&self, audio_url: &str) -> Result<SeparationOutput> {
        let mut prediction = self.create_prediction(audio_url).await?;
        info!("Started prediction {}", prediction.id);

        while !prediction.status.is_terminal() {
            sleep(POLL_INTERVAL).await;
            prediction = self.get_prediction(&prediction.id).await?;
            debug!("Prediction {} is {:?}", prediction.id, prediction.status);
        }

        match prediction.status {
            PredictionStatus::Succeeded => Ok(prediction.output.unwrap_or_default()),
            _ => Err(anyhow!(
                "{}",
                prediction
                    .error
                    .unwrap_or_else(|| format!("Prediction {} did not succeed", prediction.id))
            )),
        }
    }

    async fn fetch_track(&self, url: &str) -> Result<Bytes> {
        let response = self
            .download
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?
            .error_for_status()
            .with_context(|| format!("Fetch of {} rejected", url))?;

        response.bytes().await.context("Failed to read track body")
    }
}
