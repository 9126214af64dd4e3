use crate::config::env::{self, EnvKey};

/// Versioned model identifier submitted to the inference host. Override with
/// REPLICATE_MODEL when the provider rotates the version hash.
const DEFAULT_MODEL: &str =
    "cjwbw/deezer-spleeter:583719b4d6c2e81f9ce5a6a2b8f6d1e6c1c5b7d2c6b1b3f2e8c4f5a6b7c8d9e0";

const DEFAULT_STEMS: &str = "vocals,accompaniment";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub replicate_api_url: String,
    pub replicate_api_token: String,
    pub replicate_model: String,
    pub replicate_stems: String,
    pub minio_endpoint: String,
    pub minio_access_key: String,
    pub minio_secret_key: String,
    pub uploads_bucket: String,
    pub processed_bucket: String,
    pub signed_url_ttl_secs: u64,
}

impl AppConfig {
    pub fn new() -> Result<Self, std::env::VarError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            replicate_api_url: env::get_or(EnvKey::ReplicateApiUrl, "https://api.replicate.com"),
            replicate_api_token: env::get(EnvKey::ReplicateApiToken)?,
            replicate_model: env::get_or(EnvKey::ReplicateModel, DEFAULT_MODEL),
            replicate_stems: env::get_or(EnvKey::ReplicateStems, DEFAULT_STEMS),
            minio_endpoint: env::get(EnvKey::MinioUrl)?,
            minio_access_key: env::get(EnvKey::MinioAccessKey)?,
            minio_secret_key: env::get(EnvKey::MinioSecretKey)?,
            uploads_bucket: env::get_or(EnvKey::UploadsBucket, "audio-uploads"),
            processed_bucket: env::get_or(EnvKey::ProcessedBucket, "processed-audio"),
            signed_url_ttl_secs: env::get_parsed(EnvKey::SignedUrlTtl, 3600),
        })
    }
}
