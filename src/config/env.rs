use std::env;
use std::str::FromStr;

pub enum EnvKey {
    ServerPort,
    ReplicateApiUrl,
    ReplicateApiToken,
    ReplicateModel,
    ReplicateStems,
    MinioUrl,
    MinioAccessKey,
    MinioSecretKey,
    UploadsBucket,
    ProcessedBucket,
    SignedUrlTtl,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::ReplicateApiUrl => "REPLICATE_API_URL",
            EnvKey::ReplicateApiToken => "REPLICATE_API_TOKEN",
            EnvKey::ReplicateModel => "REPLICATE_MODEL",
            EnvKey::ReplicateStems => "REPLICATE_STEMS",
            EnvKey::MinioUrl => "MINIO_ENDPOINT",
            EnvKey::MinioAccessKey => "AWS_ACCESS_KEY_ID",
            EnvKey::MinioSecretKey => "AWS_SECRET_ACCESS_KEY",
            EnvKey::UploadsBucket => "MINIO_BUCKET_UPLOADS",
            EnvKey::ProcessedBucket => "MINIO_BUCKET_PROCESSED",
            EnvKey::SignedUrlTtl => "SIGNED_URL_TTL_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
