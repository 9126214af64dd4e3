use serde::Serialize;
use utoipa::ToSchema;

/// Success shape of the separation endpoint. Field names are part of the
/// wire contract with the upload widget.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeparationResponse {
    pub vocals_url: String,
    pub instrumental_url: String,
    pub success: bool,
}

/// Failure shape shared by every error in the chain.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub success: bool,
}
