use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::modules::separation::dto::ErrorResponse;
use crate::modules::separation::model::Stem;

/// Everything that can go wrong inside the separation chain. Each variant
/// maps to exactly one HTTP status and the uniform failure JSON shape.
#[derive(Debug, Error)]
pub enum SeparationError {
    #[error("File and fileName are required")]
    MissingInput,

    #[error("Failed to upload file: {0}")]
    Upload(String),

    #[error("Failed to separate audio: {0}")]
    Inference(String),

    #[error("Failed to process audio: incomplete separation output")]
    IncompleteOutput,

    #[error("Failed to download {stem} track: {message}")]
    Download { stem: Stem, message: String },

    #[error("Failed to upload {stem} track: {message}")]
    Store { stem: Stem, message: String },

    #[error("Failed to create signed URL: {0}")]
    SignUrl(String),
}

impl SeparationError {
    pub fn status(&self) -> StatusCode {
        match self {
            SeparationError::MissingInput => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SeparationError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
            success: false,
        };
        (self.status(), Json(body)).into_response()
    }
}
