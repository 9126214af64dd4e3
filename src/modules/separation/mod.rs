use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;

use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod service;

/// Uploads are buffered in memory before they are handed to storage, so the
/// default axum body limit is far too small for audio files.
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/separate", post(handler::separate_audio))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
