use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use tracing::{error, info};

use super::dto::{ErrorResponse, SeparationResponse};
use super::service::SeparationService;
use crate::error::SeparationError;
use crate::state::AppState;

/// Separate an uploaded audio file into vocal and instrumental tracks
/// Proxies the upload through storage and the inference host; the response
/// carries time-limited download links for both stems.
#[utoipa::path(
    post,
    path = "/api/v1/separate",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Separation complete", body = SeparationResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    ),
    tag = "Separation"
)]
pub async fn separate_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut payload: Option<Bytes> = None;
    let mut declared_type: Option<String> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await.unwrap_or(None) {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                declared_type = field.content_type().map(|ct| ct.to_string());
                payload = field.bytes().await.ok();
            }
            "fileName" => {
                file_name = field.text().await.ok().filter(|name| !name.is_empty());
            }
            _ => {}
        }
    }

    let (Some(payload), Some(file_name)) = (payload, file_name) else {
        return SeparationError::MissingInput.into_response();
    };

    // Browsers do not always set a content type on the part; fall back to
    // the extension of the declared name.
    let content_type = declared_type.unwrap_or_else(|| {
        mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string()
    });

    info!("Processing file: {}", file_name);

    match SeparationService::separate(state, &file_name, &content_type, payload).await {
        Ok(res) => (StatusCode::OK, Json(res)).into_response(),
        Err(e) => {
            error!("Error in separate handler: {}", e);
            e.into_response()
        }
    }
}
