//! Prediction submission endpoint
//!
//! POST /predict with a multipart body carrying the image in field `image`.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::debug;

use super::types::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::models::PredictionRecord;
use crate::AppState;

/// Multipart field holding the image bytes
pub const IMAGE_FIELD: &str = "image";

/// POST /predict
///
/// 201 with the stored record on success (including low-confidence results).
pub async fn submit_prediction(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<PredictionRecord>>)> {
    let mut multipart = multipart.map_err(|e| ApiError::Client {
        status: e.status(),
        message: e.body_text(),
    })?;

    let image = read_image_field(&mut multipart).await?;
    debug!("Received image payload of {} bytes", image.len());

    let outcome = state.pipeline.submit(image).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(outcome.message, outcome.record)),
    ))
}

async fn read_image_field(multipart: &mut Multipart) -> ApiResult<Vec<u8>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field.bytes().await.map_err(multipart_error)?;
            return Ok(bytes.to_vec());
        }
    }

    Err(ApiError::bad_request(format!(
        "missing multipart field '{}'",
        IMAGE_FIELD
    )))
}

/// Body-limit violations become the dedicated 413; anything else keeps axum's status
fn multipart_error(err: MultipartError) -> ApiError {
    let status = err.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::Client {
            status,
            message: err.body_text(),
        }
    }
}

/// Build prediction routes
pub fn predict_routes() -> Router<AppState> {
    Router::new().route("/predict", post(submit_prediction))
}
