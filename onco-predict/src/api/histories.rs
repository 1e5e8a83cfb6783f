//! Prediction history endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::types::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::models::HistoryView;
use crate::AppState;

/// GET /predict/histories
///
/// Every stored prediction. No pagination; order is store-defined.
pub async fn list_histories(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<HistoryView>>>> {
    let views = state.history.get_all().await?;
    Ok(Json(ApiResponse::success(views)))
}

/// GET /predict/histories/:id
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<HistoryView>>> {
    let view = state
        .history
        .get_one(&id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(ApiResponse::success(view)))
}

/// Build history routes
pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/predict/histories", get(list_histories))
        .route("/predict/histories/:id", get(get_history))
}
