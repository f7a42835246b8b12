//! Handler for click statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::clicks::ClicksResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click total for a key.
///
/// # Endpoint
///
/// `GET /api/clicks/{key}`
pub async fn clicks_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ClicksResponse>, AppError> {
    let total_clicks = state.click_service.count_for_key(&key).await?;

    Ok(Json(ClicksResponse { key, total_clicks }))
}
