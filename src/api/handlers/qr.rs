//! Handler serving QR codes.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Returns the QR code for a key as an SVG image.
///
/// # Endpoint
///
/// `GET /qr/{key}`
///
/// Codes requested at creation time are served from storage; anything
/// else is rendered on first request.
pub async fn qr_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let svg = state.qr_service.get_qr(&key).await?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}
