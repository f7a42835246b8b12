//! Handler for short URL redirects.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a key to its target URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// The redirect is refused while verification is pending and blocked
/// outright for URLs flagged as unsafe; see
/// [`crate::application::services::RedirectService::resolve`].
///
/// # Click Tracking
///
/// A click event is sent to a bounded channel for async persistence.
/// If the queue is full the click is dropped (fire-and-forget); the
/// redirect itself never waits on the database write.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let short_url = state.redirect_service.resolve(&key).await?;

    let event = ClickEvent::new(
        short_url.id,
        key,
        Some(addr.ip().to_string()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
    );

    if state.click_tx.try_send(event).is_err() {
        metrics::counter!("clicks_dropped_total").increment(1);
        tracing::warn!("click queue full, dropping event");
    }

    Ok(Redirect::temporary(&short_url.target_url))
}
