//! Handlers for the shortening endpoints.

use axum::{
    Extension, Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use std::net::SocketAddr;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse, UserShortenRequest};
use crate::application::services::{CreateShortUrl, CreatedShortUrl};
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for an anonymous client.
///
/// # Endpoint
///
/// `POST /api/link`
///
/// Creation is rate-limited per client IP. Responds `201 Created` with a
/// `Location` header, or `200 OK` when an identical mapping already
/// exists.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<ShortenRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ip = addr.ip().to_string();
    if !state.ip_limiter.check(&ip) {
        return Err(AppError::too_many_requests(
            "Too many short URLs created, try again later",
            json!({ "scope": "ip" }),
        ));
    }

    let result = state
        .short_url_service
        .create(CreateShortUrl {
            target_url: payload.url,
            sponsor: payload.sponsor,
            branded: false,
            branded_name: None,
            qr: payload.qr,
            ip: Some(ip),
            owner: None,
        })
        .await?;

    Ok(created_response(result)?)
}

/// Creates a short URL, optionally branded, for the signed-in user.
///
/// # Endpoint
///
/// `POST /api/user/link`
///
/// Rate-limited per user id rather than per IP.
pub async fn user_shorten_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<UserShortenRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if !state.user_limiter.check(&user.id) {
        return Err(AppError::too_many_requests(
            "Too many short URLs created, try again later",
            json!({ "scope": "user" }),
        ));
    }

    let result = state
        .short_url_service
        .create(CreateShortUrl {
            target_url: payload.url,
            sponsor: payload.sponsor,
            branded: payload.branded,
            branded_name: payload.name,
            qr: payload.qr,
            ip: Some(addr.ip().to_string()),
            owner: Some(user.id),
        })
        .await?;

    Ok(created_response(result)?)
}

fn created_response(
    result: CreatedShortUrl,
) -> Result<(StatusCode, HeaderMap, Json<ShortenResponse>), AppError> {
    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::LOCATION,
        HeaderValue::from_str(&result.link)
            .map_err(|_| AppError::internal("Malformed short link", json!({})))?,
    );

    let body = ShortenResponse {
        key: result.short_url.key,
        short_url: result.link,
        target_url: result.short_url.target_url,
        branded: result.short_url.branded,
    };

    Ok((status, headers, Json(body)))
}
