//! Handlers for the signed-in user's profile and links.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::link::{LinkItem, LinkListResponse};
use crate::api::dto::user::UserResponse;
use crate::domain::entities::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the signed-in user's profile.
///
/// # Endpoint
///
/// `GET /api/user`
pub async fn current_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_user(&user.id).await?;
    Ok(Json(user.into()))
}

/// Lists the user's links with verification state and click totals.
///
/// # Endpoint
///
/// `GET /api/user/links`
pub async fn user_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state
        .user_service
        .list_links(&user.id)
        .await?
        .into_iter()
        .map(|owned| LinkItem::from_owned(owned, &state.base_url))
        .collect();

    Ok(Json(LinkListResponse { links }))
}

/// Deletes one of the user's links.
///
/// # Endpoint
///
/// `DELETE /api/user/links/{id}`
///
/// Responds 404 for links that do not exist or belong to someone else.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_link(id, &user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
