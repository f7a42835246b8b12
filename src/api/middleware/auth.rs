//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using a Google ID token in the Authorization
/// header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <id_token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract the token from the `Authorization` header
/// 2. Verify it against the identity provider
/// 3. Upsert the user account (first sign-in creates it)
/// 4. Insert [`crate::domain::entities::AuthUser`] as a request extension
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Sign-in is disabled on this deployment
/// - The Authorization header is missing or malformed
/// - The token is invalid, expired, or issued for a different client
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(verifier) = &st.auth else {
        return Err(AppError::unauthorized(
            "Sign-in is not enabled on this deployment",
            serde_json::json!({}),
        ));
    };

    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let identity = verifier.verify(&token).await?;
    st.user_service.process_sign_in(&identity).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
