//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{key}`                - Short link redirect (public)
//! - `GET    /health`               - Health check: DB, click queue (public)
//! - `GET    /qr/{key}`             - QR code for a link (public)
//! - `GET    /ws?token=...`         - QR push channel (ID token required)
//! - `POST   /api/link`             - Create a short URL (public, IP rate limit)
//! - `GET    /api/clicks/{key}`     - Click total for a link (public)
//! - `POST   /api/user/link`        - Create a short URL, optionally branded (ID token)
//! - `GET    /api/user`             - Signed-in user's profile (ID token)
//! - `GET    /api/user/links`       - Signed-in user's links (ID token)
//! - `DELETE /api/user/links/{id}`  - Delete one of the user's links (ID token)
//! - `/static/*`                    - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Google ID token on the `/api/user` subtree
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    clicks_handler, current_user_handler, delete_link_handler, health_handler, qr_handler,
    redirect_handler, shorten_handler, user_links_handler, user_shorten_handler, ws_handler,
};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::{delete, get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let user_routes = Router::new()
        .route("/user", get(current_user_handler))
        .route("/user/link", post(user_shorten_handler))
        .route("/user/links", get(user_links_handler))
        .route("/user/links/{id}", delete(delete_link_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api_router = Router::new()
        .route("/link", post(shorten_handler))
        .route("/clicks/{key}", get(clicks_handler))
        .merge(user_routes);

    let router = Router::new()
        .route_service("/", ServeFile::new("static/index.html"))
        .route("/{key}", get(redirect_handler))
        .route("/health", get(health_handler))
        .route("/qr/{key}", get(qr_handler))
        .route("/ws", get(ws_handler))
        .nest("/api", api_router)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
