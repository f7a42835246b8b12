//! Shared application state injected into all handlers.

use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::mpsc;

use crate::application::services::{
    ClickService, QrService, RedirectService, ShortUrlService, UserService,
};
use crate::domain::click_event::ClickEvent;
use crate::domain::gateways::AuthVerifier;
use crate::infrastructure::ws::SessionRegistry;
use crate::utils::rate_limiter::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    /// `None` in handler tests; the health check then skips the DB probe.
    pub db: Option<Arc<PgPool>>,
    pub base_url: String,

    pub short_url_service: Arc<ShortUrlService>,
    pub redirect_service: Arc<RedirectService>,
    pub user_service: Arc<UserService>,
    pub qr_service: Arc<QrService>,
    pub click_service: Arc<ClickService>,

    /// `None` when no OAuth2 client id is configured; the per-user API and
    /// WebSocket endpoint respond 401.
    pub auth: Option<Arc<dyn AuthVerifier>>,
    pub sessions: Arc<SessionRegistry>,

    pub click_tx: mpsc::Sender<ClickEvent>,
    /// Creation limiter for anonymous requests, keyed by client IP.
    pub ip_limiter: Arc<RateLimiter>,
    /// Creation limiter for signed-in requests, keyed by user id.
    pub user_limiter: Arc<RateLimiter>,
}
