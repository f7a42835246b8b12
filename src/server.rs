//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, gateway clients, worker spawning, and the
//! Axum server lifecycle.

use crate::application::services::{
    ClickService, QrService, RedirectService, ShortUrlService, UserService, VerificationQueues,
};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::gateways::AuthVerifier;
use crate::domain::verification::branded_worker::run_branded_worker;
use crate::domain::verification::qr_worker::run_qr_worker;
use crate::domain::verification::safety_worker::run_safety_worker;
use crate::infrastructure::gateway::{
    GoogleSafeBrowsingClient, GoogleTokenVerifier, NinjaProfanityFilter,
};
use crate::infrastructure::persistence::{
    PgClickRepository, PgShortUrlRepository, PgUserRepository,
};
use crate::infrastructure::ws::SessionRegistry;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::rate_limiter::RateLimiter;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - External gateway HTTP clients
/// - Background click and verification workers
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if the database connection, migration run, server
/// bind, or server runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let pool = Arc::new(pool);
    let short_url_repository = Arc::new(PgShortUrlRepository::new(pool.clone()));
    let click_repository = Arc::new(PgClickRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, click_repository.clone()));
    tracing::info!("Click worker started");

    let safety_gateway = Arc::new(GoogleSafeBrowsingClient::new(
        http.clone(),
        config.safe_browsing_url.clone(),
        config.safe_browsing_api_key.clone(),
    ));
    let name_gateway = Arc::new(NinjaProfanityFilter::new(
        http.clone(),
        config.profanity_url.clone(),
        config.profanity_api_key.clone(),
    ));
    let sessions = Arc::new(SessionRegistry::new());

    let (safety_tx, safety_rx) = mpsc::channel(config.verify_queue_capacity);
    let (branded_tx, branded_rx) = mpsc::channel(config.verify_queue_capacity);
    let (qr_tx, qr_rx) = mpsc::channel(config.verify_queue_capacity);

    tokio::spawn(run_safety_worker(
        safety_rx,
        safety_gateway,
        short_url_repository.clone(),
    ));
    tokio::spawn(run_branded_worker(
        branded_rx,
        name_gateway,
        short_url_repository.clone(),
    ));
    tokio::spawn(run_qr_worker(
        qr_rx,
        short_url_repository.clone(),
        sessions.clone(),
        config.qr_size,
    ));
    tracing::info!("Verification workers started");

    let auth: Option<Arc<dyn AuthVerifier>> = config.google_client_id.as_ref().map(|client_id| {
        Arc::new(GoogleTokenVerifier::new(
            http.clone(),
            config.tokeninfo_url.clone(),
            client_id.clone(),
        )) as Arc<dyn AuthVerifier>
    });

    let queues = VerificationQueues {
        safety_tx,
        branded_tx,
        qr_tx,
    };
    let rate_window = Duration::from_secs(config.rate_window_secs);

    let state = AppState {
        db: Some(pool),
        base_url: config.base_url.clone(),
        short_url_service: Arc::new(ShortUrlService::new(
            short_url_repository.clone(),
            queues,
            config.base_url.clone(),
        )),
        redirect_service: Arc::new(RedirectService::new(short_url_repository.clone())),
        user_service: Arc::new(UserService::new(
            user_repository,
            short_url_repository.clone(),
        )),
        qr_service: Arc::new(QrService::new(
            short_url_repository,
            config.base_url.clone(),
            config.qr_size,
        )),
        click_service: Arc::new(ClickService::new(click_repository)),
        auth,
        sessions,
        click_tx,
        ip_limiter: Arc::new(RateLimiter::new(config.redirection_limit, rate_window)),
        user_limiter: Arc::new(RateLimiter::new(config.redirection_limit, rate_window)),
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
