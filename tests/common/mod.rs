#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::Utc;
use serde_json::json;
use std::net::SocketAddr;
use tokio::sync::mpsc;

use fractal_link::application::services::{
    ClickService, QrService, RedirectService, ShortUrlService, UserService, VerificationQueues,
};
use fractal_link::domain::click_event::ClickEvent;
use fractal_link::domain::entities::{
    AuthUser, NewClick, NewShortUrl, OwnedShortUrl, SafetyVerdict, ShortUrl, User,
};
use fractal_link::domain::gateways::AuthVerifier;
use fractal_link::domain::repositories::{ClickRepository, ShortUrlRepository, UserRepository};
use fractal_link::domain::verification::{BrandedCheckJob, QrJob, SafetyCheckJob};
use fractal_link::error::AppError;
use fractal_link::infrastructure::ws::SessionRegistry;
use fractal_link::state::AppState;
use fractal_link::utils::rate_limiter::RateLimiter;

pub const BASE_URL: &str = "http://localhost:3000";
pub const VALID_TOKEN: &str = "valid-token";
pub const TEST_USER_ID: &str = "sub-123";

/// Shared in-memory backing store for the fake repositories.
#[derive(Default)]
pub struct Store {
    rows: Mutex<HashMap<String, ShortUrl>>,
    clicks: Mutex<Vec<NewClick>>,
    users: Mutex<HashMap<String, User>>,
    next_id: AtomicI64,
}

impl Store {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        })
    }

    /// Inserts a pending row directly, bypassing the service layer.
    pub fn seed(&self, key: &str, target_url: &str, owner: Option<&str>, branded: bool) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = ShortUrl {
            id,
            key: key.to_string(),
            target_url: target_url.to_string(),
            created_at: Utc::now(),
            ip: None,
            sponsor: None,
            owner: owner.map(str::to_string),
            branded,
            branded_valid: None,
            safety: None,
            qr_svg: None,
        };
        self.rows.lock().unwrap().insert(key.to_string(), row);
        id
    }

    pub fn set_safety(&self, key: &str, verdict: SafetyVerdict) {
        if let Some(row) = self.rows.lock().unwrap().get_mut(key) {
            row.safety = Some(verdict);
        }
    }

    pub fn set_branded_valid(&self, key: &str, valid: bool) {
        if let Some(row) = self.rows.lock().unwrap().get_mut(key) {
            row.branded_valid = Some(valid);
        }
    }

    pub fn set_qr(&self, key: &str, svg: &str) {
        if let Some(row) = self.rows.lock().unwrap().get_mut(key) {
            row.qr_svg = Some(svg.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<ShortUrl> {
        self.rows.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn add_click(&self, short_url_id: i64) {
        self.clicks.lock().unwrap().push(NewClick {
            short_url_id,
            ip: None,
            referrer: None,
            user_agent: None,
        });
    }
}

pub struct InMemoryShortUrls(pub Arc<Store>);

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrls {
    async fn create(&self, new: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        if rows.contains_key(&new.key) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "short_urls_key_key" }),
            ));
        }

        let row = ShortUrl {
            id: self.0.next_id.fetch_add(1, Ordering::SeqCst),
            key: new.key.clone(),
            target_url: new.target_url,
            created_at: Utc::now(),
            ip: new.ip,
            sponsor: new.sponsor,
            owner: new.owner,
            branded: new.branded,
            branded_valid: None,
            safety: None,
            qr_svg: None,
        };
        rows.insert(new.key, row.clone());
        Ok(row)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ShortUrl>, AppError> {
        Ok(self.0.rows.lock().unwrap().get(key).cloned())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<OwnedShortUrl>, AppError> {
        let rows = self.0.rows.lock().unwrap();
        let clicks = self.0.clicks.lock().unwrap();

        let mut links: Vec<OwnedShortUrl> = rows
            .values()
            .filter(|r| r.owner.as_deref() == Some(owner))
            .map(|r| OwnedShortUrl {
                total_clicks: clicks.iter().filter(|c| c.short_url_id == r.id).count() as i64,
                short_url: r.clone(),
            })
            .collect();
        links.sort_by(|a, b| b.short_url.created_at.cmp(&a.short_url.created_at));
        Ok(links)
    }

    async fn update_safety(&self, key: &str, verdict: &SafetyVerdict) -> Result<bool, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        match rows.get_mut(key) {
            Some(row) => {
                row.safety = Some(verdict.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_branded_valid(&self, key: &str, valid: bool) -> Result<bool, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        match rows.get_mut(key) {
            Some(row) => {
                row.branded_valid = Some(valid);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn store_qr(&self, key: &str, qr_svg: &str) -> Result<bool, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        match rows.get_mut(key) {
            Some(row) => {
                row.qr_svg = Some(qr_svg.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_owned(&self, id: i64, owner: &str) -> Result<bool, AppError> {
        let mut rows = self.0.rows.lock().unwrap();
        let key = rows
            .iter()
            .find(|(_, r)| r.id == id && r.owner.as_deref() == Some(owner))
            .map(|(k, _)| k.clone());
        match key {
            Some(key) => {
                rows.remove(&key);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub struct InMemoryClicks(pub Arc<Store>);

#[async_trait]
impl ClickRepository for InMemoryClicks {
    async fn record(&self, click: NewClick) -> Result<(), AppError> {
        self.0.clicks.lock().unwrap().push(click);
        Ok(())
    }

    async fn count_by_key(&self, key: &str) -> Result<Option<i64>, AppError> {
        let rows = self.0.rows.lock().unwrap();
        let Some(row) = rows.get(key) else {
            return Ok(None);
        };

        let clicks = self.0.clicks.lock().unwrap();
        Ok(Some(
            clicks.iter().filter(|c| c.short_url_id == row.id).count() as i64,
        ))
    }
}

pub struct InMemoryUsers(pub Arc<Store>);

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.0.users.lock().unwrap().get(id).cloned())
    }

    async fn upsert(&self, user: &AuthUser) -> Result<User, AppError> {
        let mut users = self.0.users.lock().unwrap();
        let entry = users.entry(user.id.clone()).or_insert_with(|| User {
            id: user.id.clone(),
            email: user.email.clone(),
            created_at: Utc::now(),
        });
        entry.email = user.email.clone();
        Ok(entry.clone())
    }
}

/// Accepts exactly [`VALID_TOKEN`] and maps it to [`TEST_USER_ID`].
pub struct StubVerifier;

#[async_trait]
impl AuthVerifier for StubVerifier {
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError> {
        if token == VALID_TOKEN {
            Ok(AuthUser {
                id: TEST_USER_ID.to_string(),
                email: Some("user@example.com".to_string()),
            })
        } else {
            Err(AppError::unauthorized("Invalid ID token", json!({})))
        }
    }
}

/// Receivers for everything the handlers push into the background.
pub struct TestContext {
    pub store: Arc<Store>,
    pub sessions: Arc<SessionRegistry>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
    pub safety_rx: mpsc::Receiver<SafetyCheckJob>,
    pub branded_rx: mpsc::Receiver<BrandedCheckJob>,
    pub qr_rx: mpsc::Receiver<QrJob>,
}

pub fn create_test_state() -> (AppState, TestContext) {
    create_test_state_with_limit(-1)
}

/// Builds an [`AppState`] backed by in-memory fakes, with the given
/// creation limit per client.
pub fn create_test_state_with_limit(limit: i32) -> (AppState, TestContext) {
    let store = Store::new();

    let short_urls: Arc<dyn ShortUrlRepository> = Arc::new(InMemoryShortUrls(store.clone()));
    let clicks: Arc<dyn ClickRepository> = Arc::new(InMemoryClicks(store.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(InMemoryUsers(store.clone()));

    let (click_tx, click_rx) = mpsc::channel(100);
    let (safety_tx, safety_rx) = mpsc::channel(100);
    let (branded_tx, branded_rx) = mpsc::channel(100);
    let (qr_tx, qr_rx) = mpsc::channel(100);

    let queues = VerificationQueues {
        safety_tx,
        branded_tx,
        qr_tx,
    };
    let sessions = Arc::new(SessionRegistry::new());
    let window = Duration::from_secs(3_600);

    let state = AppState {
        db: None,
        base_url: BASE_URL.to_string(),
        short_url_service: Arc::new(ShortUrlService::new(
            short_urls.clone(),
            queues,
            BASE_URL.to_string(),
        )),
        redirect_service: Arc::new(RedirectService::new(short_urls.clone())),
        user_service: Arc::new(UserService::new(users, short_urls.clone())),
        qr_service: Arc::new(QrService::new(short_urls, BASE_URL.to_string(), 250)),
        click_service: Arc::new(ClickService::new(clicks)),
        auth: Some(Arc::new(StubVerifier)),
        sessions: sessions.clone(),
        click_tx,
        ip_limiter: Arc::new(RateLimiter::new(limit, window)),
        user_limiter: Arc::new(RateLimiter::new(limit, window)),
    };

    (
        state,
        TestContext {
            store,
            sessions,
            click_rx,
            safety_rx,
            branded_rx,
            qr_rx,
        },
    )
}

/// Injects a fixed peer address so handlers using `ConnectInfo` work under
/// the mock transport.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
