//! Ports to external services used by the verification workers.
//!
//! Concrete implementations live in [`crate::infrastructure::gateway`]
//! (HTTP clients) and [`crate::infrastructure::ws`] (session registry).

use crate::domain::entities::{AuthUser, SafetyVerdict};
use crate::error::AppError;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by external gateways.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Request(String),
    #[error("gateway returned an unexpected payload: {0}")]
    Payload(String),
}

/// Port to the threat-detection API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SafetyGateway: Send + Sync {
    /// Checks a target URL and returns its verdict.
    async fn check(&self, url: &str) -> Result<SafetyVerdict, GatewayError>;
}

/// Port to the branded-name screening API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NameScreeningGateway: Send + Sync {
    /// Returns `true` when the name is acceptable for a branded link.
    async fn screen(&self, name: &str) -> Result<bool, GatewayError>;
}

/// Port to the identity provider that validates bearer tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthVerifier: Send + Sync {
    /// Validates an ID token and returns the authenticated identity.
    async fn verify(&self, token: &str) -> Result<AuthUser, AppError>;
}

/// Port used to push generated QR codes to a connected browser.
#[cfg_attr(test, mockall::automock)]
pub trait QrNotifier: Send + Sync {
    /// Delivers a notification frame for `key` to the owner's session, if
    /// connected. The caller decides the payload.
    ///
    /// Returns `false` when the owner has no live session; the code is still
    /// stored and can be fetched over HTTP.
    fn notify_qr(&self, owner: &str, key: &str, message: &str) -> bool;
}
