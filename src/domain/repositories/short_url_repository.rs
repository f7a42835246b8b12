//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, OwnedShortUrl, SafetyVerdict, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short URLs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`; integration tests use the
///   in-memory fakes in `tests/common`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Creates a new short URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the key already exists and
    /// [`AppError::Internal`] on database errors.
    async fn create(&self, new: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a short URL by its key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_key(&self, key: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Lists an owner's short URLs together with their click totals,
    /// newest first.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<OwnedShortUrl>, AppError>;

    /// Records the safety verdict for a key.
    ///
    /// Returns `Ok(false)` when the key does not exist. The verification
    /// worker treats that as "database not updated yet" and logs it.
    async fn update_safety(&self, key: &str, verdict: &SafetyVerdict) -> Result<bool, AppError>;

    /// Records the branded-name screening result for a key.
    ///
    /// Returns `Ok(false)` when the key does not exist.
    async fn update_branded_valid(&self, key: &str, valid: bool) -> Result<bool, AppError>;

    /// Stores a rendered QR code for a key.
    ///
    /// Returns `Ok(false)` when the key does not exist.
    async fn store_qr(&self, key: &str, qr_svg: &str) -> Result<bool, AppError>;

    /// Deletes a short URL by id, but only when it belongs to `owner`.
    ///
    /// Returns `Ok(true)` if a row was removed.
    async fn delete_owned(&self, id: i64, owner: &str) -> Result<bool, AppError>;
}
