//! Repository trait for the click log.

use crate::domain::entities::NewClick;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for click tracking.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records one redirect event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors. The click worker
    /// retries before dropping the event.
    async fn record(&self, new_click: NewClick) -> Result<(), AppError>;

    /// Total number of clicks recorded for a key.
    ///
    /// Returns `Ok(None)` when the key does not exist.
    async fn count_by_key(&self, key: &str) -> Result<Option<i64>, AppError>;
}
