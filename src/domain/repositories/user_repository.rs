//! Repository trait for user accounts.

use crate::domain::entities::{AuthUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by its OAuth2 subject id.
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Inserts the user if unseen, otherwise refreshes the stored email.
    async fn upsert(&self, identity: &AuthUser) -> Result<User, AppError>;
}
