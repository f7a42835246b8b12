//! User accounts and their link lists.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{AuthUser, OwnedShortUrl, User};
use crate::domain::repositories::{ShortUrlRepository, UserRepository};
use crate::error::AppError;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    short_urls: Arc<dyn ShortUrlRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, short_urls: Arc<dyn ShortUrlRepository>) -> Self {
        Self { users, short_urls }
    }

    /// Records a sign-in: first sight creates the account, later sign-ins
    /// refresh the email claim.
    pub async fn process_sign_in(&self, identity: &AuthUser) -> Result<User, AppError> {
        self.users.upsert(identity).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User, AppError> {
        self.users.find_by_id(id).await?.ok_or_else(|| {
            AppError::not_found("No such user", json!({ "id": id }))
        })
    }

    /// Lists the user's links, newest first, with click totals.
    pub async fn list_links(&self, owner: &str) -> Result<Vec<OwnedShortUrl>, AppError> {
        self.short_urls.list_by_owner(owner).await
    }

    /// Deletes one of the user's links. A link id belonging to someone
    /// else reads as not found.
    pub async fn delete_link(&self, id: i64, owner: &str) -> Result<(), AppError> {
        if self.short_urls.delete_owned(id, owner).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "No such link",
                json!({ "id": id }),
            ))
        }
    }
}
