//! User entity for authenticated accounts.

use chrono::{DateTime, Utc};

/// A registered user. The id is the OAuth2 subject claim, so no local
/// credentials are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Identity extracted from a verified bearer token.
///
/// Inserted as a request extension by the auth middleware and upserted into
/// the users table on first sighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}
