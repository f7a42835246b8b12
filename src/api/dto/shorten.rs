//! DTOs for the shortening endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api/link`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The target URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional sponsor tag stored on the link.
    #[validate(length(max = 100))]
    pub sponsor: Option<String>,

    /// Request a QR code render after creation.
    #[serde(default)]
    pub qr: bool,
}

/// Request body for `POST /api/user/link`.
///
/// Same as [`ShortenRequest`] plus an optional branded name; branded
/// links are reserved for signed-in users.
#[derive(Debug, Deserialize, Validate)]
pub struct UserShortenRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    #[validate(length(max = 100))]
    pub sponsor: Option<String>,

    /// Request a branded link; requires `name`.
    #[serde(default)]
    pub branded: bool,

    /// User-chosen key. Structural rules are checked on creation;
    /// profanity screening happens asynchronously afterwards.
    pub name: Option<String>,

    #[serde(default)]
    pub qr: bool,
}

/// Response for a created (or deduplicated) short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub key: String,
    /// Full public link, also returned in the `Location` header.
    pub short_url: String,
    pub target_url: String,
    pub branded: bool,
}
