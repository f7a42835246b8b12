//! Redirect key derivation and branded-name validation.
//!
//! Keys are deterministic: the same URL (and owner) always hashes to the
//! same key, which is what makes creation idempotent. Branded links bypass
//! hashing and use a validated, user-chosen name instead.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Hex characters kept from the digest. Matches the length of the original
/// 32-bit hash keys.
const KEY_LENGTH: usize = 8;

/// Compiled regex for branded name validation.
static BRANDED_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$").unwrap());

/// Names that collide with system routes and cannot be used for links.
const RESERVED_NAMES: &[&str] = &["api", "health", "qr", "ws", "static"];

/// Derives the redirect key for a target URL.
///
/// When an owner is given it is mixed into the hash input, so two users
/// shortening the same URL get distinct keys.
pub fn hash_key(url: &str, owner: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    if let Some(owner) = owner {
        hasher.update(b"\x00");
        hasher.update(owner.as_bytes());
    }

    hex::encode(hasher.finalize())[..KEY_LENGTH].to_string()
}

/// Derives an alternative key after a collision, salted with random bytes.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn salted_key(url: &str, owner: Option<&str>) -> String {
    let mut salt = [0u8; 8];
    getrandom::fill(&mut salt).expect("Failed to generate random bytes");

    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    if let Some(owner) = owner {
        hasher.update(b"\x00");
        hasher.update(owner.as_bytes());
    }
    hasher.update(salt);

    hex::encode(hasher.finalize())[..KEY_LENGTH].to_string()
}

/// Validates a user-chosen branded name.
///
/// # Rules
///
/// - Length: 3-40 characters
/// - Lowercase letters, digits, and hyphens; no leading/trailing hyphen
/// - Not a reserved system route
///
/// Profanity screening happens asynchronously after creation; this only
/// enforces the structural rules.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_branded_name(name: &str) -> Result<(), AppError> {
    if name.len() < 3 || name.len() > 40 {
        return Err(AppError::bad_request(
            "Branded name must be 3-40 characters",
            json!({ "provided_length": name.len() }),
        ));
    }

    if !BRANDED_NAME_REGEX.is_match(name) {
        return Err(AppError::bad_request(
            "Branded name can only contain lowercase letters, digits, and hyphens",
            json!({ "name": name }),
        ));
    }

    if RESERVED_NAMES.contains(&name) {
        return Err(AppError::bad_request(
            "This name is reserved",
            json!({ "name": name }),
        ));
    }

    Ok(())
}
