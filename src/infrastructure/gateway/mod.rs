//! HTTP clients for external services.

pub mod google_auth;
pub mod profanity;
pub mod safe_browsing;

pub use google_auth::GoogleTokenVerifier;
pub use profanity::NinjaProfanityFilter;
pub use safe_browsing::GoogleSafeBrowsingClient;
