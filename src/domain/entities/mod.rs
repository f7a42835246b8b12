//! Core business data structures.

pub mod click;
pub mod short_url;
pub mod user;

pub use click::NewClick;
pub use short_url::{NewShortUrl, OwnedShortUrl, SafetyVerdict, ShortUrl};
pub use user::{AuthUser, User};
