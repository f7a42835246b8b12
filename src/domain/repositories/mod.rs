//! Data access trait definitions.
//!
//! These traits are implemented by [`crate::infrastructure::persistence`]
//! and mocked in unit tests.

pub mod click_repository;
pub mod short_url_repository;
pub mod user_repository;

pub use click_repository::ClickRepository;
pub use short_url_repository::ShortUrlRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use short_url_repository::MockShortUrlRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
