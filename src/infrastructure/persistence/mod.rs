//! PostgreSQL-backed repository implementations.

pub mod pg_click_repository;
pub mod pg_short_url_repository;
pub mod pg_user_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
pub use pg_user_repository::PgUserRepository;
