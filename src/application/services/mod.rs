//! Application services orchestrating repositories, queues, and gateways.

pub mod click_service;
pub mod qr_service;
pub mod redirect_service;
pub mod short_url_service;
pub mod user_service;

pub use click_service::ClickService;
pub use qr_service::QrService;
pub use redirect_service::RedirectService;
pub use short_url_service::{CreateShortUrl, CreatedShortUrl, ShortUrlService, VerificationQueues};
pub use user_service::UserService;
