//! HTTP request handlers.

pub mod clicks;
pub mod health;
pub mod qr;
pub mod redirect;
pub mod shorten;
pub mod user;
pub mod ws;

pub use clicks::clicks_handler;
pub use health::health_handler;
pub use qr::qr_handler;
pub use redirect::redirect_handler;
pub use shorten::{shorten_handler, user_shorten_handler};
pub use user::{current_user_handler, delete_link_handler, user_links_handler};
pub use ws::ws_handler;
