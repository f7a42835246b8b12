//! Request and response bodies for the REST API.

pub mod clicks;
pub mod health;
pub mod link;
pub mod shorten;
pub mod user;
