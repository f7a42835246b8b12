//! Click event model for asynchronous click tracking.

/// An in-memory representation of a click event for async processing.
///
/// Created in the redirect handler after the short URL has been resolved,
/// sent over a bounded channel, and persisted by
/// [`crate::domain::click_worker::run_click_worker`]. This decouples the
/// HTTP response from database writes so redirects stay fast.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub short_url_id: i64,
    pub key: String,
    pub ip: Option<String>,
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

impl ClickEvent {
    pub fn new(
        short_url_id: i64,
        key: String,
        ip: Option<String>,
        referrer: Option<&str>,
        user_agent: Option<&str>,
    ) -> Self {
        Self {
            short_url_id,
            key,
            ip,
            referrer: referrer.map(|s| s.to_string()),
            user_agent: user_agent.map(|s| s.to_string()),
        }
    }
}
