//! DTO for click statistics.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ClicksResponse {
    pub key: String,
    pub total_clicks: i64,
}
