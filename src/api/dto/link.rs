//! DTOs for the per-user link list.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::OwnedShortUrl;

#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkItem>,
}

/// One of the user's links, with verification state and click total.
#[derive(Debug, Serialize)]
pub struct LinkItem {
    pub id: i64,
    pub key: String,
    pub short_url: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub branded: bool,
    /// `null` while screening is pending.
    pub branded_valid: Option<bool>,
    /// `null` while the safety check is pending.
    pub safe: Option<bool>,
    pub threat_type: Option<String>,
    pub total_clicks: i64,
    pub has_qr: bool,
}

impl LinkItem {
    pub fn from_owned(owned: OwnedShortUrl, base_url: &str) -> Self {
        let su = owned.short_url;
        Self {
            id: su.id,
            short_url: format!("{}/{}", base_url, su.key),
            target_url: su.target_url,
            created_at: su.created_at,
            branded: su.branded,
            branded_valid: su.branded_valid,
            safe: su.safety.as_ref().map(|v| v.safe),
            threat_type: su.safety.and_then(|v| v.threat_type),
            total_clicks: owned.total_clicks,
            has_qr: su.qr_svg.is_some(),
            key: su.key,
        }
    }
}
