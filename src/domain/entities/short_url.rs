//! Short URL entity and its verification state.

use chrono::{DateTime, Utc};

/// Safety verdict produced by the threat-detection gateway.
///
/// A row with no verdict is still pending; redirects are refused until the
/// verdict arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyVerdict {
    pub safe: bool,
    pub threat_type: Option<String>,
    pub platform_type: Option<String>,
    pub threat_entry_type: Option<String>,
    pub threat_info: Option<String>,
}

impl SafetyVerdict {
    /// Verdict for a URL with no threat matches.
    pub fn safe() -> Self {
        Self {
            safe: true,
            threat_type: None,
            platform_type: None,
            threat_entry_type: None,
            threat_info: None,
        }
    }

    /// Verdict recorded when the gateway could not be reached; the URL is
    /// treated as unsafe rather than unchecked.
    pub fn verification_error() -> Self {
        Self {
            safe: false,
            threat_type: Some("Verification error".to_string()),
            platform_type: None,
            threat_entry_type: None,
            threat_info: None,
        }
    }
}

/// The mapping between a short key and its target URL.
///
/// `safety` and `branded_valid` start out `None` and are filled in by the
/// background verification workers.
#[derive(Debug, Clone)]
pub struct ShortUrl {
    pub id: i64,
    pub key: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub sponsor: Option<String>,
    pub owner: Option<String>,
    pub branded: bool,
    pub branded_valid: Option<bool>,
    pub safety: Option<SafetyVerdict>,
    pub qr_svg: Option<String>,
}

/// Input data for creating a new short URL.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub key: String,
    pub target_url: String,
    pub ip: Option<String>,
    pub sponsor: Option<String>,
    pub owner: Option<String>,
    pub branded: bool,
}

/// A short URL joined with its click total, as listed for an owner.
#[derive(Debug, Clone)]
pub struct OwnedShortUrl {
    pub short_url: ShortUrl,
    pub total_clicks: i64,
}
