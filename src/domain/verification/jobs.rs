//! Job payloads for the background verification workers.
//!
//! Each short-URL creation fans out into at most three jobs: a safety
//! check, an optional branded-name screening, and an optional QR render.
//! Jobs travel over bounded mpsc channels, one per worker.

/// Asks the safety worker to obtain a verdict for a target URL.
#[derive(Debug, Clone)]
pub struct SafetyCheckJob {
    pub key: String,
    pub target_url: String,
}

/// Asks the branded worker to screen a candidate name.
#[derive(Debug, Clone)]
pub struct BrandedCheckJob {
    pub key: String,
    pub name: String,
}

/// Asks the QR worker to render and store a code for a short URL.
#[derive(Debug, Clone)]
pub struct QrJob {
    pub key: String,
    /// Full short URL encoded into the QR image.
    pub short_url: String,
    /// Owner to notify over the WebSocket channel, when signed in.
    pub owner: Option<String>,
}
