//! QR code retrieval with on-demand rendering.

use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::qr::render_svg;

/// Serves stored QR codes and renders missing ones on first request.
pub struct QrService {
    short_urls: Arc<dyn ShortUrlRepository>,
    base_url: String,
    qr_size: u32,
}

impl QrService {
    pub fn new(short_urls: Arc<dyn ShortUrlRepository>, base_url: String, qr_size: u32) -> Self {
        Self {
            short_urls,
            base_url,
            qr_size,
        }
    }

    /// Returns the SVG QR code for a key.
    ///
    /// Rows created without a QR request have none stored; the code is
    /// rendered here and persisted for the next request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown key.
    pub async fn get_qr(&self, key: &str) -> Result<String, AppError> {
        let Some(short_url) = self.short_urls.find_by_key(key).await? else {
            return Err(AppError::not_found(
                "No short URL registered for this key",
                json!({ "key": key }),
            ));
        };

        if let Some(svg) = short_url.qr_svg {
            return Ok(svg);
        }

        let svg = render_svg(&format!("{}/{}", self.base_url, key), self.qr_size)?;
        // Lost writes only cost a re-render on the next request.
        if let Err(e) = self.short_urls.store_qr(key, &svg).await {
            tracing::warn!(%key, "failed to store on-demand QR code: {e:?}");
        }

        Ok(svg)
    }
}
