//! Redirect resolution and gating.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::ShortUrl;
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// Resolves keys to redirect targets, refusing anything not yet verified.
pub struct RedirectService {
    short_urls: Arc<dyn ShortUrlRepository>,
}

impl RedirectService {
    pub fn new(short_urls: Arc<dyn ShortUrlRepository>) -> Self {
        Self { short_urls }
    }

    /// Looks up a key and checks that it may be served.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] for an unknown key
    /// - [`AppError::Validation`] while the safety verdict or branded-name
    ///   screening is still pending, or after the name was rejected
    /// - [`AppError::Forbidden`] for a URL flagged as unsafe, with the
    ///   threat details in the error body
    pub async fn resolve(&self, key: &str) -> Result<ShortUrl, AppError> {
        let Some(short_url) = self.short_urls.find_by_key(key).await? else {
            return Err(AppError::not_found(
                "No short URL registered for this key",
                json!({ "key": key }),
            ));
        };

        let Some(verdict) = &short_url.safety else {
            return Err(AppError::safety_pending(key));
        };

        if !verdict.safe {
            metrics::counter!("unsafe_redirects_blocked_total").increment(1);
            return Err(AppError::forbidden(
                "This URL was flagged as unsafe",
                json!({
                    "key": key,
                    "threat_type": verdict.threat_type,
                    "platform_type": verdict.platform_type,
                    "threat_entry_type": verdict.threat_entry_type,
                    "threat_info": verdict.threat_info,
                }),
            ));
        }

        if short_url.branded {
            match short_url.branded_valid {
                None => return Err(AppError::branded_pending(key)),
                Some(false) => {
                    return Err(AppError::bad_request(
                        "This branded name was rejected",
                        json!({ "reason": "branded_rejected", "key": key }),
                    ));
                }
                Some(true) => {}
            }
        }

        Ok(short_url)
    }
}
