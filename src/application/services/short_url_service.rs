//! Short URL creation.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::verification::jobs::{BrandedCheckJob, QrJob, SafetyCheckJob};
use crate::error::AppError;
use crate::utils::key_generator::{hash_key, salted_key, validate_branded_name};
use crate::utils::url_validator::validate_target_url;

/// Salted retries after the deterministic key collides with a different URL.
const MAX_KEY_ATTEMPTS: usize = 4;

/// Senders for the background verification workers.
#[derive(Clone)]
pub struct VerificationQueues {
    pub safety_tx: mpsc::Sender<SafetyCheckJob>,
    pub branded_tx: mpsc::Sender<BrandedCheckJob>,
    pub qr_tx: mpsc::Sender<QrJob>,
}

/// Validated input for a new short URL.
#[derive(Debug, Clone)]
pub struct CreateShortUrl {
    pub target_url: String,
    pub sponsor: Option<String>,
    /// Explicit branding request; invalid without a name.
    pub branded: bool,
    /// User-chosen key; makes this a branded link.
    pub branded_name: Option<String>,
    /// Request a QR code render after creation.
    pub qr: bool,
    pub ip: Option<String>,
    pub owner: Option<String>,
}

/// Outcome of a creation request.
#[derive(Debug, Clone)]
pub struct CreatedShortUrl {
    pub short_url: ShortUrl,
    /// Full public link, `{base_url}/{key}`.
    pub link: String,
    /// `false` when an identical mapping already existed.
    pub created: bool,
}

/// Creates short URLs and fans out verification jobs.
pub struct ShortUrlService {
    short_urls: Arc<dyn ShortUrlRepository>,
    queues: VerificationQueues,
    base_url: String,
}

impl ShortUrlService {
    pub fn new(
        short_urls: Arc<dyn ShortUrlRepository>,
        queues: VerificationQueues,
        base_url: String,
    ) -> Self {
        Self {
            short_urls,
            queues,
            base_url,
        }
    }

    /// Builds the full public link for a key.
    pub fn link_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url, key)
    }

    /// Creates a short URL, or returns the existing one for an identical
    /// request.
    ///
    /// Hashed links are idempotent per owner and target. Branded links
    /// reserve a user-chosen name and must not collide with anything.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed target URL or
    /// branded name, and [`AppError::Conflict`] when a branded name is
    /// already taken.
    pub async fn create(&self, req: CreateShortUrl) -> Result<CreatedShortUrl, AppError> {
        let target_url = validate_target_url(&req.target_url)?;

        if req.branded && req.branded_name.is_none() {
            return Err(AppError::bad_request(
                "Branded links require a name",
                json!({ "field": "name" }),
            ));
        }

        let (short_url, created) = match &req.branded_name {
            Some(name) => self.create_branded(&req, &target_url, name).await?,
            None => self.create_hashed(&req, &target_url).await?,
        };

        if created {
            self.enqueue_verification(&short_url, req.qr);
        }

        Ok(CreatedShortUrl {
            link: self.link_for(&short_url.key),
            short_url,
            created,
        })
    }

    async fn create_hashed(
        &self,
        req: &CreateShortUrl,
        target_url: &str,
    ) -> Result<(ShortUrl, bool), AppError> {
        let owner = req.owner.as_deref();
        let mut key = hash_key(target_url, owner);

        for attempt in 0..MAX_KEY_ATTEMPTS {
            if let Some(existing) = self.short_urls.find_by_key(&key).await? {
                if existing.target_url == target_url && existing.owner.as_deref() == owner {
                    return Ok((existing, false));
                }

                // Another URL owns this key, re-derive with a salt.
                tracing::debug!(%key, attempt, "key collision, salting");
                key = salted_key(target_url, owner);
                continue;
            }

            match self
                .short_urls
                .create(NewShortUrl {
                    key: key.clone(),
                    target_url: target_url.to_string(),
                    ip: req.ip.clone(),
                    sponsor: req.sponsor.clone(),
                    owner: req.owner.clone(),
                    branded: false,
                })
                .await
            {
                Ok(short_url) => return Ok((short_url, true)),
                // Lost a race on the unique key index, try again.
                Err(AppError::Conflict { .. }) => {
                    key = salted_key(target_url, owner);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Could not derive a free key",
            json!({ "attempts": MAX_KEY_ATTEMPTS }),
        ))
    }

    async fn create_branded(
        &self,
        req: &CreateShortUrl,
        target_url: &str,
        name: &str,
    ) -> Result<(ShortUrl, bool), AppError> {
        validate_branded_name(name)?;

        if let Some(existing) = self.short_urls.find_by_key(name).await? {
            if existing.target_url == target_url && existing.owner == req.owner {
                return Ok((existing, false));
            }
            return Err(AppError::conflict(
                "This name is already taken",
                json!({ "name": name }),
            ));
        }

        let short_url = self
            .short_urls
            .create(NewShortUrl {
                key: name.to_string(),
                target_url: target_url.to_string(),
                ip: req.ip.clone(),
                sponsor: req.sponsor.clone(),
                owner: req.owner.clone(),
                branded: true,
            })
            .await?;

        Ok((short_url, true))
    }

    /// Hands the new row to the background workers. A full queue is logged
    /// and skipped; the row simply stays pending.
    fn enqueue_verification(&self, short_url: &ShortUrl, qr: bool) {
        let safety = SafetyCheckJob {
            key: short_url.key.clone(),
            target_url: short_url.target_url.clone(),
        };
        if self.queues.safety_tx.try_send(safety).is_err() {
            metrics::counter!("verify_jobs_dropped_total", "job" => "safety").increment(1);
            tracing::warn!(key = %short_url.key, "safety queue full, verdict stays pending");
        }

        if short_url.branded {
            let branded = BrandedCheckJob {
                key: short_url.key.clone(),
                name: short_url.key.clone(),
            };
            if self.queues.branded_tx.try_send(branded).is_err() {
                metrics::counter!("verify_jobs_dropped_total", "job" => "branded").increment(1);
                tracing::warn!(key = %short_url.key, "branded queue full, screening stays pending");
            }
        }

        if qr {
            let job = QrJob {
                key: short_url.key.clone(),
                short_url: self.link_for(&short_url.key),
                owner: short_url.owner.clone(),
            };
            if self.queues.qr_tx.try_send(job).is_err() {
                metrics::counter!("verify_jobs_dropped_total", "job" => "qr").increment(1);
                tracing::warn!(key = %short_url.key, "QR queue full, render skipped");
            }
        }
    }
}
