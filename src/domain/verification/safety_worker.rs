//! Background worker resolving URL-safety verdicts.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::entities::SafetyVerdict;
use crate::domain::gateways::SafetyGateway;
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::verification::jobs::SafetyCheckJob;

/// Consumes safety-check jobs, queries the gateway, and writes the verdict
/// back to the short URL row.
///
/// Gateway calls are retried with jittered exponential backoff. When the
/// retries are exhausted the row is marked unsafe with a
/// `Verification error` threat type rather than left pending, so the link
/// fails closed instead of hanging in the unchecked state.
pub async fn run_safety_worker(
    mut rx: mpsc::Receiver<SafetyCheckJob>,
    gateway: Arc<dyn SafetyGateway>,
    short_urls: Arc<dyn ShortUrlRepository>,
) {
    while let Some(job) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(100).map(jitter).take(2);

        let verdict = match Retry::spawn(strategy, || gateway.check(&job.target_url)).await {
            Ok(verdict) => verdict,
            Err(e) => {
                metrics::counter!("safety_gateway_failures_total").increment(1);
                tracing::warn!(key = %job.key, "safety gateway failed: {e}");
                SafetyVerdict::verification_error()
            }
        };

        if !verdict.safe {
            metrics::counter!("unsafe_urls_total").increment(1);
        }

        match short_urls.update_safety(&job.key, &verdict).await {
            Ok(true) => {
                tracing::debug!(key = %job.key, safe = verdict.safe, "safety verdict recorded");
            }
            Ok(false) => {
                tracing::warn!(key = %job.key, "safety verdict for unknown key");
            }
            Err(e) => {
                tracing::error!(key = %job.key, "failed to record safety verdict: {e:?}");
            }
        }
    }

    tracing::info!("safety worker stopped");
}
