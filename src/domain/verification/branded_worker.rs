//! Background worker screening branded link names.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::gateways::NameScreeningGateway;
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::verification::jobs::BrandedCheckJob;

/// Consumes branded-name jobs and stores the screening result.
///
/// A gateway failure rejects the name: a branded link never goes live on
/// an unscreened name.
pub async fn run_branded_worker(
    mut rx: mpsc::Receiver<BrandedCheckJob>,
    gateway: Arc<dyn NameScreeningGateway>,
    short_urls: Arc<dyn ShortUrlRepository>,
) {
    while let Some(job) = rx.recv().await {
        let valid = match gateway.screen(&job.name).await {
            Ok(valid) => valid,
            Err(e) => {
                metrics::counter!("branded_gateway_failures_total").increment(1);
                tracing::warn!(key = %job.key, "name screening failed: {e}");
                false
            }
        };

        match short_urls.update_branded_valid(&job.key, valid).await {
            Ok(true) => {
                tracing::debug!(key = %job.key, valid, "branded screening recorded");
            }
            Ok(false) => {
                tracing::warn!(key = %job.key, "branded screening for unknown key");
            }
            Err(e) => {
                tracing::error!(key = %job.key, "failed to record branded screening: {e:?}");
            }
        }
    }

    tracing::info!("branded worker stopped");
}
