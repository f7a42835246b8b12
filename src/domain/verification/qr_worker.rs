//! Background worker rendering QR codes.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;

use crate::domain::gateways::QrNotifier;
use crate::domain::repositories::ShortUrlRepository;
use crate::domain::verification::jobs::QrJob;
use crate::utils::qr::render_svg;

/// Consumes QR jobs: renders the short URL as an SVG code, stores it on the
/// row, and pushes it to the owner's WebSocket session when one is open.
pub async fn run_qr_worker(
    mut rx: mpsc::Receiver<QrJob>,
    short_urls: Arc<dyn ShortUrlRepository>,
    notifier: Arc<dyn QrNotifier>,
    qr_size: u32,
) {
    while let Some(job) = rx.recv().await {
        let svg = match render_svg(&job.short_url, qr_size) {
            Ok(svg) => svg,
            Err(e) => {
                tracing::error!(key = %job.key, "failed to render QR code: {e:?}");
                continue;
            }
        };

        match short_urls.store_qr(&job.key, &svg).await {
            Ok(true) => {
                metrics::counter!("qr_codes_rendered_total").increment(1);
            }
            Ok(false) => {
                tracing::warn!(key = %job.key, "QR code rendered for unknown key");
                continue;
            }
            Err(e) => {
                tracing::error!(key = %job.key, "failed to store QR code: {e:?}");
                continue;
            }
        }

        if let Some(owner) = &job.owner {
            let message = json!({
                "type": "qr",
                "key": job.key,
                "qr_svg": svg,
            })
            .to_string();

            if notifier.notify_qr(owner, &job.key, &message) {
                tracing::debug!(key = %job.key, %owner, "QR code pushed to session");
            }
        }
    }

    tracing::info!("QR worker stopped");
}
