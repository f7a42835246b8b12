//! Background worker persisting click events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;

/// Consumes click events from the channel and persists them.
///
/// Writes are retried with jittered exponential backoff; an event is dropped
/// after the retries are exhausted. Dropped and recorded events are exposed
/// as metrics counters.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
) {
    while let Some(ev) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(50).map(jitter).take(3);

        let result = Retry::spawn(strategy, || {
            clicks.record(NewClick {
                short_url_id: ev.short_url_id,
                ip: ev.ip.clone(),
                referrer: ev.referrer.clone(),
                user_agent: ev.user_agent.clone(),
            })
        })
        .await;

        match result {
            Ok(()) => {
                metrics::counter!("clicks_recorded_total").increment(1);
            }
            Err(e) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                tracing::warn!(key = %ev.key, "dropping click event: {e:?}");
            }
        }
    }

    tracing::info!("click worker stopped");
}
