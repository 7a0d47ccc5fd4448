//! Background worker draining the click event queue into storage.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;

/// Number of insert attempts per event before it is dropped.
const INSERT_ATTEMPTS: usize = 3;

/// Drains click events and persists them with a small bounded retry.
///
/// Click recording is best-effort by design: the redirect has already been
/// served, so a failed insert is logged and counted, never retried
/// indefinitely or allowed to back up the queue.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
) {
    while let Some(event) = rx.recv().await {
        let link_id = event.link_id;
        let new_click = NewClick {
            link_id,
            referrer: event.referrer,
            device: event.device,
            country: event.country,
            city: event.city,
        };

        let strategy = FixedInterval::new(Duration::from_millis(200)).take(INSERT_ATTEMPTS - 1);
        let result = Retry::spawn(strategy, || {
            let clicks = clicks.clone();
            let new_click = new_click.clone();
            async move { clicks.insert(new_click).await }
        })
        .await;

        match result {
            Ok(()) => {
                metrics::counter!("clicks_recorded_total").increment(1);
            }
            Err(e) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                tracing::warn!(link_id, error = %e, "dropping click event after retries");
            }
        }
    }

    tracing::info!("click queue closed, worker exiting");
}
