//! Background price refresher
//!
//! Periodically asks the active price source for a fresh quote. A successful
//! fetch replaces the last known price; a failed one leaves it as it was.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use road_api::AppState;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

struct RunningTask {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Cancellable periodic price refresh task
#[derive(Default)]
pub struct PriceRefresher {
    running: Arc<AtomicBool>,
    task: Mutex<Option<RunningTask>>,
}

impl PriceRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start refreshing every `interval`, fetching once immediately.
    ///
    /// Returns `false` without spawning anything if the refresher is
    /// already running or `interval` is zero.
    pub fn start(&self, state: AppState, interval: Duration) -> bool {
        if interval.is_zero() {
            tracing::info!("Price refresher disabled (interval is 0)");
            return false;
        }
        if self.running.swap(true, Ordering::SeqCst) {
            return false; // Already running
        }

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let running = self.running.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // Errors are already logged by the state; keep the old price
                        let _ = state.fetch_price().await;
                    }
                    // Fires on stop() or when the sender is dropped
                    _ = stop_rx.changed() => break,
                }
            }

            running.store(false, Ordering::SeqCst);
            tracing::debug!("Price refresher stopped");
        });

        tracing::info!("Price refresher started (every {}s)", interval.as_secs_f64());

        if let Ok(mut task) = self.task.lock() {
            *task = Some(RunningTask { stop_tx, handle });
        }
        true
    }

    /// Stop the refresher and wait for its task to finish. No-op if not running.
    pub async fn stop(&self) {
        let task = self.task.lock().ok().and_then(|mut task| task.take());

        if let Some(RunningTask { stop_tx, handle }) = task {
            let _ = stop_tx.send(true);
            if let Err(e) = handle.await {
                tracing::warn!("Price refresher task ended abnormally: {}", e);
            }
        }
        self.running.store(false, Ordering::SeqCst);
    }
}
