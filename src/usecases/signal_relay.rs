//! Signal Relay - Remote→Local Pending-Signal Poll
//!
//! Polls the VPS every 500 ms (latency-sensitive, so a constant period
//! with no backoff) and materializes the pending signal into the drop
//! folder. The core idempotency rule lives here: while `signal.json`
//! exists the previous signal is unconsumed and nothing is written, so a
//! signal is delivered at most once per consumption cycle no matter how
//! often the VPS re-serves it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, instrument};

use crate::adapters::fs::DropFolder;
use crate::ports::RemoteEndpoint;

use super::status_hub::StatusHub;

/// Remote→local signal polling loop.
pub struct SignalRelay<R: RemoteEndpoint> {
    remote: Arc<R>,
    folder: Arc<DropFolder>,
    hub: Arc<StatusHub>,
    period: Duration,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<R: RemoteEndpoint> SignalRelay<R> {
    /// Create a new signal relay.
    pub fn new(
        remote: Arc<R>,
        folder: Arc<DropFolder>,
        hub: Arc<StatusHub>,
        period: Duration,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            remote,
            folder,
            hub,
            period,
            shutdown_rx,
        }
    }

    /// Run until shutdown. Ticks immediately, then every `period`.
    #[instrument(skip(self), name = "signal_relay")]
    pub async fn run(mut self) {
        debug!(period_ms = self.period.as_millis(), "Signal relay started");

        loop {
            self.tick().await;

            tokio::select! {
                biased;
                _ = self.shutdown_rx.recv() => break,
                () = tokio::time::sleep(self.period) => {}
            }
        }

        debug!("Signal relay stopped");
    }

    async fn tick(&self) {
        let signal = match self.remote.fetch_signal().await {
            Ok(Some(signal)) => signal,
            Ok(None) => return,
            Err(e) => {
                // Network down; the next tick retries.
                debug!(error = %e, "Signal fetch failed");
                return;
            }
        };

        match self.folder.write_signal(&signal).await {
            Ok(true) => {
                self.hub.record_sync(&format!(
                    "signal {} {}",
                    signal.action, signal.setup_name
                ));
            }
            Ok(false) => {
                // Previous signal still unconsumed; nothing to do.
            }
            Err(e) => self.hub.notify_error(&e),
        }
    }
}
