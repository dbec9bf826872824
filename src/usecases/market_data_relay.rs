//! Market Data Relay - Local Changes → Deduplicated Remote Upload
//!
//! The EA overwrites `market_data.json` continuously; change
//! notifications for it are debounced briefly (the writer may still be
//! flushing), then the content is fingerprinted and uploaded only when it
//! actually differs from the last forwarded snapshot. A touched mtime
//! with identical bytes uploads nothing.
//!
//! The fingerprint is recorded only after a successful upload, so a
//! failed push is retried by the next change notification.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, instrument, warn};

use crate::adapters::fs::{DropFolder, FsEvent};
use crate::domain::fingerprint;
use crate::ports::RemoteEndpoint;

use super::status_hub::StatusHub;

/// Local→remote market-data relay.
pub struct MarketDataRelay<R: RemoteEndpoint> {
    remote: Arc<R>,
    folder: Arc<DropFolder>,
    hub: Arc<StatusHub>,
    debounce: Duration,
    last_fingerprint: Option<u64>,
    events: mpsc::UnboundedReceiver<FsEvent>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<R: RemoteEndpoint> MarketDataRelay<R> {
    /// Create a new market-data relay over a root-directory event stream.
    pub fn new(
        remote: Arc<R>,
        folder: Arc<DropFolder>,
        hub: Arc<StatusHub>,
        debounce: Duration,
        events: mpsc::UnboundedReceiver<FsEvent>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            remote,
            folder,
            hub,
            debounce,
            last_fingerprint: None,
            events,
            shutdown_rx,
        }
    }

    /// Run until shutdown or until the event stream closes. Events are
    /// processed one at a time; bursts collapse via the fingerprint check.
    #[instrument(skip(self), name = "market_data_relay")]
    pub async fn run(mut self) {
        debug!(debounce_ms = self.debounce.as_millis(), "Market data relay started");

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown_rx.recv() => break,
                event = self.events.recv() => {
                    match event {
                        Some(event @ (FsEvent::Created(_) | FsEvent::Modified(_)))
                            if event.is_for("market_data.json") =>
                        {
                            self.upload_if_changed().await;
                        }
                        Some(_) => {}
                        None => break,
                    }
                }
            }
        }

        debug!("Market data relay stopped");
    }

    async fn upload_if_changed(&mut self) {
        // Let the EA finish flushing before reading.
        tokio::time::sleep(self.debounce).await;

        let content = match self.folder.read_market_data().await {
            Ok(Some(content)) => content,
            Ok(None) => return,
            Err(e) => {
                self.hub.notify_error(&e);
                return;
            }
        };

        let print = fingerprint(&content);
        if self.last_fingerprint == Some(print) {
            debug!("Market data unchanged, skipping upload");
            return;
        }

        let data: Value = match serde_json::from_str(&content) {
            Ok(data) => data,
            Err(e) => {
                // Likely a partial write the debounce did not cover; the
                // EA's next write triggers another attempt.
                warn!(error = %e, "Market data not parseable this cycle");
                return;
            }
        };

        match self.remote.push_market_data(&data).await {
            Ok(()) => {
                self.last_fingerprint = Some(print);
                self.hub.record_sync("market data uploaded");
            }
            Err(e) => {
                debug!(error = %e, "Market data upload failed");
            }
        }
    }
}
