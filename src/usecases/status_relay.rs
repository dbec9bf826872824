//! Status Relay - Remote→Local Bot-Status Poll and Liveness Signal
//!
//! Every 5 s: fetch the bot status blob and republish it into the drop
//! folder, freshest wins, no dedup. Success and failure of this poll are
//! what drive the Active/Disconnected phase the UI shows. The loop
//! itself never stops on failure.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, instrument};

use crate::adapters::fs::DropFolder;
use crate::domain::BridgeStatus;
use crate::ports::RemoteEndpoint;

use super::status_hub::StatusHub;

/// Remote→local bot-status polling loop.
pub struct StatusRelay<R: RemoteEndpoint> {
    remote: Arc<R>,
    folder: Arc<DropFolder>,
    hub: Arc<StatusHub>,
    period: Duration,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<R: RemoteEndpoint> StatusRelay<R> {
    /// Create a new status relay.
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

    /// Run until shutdown. Ticks immediately so the first remote contact
    /// does not wait a full period.
    #[instrument(skip(self), name = "status_relay")]
    pub async fn run(mut self) {
        debug!(period_ms = self.period.as_millis(), "Status relay started");

        loop {
            self.tick().await;

            tokio::select! {
                biased;
                _ = self.shutdown_rx.recv() => break,
                () = tokio::time::sleep(self.period) => {}
            }
        }

        debug!("Status relay stopped");
    }

    async fn tick(&self) {
        match self.remote.fetch_bot_status().await {
            Ok(status) => {
                if let Err(e) = self.folder.write_status(&status).await {
                    self.hub.notify_error(&e);
                    return;
                }
                self.hub.set_status(BridgeStatus::Active);
            }
            Err(e) => {
                debug!(error = %e, "Bot status fetch failed");
                self.hub.set_status(BridgeStatus::Disconnected);
            }
        }
    }
}
