//! Consumption Watch - Local Signal Deletion → Remote Advance
//!
//! The EA consumes a signal by deleting `signals/signal.json`. This
//! watcher turns that deletion into a best-effort consume-signal call so
//! the VPS may queue the next one. A lost call is harmless: the VPS will
//! re-serve a stale signal, and the signal relay's presence check still
//! prevents double delivery.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, instrument};

use crate::adapters::fs::FsEvent;
use crate::ports::RemoteEndpoint;

/// Local→remote signal-consumption notifier.
pub struct ConsumptionWatch<R: RemoteEndpoint> {
    remote: Arc<R>,
    events: mpsc::UnboundedReceiver<FsEvent>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<R: RemoteEndpoint> ConsumptionWatch<R> {
    /// Create a new consumption watcher over a signal-directory event stream.
    pub fn new(
        remote: Arc<R>,
        events: mpsc::UnboundedReceiver<FsEvent>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            remote,
            events,
            shutdown_rx,
        }
    }

    /// Run until shutdown or until the event stream closes.
    #[instrument(skip(self), name = "consumption_watch")]
    pub async fn run(mut self) {
        debug!("Consumption watch started");

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown_rx.recv() => break,
                event = self.events.recv() => {
                    match event {
                        Some(event @ FsEvent::Removed(_)) if event.is_for("signal.json") => {
                            self.forward_consumption().await;
                        }
                        Some(_) => {}
                        None => break,
                    }
                }
            }
        }

        debug!("Consumption watch stopped");
    }

    async fn forward_consumption(&self) {
        match self.remote.consume_signal().await {
            Ok(()) => debug!("Signal consumption forwarded"),
            Err(e) => {
                // Fire-and-forget: the VPS re-serves and the relay's
                // presence check holds the invariant.
                debug!(error = %e, "Consume-signal call failed");
            }
        }
    }
}
