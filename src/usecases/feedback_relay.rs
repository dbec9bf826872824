//! Feedback Relay - Local Trade Outcomes → Remote, Delete on Success
//!
//! The EA drops one JSON file per closed trade into `trade_feedback/`.
//! Each file is forwarded to the VPS and deleted on confirmed delivery;
//! the deletion is the durable "already sent" marker, so a restart never
//! re-sends what was delivered.
//!
//! The in-memory tracked set only suppresses duplicate notifications for
//! a path while it is in flight or already delivered-but-undeletable. A
//! failed push untracks the path again so a later notification (or the
//! next start-up sweep) retries it.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, instrument, warn};

use crate::adapters::fs::{DropFolder, FsEvent};
use crate::domain::FeedbackEvent;
use crate::ports::RemoteEndpoint;

use super::status_hub::StatusHub;

/// Local→remote trade-feedback relay.
pub struct FeedbackRelay<R: RemoteEndpoint> {
    remote: Arc<R>,
    folder: Arc<DropFolder>,
    hub: Arc<StatusHub>,
    debounce: Duration,
    tracked: HashSet<PathBuf>,
    events: mpsc::UnboundedReceiver<FsEvent>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl<R: RemoteEndpoint> FeedbackRelay<R> {
    /// Create a new feedback relay over a feedback-directory event stream.
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
            tracked: HashSet::new(),
            events,
            shutdown_rx,
        }
    }

    /// Run until shutdown or until the event stream closes.
    ///
    /// Sweeps files already present before watching for new ones: create
    /// notifications only cover files that appear afterwards, and files
    /// written while the bridge was down must still be forwarded.
    #[instrument(skip(self), name = "feedback_relay")]
    pub async fn run(mut self) {
        debug!(debounce_ms = self.debounce.as_millis(), "Feedback relay started");

        match self.folder.list_feedback_files().await {
            Ok(pending) => {
                for path in pending {
                    self.forward(path).await;
                }
            }
            Err(e) => self.hub.notify_error(&e),
        }

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown_rx.recv() => break,
                event = self.events.recv() => {
                    match event {
                        Some(FsEvent::Created(path))
                            if path.extension().is_some_and(|ext| ext == "json") =>
                        {
                            self.forward(path).await;
                        }
                        Some(_) => {}
                        None => break,
                    }
                }
            }
        }

        debug!("Feedback relay stopped");
    }

    async fn forward(&mut self, path: PathBuf) {
        if self.tracked.contains(&path) {
            debug!(path = %path.display(), "Feedback already tracked, skipping");
            return;
        }
        // Track before any await so a duplicate notification arriving
        // behind this one in the queue cannot double-process the file.
        self.tracked.insert(path.clone());

        // Let the EA finish flushing before reading.
        tokio::time::sleep(self.debounce).await;

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File vanished before we read it; nothing to forward.
                self.tracked.remove(&path);
                return;
            }
            Err(e) => {
                self.tracked.remove(&path);
                self.hub.notify_error(&e.into());
                return;
            }
        };

        let event: FeedbackEvent = match serde_json::from_str(&raw) {
            Ok(event) => event,
            Err(e) => {
                // No-op for this cycle; a rewrite or the next sweep retries.
                warn!(path = %path.display(), error = %e, "Feedback file not parseable");
                self.tracked.remove(&path);
                return;
            }
        };

        match self.remote.push_feedback(&event).await {
            Ok(()) => {
                // Deletion is the durable sent-marker. If it fails the
                // path stays tracked so this process never re-sends it.
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    warn!(path = %path.display(), error = %e, "Could not delete forwarded feedback");
                }
                self.hub.record_sync(&format!(
                    "feedback {} {:.1} pips",
                    event.result, event.pips
                ));
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Feedback upload failed");
                self.tracked.remove(&path);
            }
        }
    }
}
