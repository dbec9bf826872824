//! Bridge Controller - Lifecycle for Loops and Watchers
//!
//! Owns start/stop/update_path. One start creates one broadcast shutdown
//! scope shared by the two polling loops and the three watcher consumers;
//! stop broadcasts into it, drops the OS watch registrations, then awaits
//! every task so no background write can land after `stop` returns.
//! Cancellation is cooperative: tasks observe it at loop top and after
//! their delays, and in-flight HTTP calls are allowed to complete.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::RecommendedWatcher;
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use crate::adapters::fs::{watch_dir, DropFolder};
use crate::config::BridgeConfig;
use crate::domain::{BridgeEvent, BridgeState};
use crate::ports::RemoteEndpoint;

use super::consumption_watch::ConsumptionWatch;
use super::feedback_relay::FeedbackRelay;
use super::market_data_relay::MarketDataRelay;
use super::signal_relay::SignalRelay;
use super::status_hub::StatusHub;
use super::status_relay::StatusRelay;

/// Everything one running bridge owns. Dropped as a unit on stop.
struct RunningBridge {
    /// Shutdown broadcaster for this run's scope.
    shutdown_tx: broadcast::Sender<()>,
    /// OS watch registrations; dropping them closes the event streams.
    watchers: Vec<RecommendedWatcher>,
    /// Join handles for the loop and watcher-consumer tasks.
    tasks: Vec<JoinHandle<()>>,
    /// Drop-folder root this run was started with.
    root: PathBuf,
}

/// Bridge lifecycle controller.
///
/// The host application holds one controller for the process lifetime and
/// calls `start`/`stop`/`update_path`; everything else is observed through
/// the state and event subscriptions.
pub struct BridgeController<R: RemoteEndpoint> {
    remote: Arc<R>,
    config: BridgeConfig,
    hub: Arc<StatusHub>,
    running: Mutex<Option<RunningBridge>>,
}

impl<R: RemoteEndpoint> BridgeController<R> {
    /// Create a stopped controller.
    pub fn new(remote: Arc<R>, config: BridgeConfig) -> Self {
        Self {
            remote,
            config,
            hub: Arc::new(StatusHub::new()),
            running: Mutex::new(None),
        }
    }

    /// Start the bridge against the given drop-folder root.
    ///
    /// No-op if already running. A drop folder that cannot be prepared is
    /// surfaced through the error channel but does not prevent the loops
    /// from starting; they degrade and self-heal like every other failure.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub async fn start(&self, root: &Path) {
        let mut guard = self.running.lock().await;
        if guard.is_some() {
            debug!("Bridge already running, start is a no-op");
            return;
        }

        self.hub.mark_started();

        let folder = Arc::new(DropFolder::new(root));
        if let Err(e) = folder.ensure_layout().await {
            self.hub.notify_error(&e);
        }

        let (shutdown_tx, _) = broadcast::channel(1);
        let mut watchers = Vec::with_capacity(3);
        let mut tasks = Vec::with_capacity(5);

        // Remote→local polling loops.
        tasks.push(tokio::spawn(
            SignalRelay::new(
                Arc::clone(&self.remote),
                Arc::clone(&folder),
                Arc::clone(&self.hub),
                self.config.signal_poll(),
                shutdown_tx.subscribe(),
            )
            .run(),
        ));
        tasks.push(tokio::spawn(
            StatusRelay::new(
                Arc::clone(&self.remote),
                Arc::clone(&folder),
                Arc::clone(&self.hub),
                self.config.status_poll(),
                shutdown_tx.subscribe(),
            )
            .run(),
        ));

        // Local→remote watchers. A watch that cannot be registered is
        // reported and skipped; the rest of the bridge still runs.
        match watch_dir(&folder.signals_dir()) {
            Ok((watcher, events)) => {
                watchers.push(watcher);
                tasks.push(tokio::spawn(
                    ConsumptionWatch::new(
                        Arc::clone(&self.remote),
                        events,
                        shutdown_tx.subscribe(),
                    )
                    .run(),
                ));
            }
            Err(e) => self.hub.notify_error(&e),
        }

        match watch_dir(folder.root()) {
            Ok((watcher, events)) => {
                watchers.push(watcher);
                tasks.push(tokio::spawn(
                    MarketDataRelay::new(
                        Arc::clone(&self.remote),
                        Arc::clone(&folder),
                        Arc::clone(&self.hub),
                        self.config.market_data_debounce(),
                        events,
                        shutdown_tx.subscribe(),
                    )
                    .run(),
                ));
            }
            Err(e) => self.hub.notify_error(&e),
        }

        match watch_dir(&folder.feedback_dir()) {
            Ok((watcher, events)) => {
                watchers.push(watcher);
                tasks.push(tokio::spawn(
                    FeedbackRelay::new(
                        Arc::clone(&self.remote),
                        Arc::clone(&folder),
                        Arc::clone(&self.hub),
                        self.config.feedback_debounce(),
                        events,
                        shutdown_tx.subscribe(),
                    )
                    .run(),
                ));
            }
            Err(e) => self.hub.notify_error(&e),
        }

        *guard = Some(RunningBridge {
            shutdown_tx,
            watchers,
            tasks,
            root: root.to_path_buf(),
        });

        info!(root = %root.display(), "Bridge started");
    }

    /// Stop the bridge. No-op if not running; safe to call repeatedly and
    /// from process shutdown.
    ///
    /// When this returns, every task has exited and no further local
    /// writes will occur.
    #[instrument(skip(self))]
    pub async fn stop(&self) {
        let mut guard = self.running.lock().await;
        let Some(running) = guard.take() else {
            debug!("Bridge not running, stop is a no-op");
            return;
        };

        let _ = running.shutdown_tx.send(());
        // Unregister the OS watches now; this also closes the event
        // streams so consumers drain and exit.
        drop(running.watchers);

        for task in running.tasks {
            let _ = task.await;
        }

        self.hub.mark_stopped();
        info!("Bridge stopped");
    }

    /// Restart against a new drop-folder root.
    #[instrument(skip_all, fields(root = %new_root.display()))]
    pub async fn update_path(&self, new_root: &Path) {
        self.stop().await;
        self.start(new_root).await;
    }

    /// Drop-folder root of the current run, if running.
    pub async fn current_root(&self) -> Option<PathBuf> {
        self.running.lock().await.as_ref().map(|r| r.root.clone())
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> BridgeState {
        self.hub.snapshot()
    }

    /// Subscribe to aggregate state updates.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<BridgeState> {
        self.hub.subscribe()
    }

    /// Subscribe to discrete bridge events.
    #[must_use]
    pub fn subscribe_events(&self) -> broadcast::Receiver<BridgeEvent> {
        self.hub.subscribe_events()
    }
}
