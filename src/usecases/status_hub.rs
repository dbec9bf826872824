//! Status Hub - Single-Writer Bridge State with Change Notifications
//!
//! Replaces ad-hoc shared mutable status with an explicit holder: all
//! mutation goes through the hub (serialized by the `watch` sender), and
//! consumers either take snapshots or subscribe to the two channels:
//! `watch` for the aggregate state, `broadcast` for discrete events.

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::domain::{BridgeError, BridgeEvent, BridgeState, BridgeStatus};

/// Capacity of the event broadcast channel; slow subscribers lag rather
/// than block the bridge.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Single writer for `BridgeState`, notifier for `BridgeEvent`s.
pub struct StatusHub {
    state_tx: watch::Sender<BridgeState>,
    event_tx: broadcast::Sender<BridgeEvent>,
}

impl StatusHub {
    /// Create a hub holding a stopped, zeroed state.
    #[must_use]
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(BridgeState::default());
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { state_tx, event_tx }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BridgeState {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to aggregate state updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BridgeState> {
        self.state_tx.subscribe()
    }

    /// Subscribe to discrete bridge events.
    #[must_use]
    pub fn subscribe_events(&self) -> broadcast::Receiver<BridgeEvent> {
        self.event_tx.subscribe()
    }

    /// Transition the connectivity phase. Emits only on actual change.
    pub fn set_status(&self, status: BridgeStatus) {
        let mut changed = false;
        self.state_tx.send_modify(|state| {
            if state.status != status {
                state.status = status;
                changed = true;
            }
        });

        if changed {
            info!(status = %status, "Bridge status changed");
            let _ = self.event_tx.send(BridgeEvent::StatusChanged(status));
        }
    }

    /// Mark the bridge started: running, connecting, counters reset.
    pub fn mark_started(&self) {
        self.state_tx.send_modify(|state| {
            state.running = true;
            state.status = BridgeStatus::Connecting;
            state.sync_count = 0;
            state.last_sync = None;
        });
        let _ = self
            .event_tx
            .send(BridgeEvent::StatusChanged(BridgeStatus::Connecting));
    }

    /// Mark the bridge stopped.
    pub fn mark_stopped(&self) {
        self.state_tx.send_modify(|state| {
            state.running = false;
            state.status = BridgeStatus::Stopped;
        });
        let _ = self
            .event_tx
            .send(BridgeEvent::StatusChanged(BridgeStatus::Stopped));
    }

    /// Record one successful sync: bump the counter, stamp the time,
    /// notify subscribers.
    pub fn record_sync(&self, description: &str) {
        let mut count = 0;
        self.state_tx.send_modify(|state| {
            state.sync_count += 1;
            state.last_sync = Some(Utc::now());
            count = state.sync_count;
        });

        debug!(sync_count = count, description, "Sync recorded");
        let _ = self.event_tx.send(BridgeEvent::Sync {
            description: description.to_string(),
        });
    }

    /// Surface a non-fatal error to subscribers.
    pub fn notify_error(&self, error: &BridgeError) {
        warn!(error = %error, "Bridge error");
        let _ = self.event_tx.send(BridgeEvent::Error(error.to_string()));
    }
}

impl Default for StatusHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stopped_and_zeroed() {
        let hub = StatusHub::new();
        let state = hub.snapshot();
        assert!(!state.running);
        assert_eq!(state.status, BridgeStatus::Stopped);
        assert_eq!(state.sync_count, 0);
        assert!(state.last_sync.is_none());
    }

    #[test]
    fn set_status_emits_only_on_change() {
        let hub = StatusHub::new();
        let mut events = hub.subscribe_events();

        hub.set_status(BridgeStatus::Active);
        hub.set_status(BridgeStatus::Active);
        hub.set_status(BridgeStatus::Disconnected);

        assert!(matches!(
            events.try_recv().unwrap(),
            BridgeEvent::StatusChanged(BridgeStatus::Active)
        ));
        assert!(matches!(
            events.try_recv().unwrap(),
            BridgeEvent::StatusChanged(BridgeStatus::Disconnected)
        ));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn record_sync_is_monotonic() {
        let hub = StatusHub::new();
        hub.mark_started();
        hub.record_sync("a");
        hub.record_sync("b");

        let state = hub.snapshot();
        assert_eq!(state.sync_count, 2);
        assert!(state.last_sync.is_some());
    }

    #[test]
    fn restart_resets_counters() {
        let hub = StatusHub::new();
        hub.mark_started();
        hub.record_sync("a");
        hub.mark_stopped();

        assert_eq!(hub.snapshot().sync_count, 1);

        hub.mark_started();
        let state = hub.snapshot();
        assert!(state.running);
        assert_eq!(state.sync_count, 0);
        assert!(state.last_sync.is_none());
        assert_eq!(state.status, BridgeStatus::Connecting);
    }
}
