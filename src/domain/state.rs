//! Observable bridge state and notification payloads.
//!
//! `BridgeState` is the aggregate snapshot the host application binds to;
//! it is owned by the status hub and only ever mutated there. UI layers
//! read it through `watch` snapshots or react to `BridgeEvent`
//! notifications, never through shared mutable fields.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Connectivity phase of a running bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BridgeStatus {
    /// Started, no remote contact yet.
    Connecting,
    /// Last bot-status poll succeeded.
    Active,
    /// Last bot-status poll failed; loops keep retrying.
    Disconnected,
    /// Not running.
    Stopped,
}

impl std::fmt::Display for BridgeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Active => write!(f, "active"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Aggregate bridge state snapshot.
///
/// `sync_count` is monotonically non-decreasing while running and resets
/// to zero on every start. In-memory only, nothing here is durable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeState {
    /// Whether the bridge loops/watchers are currently running.
    pub running: bool,
    /// Current connectivity phase.
    pub status: BridgeStatus,
    /// Successful sync operations since the last start.
    pub sync_count: u64,
    /// Timestamp of the most recent successful sync.
    pub last_sync: Option<DateTime<Utc>>,
}

impl Default for BridgeState {
    fn default() -> Self {
        Self {
            running: false,
            status: BridgeStatus::Stopped,
            sync_count: 0,
            last_sync: None,
        }
    }
}

/// Notification emitted by the status hub.
///
/// Mirrors the three channels the host application binds to: status
/// transitions, non-fatal errors, and sync activity.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// The connectivity phase changed.
    StatusChanged(BridgeStatus),
    /// A non-fatal error was surfaced (local filesystem problems, mostly).
    Error(String),
    /// A sync operation completed, with a short human-readable description.
    Sync {
        /// What was synchronized, e.g. "signal BUY breakout-1h".
        description: String,
    },
}
