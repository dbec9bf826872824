//! Filesystem Watch Plumbing - notify Events into Tokio Channels
//!
//! Bridges the synchronous `notify` callback world into async consumers.
//! Watches are registered on directories, not files: the interesting
//! files (`signal.json`, `market_data.json`, feedback files) may not
//! exist yet when the bridge starts, and the consumers filter by file
//! name anyway.
//!
//! Dropping the returned watcher handle unregisters the OS watch and
//! closes the event channel, which is how the controller disposes
//! watchers synchronously on stop.

use std::path::{Path, PathBuf};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::domain::BridgeError;

/// A filesystem change relevant to the bridge, one per affected path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsEvent {
    /// A file appeared.
    Created(PathBuf),
    /// A file's content or metadata changed.
    Modified(PathBuf),
    /// A file was deleted or renamed away.
    Removed(PathBuf),
}

impl FsEvent {
    /// The path the event refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(p) | Self::Modified(p) | Self::Removed(p) => p,
        }
    }

    /// Whether the event's file name matches `name`.
    pub fn is_for(&self, name: &str) -> bool {
        self.path().file_name().is_some_and(|f| f == name)
    }
}

/// Watch a directory (non-recursive) and stream its change events.
///
/// The watcher handle must be kept alive for as long as events are
/// wanted. Events arriving after the receiver is dropped are discarded.
pub fn watch_dir(
    dir: &Path,
) -> Result<(RecommendedWatcher, mpsc::UnboundedReceiver<FsEvent>), BridgeError> {
    let (tx, rx) = mpsc::unbounded_channel();

    let mut watcher =
        notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let Ok(event) = res else { return };
            for path in event.paths {
                let mapped = if event.kind.is_create() {
                    FsEvent::Created(path)
                } else if event.kind.is_modify() {
                    FsEvent::Modified(path)
                } else if event.kind.is_remove() {
                    FsEvent::Removed(path)
                } else {
                    continue;
                };
                // Receiver gone means the bridge is stopping; drop the event.
                let _ = tx.send(mapped);
            }
        })?;

    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, rx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_filters_by_file_name() {
        let ev = FsEvent::Removed(PathBuf::from("/tmp/signals/signal.json"));
        assert!(ev.is_for("signal.json"));
        assert!(!ev.is_for("market_data.json"));
    }

    #[tokio::test]
    async fn watch_dir_reports_creates() {
        let dir = tempfile::TempDir::new().unwrap();
        let (_watcher, mut rx) = watch_dir(dir.path()).unwrap();

        std::fs::write(dir.path().join("probe.json"), "{}").unwrap();

        // OS notification latency; generous timeout keeps this stable.
        let event = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
            .await
            .expect("no fs event within timeout")
            .expect("event channel closed");
        assert!(event.is_for("probe.json"));
    }

    #[test]
    fn watch_dir_rejects_missing_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(watch_dir(&missing).is_err());
    }
}
