//! Drop Folder - MT5 File Exchange Layout and Atomic Writes
//!
//! Owns the well-known paths inside the MT5 `Files` directory and the
//! invariant-bearing writes into it. `signal.json` presence doubles as a
//! mailbox mutex between bridge and terminal: the bridge only writes it
//! while absent, the EA deletes it after reading. Writes go to a tmp file
//! first, then rename, so the EA never observes a partial file.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::domain::{BridgeError, Signal};

/// Well-known paths inside the MT5 drop folder.
#[derive(Debug, Clone)]
pub struct DropFolder {
    root: PathBuf,
}

impl DropFolder {
    /// Create a handle for the given drop-folder root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The drop-folder root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the EA polls for pending signals.
    pub fn signals_dir(&self) -> PathBuf {
        self.root.join("signals")
    }

    /// The single pending-signal file.
    pub fn signal_path(&self) -> PathBuf {
        self.signals_dir().join("signal.json")
    }

    /// Bot status republished for the EA to read.
    pub fn status_path(&self) -> PathBuf {
        self.root.join("bot_status.json")
    }

    /// Market data snapshot the EA keeps overwriting.
    pub fn market_data_path(&self) -> PathBuf {
        self.root.join("market_data.json")
    }

    /// Directory the EA drops one file per closed trade into.
    pub fn feedback_dir(&self) -> PathBuf {
        self.root.join("trade_feedback")
    }

    /// Create the subdirectories the bridge and the EA both rely on.
    pub async fn ensure_layout(&self) -> Result<(), BridgeError> {
        fs::create_dir_all(self.signals_dir()).await?;
        fs::create_dir_all(self.feedback_dir()).await?;
        Ok(())
    }

    /// Write the pending signal if, and only if, none is present.
    ///
    /// Returns `false` without touching the file when `signal.json`
    /// already exists; the previous signal is still unconsumed and must
    /// never be clobbered.
    pub async fn write_signal(&self, signal: &Signal) -> Result<bool, BridgeError> {
        let path = self.signal_path();
        if fs::try_exists(&path).await? {
            debug!("Unconsumed signal present, skipping write");
            return Ok(false);
        }

        let json = serde_json::to_string_pretty(signal)?;
        self.write_atomic(&path, &json).await?;
        Ok(true)
    }

    /// Overwrite the local bot status unconditionally (freshest wins).
    pub async fn write_status(&self, status: &Value) -> Result<(), BridgeError> {
        let json = serde_json::to_string_pretty(status)?;
        self.write_atomic(&self.status_path(), &json).await
    }

    /// Read the market-data snapshot, `None` when the EA has not written
    /// one yet (or deleted it).
    pub async fn read_market_data(&self) -> Result<Option<String>, BridgeError> {
        match fs::read_to_string(self.market_data_path()).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List feedback files already sitting in the folder.
    ///
    /// Used by the start-up sweep; create notifications only cover files
    /// that appear while the bridge is watching.
    pub async fn list_feedback_files(&self) -> Result<Vec<PathBuf>, BridgeError> {
        let mut files = Vec::new();
        let mut entries = match fs::read_dir(self.feedback_dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(files),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Atomic write: tmp file in the same directory, then rename.
    async fn write_atomic(&self, path: &Path, content: &str) -> Result<(), BridgeError> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_signal() -> Signal {
        Signal {
            id: "s1".to_string(),
            action: "BUY".to_string(),
            confidence: 0.8,
            stop_loss_pips: 20.0,
            take_profit_pips: 40.0,
            symbol: "EURUSD".to_string(),
            setup_name: "breakout-1h".to_string(),
            timestamp: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn ensure_layout_creates_subdirs() {
        let dir = TempDir::new().unwrap();
        let folder = DropFolder::new(dir.path());

        folder.ensure_layout().await.unwrap();

        assert!(folder.signals_dir().is_dir());
        assert!(folder.feedback_dir().is_dir());
    }

    #[tokio::test]
    async fn write_signal_skips_when_present() {
        let dir = TempDir::new().unwrap();
        let folder = DropFolder::new(dir.path());
        folder.ensure_layout().await.unwrap();

        assert!(folder.write_signal(&sample_signal()).await.unwrap());

        // Second delivery while unconsumed must not touch the file.
        let mut other = sample_signal();
        other.id = "s2".to_string();
        assert!(!folder.write_signal(&other).await.unwrap());

        let content = fs::read_to_string(folder.signal_path()).await.unwrap();
        let on_disk: Signal = serde_json::from_str(&content).unwrap();
        assert_eq!(on_disk.id, "s1");
    }

    #[tokio::test]
    async fn write_signal_leaves_no_tmp_file() {
        let dir = TempDir::new().unwrap();
        let folder = DropFolder::new(dir.path());
        folder.ensure_layout().await.unwrap();

        folder.write_signal(&sample_signal()).await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(folder.signals_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec!["signal.json"]);
    }

    #[tokio::test]
    async fn write_status_overwrites() {
        let dir = TempDir::new().unwrap();
        let folder = DropFolder::new(dir.path());

        folder
            .write_status(&serde_json::json!({"running": true}))
            .await
            .unwrap();
        folder
            .write_status(&serde_json::json!({"running": false}))
            .await
            .unwrap();

        let content = fs::read_to_string(folder.status_path()).await.unwrap();
        assert!(content.contains("false"));
    }

    #[tokio::test]
    async fn read_market_data_tolerates_missing_file() {
        let dir = TempDir::new().unwrap();
        let folder = DropFolder::new(dir.path());

        assert!(folder.read_market_data().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_feedback_files_filters_json() {
        let dir = TempDir::new().unwrap();
        let folder = DropFolder::new(dir.path());
        folder.ensure_layout().await.unwrap();

        fs::write(folder.feedback_dir().join("f1.json"), "{}")
            .await
            .unwrap();
        fs::write(folder.feedback_dir().join("notes.txt"), "x")
            .await
            .unwrap();

        let files = folder.list_feedback_files().await.unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("f1.json"));
    }
}
