//! Bridge error taxonomy.
//!
//! Covers the error kinds that get surfaced through the error
//! notification channel. Transient network failures are deliberately not
//! here: they never reach the channel, they are logged at their call
//! site and retried on the next scheduled tick or change notification.
//! No error of any kind is fatal to the bridge.

use thiserror::Error;

/// Classified non-fatal bridge errors.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Drop-folder I/O failed; loops keep running.
    #[error("drop folder I/O failed: {0}")]
    Fs(#[from] std::io::Error),

    /// A local file held JSON the bridge could not use this cycle.
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// A filesystem watch could not be registered.
    #[error("filesystem watch failed: {0}")]
    Watch(#[from] notify::Error),
}
