//! Remote Endpoint Port - VPS Trading-Bot API Interface
//!
//! Defines the trait for the remote side of the bridge. The VPS is a
//! black box with no ordering guarantees across calls; every operation
//! is independent and may fail transiently.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{FeedbackEvent, Signal};

/// The five remote operations the bridge invokes.
///
/// All payloads are opaque to the bridge. Implementors should make a
/// single attempt per call: the bridge's retry policy is "try again on
/// the next scheduled tick/event", never an in-call backoff loop.
#[async_trait]
pub trait RemoteEndpoint: Send + Sync + 'static {
    /// Fetch the pending signal, if the bot has one queued.
    ///
    /// `None` means no signal is pending (not an error).
    async fn fetch_signal(&self) -> anyhow::Result<Option<Signal>>;

    /// Tell the bot the current signal was consumed locally, so it may
    /// advance to the next one. Fire-and-forget from the caller's view.
    async fn consume_signal(&self) -> anyhow::Result<()>;

    /// Fetch the bot status blob. Opaque JSON, republished locally as-is.
    async fn fetch_bot_status(&self) -> anyhow::Result<Value>;

    /// Upload the latest market-data snapshot.
    async fn push_market_data(&self, data: &Value) -> anyhow::Result<()>;

    /// Upload one trade-outcome event. `Ok(())` means confirmed delivery;
    /// the caller may delete the local file.
    async fn push_feedback(&self, event: &FeedbackEvent) -> anyhow::Result<()>;

    /// Check if the remote API is reachable.
    async fn is_healthy(&self) -> bool;
}
