//! Bridge Domain - Core Types and Invariants
//!
//! Types owned by the synchronization bridge itself, independent of
//! transport (HTTP) and storage (drop folder) details:
//!
//! - `Signal` / `FeedbackEvent`: the two relayed payloads
//! - `BridgeState` / `BridgeStatus` / `BridgeEvent`: observable bridge state
//! - `BridgeError`: the non-fatal error taxonomy
//! - `fingerprint`: content dedup for market-data uploads

pub mod error;
pub mod fingerprint;
pub mod signal;
pub mod state;

pub use error::BridgeError;
pub use fingerprint::fingerprint;
pub use signal::{FeedbackEvent, Signal};
pub use state::{BridgeEvent, BridgeState, BridgeStatus};
