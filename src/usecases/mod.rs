//! Use Cases Layer - Bridge Loops and Lifecycle
//!
//! The five synchronization workers and their shared plumbing. Each
//! worker owns its per-task state (fingerprint, tracked paths) and runs
//! independently under the controller's shutdown scope; the only shared
//! mutable state is `BridgeState` behind the status hub.
//!
//! Use cases:
//! - `BridgeController`: start/stop/update_path lifecycle
//! - `StatusHub`: single-writer state holder + notification channels
//! - `SignalRelay`: remote→local pending-signal poll (500 ms)
//! - `StatusRelay`: remote→local bot-status poll (5 s) + liveness
//! - `ConsumptionWatch`: local signal deletion → consume-signal call
//! - `MarketDataRelay`: local market-data changes → deduplicated upload
//! - `FeedbackRelay`: local feedback files → forward, delete on success

pub mod consumption_watch;
pub mod controller;
pub mod feedback_relay;
pub mod market_data_relay;
pub mod signal_relay;
pub mod status_hub;
pub mod status_relay;

pub use controller::BridgeController;
pub use status_hub::StatusHub;
