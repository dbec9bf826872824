//! VPS REST API adapters.

pub mod client;
pub mod endpoint;
pub mod types;

pub use client::{ApiClient, ApiClientConfig};
pub use endpoint::HttpRemoteEndpoint;
