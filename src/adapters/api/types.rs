//! VPS API response envelopes.

use serde::Deserialize;

/// Generic acknowledgement returned by the VPS mutation endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiAck {
    /// Whether the server accepted the request.
    pub success: bool,
    /// Optional human-readable detail.
    #[serde(default)]
    pub message: String,
}
