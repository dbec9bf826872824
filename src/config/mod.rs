//! Configuration Module - TOML-based Bridge Configuration
//!
//! Loads and validates configuration from `config.toml`. The API key may
//! also come from the `BOT_API_KEY` environment variable so it can stay
//! out of the file.

pub mod loader;

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level bridge configuration.
///
/// Loaded from `config.toml` at startup and validated before the bridge
/// begins operation.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// VPS API endpoint and credentials.
    pub api: ApiConfig,
    /// Bridge cadence and drop-folder location.
    pub bridge: BridgeConfig,
}

/// VPS API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the VPS trading-bot API.
    pub base_url: String,
    /// API key. Falls back to the `BOT_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiConfig {
    /// Effective API key: config value, else `BOT_API_KEY`, else empty.
    #[must_use]
    pub fn effective_api_key(&self) -> String {
        self.api_key
            .clone()
            .or_else(|| std::env::var("BOT_API_KEY").ok())
            .unwrap_or_default()
    }
}

/// Bridge cadence and drop-folder configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Root of the MT5 drop folder (the terminal's `Files` directory).
    pub drop_folder: PathBuf,
    /// Pending-signal poll period in milliseconds.
    #[serde(default = "default_signal_poll_ms")]
    pub signal_poll_ms: u64,
    /// Bot-status poll period in milliseconds.
    #[serde(default = "default_status_poll_ms")]
    pub status_poll_ms: u64,
    /// Settle delay after a market-data change notification.
    #[serde(default = "default_market_data_debounce_ms")]
    pub market_data_debounce_ms: u64,
    /// Settle delay after a feedback-file create notification.
    #[serde(default = "default_feedback_debounce_ms")]
    pub feedback_debounce_ms: u64,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl BridgeConfig {
    /// Pending-signal poll period.
    #[must_use]
    pub fn signal_poll(&self) -> Duration {
        Duration::from_millis(self.signal_poll_ms)
    }

    /// Bot-status poll period.
    #[must_use]
    pub fn status_poll(&self) -> Duration {
        Duration::from_millis(self.status_poll_ms)
    }

    /// Market-data debounce delay.
    #[must_use]
    pub fn market_data_debounce(&self) -> Duration {
        Duration::from_millis(self.market_data_debounce_ms)
    }

    /// Feedback debounce delay.
    #[must_use]
    pub fn feedback_debounce(&self) -> Duration {
        Duration::from_millis(self.feedback_debounce_ms)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            drop_folder: PathBuf::new(),
            signal_poll_ms: default_signal_poll_ms(),
            status_poll_ms: default_status_poll_ms(),
            market_data_debounce_ms: default_market_data_debounce_ms(),
            feedback_debounce_ms: default_feedback_debounce_ms(),
            log_level: default_log_level(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_signal_poll_ms() -> u64 {
    500
}

fn default_status_poll_ms() -> u64 {
    5_000
}

fn default_market_data_debounce_ms() -> u64 {
    200
}

fn default_feedback_debounce_ms() -> u64 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}
