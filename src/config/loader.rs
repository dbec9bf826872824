//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters, and
//! providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AppConfig =
        toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;

    validate_config(&config)?;

    info!(
        base_url = %config.api.base_url,
        drop_folder = %config.bridge.drop_folder.display(),
        signal_poll_ms = config.bridge.signal_poll_ms,
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
    anyhow::ensure!(
        !config.api.base_url.is_empty(),
        "api.base_url must not be empty"
    );
    anyhow::ensure!(
        !config.api.base_url.ends_with('/'),
        "api.base_url must not end with a slash (routes start with one)"
    );
    anyhow::ensure!(config.api.timeout_ms > 0, "api.timeout_ms must be positive");

    anyhow::ensure!(
        !config.bridge.drop_folder.as_os_str().is_empty(),
        "bridge.drop_folder must not be empty"
    );
    anyhow::ensure!(
        config.bridge.signal_poll_ms > 0,
        "bridge.signal_poll_ms must be positive, got {}",
        config.bridge.signal_poll_ms
    );
    anyhow::ensure!(
        config.bridge.status_poll_ms > 0,
        "bridge.status_poll_ms must be positive, got {}",
        config.bridge.status_poll_ms
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn parses_minimal_config_with_defaults() {
        let toml = r#"
            [api]
            base_url = "http://vps.example.com:8000"

            [bridge]
            drop_folder = "/tmp/mt5/MQL5/Files"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        validate_config(&config).unwrap();

        assert_eq!(config.bridge.signal_poll_ms, 500);
        assert_eq!(config.bridge.status_poll_ms, 5_000);
        assert_eq!(config.bridge.market_data_debounce_ms, 200);
        assert_eq!(config.bridge.feedback_debounce_ms, 300);
        assert_eq!(config.api.timeout_ms, 10_000);
    }

    #[test]
    fn rejects_trailing_slash_base_url() {
        let toml = r#"
            [api]
            base_url = "http://vps.example.com:8000/"

            [bridge]
            drop_folder = "/tmp/mt5"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_zero_poll_period() {
        let toml = r#"
            [api]
            base_url = "http://vps.example.com:8000"

            [bridge]
            drop_folder = "/tmp/mt5"
            signal_poll_ms = 0
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert!(validate_config(&config).is_err());
    }
}
