//! Relayed payload types.
//!
//! `Signal` travels remote→local (VPS bot → MT5 expert advisor) and
//! `FeedbackEvent` travels local→remote (EA trade outcome → VPS bot).
//! Both are relayed verbatim: the bridge never interprets trade semantics,
//! it only needs stable wire names for serialization.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A pending trade instruction fetched from the VPS.
///
/// Written to `signals/signal.json` exactly as received so the EA sees
/// the same shape the bot produced. The local file is a disposable
/// projection; the VPS remains the source of truth until the EA consumes
/// (deletes) it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Unique signal identifier assigned by the bot.
    #[serde(rename = "signal_id")]
    pub id: String,
    /// Trade action, e.g. "BUY" or "SELL". Opaque to the bridge.
    pub action: String,
    /// Bot confidence in the setup, 0.0..=1.0.
    pub confidence: f64,
    /// Stop-loss distance in pips.
    #[serde(rename = "sl_pips")]
    pub stop_loss_pips: f64,
    /// Take-profit distance in pips.
    #[serde(rename = "tp_pips")]
    pub take_profit_pips: f64,
    /// Instrument symbol, e.g. "EURUSD".
    pub symbol: String,
    /// Name of the setup that produced the signal.
    pub setup_name: String,
    /// Emission timestamp (ISO 8601 string from the bot).
    #[serde(default)]
    pub timestamp: String,
}

/// Outcome of a closed trade, read from one `trade_feedback/*.json` file.
///
/// The EA writes one file per closed trade; the bridge forwards the fields
/// the VPS feedback endpoint requires and deletes the file on confirmed
/// delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    /// Identifier of the signal this outcome belongs to.
    pub signal_id: String,
    /// Trade result, e.g. "WIN" or "LOSS". Opaque to the bridge.
    pub result: String,
    /// Realized profit/loss in pips.
    pub pips: f64,
    /// Close timestamp. Defaults to now when the EA omitted it.
    #[serde(default = "default_timestamp")]
    pub timestamp: String,
}

fn default_timestamp() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_roundtrips_wire_names() {
        let json = r#"{
            "signal_id": "s1",
            "action": "BUY",
            "confidence": 0.82,
            "sl_pips": 20.0,
            "tp_pips": 45.0,
            "symbol": "EURUSD",
            "setup_name": "breakout-1h",
            "timestamp": "2024-05-01T10:00:00Z"
        }"#;

        let signal: Signal = serde_json::from_str(json).unwrap();
        assert_eq!(signal.id, "s1");
        assert_eq!(signal.stop_loss_pips, 20.0);

        let out = serde_json::to_string(&signal).unwrap();
        assert!(out.contains("\"signal_id\":\"s1\""));
        assert!(out.contains("\"sl_pips\":20.0"));
        assert!(!out.contains("stop_loss_pips"));
    }

    #[test]
    fn feedback_timestamp_defaults_when_missing() {
        let event: FeedbackEvent =
            serde_json::from_str(r#"{"signal_id":"s1","result":"WIN","pips":12.5}"#).unwrap();
        assert_eq!(event.result, "WIN");
        assert!(!event.timestamp.is_empty());
    }

    #[test]
    fn feedback_rejects_missing_required_fields() {
        let result = serde_json::from_str::<FeedbackEvent>(r#"{"result":"WIN"}"#);
        assert!(result.is_err());
    }
}
