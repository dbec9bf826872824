//! HTTP Remote Endpoint — Adapter for the VPS Bridge Routes
//!
//! Implements the `RemoteEndpoint` port over the `/api/mt5/*` routes
//! using the shared `ApiClient`. Never creates its own reqwest client.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::client::ApiClient;
use super::types::ApiAck;
use crate::domain::{FeedbackEvent, Signal};
use crate::ports::RemoteEndpoint;

/// VPS endpoint adapter backed by the shared authenticated client.
pub struct HttpRemoteEndpoint {
    /// Shared VPS client with auth header + timeout.
    client: ApiClient,
}

impl HttpRemoteEndpoint {
    /// Create a new endpoint adapter.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteEndpoint for HttpRemoteEndpoint {
    async fn fetch_signal(&self) -> Result<Option<Signal>> {
        let resp = self.client.get("/api/mt5/signal").await?;

        match resp.status() {
            // The VPS answers 404 when no signal is queued.
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let signal = resp
                    .json::<Signal>()
                    .await
                    .context("Failed to parse signal payload")?;
                Ok(Some(signal))
            }
            status => bail!("Fetching signal returned {status}"),
        }
    }

    async fn consume_signal(&self) -> Result<()> {
        let resp = self.client.delete("/api/mt5/signal").await?;
        resp.error_for_status()
            .context("Consuming signal rejected")?;
        Ok(())
    }

    async fn fetch_bot_status(&self) -> Result<Value> {
        let resp = self.client.get("/api/mt5/bot_status").await?;
        let resp = resp
            .error_for_status()
            .context("Fetching bot status rejected")?;
        resp.json::<Value>()
            .await
            .context("Failed to parse bot status payload")
    }

    async fn push_market_data(&self, data: &Value) -> Result<()> {
        let resp = self
            .client
            .put_json("/api/mt5/market_data", &json!({ "data": data }))
            .await?;
        let resp = resp
            .error_for_status()
            .context("Uploading market data rejected")?;

        let ack: ApiAck = resp
            .json()
            .await
            .context("Failed to parse market data ack")?;
        if !ack.success {
            bail!("Server refused market data: {}", ack.message);
        }
        Ok(())
    }

    async fn push_feedback(&self, event: &FeedbackEvent) -> Result<()> {
        let resp = self.client.post_json("/api/mt5/feedback", event).await?;
        let resp = resp
            .error_for_status()
            .context("Uploading feedback rejected")?;

        let ack: ApiAck = resp.json().await.context("Failed to parse feedback ack")?;
        if !ack.success {
            bail!("Server refused feedback: {}", ack.message);
        }
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        self.client.health_check().await
    }
}
