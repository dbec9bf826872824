//! VPS HTTP Client - Authenticated REST API Client
//!
//! Wraps reqwest with the `X-API-Key` header and a request timeout for
//! all VPS API interactions. Deliberately retry-free: the bridge loops
//! retry on their own fixed schedule, so a failed request is simply
//! reported to the caller.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;

/// Header carrying the bot API key, as expected by the VPS.
const API_KEY_HEADER: &str = "X-API-Key";

/// Configuration for the VPS HTTP client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the VPS API.
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Authenticated HTTP client for the VPS trading-bot API.
pub struct ApiClient {
    /// Underlying HTTP client.
    http: Client,
    /// Client configuration.
    config: ApiClientConfig,
}

impl ApiClient {
    /// Create a new VPS client.
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(2)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Execute a GET request. The caller inspects the status code.
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.http
            .get(self.url(path))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Response> {
        self.http
            .delete(self.url(path))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .with_context(|| format!("DELETE {path} failed"))
    }

    /// Execute a PUT request with a JSON body.
    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response> {
        self.http
            .put(self.url(path))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("PUT {path} failed"))
    }

    /// Execute a POST request with a JSON body.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response> {
        self.http
            .post(self.url(path))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {path} failed"))
    }

    /// Check if the API is reachable.
    pub async fn health_check(&self) -> bool {
        match self.get("/api/health").await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Health check failed");
                false
            }
        }
    }
}
