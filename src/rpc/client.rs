// HTTP client for a JSON-RPC 2.0 wallet endpoint

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::types::{RpcRequest, RpcResponse};
use crate::error::{Result, WhitelistError};

pub struct RpcClient {
    client: Client,
    url: String,
    timeout: Option<Duration>,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Client with no request timeout: a request waits as long as the
    /// wallet takes, including while the user answers a prompt.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, None)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.into(),
            timeout,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one request and return the raw `result` value.
    pub async fn request_value(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method, params);

        tracing::debug!(id, method, "Sending JSON-RPC request");

        let response = self
            .client
            .post(&self.url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            // JSON-RPC servers often return an error object alongside a non-2xx status
            let body = response.text().await.unwrap_or_default();
            if let Ok(rpc) = serde_json::from_str::<RpcResponse>(&body) {
                if rpc.error.is_some() {
                    return rpc.into_result();
                }
            }
            return Err(WhitelistError::Decode(format!(
                "{} returned HTTP {}: {}",
                method, status, body
            )));
        }

        let rpc: RpcResponse = response.json().await?;
        let value = rpc.into_result()?;

        tracing::debug!(id, method, "Received JSON-RPC response");

        Ok(value)
    }

    /// Send one request and deserialize the `result`.
    pub async fn request<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R> {
        let value = self.request_value(method, params).await?;
        serde_json::from_value(value)
            .map_err(|e| WhitelistError::Decode(format!("{} result: {}", method, e)))
    }
}
