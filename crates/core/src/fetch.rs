//! JSON fetching over HTTP.
//!
//! [`fetch_json`] performs one GET, buffers the whole body and decodes it.
//! [`NewsRequest`] wraps a ready-to-send URL and offers the two completion
//! channels: awaiting [`NewsRequest::send`], or handing a callback to
//! [`NewsRequest::on_complete`].

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use url::Url;

use crate::endpoint::redact_api_key;
use crate::{NewsApiError, Result};

/// HTTP configuration for fetching endpoint responses.
///
/// There is no timeout by default: a request that never receives a
/// response never completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: Option<u64>,
}

/// Fetches `url` and decodes the body as JSON.
///
/// The decoded value is returned whatever its shape and whatever the HTTP
/// status; the API reports failures as JSON bodies of their own.
pub async fn fetch_json(url: &str, config: &FetchConfig) -> Result<Value> {
    let parsed_url = Url::parse(url).map_err(|e| NewsApiError::InvalidUrl(e.to_string()))?;
    let log_url = redact_api_key(url);

    let mut builder = Client::builder();
    if let Some(secs) = config.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build().map_err(NewsApiError::HttpError)?;

    debug!(url = %log_url, "Sending GET request");

    let response = client
        .get(parsed_url)
        .send()
        .await
        .map_err(|e| transport_error(e, config, &log_url))?;

    let status = response.status();
    if !status.is_success() {
        warn!(url = %log_url, %status, "Non-success status, passing body through");
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error(e, config, &log_url))?;

    debug!(url = %log_url, bytes = body.len(), "Response body received");

    // Invalid UTF-8 becomes U+FFFD before parsing.
    let text = String::from_utf8_lossy(&body);
    serde_json::from_str(&text).map_err(|e| {
        error!(url = %log_url, error = %e, "Response body is not valid JSON");
        NewsApiError::DecodeError(e)
    })
}

fn transport_error(err: reqwest::Error, config: &FetchConfig, log_url: &str) -> NewsApiError {
    error!(url = %log_url, error = %err, "Got error");
    match config.timeout {
        Some(timeout) if err.is_timeout() => NewsApiError::Timeout { timeout },
        _ => NewsApiError::HttpError(err),
    }
}

/// A fully built request that has not been sent yet.
///
/// Dropping it without calling [`send`](NewsRequest::send) or
/// [`on_complete`](NewsRequest::on_complete) performs no I/O.
#[derive(Debug, Clone)]
#[must_use = "a NewsRequest does nothing until sent"]
pub struct NewsRequest {
    url: String,
    config: FetchConfig,
}

impl NewsRequest {
    pub fn new(url: impl Into<String>, config: FetchConfig) -> Self {
        Self { url: url.into(), config }
    }

    /// The URL this request will GET, API key included.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends the request and resolves with the decoded body.
    pub async fn send(self) -> Result<Value> {
        fetch_json(&self.url, &self.config).await
    }

    /// Sends the request on a spawned task and invokes `callback` exactly once
    /// with the outcome.
    ///
    /// Must be called from within a Tokio runtime. The returned handle
    /// completes after the callback has returned.
    pub fn on_complete<F>(self, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Value>) + Send + 'static,
    {
        tokio::spawn(async move {
            let result = self.send().await;
            callback(result);
        })
    }
}
