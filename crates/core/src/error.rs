//! Error types for News API operations.
//!
//! This module defines the main error type [`NewsApiError`] which represents
//! everything that can go wrong while building a request URL, fetching it,
//! or decoding the response body.
//!
//! Errors fall into three classes:
//!
//! - **Usage** errors ([`NewsApiError::MissingApiKey`], [`NewsApiError::MissingSource`],
//!   [`NewsApiError::InvalidUrl`]) are returned synchronously, before any
//!   network activity.
//! - **Transport** errors ([`NewsApiError::HttpError`], [`NewsApiError::Timeout`])
//!   are reported on the request's completion channel.
//! - **Decode** errors ([`NewsApiError::DecodeError`]) are reported on the same
//!   channel when the body is not valid JSON.
//!
//! # Example
//!
//! ```rust
//! use newsapi_core::{NewsApi, NewsApiError};
//!
//! match NewsApi::new("") {
//!     Err(NewsApiError::MissingApiKey) => println!("no key"),
//!     Err(e) => println!("Error: {}", e),
//!     Ok(_) => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// Main error type for News API operations.
#[derive(Error, Debug)]
pub enum NewsApiError {
    /// The client was constructed without an API key.
    #[error("No API key specified")]
    MissingApiKey,

    /// An articles query was issued without a `source`.
    #[error("params.source is required")]
    MissingSource,

    /// Invalid base URL provided to the client builder.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps connection failures, DNS failures and
    /// bodies that were cut off mid-stream.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Only produced when a timeout was configured on the client.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The response body could not be parsed as JSON.
    #[error("Failed to decode response body as JSON: {0}")]
    DecodeError(#[from] serde_json::Error),
}

impl NewsApiError {
    /// Returns `true` for errors caused by how the library was called,
    /// as opposed to what happened on the wire.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            NewsApiError::MissingApiKey | NewsApiError::MissingSource | NewsApiError::InvalidUrl(_)
        )
    }
}

/// Result type alias for NewsApiError.
pub type Result<T> = std::result::Result<T, NewsApiError>;
