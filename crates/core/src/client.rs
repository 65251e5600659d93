//! The News API client.
//!
//! [`NewsApi`] owns its API key and base URL, builds endpoint URLs and hands
//! them to the fetcher. Each operation comes in two forms: one returning a
//! [`NewsRequest`] to await, and a `_with` variant taking a completion
//! callback.
//!
//! # Example
//!
//! ```rust,no_run
//! use newsapi_core::{ArticleQueryParams, NewsApi};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NewsApi::new("YOUR_API_KEY")?;
//!
//! let sources = client.sources(None).send().await?;
//! println!("{}", sources["status"]);
//!
//! let articles = client.articles(&ArticleQueryParams::new("buzzfeed"))?.send().await?;
//! println!("{}", articles["articles"]);
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use tokio::task::JoinHandle;
use url::Url;

use crate::endpoint::{DEFAULT_HOST, build_articles_url, build_sources_url};
use crate::fetch::{FetchConfig, NewsRequest};
use crate::params::{ArticleQueryParams, SourceQueryParams};
use crate::{NewsApiError, Result};

/// Client for the sources and articles endpoints.
///
/// Cloning is cheap enough to share across tasks; clients with different
/// keys or hosts are fully independent.
#[derive(Debug, Clone)]
pub struct NewsApi {
    api_key: String,
    host: String,
    fetch: FetchConfig,
}

impl NewsApi {
    /// Creates a client for the public API.
    ///
    /// Fails with [`NewsApiError::MissingApiKey`] when `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Creates a builder for a client using `api_key`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use newsapi_core::NewsApi;
    ///
    /// let client = NewsApi::builder("KEY")
    ///     .host("http://localhost:8080")
    ///     .timeout(10)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(client.host(), "http://localhost:8080");
    /// ```
    pub fn builder(api_key: impl Into<String>) -> NewsApiBuilder {
        NewsApiBuilder::new(api_key)
    }

    /// Base URL requests are sent to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Timeout applied to each request, if any.
    pub fn timeout(&self) -> Option<u64> {
        self.fetch.timeout
    }

    /// Prepares a sources query. `None` and an empty parameter set are
    /// equivalent.
    pub fn sources(&self, params: Option<&SourceQueryParams>) -> NewsRequest {
        NewsRequest::new(build_sources_url(&self.host, params), self.fetch.clone())
    }

    /// Runs a sources query and reports the outcome to `callback`.
    pub fn sources_with<F>(&self, params: Option<&SourceQueryParams>, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Value>) + Send + 'static,
    {
        self.sources(params).on_complete(callback)
    }

    /// Prepares an articles query.
    ///
    /// A missing `source` is reported here, before any request exists.
    pub fn articles(&self, params: &ArticleQueryParams) -> Result<NewsRequest> {
        let url = build_articles_url(&self.host, params, &self.api_key)?;
        Ok(NewsRequest::new(url, self.fetch.clone()))
    }

    /// Runs an articles query and reports the outcome to `callback`.
    ///
    /// Usage errors are returned directly and the callback is never invoked.
    pub fn articles_with<F>(&self, params: &ArticleQueryParams, callback: F) -> Result<JoinHandle<()>>
    where
        F: FnOnce(Result<Value>) + Send + 'static,
    {
        Ok(self.articles(params)?.on_complete(callback))
    }
}

/// Builder for [`NewsApi`].
pub struct NewsApiBuilder {
    api_key: String,
    host: String,
    fetch: FetchConfig,
}

impl NewsApiBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), host: DEFAULT_HOST.to_string(), fetch: FetchConfig::default() }
    }

    /// Sets the base URL, e.g. `http://127.0.0.1:8080`.
    pub fn host(mut self, value: impl Into<String>) -> Self {
        self.host = value.into();
        self
    }

    /// Sets a per-request timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.fetch.timeout = Some(secs);
        self
    }

    /// Builds the client, validating the key and host.
    pub fn build(self) -> Result<NewsApi> {
        if self.api_key.is_empty() {
            return Err(NewsApiError::MissingApiKey);
        }

        let parsed = Url::parse(&self.host).map_err(|e| NewsApiError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NewsApiError::InvalidUrl(format!(
                "host must use http:// or https://, got {}",
                self.host
            )));
        }

        let host = self.host.trim_end_matches('/').to_string();
        Ok(NewsApi { api_key: self.api_key, host, fetch: self.fetch })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_key() {
        assert!(matches!(NewsApi::new(""), Err(NewsApiError::MissingApiKey)));
        assert!(matches!(NewsApi::new(String::new()), Err(NewsApiError::MissingApiKey)));
    }

    #[test]
    fn test_defaults() {
        let client = NewsApi::new("KEY").unwrap();
        assert_eq!(client.host(), "https://newsapi.org");
        assert_eq!(client.timeout(), None);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = NewsApi::builder("KEY").host("http://localhost:3000/").build().unwrap();
        assert_eq!(client.host(), "http://localhost:3000");
        assert_eq!(client.sources(None).url(), "http://localhost:3000/v1/sources");
    }

    #[test]
    fn test_builder_rejects_bad_host() {
        let result = NewsApi::builder("KEY").host("newsapi.org").build();
        assert!(matches!(result, Err(NewsApiError::InvalidUrl(_))));

        let result = NewsApi::builder("KEY").host("ftp://newsapi.org").build();
        assert!(matches!(result, Err(NewsApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_articles_binds_api_key() {
        let client = NewsApi::new("secret-key").unwrap();
        let request = client.articles(&ArticleQueryParams::new("buzzfeed")).unwrap();
        assert_eq!(
            request.url(),
            "https://newsapi.org/v1/articles?source=buzzfeed&sortBy=top&apiKey=secret-key"
        );
    }

    #[test]
    fn test_articles_missing_source_is_synchronous() {
        let client = NewsApi::new("KEY").unwrap();
        let result = client.articles(&ArticleQueryParams::new(""));
        assert!(matches!(result, Err(NewsApiError::MissingSource)));
    }

    #[test]
    fn test_articles_with_missing_source_never_calls_back() {
        let client = NewsApi::new("KEY").unwrap();
        // No runtime is running: reaching the spawn would panic.
        let result = client.articles_with(&ArticleQueryParams::default(), |_| panic!("callback invoked"));
        assert!(matches!(result, Err(NewsApiError::MissingSource)));
    }

    #[test]
    fn test_sources_none_matches_empty_params() {
        let client = NewsApi::new("KEY").unwrap();
        let empty = SourceQueryParams::new();
        assert_eq!(client.sources(None).url(), client.sources(Some(&empty)).url());
    }

    #[test]
    fn test_independent_clients() {
        let a = NewsApi::new("key-a").unwrap();
        let b = NewsApi::builder("key-b").host("http://localhost:1").build().unwrap();
        let params = ArticleQueryParams::new("bbc-news");

        assert!(a.articles(&params).unwrap().url().ends_with("apiKey=key-a"));
        assert!(b.articles(&params).unwrap().url().starts_with("http://localhost:1/"));
        assert!(b.articles(&params).unwrap().url().ends_with("apiKey=key-b"));
    }
}
