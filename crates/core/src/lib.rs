//! Client library for the News API headline endpoints.
//!
//! Two endpoints are covered: the sources listing (`/v1/sources`) and the
//! articles listing (`/v1/articles`). Responses are returned as untyped
//! [`serde_json::Value`]s, exactly as the server sent them.
//!
//! ```rust,no_run
//! use newsapi_core::{NewsApi, SourceQueryParams};
//!
//! # #[tokio::main]
//! # async fn main() -> newsapi_core::Result<()> {
//! let client = NewsApi::new("YOUR_API_KEY")?;
//! let params = SourceQueryParams::new().language("en");
//!
//! // Await the result...
//! let sources = client.sources(Some(&params)).send().await?;
//! println!("{}", sources["sources"]);
//!
//! // ...or hand over a callback.
//! client
//!     .sources_with(None, |res| match res {
//!         Ok(json) => println!("{}", json["status"]),
//!         Err(e) => eprintln!("{e}"),
//!     })
//!     .await
//!     .ok();
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod params;

pub use client::{NewsApi, NewsApiBuilder};
pub use endpoint::{ARTICLES_PATH, DEFAULT_HOST, SOURCES_PATH, build_articles_url, build_sources_url};
pub use error::{NewsApiError, Result};
pub use fetch::{FetchConfig, NewsRequest, fetch_json};
pub use params::{ArticleQueryParams, DEFAULT_SORT_BY, SourceQueryParams};
pub use serde_json::Value;
