//! Request URL construction for the sources and articles endpoints.
//!
//! Values are interpolated as given, without percent-encoding. Source ids,
//! categories, language and country codes are URL-safe identifiers.

use crate::params::{ArticleQueryParams, SourceQueryParams};
use crate::{NewsApiError, Result};

/// Base URL of the public News API.
pub const DEFAULT_HOST: &str = "https://newsapi.org";

/// Path of the sources endpoint.
pub const SOURCES_PATH: &str = "/v1/sources";

/// Path of the articles endpoint.
pub const ARTICLES_PATH: &str = "/v1/articles";

/// Builds the articles URL: `{host}/v1/articles?source=..&sortBy=..&apiKey=..`.
///
/// Fails with [`NewsApiError::MissingSource`] when `params.source` is empty.
///
/// # Example
///
/// ```rust
/// use newsapi_core::{ArticleQueryParams, DEFAULT_HOST, build_articles_url};
///
/// let url = build_articles_url(DEFAULT_HOST, &ArticleQueryParams::new("buzzfeed"), "KEY").unwrap();
/// assert_eq!(url, "https://newsapi.org/v1/articles?source=buzzfeed&sortBy=top&apiKey=KEY");
/// ```
pub fn build_articles_url(host: &str, params: &ArticleQueryParams, api_key: &str) -> Result<String> {
    if params.source.is_empty() {
        return Err(NewsApiError::MissingSource);
    }

    Ok(format!(
        "{host}{ARTICLES_PATH}?source={}&sortBy={}&apiKey={api_key}",
        params.source,
        params.effective_sort_by()
    ))
}

/// Builds the sources URL, appending a query string only when at least one
/// parameter has a non-empty value.
///
/// The API key is not part of this URL.
pub fn build_sources_url(host: &str, params: Option<&SourceQueryParams>) -> String {
    let mut url = format!("{host}{SOURCES_PATH}");

    let query = params
        .map(|p| {
            p.query_pairs()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        })
        .unwrap_or_default();

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }

    url
}

/// Replaces the value of the `apiKey` query parameter so URLs can be logged.
pub(crate) fn redact_api_key(url: &str) -> String {
    match url.find("apiKey=") {
        Some(idx) => {
            let start = idx + "apiKey=".len();
            let end = url[start..].find('&').map(|i| start + i).unwrap_or(url.len());
            format!("{}***{}", &url[..start], &url[end..])
        }
        None => url.to_string(),
    }
}
