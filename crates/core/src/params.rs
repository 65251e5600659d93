//! Query parameter types for the two News API endpoints.
//!
//! [`SourceQueryParams`] keeps its pairs in insertion order, which is the
//! order they are serialized in. [`ArticleQueryParams`] carries the required
//! `source` and an optional `sortBy`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sort order used for articles when none is given.
pub const DEFAULT_SORT_BY: &str = "top";

/// Filters for the sources endpoint.
///
/// Every pair with a non-empty value is serialized, in the order the keys
/// were first set.
///
/// # Example
///
/// ```rust
/// use newsapi_core::SourceQueryParams;
///
/// let params = SourceQueryParams::new().category("general").language("en");
/// assert_eq!(params.query_pairs().count(), 2);
/// ```
///
/// With serde it reads and writes as a map, keeping key order:
/// `{"category":"general","language":"en"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceQueryParams {
    pairs: Vec<(String, String)>,
}

impl SourceQueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a parameter set from `(key, value)` pairs, keeping their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    /// Sets the `category` filter.
    pub fn category(self, value: impl Into<String>) -> Self {
        self.param("category", value)
    }

    /// Sets the `language` filter.
    pub fn language(self, value: impl Into<String>) -> Self {
        self.param("language", value)
    }

    /// Sets the `country` filter.
    pub fn country(self, value: impl Into<String>) -> Self {
        self.param("country", value)
    }

    /// Sets an arbitrary query parameter.
    ///
    /// Re-setting a key replaces its value but keeps its original position.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// In-place variant of [`SourceQueryParams::param`].
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Looks up the value stored for `key`, empty or not.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Pairs that will appear in the query string: non-empty values only,
    /// in insertion order.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` when nothing would be serialized.
    pub fn is_empty(&self) -> bool {
        self.query_pairs().next().is_none()
    }
}

impl<K, V> FromIterator<(K, V)> for SourceQueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

impl Serialize for SourceQueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (k, v) in &self.pairs {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct SourceQueryParamsVisitor;

impl<'de> Visitor<'de> for SourceQueryParamsVisitor {
    type Value = SourceQueryParams;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of query parameter names to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut params = SourceQueryParams::new();
        while let Some((k, v)) = access.next_entry::<String, String>()? {
            params.set(k, v);
        }
        Ok(params)
    }
}

impl<'de> Deserialize<'de> for SourceQueryParams {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SourceQueryParamsVisitor)
    }
}

/// Query for the articles endpoint.
///
/// `source` is required; an empty one is rejected when the URL is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleQueryParams {
    /// Source identifier, e.g. `buzzfeed`.
    pub source: String,
    /// Sort order; falls back to [`DEFAULT_SORT_BY`] when absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

impl ArticleQueryParams {
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into(), sort_by: None }
    }

    /// Sets the sort order.
    pub fn sort_by(mut self, value: impl Into<String>) -> Self {
        self.sort_by = Some(value.into());
        self
    }

    /// The sort order that will be sent.
    pub fn effective_sort_by(&self) -> &str {
        match self.sort_by.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_SORT_BY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let params = SourceQueryParams::new().country("us").category("business").language("en");
        let keys: Vec<_> = params.query_pairs().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["country", "category", "language"]);
    }

    #[test]
    fn test_reset_keeps_position() {
        let params = SourceQueryParams::new().category("general").language("en").category("sports");
        let pairs: Vec<_> = params.query_pairs().collect();
        assert_eq!(pairs, vec![("category", "sports"), ("language", "en")]);
    }

    #[test]
    fn test_empty_values_filtered() {
        let params = SourceQueryParams::new().category("general").language("");
        assert_eq!(params.get("language"), Some(""));
        assert_eq!(params.query_pairs().collect::<Vec<_>>(), vec![("category", "general")]);
        assert!(!params.is_empty());

        let all_empty = SourceQueryParams::new().language("").country("");
        assert!(all_empty.is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let params: SourceQueryParams = [("language", "de"), ("country", "de")].into_iter().collect();
        assert_eq!(params.get("country"), Some("de"));
        assert_eq!(params.query_pairs().next(), Some(("language", "de")));
    }

    #[test]
    fn test_from_pairs() {
        let params = SourceQueryParams::from_pairs([("country", "us"), ("category", "general")]);
        assert_eq!(params, SourceQueryParams::new().country("us").category("general"));
    }

    #[test]
    fn test_effective_sort_by() {
        assert_eq!(ArticleQueryParams::new("buzzfeed").effective_sort_by(), "top");
        assert_eq!(ArticleQueryParams::new("buzzfeed").sort_by("latest").effective_sort_by(), "latest");
        assert_eq!(ArticleQueryParams::new("buzzfeed").sort_by("").effective_sort_by(), "top");
    }

    #[test]
    fn test_article_params_deserialize_camel_case() {
        let params: ArticleQueryParams = serde_json::from_str(r#"{"source":"bbc-news","sortBy":"popular"}"#).unwrap();
        assert_eq!(params, ArticleQueryParams::new("bbc-news").sort_by("popular"));

        let bare: ArticleQueryParams = serde_json::from_str(r#"{"source":"bbc-news"}"#).unwrap();
        assert_eq!(bare.sort_by, None);
    }

    #[test]
    fn test_source_params_as_map() {
        let params: SourceQueryParams = serde_json::from_str(r#"{"language":"en","category":"general","country":""}"#).unwrap();
        assert_eq!(params.query_pairs().collect::<Vec<_>>(), vec![("language", "en"), ("category", "general")]);
        assert_eq!(params.get("country"), Some(""));

        let json = serde_json::to_string(&SourceQueryParams::new().category("general").language("en")).unwrap();
        assert_eq!(json, r#"{"category":"general","language":"en"}"#);

        let back: SourceQueryParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SourceQueryParams::new().category("general").language("en"));
    }

    #[test]
    fn test_source_params_rejects_non_map() {
        assert!(serde_json::from_str::<SourceQueryParams>(r#"[["category","general"]]"#).is_err());
    }
}
