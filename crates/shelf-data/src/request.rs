//! HTTP request builder.

use shelf_core::percent_encode;
use std::collections::BTreeMap;

pub use shelf_core::Method;

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: BTreeMap<String, String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter, percent-encoding key and value.
    pub fn query(mut self, key: &str, value: &str) -> Self {
        let sep = if self.url.contains('?') { '&' } else { '?' };
        self.url = format!(
            "{}{}{}={}",
            self.url,
            sep,
            percent_encode(key),
            percent_encode(value)
        );
        self
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Full URL including the query string.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get a header value (case-insensitive).
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_encoding() {
        let req = RequestBuilder::new(Method::Get, "https://shop.test/search")
            .query("term", "blue mug & co");
        assert_eq!(req.url(), "https://shop.test/search?term=blue+mug+%26+co");

        let req = req.query("page", "2");
        assert!(req.url().ends_with("&page=2"));
    }

    #[test]
    fn test_query_encodes_unicode() {
        let req = RequestBuilder::new(Method::Get, "/search").query("term", "café");
        assert_eq!(req.url(), "/search?term=caf%C3%A9");
    }

    #[test]
    fn test_headers_iter() {
        let req = RequestBuilder::new(Method::Get, "/x")
            .header("X-A", "1")
            .accept("application/json");
        let headers: Vec<_> = req.headers().collect();
        assert_eq!(headers, vec![("Accept", "application/json"), ("X-A", "1")]);
    }
}
