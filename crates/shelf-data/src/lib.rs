//! HTTP request and response types for Quick Shelf clients.
//!
//! Requests are plain values: a client builds them, the host environment
//! (browser `fetch`, a test harness) sends them and hands back a
//! [`Response`]. Nothing here performs I/O.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_data::{FetchClient, Response};
//!
//! let client = FetchClient::new().with_default_header("X-Shelf-Nonce", nonce);
//!
//! let request = client
//!     .get("https://shop.test/api/quick-shelf/v1/search")
//!     .query("term", "blue mug");
//! assert_eq!(request.url(), "https://shop.test/api/quick-shelf/v1/search?term=blue+mug");
//!
//! // ... host sends `request` ...
//! let results: Vec<SearchResult> = response.error_for_status()?.json()?;
//! ```

mod error;
mod request;
mod response;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::collections::BTreeMap;

/// Factory for requests sharing default headers.
#[derive(Debug, Clone, Default)]
pub struct FetchClient {
    default_headers: BTreeMap<String, String>,
}

impl FetchClient {
    /// Create a new client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> RequestBuilder {
        self.default_headers
            .iter()
            .fold(RequestBuilder::new(method, url), |builder, (k, v)| {
                builder.header(k.clone(), v.clone())
            })
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, RequestBuilder, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_applied() {
        let client = FetchClient::new().with_default_header("X-Shelf-Nonce", "abc123");
        let req = client.get("https://shop.test/search");
        assert_eq!(req.url(), "https://shop.test/search");
        assert_eq!(req.get_header("x-shelf-nonce"), Some("abc123"));
        assert_eq!(req.method(), Method::Get);
    }

    #[test]
    fn test_custom_method() {
        let req = FetchClient::new().request(Method::Head, "/search");
        assert_eq!(req.method(), Method::Head);
        assert_eq!(req.url(), "/search");
        assert_eq!(req.headers().count(), 0);
    }
}
