//! Request context with typed parameters.

use std::collections::HashMap;
use std::fmt;

use crate::lifecycle::TimingContext;

/// Unique request identifier for tracing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new request ID.
    pub fn generate() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self(format!("{:x}-{:08x}", nanos, rand::random::<u32>()))
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Query string parameters.
pub type QueryParams = HashMap<String, String>;

/// HTTP headers, keyed by lowercase name.
pub type Headers = HashMap<String, String>;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            "PATCH" => Some(Method::Patch),
            "HEAD" => Some(Method::Head),
            "OPTIONS" => Some(Method::Options),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed request context passed to route handlers.
#[derive(Debug)]
pub struct RequestContext {
    /// Unique request identifier.
    pub request_id: RequestId,
    /// HTTP method.
    pub method: Method,
    /// Request path, without the query string.
    pub path: String,
    /// Decoded query string parameters.
    pub query: QueryParams,
    /// HTTP headers.
    pub headers: Headers,
    /// Timing context for observability.
    pub timing: TimingContext,
}

impl RequestContext {
    /// Create a new request context from a method and a path that may
    /// carry a query string.
    pub fn new(method: Method, path_with_query: impl AsRef<str>) -> Self {
        let path_with_query = path_with_query.as_ref();
        let (path, query_string) = match path_with_query.split_once('?') {
            Some((path, qs)) => (path, qs),
            None => (path_with_query, ""),
        };

        Self {
            request_id: RequestId::generate(),
            method,
            path: path.to_string(),
            query: parse_query_string(query_string),
            headers: HashMap::new(),
            timing: TimingContext::new(),
        }
    }

    /// Add a header. Names are stored lowercase.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    /// Get a query parameter by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(|s| s.as_str())
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }
}

/// Parse an `application/x-www-form-urlencoded` query string.
///
/// Later occurrences of a key win.
pub fn parse_query_string(qs: &str) -> QueryParams {
    qs.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(value))
        })
        .collect()
}

/// Decode `%XX` escapes and `+` as space. Invalid escapes are kept verbatim.
pub fn percent_decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}

/// Encode a value for use in a query string, with spaces as `+`.
pub fn percent_encode(s: &str) -> String {
    // `%` itself encodes to `%25`, so `%20` only comes from spaces.
    urlencoding::encode(s).replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_splits_path_and_query() {
        let ctx = RequestContext::new(Method::Get, "/quick-shelf/v1/search?term=red+mug&x=1");
        assert_eq!(ctx.path, "/quick-shelf/v1/search");
        assert_eq!(ctx.query_param("term"), Some("red mug"));
        assert_eq!(ctx.query_param("x"), Some("1"));
        assert_eq!(ctx.query_param("missing"), None);
    }

    #[test]
    fn test_context_without_query() {
        let ctx = RequestContext::new(Method::Get, "/search");
        assert_eq!(ctx.path, "/search");
        assert!(ctx.query.is_empty());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let ctx = RequestContext::new(Method::Get, "/").with_header("X-Shelf-Nonce", "abc");
        assert_eq!(ctx.header("x-shelf-nonce"), Some("abc"));
        assert_eq!(ctx.header("X-SHELF-NONCE"), Some("abc"));
    }

    #[test]
    fn test_percent_decode_multibyte() {
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn test_percent_encode_decode() {
        let encoded = percent_encode("tea & café");
        assert_eq!(encoded, "tea+%26+caf%C3%A9");
        assert_eq!(percent_decode(&encoded), "tea & café");
        assert_eq!(percent_decode("1%2B1"), "1+1");
        assert_eq!(percent_encode("50% off"), "50%25+off");
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(Method::from_str("get"), Some(Method::Get));
        assert_eq!(Method::from_str("BREW"), None);
        assert_eq!(Method::Post.to_string(), "POST");
    }

    #[test]
    fn test_request_ids_differ() {
        assert_ne!(RequestId::generate(), RequestId::generate());
    }
}
