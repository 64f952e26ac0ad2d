//! JSON API responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Content type used for every API response.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Error body returned by API routes.
///
/// Serialized as `{ "code": ..., "message": ..., "status": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code} ({status}): {message}")]
pub struct ApiError {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            status,
        }
    }

    /// 404 for paths no route is registered for.
    pub fn no_route() -> Self {
        Self::new(
            "rest_no_route",
            "No route was found matching the URL and request method",
            404,
        )
    }

    /// 405 for registered paths called with the wrong method.
    pub fn method_not_allowed() -> Self {
        Self::new(
            "rest_method_not_allowed",
            "Method not allowed for this route",
            405,
        )
    }
}

/// An HTTP response produced by a route handler.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Serialize a value as a JSON response.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
                body,
            },
            Err(e) => Self::error(&ApiError::new(
                "rest_serialization_failed",
                e.to_string(),
                500,
            )),
        }
    }

    /// Build a response from an API error.
    pub fn error(error: &ApiError) -> Self {
        let body = serde_json::to_vec(error).unwrap_or_else(|_| error.message.clone().into_bytes());
        Self {
            status: error.status,
            headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body,
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json_body<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
