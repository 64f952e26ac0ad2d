//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in catalog and search operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Request input failed validation.
    #[error("{message}")]
    Validation { code: &'static str, message: String },

    /// Invalid product identifier.
    #[error("Invalid product id: {0}")]
    InvalidId(i64),

    /// The catalog store failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// Missing or too-short search term.
    pub fn no_term(message: impl Into<String>) -> Self {
        CommerceError::Validation {
            code: "no_term",
            message: message.into(),
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            CommerceError::Validation { code, .. } => code,
            CommerceError::InvalidId(_) => "invalid_id",
            CommerceError::DatabaseError(_) | CommerceError::SerializationError(_) => {
                "search_failed"
            }
        }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            CommerceError::Validation { .. } => 400,
            _ => 500,
        }
    }
}

#[cfg(feature = "storage")]
impl From<shelf_db::DbError> for CommerceError {
    fn from(e: shelf_db::DbError) -> Self {
        CommerceError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let err = CommerceError::no_term("Search term is required");
        assert_eq!(err.status(), 400);
        assert_eq!(err.code(), "no_term");
        assert_eq!(err.to_string(), "Search term is required");
    }

    #[test]
    fn test_store_failures_map_to_500() {
        let err = CommerceError::DatabaseError("disk I/O error".into());
        assert_eq!(err.status(), 500);
        assert_eq!(err.code(), "search_failed");
    }
}
