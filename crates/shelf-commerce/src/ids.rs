//! Newtype IDs for type-safe identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CommerceError;

/// Catalog identifier of a product. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ProductId(u64);

impl ProductId {
    /// Create an ID, rejecting zero and negative values.
    pub fn new(id: i64) -> Result<Self, CommerceError> {
        if id > 0 {
            Ok(Self(id as u64))
        } else {
            Err(CommerceError::InvalidId(id))
        }
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for ProductId {
    type Error = CommerceError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0 as i64
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
