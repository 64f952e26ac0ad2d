//! Type-safe SQLite access for Quick Shelf workloads.
//!
//! Wraps Spin's SQLite host API with typed values and row
//! deserialization. The host API only exists inside a Spin component;
//! on other targets every query fails with [`DbError::Unavailable`].
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_db::{Db, params};
//!
//! #[derive(serde::Deserialize)]
//! struct Row {
//!     id: i64,
//!     title: String,
//! }
//!
//! let db = Db::open_default()?;
//! let rows: Vec<Row> = db.query_as(
//!     "SELECT id, title FROM products WHERE title LIKE ? LIMIT ?",
//!     params!["%mug%", 10],
//! )?;
//! ```

mod db;
mod error;
mod types;

pub use db::Db;
pub use error::DbError;
pub use types::{QueryResult, Row, Value};

/// Create a parameter list for SQL queries.
///
/// ```rust,ignore
/// let params = shelf_db::params!["value1", 42, 3.14];
/// ```
#[macro_export]
macro_rules! params {
    () => {
        &[]
    };
    ($($param:expr),+ $(,)?) => {
        &[$($crate::Value::from($param)),+]
    };
}
