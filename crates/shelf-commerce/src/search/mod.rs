//! Search module.
//!
//! Term sanitizing, the product query with its fixed ordering, the result
//! shape returned to the widget, and the catalog stores that run queries.

mod query;
mod results;
#[cfg(feature = "storage")]
mod sqlite;
mod store;
mod term;

pub use query::{ProductSearch, SortOption, MAX_RESULTS};
pub use results::SearchResult;
#[cfg(feature = "storage")]
pub use sqlite::SqliteCatalog;
pub use store::{Catalog, MemoryCatalog};
pub use term::{sanitize_text, SearchTerm, MIN_TERM_CHARS};
