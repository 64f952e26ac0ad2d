//! Catalog domain types and product search for Quick Shelf.
//!
//! - **Catalog**: Products, money, inventory and stock labels
//! - **Search**: Term sanitizing, the popularity-ordered product query,
//!   the fixed `SearchResult` shape and the `Catalog` seam
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_commerce::prelude::*;
//!
//! let catalog = MemoryCatalog::new(products);
//! let term = SearchTerm::parse(raw_term, 2)?;
//! let query = ProductSearch::new(term);
//! let results: Vec<SearchResult> = catalog
//!     .search(&query)?
//!     .iter()
//!     .map(|p| SearchResult::from_product(p, &Labels::default()))
//!     .collect();
//! ```

pub mod error;
pub mod i18n;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use i18n::Labels;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::i18n::Labels;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        price_html, InventoryLevel, Product, ProductStatus, StockLabel, StockStatus, Visibility,
    };

    // Search
    pub use crate::search::{
        sanitize_text, Catalog, MemoryCatalog, ProductSearch, SearchResult, SearchTerm,
        SortOption, MAX_RESULTS, MIN_TERM_CHARS,
    };

    #[cfg(feature = "storage")]
    pub use crate::search::SqliteCatalog;
}
