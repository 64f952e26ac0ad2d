//! Product search query.

use crate::catalog::{Product, ProductStatus};
use crate::search::SearchTerm;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Maximum number of results a search returns.
pub const MAX_RESULTS: usize = 10;

/// Columns selected for catalog rows.
const PRODUCT_COLUMNS: &str = "id, title, slug, content, status, exclude_from_search, \
     exclude_from_catalog, permalink, thumbnail_url, price_cents, sale_price_cents, currency, \
     stock_status, manage_stock, stock_quantity, total_sales, modified_at";

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Best selling first, then most recently modified.
    #[default]
    Popularity,
}

impl SortOption {
    /// Get SQL ORDER BY clause.
    pub fn to_sql(&self) -> &'static str {
        match self {
            // NULL sorts lowest.
            SortOption::Popularity => "total_sales IS NULL, total_sales DESC, modified_at DESC",
        }
    }

    /// Order two products the way `to_sql` orders rows.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            // `Option` orders `None` below any `Some`.
            SortOption::Popularity => b
                .total_sales
                .cmp(&a.total_sales)
                .then(b.modified_at.cmp(&a.modified_at)),
        }
    }
}

/// A product lookup for one search term.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSearch {
    /// The validated term.
    pub term: SearchTerm,
    /// Sort option.
    pub sort: SortOption,
    /// Maximum rows returned.
    pub limit: usize,
}

impl ProductSearch {
    /// Popularity-ordered search limited to [`MAX_RESULTS`].
    pub fn new(term: SearchTerm) -> Self {
        Self {
            term,
            sort: SortOption::Popularity,
            limit: MAX_RESULTS,
        }
    }

    /// Lower the limit. Values are clamped to `1..=MAX_RESULTS`.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_RESULTS);
        self
    }

    /// Whether a product satisfies the filter part of the query.
    ///
    /// Every word must appear in the title or the content, ignoring case.
    pub fn matches(&self, product: &Product) -> bool {
        if !product.is_searchable() {
            return false;
        }
        let title = product.title.to_lowercase();
        let content = product.content.to_lowercase();
        self.term
            .words()
            .iter()
            .all(|w| title.contains(w.as_str()) || content.contains(w.as_str()))
    }

    /// Build SQL WHERE clause.
    pub fn build_where_clause(&self) -> (String, Vec<String>) {
        let mut clauses = vec![
            "status = ?".to_string(),
            "exclude_from_search = 0".to_string(),
        ];
        let mut values = vec![ProductStatus::Publish.as_str().to_string()];

        for word in self.term.words() {
            let pattern = format!("%{}%", escape_like(word));
            clauses.push("(title LIKE ? ESCAPE '\\' OR content LIKE ? ESCAPE '\\')".to_string());
            values.push(pattern.clone());
            values.push(pattern);
        }

        (clauses.join(" AND "), values)
    }

    /// Build full SQL query for products.
    pub fn build_sql(&self) -> (String, Vec<String>) {
        let (where_clause, values) = self.build_where_clause();
        let sql = format!(
            "SELECT {} FROM products WHERE {} ORDER BY {} LIMIT {}",
            PRODUCT_COLUMNS,
            where_clause,
            self.sort.to_sql(),
            self.limit
        );
        (sql, values)
    }
}

fn escape_like(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    for c in word.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
