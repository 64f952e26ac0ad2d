//! Catalog stores.

use crate::catalog::Product;
use crate::search::ProductSearch;
use crate::CommerceError;

/// A product store that can answer search queries.
pub trait Catalog {
    /// Run the query, returning matches in query order and at most
    /// `query.limit` of them.
    fn search(&self, query: &ProductSearch) -> Result<Vec<Product>, CommerceError>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn search(&self, query: &ProductSearch) -> Result<Vec<Product>, CommerceError> {
        (**self).search(query)
    }
}

/// In-process catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: Vec<Product>,
}

impl MemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load products from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn insert(&mut self, product: Product) {
        self.products.push(product);
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for MemoryCatalog {
    fn search(&self, query: &ProductSearch) -> Result<Vec<Product>, CommerceError> {
        let mut matched: Vec<Product> = self
            .products
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| query.sort.compare(a, b));
        matched.truncate(query.limit);
        Ok(matched)
    }
}
