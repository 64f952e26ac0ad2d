//! SQLite-backed catalog.

use crate::catalog::{InventoryLevel, Product, ProductStatus, StockStatus, Visibility};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::search::{Catalog, ProductSearch};
use crate::CommerceError;
use serde::Deserialize;
use shelf_db::{Db, Value};

/// Catalog stored in the `products` table of a Spin SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    database: String,
    currency: Currency,
}

impl SqliteCatalog {
    /// Catalog on the named database label.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            currency: Currency::default(),
        }
    }

    /// Currency for rows that do not name one.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Catalog for SqliteCatalog {
    fn search(&self, query: &ProductSearch) -> Result<Vec<Product>, CommerceError> {
        let db = Db::open(&self.database)?;
        let (sql, params) = query.build_sql();
        let params: Vec<Value> = params.into_iter().map(Value::from).collect();

        let rows: Vec<ProductRow> = db.query_as(&sql, &params)?;
        rows.into_iter()
            .map(|row| row.into_product(self.currency))
            .collect()
    }
}

/// Row shape of the `products` table.
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: i64,
    title: String,
    slug: String,
    content: Option<String>,
    status: String,
    exclude_from_search: i64,
    exclude_from_catalog: i64,
    permalink: String,
    thumbnail_url: Option<String>,
    price_cents: i64,
    sale_price_cents: Option<i64>,
    currency: Option<String>,
    stock_status: String,
    manage_stock: i64,
    stock_quantity: Option<i64>,
    total_sales: Option<i64>,
    modified_at: i64,
}

impl ProductRow {
    fn into_product(self, default_currency: Currency) -> Result<Product, CommerceError> {
        let currency = match self.currency.as_deref().filter(|c| !c.is_empty()) {
            Some(code) => Currency::from_code(code).ok_or_else(|| {
                CommerceError::SerializationError(format!("unknown currency {}", code))
            })?,
            None => default_currency,
        };
        let status = ProductStatus::from_str(&self.status).ok_or_else(|| {
            CommerceError::SerializationError(format!("unknown product status {}", self.status))
        })?;
        // Unknown stock states are treated as out of stock.
        let stock_status =
            StockStatus::from_str(&self.stock_status).unwrap_or(StockStatus::OutOfStock);

        Ok(Product {
            id: ProductId::new(self.id)?,
            title: self.title,
            slug: self.slug,
            content: self.content.unwrap_or_default(),
            status,
            visibility: Visibility {
                exclude_from_search: self.exclude_from_search != 0,
                exclude_from_catalog: self.exclude_from_catalog != 0,
            },
            permalink: self.permalink,
            thumbnail_url: self.thumbnail_url,
            price: Money::new(self.price_cents, currency),
            sale_price: self.sale_price_cents.map(|c| Money::new(c, currency)),
            inventory: InventoryLevel {
                stock_status,
                manage_stock: self.manage_stock != 0,
                quantity: self.stock_quantity,
            },
            total_sales: self.total_sales,
            modified_at: self.modified_at,
        })
    }
}
