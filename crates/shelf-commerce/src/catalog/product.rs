//! Product types.

use crate::catalog::InventoryLevel;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Publication status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Visible on the storefront.
    #[default]
    Publish,
    Draft,
    /// Awaiting review.
    Pending,
    Private,
    Trash,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Publish => "publish",
            ProductStatus::Draft => "draft",
            ProductStatus::Pending => "pending",
            ProductStatus::Private => "private",
            ProductStatus::Trash => "trash",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "publish" => Some(ProductStatus::Publish),
            "draft" => Some(ProductStatus::Draft),
            "pending" => Some(ProductStatus::Pending),
            "private" => Some(ProductStatus::Private),
            "trash" => Some(ProductStatus::Trash),
            _ => None,
        }
    }
}

/// Catalog visibility flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Visibility {
    /// Hidden from search results.
    #[serde(default)]
    pub exclude_from_search: bool,
    /// Hidden from shop listings.
    #[serde(default)]
    pub exclude_from_catalog: bool,
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// URL-friendly slug.
    pub slug: String,
    /// Searchable body text (may contain HTML).
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub visibility: Visibility,
    /// Absolute URL of the product detail page.
    pub permalink: String,
    /// Absolute URL of the thumbnail image.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Regular price.
    pub price: Money,
    /// Sale price, if on sale.
    #[serde(default)]
    pub sale_price: Option<Money>,
    #[serde(default)]
    pub inventory: InventoryLevel,
    /// Cumulative units sold. `None` when never recorded.
    #[serde(default)]
    pub total_sales: Option<i64>,
    /// Unix timestamp of last modification.
    #[serde(default)]
    pub modified_at: i64,
}

impl Product {
    /// Create a published, in-stock product.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        permalink: impl Into<String>,
        price: Money,
    ) -> Self {
        let title = title.into();
        Self {
            id,
            slug: slugify(&title),
            title,
            content: String::new(),
            status: ProductStatus::Publish,
            visibility: Visibility::default(),
            permalink: permalink.into(),
            thumbnail_url: None,
            price,
            sale_price: None,
            inventory: InventoryLevel::default(),
            total_sales: None,
            modified_at: 0,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn with_sale_price(mut self, sale_price: Money) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    pub fn with_inventory(mut self, inventory: InventoryLevel) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_total_sales(mut self, total_sales: i64) -> Self {
        self.total_sales = Some(total_sales);
        self
    }

    pub fn with_modified_at(mut self, modified_at: i64) -> Self {
        self.modified_at = modified_at;
        self
    }

    /// Whether the product may appear in search results.
    pub fn is_searchable(&self) -> bool {
        self.status == ProductStatus::Publish && !self.visibility.exclude_from_search
    }

    /// Price currently charged: the sale price when it undercuts the regular one.
    pub fn active_price(&self) -> Money {
        match self.sale_price {
            Some(sale) if is_discount(&self.price, &sale) => sale,
            _ => self.price,
        }
    }

    /// Formatted price markup for listings.
    pub fn price_html(&self) -> String {
        price_html(&self.price, self.sale_price.as_ref())
    }
}

/// Render price markup.
///
/// A sale price only shows when it is lower than the regular price and in
/// the same currency; the regular price is then struck through.
pub fn price_html(price: &Money, sale_price: Option<&Money>) -> String {
    match sale_price {
        Some(sale) if is_discount(price, sale) => format!(
            r#"<span class="price"><del>{}</del> <ins>{}</ins></span>"#,
            amount_html(price),
            amount_html(sale)
        ),
        _ => format!(r#"<span class="price">{}</span>"#, amount_html(price)),
    }
}

fn amount_html(money: &Money) -> String {
    format!(r#"<span class="amount">{}</span>"#, money.display())
}

fn is_discount(price: &Money, sale: &Money) -> bool {
    sale.currency == price.currency && sale.amount_cents < price.amount_cents
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    fn id(n: i64) -> ProductId {
        ProductId::new(n).unwrap()
    }

    #[test]
    fn test_price_html_regular() {
        assert_eq!(
            price_html(&usd(4999), None),
            r#"<span class="price"><span class="amount">$49.99</span></span>"#
        );
    }

    #[test]
    fn test_price_html_sale() {
        assert_eq!(
            price_html(&usd(5999), Some(&usd(4999))),
            r#"<span class="price"><del><span class="amount">$59.99</span></del> <ins><span class="amount">$49.99</span></ins></span>"#
        );
    }

    #[test]
    fn test_price_html_ignores_non_discount() {
        let regular = price_html(&usd(4999), None);
        assert_eq!(price_html(&usd(4999), Some(&usd(4999))), regular);
        assert_eq!(price_html(&usd(4999), Some(&usd(6000))), regular);
        assert_eq!(
            price_html(&usd(4999), Some(&Money::new(100, Currency::EUR))),
            regular
        );
    }

    #[test]
    fn test_searchable() {
        let p = Product::new(id(1), "Mug", "https://shop.test/mug", usd(900));
        assert!(p.is_searchable());
        assert!(!p.clone().with_status(ProductStatus::Draft).is_searchable());

        let hidden = p.with_visibility(Visibility {
            exclude_from_search: true,
            exclude_from_catalog: false,
        });
        assert!(!hidden.is_searchable());
    }

    #[test]
    fn test_active_price() {
        let p = Product::new(id(1), "Mug", "https://shop.test/mug", usd(900));
        assert_eq!(p.active_price(), usd(900));
        assert_eq!(p.with_sale_price(usd(700)).active_price(), usd(700));
    }

    #[test]
    fn test_slug_from_title() {
        let p = Product::new(id(2), "Blue  Coffee Mug!", "https://shop.test/p/2", usd(1));
        assert_eq!(p.slug, "blue-coffee-mug");
    }

    #[test]
    fn test_deserialize_minimal() {
        let p: Product = serde_json::from_value(serde_json::json!({
            "id": 5,
            "title": "Lamp",
            "slug": "lamp",
            "permalink": "https://shop.test/lamp",
            "price": { "amount_cents": 2500, "currency": "USD" }
        }))
        .unwrap();
        assert_eq!(p.status, ProductStatus::Publish);
        assert_eq!(p.total_sales, None);
        assert!(p.inventory.is_in_stock());
    }

    #[test]
    fn test_status_roundtrip_strings() {
        for s in ["publish", "draft", "pending", "private", "trash"] {
            assert_eq!(ProductStatus::from_str(s).map(|st| st.as_str()), Some(s));
        }
        assert_eq!(ProductStatus::from_str("active"), None);
    }
}
