//! Search result records.

use crate::catalog::Product;
use crate::i18n::Labels;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// One matched product, as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: ProductId,
    pub title: String,
    pub permalink: String,
    /// Thumbnail URL; `null` when the product has no image.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Price markup, inserted verbatim by the widget.
    pub price: String,
    /// Localized stock label.
    pub stock_status: String,
    /// Styling flag. Not always in agreement with `stock_status`.
    pub is_in_stock: bool,
}

impl SearchResult {
    pub fn from_product(product: &Product, labels: &Labels) -> Self {
        let stock = product.inventory.stock_label(labels);
        Self {
            id: product.id,
            title: product.title.clone(),
            permalink: product.permalink.clone(),
            thumbnail: product
                .thumbnail_url
                .as_ref()
                .filter(|url| !url.trim().is_empty())
                .cloned(),
            price: product.price_html(),
            stock_status: stock.label,
            is_in_stock: stock.is_in_stock,
        }
    }

    /// Whether a thumbnail image is available.
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InventoryLevel, StockStatus};
    use crate::money::{Currency, Money};

    fn product() -> Product {
        Product::new(
            ProductId::new(7).unwrap(),
            "Blue Mug",
            "https://shop.test/product/blue-mug",
            Money::new(4999, Currency::USD),
        )
    }

    #[test]
    fn test_from_product() {
        let p = product()
            .with_thumbnail("https://shop.test/img/mug-150.jpg")
            .with_inventory(InventoryLevel::tracked(StockStatus::InStock, 0));
        let r = SearchResult::from_product(&p, &Labels::default());

        assert_eq!(r.id.get(), 7);
        assert_eq!(r.title, "Blue Mug");
        assert_eq!(r.permalink, "https://shop.test/product/blue-mug");
        assert_eq!(r.thumbnail.as_deref(), Some("https://shop.test/img/mug-150.jpg"));
        assert_eq!(
            r.price,
            r#"<span class="price"><span class="amount">$49.99</span></span>"#
        );
        assert_eq!(r.stock_status, "Out of stock");
        assert!(r.is_in_stock);
    }

    #[test]
    fn test_json_shape() {
        let r = SearchResult::from_product(&product().with_thumbnail(""), &Labels::default());
        let json = serde_json::to_value(&r).unwrap();

        assert_eq!(json["id"], 7);
        assert!(json["thumbnail"].is_null());
        assert_eq!(json["stock_status"], "In stock");
        assert_eq!(json["is_in_stock"], true);
        assert_eq!(json.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_deserialize_without_thumbnail() {
        let r: SearchResult = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Lamp",
            "permalink": "https://shop.test/lamp",
            "price": "$25.00",
            "stock_status": "In stock",
            "is_in_stock": true
        }))
        .unwrap();
        assert!(!r.has_thumbnail());
    }
}
