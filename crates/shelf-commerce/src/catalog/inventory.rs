//! Inventory state and stock labels.

use crate::i18n::Labels;
use serde::{Deserialize, Serialize};

/// Stock status as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
    OnBackorder,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "instock",
            StockStatus::OutOfStock => "outofstock",
            StockStatus::OnBackorder => "onbackorder",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "instock" => Some(StockStatus::InStock),
            "outofstock" => Some(StockStatus::OutOfStock),
            "onbackorder" => Some(StockStatus::OnBackorder),
            _ => None,
        }
    }
}

/// Inventory state of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InventoryLevel {
    /// Status reported by the store.
    pub stock_status: StockStatus,
    /// Whether the store tracks a discrete quantity.
    pub manage_stock: bool,
    /// Tracked quantity, when managed.
    pub quantity: Option<i64>,
}

/// Stock badge text and styling flag for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLabel {
    pub label: String,
    pub is_in_stock: bool,
}

impl InventoryLevel {
    /// Managed inventory with a quantity.
    pub fn tracked(stock_status: StockStatus, quantity: i64) -> Self {
        Self {
            stock_status,
            manage_stock: true,
            quantity: Some(quantity),
        }
    }

    /// Inventory without quantity tracking.
    pub fn untracked(stock_status: StockStatus) -> Self {
        Self {
            stock_status,
            manage_stock: false,
            quantity: None,
        }
    }

    /// Whether the store considers the product purchasable.
    /// Backordered products count as in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock_status != StockStatus::OutOfStock
    }

    /// Compute the stock badge.
    ///
    /// A managed product flagged in stock with a quantity of zero keeps
    /// `is_in_stock == true` while its label reads out of stock.
    pub fn stock_label(&self, labels: &Labels) -> StockLabel {
        let is_in_stock = self.is_in_stock();

        let in_stock_text = if !is_in_stock {
            false
        } else if self.manage_stock {
            self.quantity.unwrap_or(0) > 0
        } else {
            true
        };

        StockLabel {
            label: if in_stock_text {
                labels.in_stock.clone()
            } else {
                labels.out_of_stock.clone()
            },
            is_in_stock,
        }
    }
}
