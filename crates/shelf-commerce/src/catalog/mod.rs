//! Catalog module.
//!
//! Products as the storefront exposes them to search, their prices and
//! their stock state.

mod inventory;
mod product;

pub use inventory::{InventoryLevel, StockLabel, StockStatus};
pub use product::{price_html, Product, ProductStatus, Visibility};
