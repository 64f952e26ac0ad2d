//! Translatable storefront strings.

use serde::{Deserialize, Serialize};

/// Locale-dependent labels shown by the endpoint and the widget.
///
/// Defaults are English; a deployment overrides any subset from its
/// configuration file. Keys are snake_case, with camelCase aliases for
/// page-injected JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    #[serde(alias = "inStock")]
    pub in_stock: String,
    #[serde(alias = "outOfStock")]
    pub out_of_stock: String,
    #[serde(alias = "noResults")]
    pub no_results: String,
    #[serde(alias = "searchPlaceholder")]
    pub search_placeholder: String,
    pub close: String,
    #[serde(alias = "termRequired")]
    pub term_required: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            in_stock: "In stock".to_string(),
            out_of_stock: "Out of stock".to_string(),
            no_results: "No products found".to_string(),
            search_placeholder: "Search...".to_string(),
            close: "\u{00d7}".to_string(),
            term_required: "Search term is required".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let labels: Labels =
            serde_json::from_str(r#"{"in_stock": "Auf Lager", "out_of_stock": "Ausverkauft"}"#)
                .unwrap();
        assert_eq!(labels.in_stock, "Auf Lager");
        assert_eq!(labels.out_of_stock, "Ausverkauft");
        assert_eq!(labels.no_results, "No products found");
    }

    #[test]
    fn test_camel_case_keys() {
        let labels: Labels =
            serde_json::from_str(r#"{"outOfStock": "Sold out", "termRequired": "Type more"}"#)
                .unwrap();
        assert_eq!(labels.out_of_stock, "Sold out");
        assert_eq!(labels.term_required, "Type more");
        assert_eq!(labels.in_stock, "In stock");
    }
}
