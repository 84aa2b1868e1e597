//! Canonical product type and category labels.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Category label meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Category assigned to records that do not name one.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Display name given to records retained by id alone.
pub const UNNAMED_PRODUCT: &str = "Unnamed product";

/// The two reserved category labels.
///
/// Storefronts that present the catalog in another language override these;
/// the merge uses `uncategorized`, the category list and filter use `all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLabels {
    /// Label of the "no filter" entry at the head of the category list.
    #[serde(default = "default_all")]
    pub all: String,
    /// Category given to products without one.
    #[serde(default = "default_uncategorized")]
    pub uncategorized: String,
}

fn default_all() -> String {
    ALL_CATEGORIES.to_string()
}

fn default_uncategorized() -> String {
    UNCATEGORIZED.to_string()
}

impl Default for CatalogLabels {
    fn default() -> Self {
        Self {
            all: default_all(),
            uncategorized: default_uncategorized(),
        }
    }
}

/// A product in the merged catalog.
///
/// Only built through normalization, so every instance has a non-empty id,
/// name, and category, and non-negative prices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier (namespaced by source).
    pub id: ProductId,
    /// Display name; searched case-insensitively.
    pub name: String,
    /// Category name.
    pub category: String,
    /// Price the shopper pays.
    pub current_price: Money,
    /// Price before any markdown.
    pub original_price: Money,
    /// Image URL.
    pub image: Option<String>,
    /// Long-form description.
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_default() {
        let labels = CatalogLabels::default();
        assert_eq!(labels.all, "all");
        assert_eq!(labels.uncategorized, "uncategorized");
    }
}
