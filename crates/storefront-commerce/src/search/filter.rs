//! Category list and filtered view over the catalog.

use crate::catalog::{CatalogLabels, Product};
use serde::{Deserialize, Serialize};

/// The active category filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategorySelection {
    /// No category filter.
    #[default]
    All,
    /// Only products in this category.
    Named(String),
}

impl CategorySelection {
    /// Parse a category label. The "all" label selects everything.
    pub fn from_label(label: &str, labels: &CatalogLabels) -> Self {
        if label == labels.all {
            CategorySelection::All
        } else {
            CategorySelection::Named(label.to_string())
        }
    }

    /// The label shown for this selection.
    pub fn label<'a>(&'a self, labels: &'a CatalogLabels) -> &'a str {
        match self {
            CategorySelection::All => &labels.all,
            CategorySelection::Named(name) => name,
        }
    }

    /// Check if `category` passes this selection.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Named(name) => name == category,
        }
    }
}

/// Filter inputs: category plus free-text name query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Active category.
    pub category: CategorySelection,
    /// Name query; empty matches every product.
    pub query: String,
}

impl CatalogFilter {
    /// Create a filter.
    pub fn new(category: CategorySelection, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    /// Filter by category only.
    pub fn category(name: impl Into<String>) -> Self {
        Self::new(CategorySelection::Named(name.into()), String::new())
    }

    /// Filter by name query only.
    pub fn query(query: impl Into<String>) -> Self {
        Self::new(CategorySelection::All, query)
    }

    /// Check if the filter lets every product through.
    pub fn is_empty(&self) -> bool {
        self.category == CategorySelection::All && self.query.is_empty()
    }
}

/// Read-only index over a product list.
///
/// Both outputs are recomputed from the borrowed products on every call, so
/// nothing can go stale after the catalog changes.
#[derive(Debug, Clone, Copy)]
pub struct CatalogIndex<'a> {
    products: &'a [Product],
    labels: &'a CatalogLabels,
}

impl<'a> CatalogIndex<'a> {
    /// Create an index over `products`.
    pub fn new(products: &'a [Product], labels: &'a CatalogLabels) -> Self {
        Self { products, labels }
    }

    /// Distinct categories: the "all" label first, then each category once in
    /// first-seen order.
    pub fn categories(&self) -> Vec<&'a str> {
        let mut categories: Vec<&'a str> = vec![self.labels.all.as_str()];
        for product in self.products {
            let category = product.category.as_str();
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    /// Products passing `filter`, in catalog order.
    ///
    /// The name match is a case-insensitive substring test.
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&'a Product> {
        let query = filter.query.to_lowercase();
        self.products
            .iter()
            .filter(|p| filter.category.matches(&p.category))
            .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};
    use proptest::prelude::*;

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: category.to_string(),
            current_price: Money::zero(Currency::EGP),
            original_price: Money::zero(Currency::EGP),
            image: None,
            description: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("A-1", "Green Tea", "Drinks"),
            product("A-2", "Rice", "Pantry"),
            product("B-1", "Black tea", "Drinks"),
            product("B-2", "Dates", "uncategorized"),
        ]
    }

    fn ids(products: Vec<&Product>) -> Vec<&str> {
        products.into_iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_categories_order() {
        let products = catalog();
        let labels = CatalogLabels::default();
        let index = CatalogIndex::new(&products, &labels);
        assert_eq!(index.categories(), vec!["all", "Drinks", "Pantry", "uncategorized"]);
    }

    #[test]
    fn test_categories_empty_catalog() {
        let labels = CatalogLabels::default();
        let index = CatalogIndex::new(&[], &labels);
        assert_eq!(index.categories(), vec!["all"]);
    }

    #[test]
    fn test_category_named_like_all_is_not_repeated() {
        let products = vec![product("A-1", "Odd", "all"), product("A-2", "Tea", "Drinks")];
        let labels = CatalogLabels::default();
        let index = CatalogIndex::new(&products, &labels);
        assert_eq!(index.categories(), vec!["all", "Drinks"]);
    }

    #[test]
    fn test_filter_by_category() {
        let products = catalog();
        let labels = CatalogLabels::default();
        let index = CatalogIndex::new(&products, &labels);
        assert_eq!(ids(index.filter(&CatalogFilter::category("Drinks"))), vec!["A-1", "B-1"]);
        assert_eq!(index.filter(&CatalogFilter::default()).len(), 4);
    }

    #[test]
    fn test_filter_by_query_case_insensitive() {
        let products = catalog();
        let labels = CatalogLabels::default();
        let index = CatalogIndex::new(&products, &labels);
        assert_eq!(ids(index.filter(&CatalogFilter::query("TEA"))), vec!["A-1", "B-1"]);
        assert!(index.filter(&CatalogFilter::query("coffee")).is_empty());
    }

    #[test]
    fn test_filter_combined() {
        let products = catalog();
        let labels = CatalogLabels::default();
        let index = CatalogIndex::new(&products, &labels);
        let filter = CatalogFilter::new(CategorySelection::Named("Pantry".into()), "tea");
        assert!(index.filter(&filter).is_empty());
    }

    #[test]
    fn test_unknown_category_yields_nothing() {
        let products = catalog();
        let labels = CatalogLabels::default();
        let index = CatalogIndex::new(&products, &labels);
        assert!(index.filter(&CatalogFilter::category("Frozen")).is_empty());
    }

    #[test]
    fn test_selection_from_label() {
        let labels = CatalogLabels::default();
        assert_eq!(CategorySelection::from_label("all", &labels), CategorySelection::All);
        assert_eq!(
            CategorySelection::from_label("Drinks", &labels),
            CategorySelection::Named("Drinks".to_string())
        );
        assert_eq!(CategorySelection::All.label(&labels), "all");
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(
            names in prop::collection::vec("[a-dA-D ]{0,6}", 0..12),
            categories in prop::collection::vec(prop_oneof![Just("x"), Just("y"), Just("z")], 12),
            query in "[a-dA-D]{0,2}",
            active in prop_oneof![Just(None), Just(Some("x")), Just(Some("y"))],
        ) {
            let products: Vec<Product> = names
                .iter()
                .enumerate()
                .map(|(i, name)| product(&format!("P-{i}"), name, categories[i]))
                .collect();
            let labels = CatalogLabels::default();
            let index = CatalogIndex::new(&products, &labels);
            let selection = match active {
                Some(c) => CategorySelection::Named(c.to_string()),
                None => CategorySelection::All,
            };
            let filter = CatalogFilter::new(selection, query.clone());

            let first = ids(index.filter(&filter));
            let second = ids(index.filter(&filter));
            prop_assert_eq!(&first, &second);

            let lowered = query.to_lowercase();
            for p in index.filter(&filter) {
                prop_assert!(filter.category.matches(&p.category));
                prop_assert!(p.name.to_lowercase().contains(&lowered));
            }
        }
    }
}
