//! Shopper-facing view state: current filter plus the search affordance.

use std::time::{Duration, Instant};

use crate::catalog::Product;
use crate::search::{CatalogFilter, CatalogIndex, CategorySelection, SearchIndicator};

/// What the shopper is currently looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    filter: CatalogFilter,
    indicator: SearchIndicator,
}

impl CatalogView {
    /// Create a view showing everything, with the given debounce window.
    pub fn new(debounce: Duration) -> Self {
        Self {
            filter: CatalogFilter::default(),
            indicator: SearchIndicator::new(debounce),
        }
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn category(&self) -> &CategorySelection {
        &self.filter.category
    }

    pub fn query(&self) -> &str {
        &self.filter.query
    }

    /// Select a category. A category missing from the catalog is kept as is.
    pub fn set_category(&mut self, category: CategorySelection) {
        self.filter.category = category;
    }

    /// Replace the query. Takes effect on the next `visible` call; only the
    /// indicator depends on `now`.
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.filter.query = query.into();
        self.indicator.on_query_change(&self.filter.query, now);
    }

    /// Whether the "searching" affordance is showing at `now`.
    pub fn is_searching(&self, now: Instant) -> bool {
        self.indicator.is_searching(now)
    }

    /// Back to every category and an empty query.
    pub fn reset(&mut self) {
        self.filter = CatalogFilter::default();
        self.indicator.cancel();
    }

    /// The products passing the current filter.
    pub fn visible<'a>(&self, index: &CatalogIndex<'a>) -> Vec<&'a Product> {
        index.filter(&self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogLabels;
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};

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

    #[test]
    fn test_query_applies_immediately() {
        let products = vec![product("A-1", "Tea", "Drinks"), product("A-2", "Rice", "Pantry")];
        let labels = CatalogLabels::default();
        let index = CatalogIndex::new(&products, &labels);
        let now = Instant::now();

        let mut view = CatalogView::default();
        view.set_query("ric", now);

        assert!(view.is_searching(now));
        let visible = view.visible(&index);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Rice");
    }

    #[test]
    fn test_clearing_query_stops_indicator() {
        let now = Instant::now();
        let mut view = CatalogView::default();
        view.set_query("tea", now);
        view.set_query("", now);
        assert!(!view.is_searching(now));
    }

    #[test]
    fn test_reset() {
        let now = Instant::now();
        let mut view = CatalogView::new(Duration::from_secs(1));
        view.set_category(CategorySelection::Named("Drinks".into()));
        view.set_query("tea", now);

        view.reset();
        assert_eq!(view.category(), &CategorySelection::All);
        assert_eq!(view.query(), "");
        assert!(!view.is_searching(now));
    }
}
