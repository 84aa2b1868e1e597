//! Cart totals.

use crate::cart::CartItem;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Totals derived from the cart lines. Never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Σ quantity × current price.
    pub subtotal_current: Money,
    /// Σ quantity × original price.
    pub subtotal_original: Money,
    /// `subtotal_original - subtotal_current`; negative when a line's
    /// original price is below its current price.
    pub savings: Money,
}

impl CartTotals {
    /// Compute totals for `items` priced in `currency`.
    pub fn compute(items: &[CartItem], currency: Currency) -> Self {
        let sum = |line: fn(&CartItem) -> Money| {
            items
                .iter()
                .fold(Money::zero(currency), |acc, item| acc.saturating_add(&line(item)))
        };
        let subtotal_current = sum(CartItem::line_current);
        let subtotal_original = sum(CartItem::line_original);
        let savings = subtotal_original.saturating_sub(&subtotal_current);

        Self {
            subtotal_current,
            subtotal_original,
            savings,
        }
    }

    /// Check if the shopper saves anything.
    pub fn has_savings(&self) -> bool {
        self.savings.is_positive()
    }

    /// Savings as a percentage of the original subtotal.
    pub fn savings_percentage(&self) -> f64 {
        if self.subtotal_original.amount_cents == 0 {
            return 0.0;
        }
        (self.savings.amount_cents as f64 / self.subtotal_original.amount_cents as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn item(current: i64, original: i64, quantity: i64) -> CartItem {
        CartItem {
            id: ProductId::new("A-1"),
            name: "Tea".to_string(),
            category: "Drinks".to_string(),
            current_price: Money::new(current, Currency::EGP),
            original_price: Money::new(original, Currency::EGP),
            image: None,
            quantity,
        }
    }

    #[test]
    fn test_totals() {
        let totals = CartTotals::compute(&[item(1000, 1500, 2), item(250, 250, 4)], Currency::EGP);
        assert_eq!(totals.subtotal_current.amount_cents, 3000);
        assert_eq!(totals.subtotal_original.amount_cents, 4000);
        assert_eq!(totals.savings.amount_cents, 1000);
        assert!(totals.has_savings());
        assert_eq!(totals.savings_percentage(), 25.0);
    }

    #[test]
    fn test_empty_totals() {
        let totals = CartTotals::compute(&[], Currency::EGP);
        assert!(totals.subtotal_current.is_zero());
        assert!(!totals.has_savings());
        assert_eq!(totals.savings_percentage(), 0.0);
    }

    #[test]
    fn test_negative_savings_reported_as_is() {
        let totals = CartTotals::compute(&[item(1000, 0, 1)], Currency::EGP);
        assert_eq!(totals.savings.amount_cents, -1000);
        assert!(!totals.has_savings());
    }

    #[test]
    fn test_saturates() {
        let totals = CartTotals::compute(&[item(i64::MAX, 0, 2), item(10, 0, 1)], Currency::EGP);
        assert_eq!(totals.subtotal_current.amount_cents, i64::MAX);
    }
}
