//! Cart and cart line types.

use crate::cart::CartTotals;
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum quantity allowed per cart line.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A product snapshot plus a quantity.
///
/// Name and prices are copied at add time; later catalog edits do not reach
/// lines already in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product ID.
    pub id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Product category at add time.
    pub category: String,
    /// Unit price paid.
    pub current_price: Money,
    /// Unit price before markdown.
    pub original_price: Money,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Quantity, always at least 1 inside a cart.
    pub quantity: i64,
}

impl CartItem {
    /// Snapshot `product` as a single-unit line.
    pub fn snapshot(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            current_price: product.current_price,
            original_price: product.original_price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// `quantity * current_price`, clamped at the numeric bounds.
    pub fn line_current(&self) -> Money {
        self.current_price.saturating_multiply(self.quantity)
    }

    /// `quantity * original_price`, clamped at the numeric bounds.
    pub fn line_original(&self) -> Money {
        self.original_price.saturating_multiply(self.quantity)
    }
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now holds this quantity.
    Updated(i64),
    /// The line reached zero and was removed.
    Removed,
    /// No line has that id; nothing changed.
    Unknown,
}

/// The shopper's cart.
///
/// Holds at most one line per product id, each with a quantity of at least 1.
/// Lines keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart priced in `currency`.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Rebuild a cart from saved lines.
    ///
    /// Lines with a quantity below 1, a negative price, or a price in
    /// another currency are dropped; repeated ids are folded into the first line with their
    /// quantities summed up to the per-line cap.
    pub fn from_saved(saved: Vec<CartItem>, currency: Currency) -> Self {
        let mut cart = Self::new(currency);
        let total = saved.len();
        for mut item in saved {
            if item.quantity < 1
                || !is_valid_price(&item.current_price, currency)
                || !is_valid_price(&item.original_price, currency)
            {
                continue;
            }
            if let Some(existing) = cart.items.iter_mut().find(|i| i.id == item.id) {
                existing.quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
            } else {
                item.quantity = item.quantity.min(MAX_QUANTITY_PER_ITEM);
                cart.items.push(item);
            }
        }
        if cart.items.len() != total {
            debug!(saved = total, kept = cart.items.len(), "sanitized saved cart");
        }
        cart
    }

    /// Add one unit of `product`, returning the line's new quantity.
    ///
    /// An existing line is incremented (capped at [`MAX_QUANTITY_PER_ITEM`]);
    /// otherwise a snapshot line is appended.
    pub fn add_product(&mut self, product: &Product) -> i64 {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1).min(MAX_QUANTITY_PER_ITEM);
            return existing.quantity;
        }
        self.items.push(CartItem::snapshot(product));
        1
    }

    /// Shift a line's quantity by `delta`.
    ///
    /// The result is floored at zero, and a line at zero is removed. Unknown
    /// ids are a no-op.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> QuantityChange {
        let Some(index) = self.position(id) else {
            return QuantityChange::Unknown;
        };
        let quantity = self.items[index]
            .quantity
            .saturating_add(delta)
            .clamp(0, MAX_QUANTITY_PER_ITEM);
        if quantity == 0 {
            self.items.remove(index);
            QuantityChange::Removed
        } else {
            self.items[index].quantity = quantity;
            QuantityChange::Updated(quantity)
        }
    }

    /// Remove a line outright. Returns false for an unknown id.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Get number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by product id.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id.as_str() == id)
    }

    /// Recompute totals from the current lines.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.items, self.currency)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id.as_str() == id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}

fn is_valid_price(price: &Money, currency: Currency) -> bool {
    price.currency == currency && price.amount_cents >= 0
}
