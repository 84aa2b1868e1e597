//! Read-only cart hand-off for checkout dispatch.

use crate::cart::{Cart, CartItem};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Copy of the cart taken at checkout.
///
/// Consumed by whatever composes and sends the order message; the core never
/// formats or sends it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSnapshot {
    /// Lines in cart order.
    pub items: Vec<CartItem>,
    /// Σ quantity × current price.
    pub subtotal_current: Money,
    /// Sum of quantities.
    pub item_count: i64,
    /// Unix timestamp of capture.
    pub captured_at: i64,
}

impl CheckoutSnapshot {
    /// Capture `cart`. An empty cart has nothing to check out.
    pub fn capture(cart: &Cart) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }
        Some(Self {
            items: cart.items().to_vec(),
            subtotal_current: cart.totals().subtotal_current,
            item_count: cart.item_count(),
            captured_at: current_timestamp(),
        })
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
