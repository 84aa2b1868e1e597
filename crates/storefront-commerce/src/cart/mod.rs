//! Shopping cart module.
//!
//! Contains the cart and its lines, totals, and the persisting cart engine.

mod cart;
mod engine;
mod pricing;

pub use cart::{Cart, CartItem, QuantityChange, MAX_QUANTITY_PER_ITEM};
pub use engine::CartEngine;
pub use pricing::CartTotals;
