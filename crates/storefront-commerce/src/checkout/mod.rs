//! Checkout module.
//!
//! Contains the read-only snapshot handed to checkout dispatch.

mod snapshot;

pub use snapshot::CheckoutSnapshot;
