//! Storefront domain types and logic.
//!
//! This crate holds everything between raw catalog documents and the
//! shopper's persisted cart:
//!
//! - **Catalog**: raw source extraction, record validation, the namespaced
//!   merge, admin edits
//! - **Search**: category list, filtered view, debounced "searching" flag
//! - **Cart**: cart lines, totals, the write-through cart engine
//! - **Session**: the start-up resume decision
//! - **Checkout**: the read-only snapshot handed to order dispatch
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::Cache;
//! use storefront_commerce::prelude::*;
//!
//! let sources = vec![
//!     CatalogSource::from_path("A", "catalog/a.json"),
//!     CatalogSource::from_path("B", "catalog/b.json"),
//! ];
//! let mut store = Storefront::open(&sources, Cache::open("session.json")?, StorefrontConfig::default());
//!
//! if store.needs_resume_decision() {
//!     store.resolve_resume(ResumeAction::Resume)?;
//! }
//!
//! store.add_by_id("A-1")?;
//! println!("Total: {}", store.totals().subtotal_current.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod search;
pub mod session;
mod storefront;

pub use config::StorefrontConfig;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};
pub use storefront::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StorefrontConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::storefront::Storefront;

    // Catalog
    pub use crate::catalog::{
        Catalog, CatalogLabels, CatalogMerger, CatalogSource, MergeReport, Product, RawRecord,
        UpsertOutcome,
    };

    // Search
    pub use crate::search::{CatalogFilter, CatalogIndex, CatalogView, CategorySelection, SearchIndicator};

    // Cart
    pub use crate::cart::{Cart, CartEngine, CartItem, CartTotals, QuantityChange};

    // Session
    pub use crate::session::{ResumeAction, ResumeProtocol, ResumeState};

    // Checkout
    pub use crate::checkout::CheckoutSnapshot;
}
