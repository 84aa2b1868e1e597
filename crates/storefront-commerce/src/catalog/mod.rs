//! Product catalog module.
//!
//! Contains the canonical product type, raw record validation, source
//! extraction, the merge pipeline, and the in-memory catalog.

mod merge;
mod product;
mod raw;
mod source;
mod store;

pub use merge::{CatalogMerger, MergeReport};
pub use product::{CatalogLabels, Product, ALL_CATEGORIES, UNCATEGORIZED, UNNAMED_PRODUCT};
pub use raw::{parse_price, RawRecord};
pub use source::CatalogSource;
pub use store::{Catalog, UpsertOutcome};
