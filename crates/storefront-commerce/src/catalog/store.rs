//! The in-memory catalog and its admin edit operations.

use std::collections::HashSet;

use crate::catalog::{CatalogMerger, CatalogSource, MergeReport, Product};
use tracing::debug;

/// Result of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new product was placed at the front of the catalog.
    Inserted,
    /// An existing product with the same id was replaced in place.
    Replaced,
}

/// The merged product list owned for the life of the process.
///
/// Read-mostly; admin edits replace or remove individual entries by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from products. Later entries repeating an id are dropped.
    pub fn new(mut products: Vec<Product>) -> Self {
        let mut seen = HashSet::new();
        products.retain(|p| seen.insert(p.id.clone()));
        Self { products }
    }

    /// Merge `sources` into a catalog.
    pub fn from_sources(sources: &[CatalogSource], merger: &CatalogMerger) -> (Self, MergeReport) {
        let (products, report) = merger.merge_with_report(sources);
        (Self { products }, report)
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Replace the product with the same id, or prepend it if new.
    pub fn upsert(&mut self, product: Product) -> UpsertOutcome {
        if let Some(existing) = self.products.iter_mut().find(|p| p.id == product.id) {
            debug!(id = %product.id, "replacing catalog product");
            *existing = product;
            UpsertOutcome::Replaced
        } else {
            debug!(id = %product.id, "adding catalog product");
            self.products.insert(0, product);
            UpsertOutcome::Inserted
        }
    }

    /// Remove a product by id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id.as_str() == id)?;
        debug!(id, "removing catalog product");
        Some(self.products.remove(index))
    }
}
