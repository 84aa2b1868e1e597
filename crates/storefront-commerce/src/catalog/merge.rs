//! Merging raw catalog sources into one product list with unique ids.

use std::collections::HashSet;

use crate::catalog::{CatalogLabels, CatalogSource, Product, RawRecord};
use crate::ids::ProductId;
use crate::money::Currency;
use serde::Serialize;
use tracing::{debug, warn};

/// Counters describing one merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Sources offered to the merge.
    pub sources: usize,
    /// Sources that held no record list.
    pub malformed_sources: usize,
    /// Records found across all sources.
    pub records_seen: usize,
    /// Records without an id or a name.
    pub records_dropped: usize,
    /// Records whose namespaced id was already taken and got a `-dup-<n>` suffix.
    pub ids_disambiguated: usize,
    /// Products in the merged catalog.
    pub products: usize,
}

/// Combines catalog sources into a single ordered list of valid products.
///
/// Every id is namespaced by its source tag (`"<tag>-<raw id>"`, or
/// `"<tag>-auto-<position>"` when the record has none), so identical raw ids
/// from different sources stay distinct. A namespaced id that is already
/// taken becomes `"<id>-dup-<n>"` with the smallest free `n`, so every
/// retained record reaches the output. Output order is source order, then
/// record order.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use storefront_commerce::catalog::{CatalogMerger, CatalogSource};
///
/// let merged = CatalogMerger::default().merge(&[
///     CatalogSource::new("A", json!([{"id": 1, "name": "Tea"}])),
///     CatalogSource::new("B", json!([{"id": 1, "name": "Rice"}])),
/// ]);
/// let ids: Vec<_> = merged.iter().map(|p| p.id.as_str()).collect();
/// assert_eq!(ids, ["A-1", "B-1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogMerger {
    labels: CatalogLabels,
    currency: Currency,
}

impl CatalogMerger {
    /// Create a merger using the given labels and price currency.
    pub fn new(labels: CatalogLabels, currency: Currency) -> Self {
        Self { labels, currency }
    }

    /// Merge `sources` into a product list.
    pub fn merge(&self, sources: &[CatalogSource]) -> Vec<Product> {
        self.merge_with_report(sources).0
    }

    /// Merge `sources`, also returning what was kept and dropped.
    pub fn merge_with_report(&self, sources: &[CatalogSource]) -> (Vec<Product>, MergeReport) {
        let mut report = MergeReport {
            sources: sources.len(),
            ..MergeReport::default()
        };
        let mut seen: HashSet<ProductId> = HashSet::new();
        let mut products = Vec::new();

        for source in sources {
            let Some(records) = source.records() else {
                warn!(source = %source.tag, "catalog source holds no record list");
                report.malformed_sources += 1;
                continue;
            };

            for (index, value) in records.into_iter().enumerate() {
                report.records_seen += 1;

                let Some(record) = RawRecord::from_value(value.clone()).filter(RawRecord::is_retained)
                else {
                    report.records_dropped += 1;
                    continue;
                };

                let base = match record.raw_id() {
                    Some(raw) => ProductId::namespaced(&source.tag, &raw),
                    None => ProductId::positional(&source.tag, index),
                };
                let id = claim(&mut seen, &base);
                if id != base {
                    debug!(source = %source.tag, taken = %base, id = %id, "disambiguated product id");
                    report.ids_disambiguated += 1;
                }

                products.push(record.into_product(id, &self.labels, self.currency));
            }
        }

        report.products = products.len();
        debug!(
            sources = report.sources,
            malformed = report.malformed_sources,
            seen = report.records_seen,
            dropped = report.records_dropped,
            disambiguated = report.ids_disambiguated,
            products = report.products,
            "merged catalog"
        );
        (products, report)
    }
}

/// Reserve `base`, or its first free `-dup-<n>` alternative.
fn claim(seen: &mut HashSet<ProductId>, base: &ProductId) -> ProductId {
    let mut id = base.clone();
    let mut n = 0;
    while !seen.insert(id.clone()) {
        n += 1;
        id = base.disambiguated(n);
    }
    id
}
