//! Storefront settings.

use std::time::Duration;

use crate::catalog::CatalogLabels;
use crate::money::Currency;
use crate::search::DEFAULT_SEARCH_DEBOUNCE;
use serde::{Deserialize, Serialize};
use storefront_cache::SessionKeys;

/// Storefront configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Currency catalog prices are read in.
    pub currency: Currency,
    /// How long the "searching" indicator stays on after a keystroke.
    pub search_debounce_ms: u64,
    /// Durable storage keys.
    pub storage_keys: SessionKeys,
    /// Reserved category labels.
    pub labels: CatalogLabels,
}

impl StorefrontConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE.as_millis() as u64,
            storage_keys: SessionKeys::default(),
            labels: CatalogLabels::default(),
        }
    }
}
