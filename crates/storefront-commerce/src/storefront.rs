//! The storefront: catalog, view, cart, resume decision, and admin mode
//! wired together over one session store.

use std::time::Instant;

use crate::cart::{Cart, CartEngine, CartItem, CartTotals, QuantityChange};
use crate::catalog::{Catalog, CatalogMerger, CatalogSource, MergeReport, Product, RawRecord, UpsertOutcome};
use crate::checkout::CheckoutSnapshot;
use crate::config::StorefrontConfig;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::search::{CatalogIndex, CatalogView, CategorySelection};
use crate::session::{ResumeAction, ResumeProtocol, ResumeState};
use serde_json::Value;
use storefront_cache::{Cache, SessionStore};
use tracing::{debug, info, warn};

/// A shopper's storefront session.
///
/// Opening merges the catalog, restores the saved cart, and starts the
/// resume protocol. Cart changes are written through to the session store;
/// so is the admin flag.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use storefront_cache::Cache;
/// use storefront_commerce::prelude::*;
///
/// let sources = [CatalogSource::new("A", json!([{"id": 5, "name": "Tea", "currentPrice": 10}]))];
/// let mut store = Storefront::open(&sources, Cache::in_memory(), StorefrontConfig::default());
///
/// store.add_by_id("A-5").unwrap();
/// store.add_by_id("A-5").unwrap();
/// assert_eq!(store.cart().item_count(), 2);
/// assert_eq!(store.totals().subtotal_current.amount_cents, 2000);
/// ```
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    catalog: Catalog,
    merge_report: MergeReport,
    view: CatalogView,
    cart: CartEngine,
    resume: ResumeProtocol,
    admin_mode: bool,
}

impl Storefront {
    /// Open a storefront over `sources`, persisting into `cache` under the
    /// configured storage keys.
    pub fn open(sources: &[CatalogSource], cache: Cache, config: StorefrontConfig) -> Self {
        let session = SessionStore::new(cache, config.storage_keys.clone());
        Self::with_session(sources, session, config)
    }

    /// Open a storefront over an existing session store.
    pub fn with_session(
        sources: &[CatalogSource],
        session: SessionStore,
        config: StorefrontConfig,
    ) -> Self {
        let merger = CatalogMerger::new(config.labels.clone(), config.currency);
        let (catalog, merge_report) = Catalog::from_sources(sources, &merger);

        let admin_mode = session.load_admin_mode();
        let cart = CartEngine::restore(session, config.currency);
        let mut resume = ResumeProtocol::new();
        resume.start(cart.cart().unique_item_count());

        info!(
            products = catalog.len(),
            saved_lines = cart.cart().unique_item_count(),
            admin_mode,
            "storefront opened"
        );

        Self {
            view: CatalogView::new(config.search_debounce()),
            config,
            catalog,
            merge_report,
            cart,
            resume,
            admin_mode,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// What the start-up merge kept and dropped.
    pub fn merge_report(&self) -> &MergeReport {
        &self.merge_report
    }

    // Resume

    pub fn resume_state(&self) -> ResumeState {
        self.resume.state()
    }

    /// Check if a saved cart awaits the resume decision.
    pub fn needs_resume_decision(&self) -> bool {
        self.resume.needs_decision()
    }

    /// Apply the resume decision. "Start new" empties the cart.
    pub fn resolve_resume(&mut self, action: ResumeAction) -> Result<(), CommerceError> {
        self.resume.resolve(action)?;
        if action == ResumeAction::StartNew {
            self.cart.clear();
        }
        Ok(())
    }

    // Catalog view

    fn index(&self) -> CatalogIndex<'_> {
        CatalogIndex::new(self.catalog.products(), &self.config.labels)
    }

    /// Category list, the "all" label first.
    pub fn categories(&self) -> Vec<&str> {
        self.index().categories()
    }

    /// Products passing the current category and query.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.view.visible(&self.index())
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Select a category by label.
    pub fn set_category(&mut self, label: &str) {
        let selection = CategorySelection::from_label(label, &self.config.labels);
        self.view.set_category(selection);
    }

    /// Replace the search query as of `now`.
    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.view.set_query(query, now);
    }

    pub fn is_searching(&self, now: Instant) -> bool {
        self.view.is_searching(now)
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    // Cart

    pub fn cart(&self) -> &Cart {
        self.cart.cart()
    }

    pub fn cart_items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Add one unit of `product`. A pending resume decision is taken as
    /// "resume".
    pub fn add_to_cart(&mut self, product: &Product) -> i64 {
        self.resume.resolve_implicitly();
        self.cart.add_to_cart(product)
    }

    /// Add one unit of the catalog product with `id`.
    pub fn add_by_id(&mut self, id: &str) -> Result<i64, CommerceError> {
        let product = self
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        Ok(self.add_to_cart(&product))
    }

    /// Shift a line's quantity. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> QuantityChange {
        self.resume.resolve_implicitly();
        self.cart.update_quantity(id, delta)
    }

    /// Drop a line. Unknown ids are a no-op.
    pub fn remove_from_cart(&mut self, id: &str) -> bool {
        self.resume.resolve_implicitly();
        self.cart.remove(id)
    }

    /// Empty the cart. Settles a pending resume decision as "start new".
    pub fn start_new_order(&mut self) {
        self.resume.discard_pending();
        self.cart.clear();
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Whether the latest cart state reached durable storage.
    pub fn is_cart_persisted(&self) -> bool {
        self.cart.is_persisted()
    }

    /// Read-only copy of the cart for checkout; `None` for an empty cart.
    pub fn checkout_snapshot(&self) -> Option<CheckoutSnapshot> {
        CheckoutSnapshot::capture(self.cart.cart())
    }

    // Admin

    pub fn is_admin(&self) -> bool {
        self.admin_mode
    }

    /// Switch admin mode and persist the flag. A failed write keeps the new
    /// mode for this session.
    pub fn set_admin_mode(&mut self, enabled: bool) {
        self.admin_mode = enabled;
        if let Err(e) = self.cart.store().save_admin_mode(enabled) {
            warn!(error = %e, enabled, "could not persist admin flag");
        }
        debug!(enabled, "admin mode set");
    }

    /// Flip admin mode, returning the new value.
    pub fn toggle_admin_mode(&mut self) -> bool {
        self.set_admin_mode(!self.admin_mode);
        self.admin_mode
    }

    /// Replace the product with the same id, or prepend it. Admin only.
    pub fn upsert_product(&mut self, product: Product) -> Result<UpsertOutcome, CommerceError> {
        self.require_admin("edit products")?;
        Ok(self.catalog.upsert(product))
    }

    /// Normalize an edit-form record and upsert it. Admin only.
    ///
    /// The record keeps its id as given; one without an id gets a new one.
    pub fn upsert_record(&mut self, record: Value) -> Result<(ProductId, UpsertOutcome), CommerceError> {
        self.require_admin("edit products")?;
        let record = RawRecord::from_value(record).ok_or_else(|| {
            CommerceError::ValidationError("product record must be an object".to_string())
        })?;
        let product = record.into_admin_product(&self.config.labels, self.config.currency)?;
        let id = product.id.clone();
        let outcome = self.catalog.upsert(product);
        Ok((id, outcome))
    }

    /// Remove a product from the catalog. Admin only.
    ///
    /// Cart lines already holding the product are left alone.
    pub fn remove_product(&mut self, id: &str) -> Result<Option<Product>, CommerceError> {
        self.require_admin("remove products")?;
        Ok(self.catalog.remove(id))
    }

    fn require_admin(&self, action: &'static str) -> Result<(), CommerceError> {
        if self.admin_mode {
            Ok(())
        } else {
            Err(CommerceError::AdminModeRequired(action))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sources() -> Vec<CatalogSource> {
        vec![
            CatalogSource::new(
                "A",
                json!([
                    {"id": 1, "name": "Green Tea", "category": "Drinks", "currentPrice": 10, "originalPrice": 12},
                    {"id": 2, "name": "Rice", "category": "Pantry", "currentPrice": "35"}
                ]),
            ),
            CatalogSource::new(
                "B",
                json!({"products": [{"id": 1, "name": "Black tea", "category": "Drinks", "currentPrice": 8}]}),
            ),
        ]
    }

    fn open(session: &SessionStore) -> Storefront {
        Storefront::with_session(&sources(), session.clone(), StorefrontConfig::default())
    }

    #[test]
    fn test_open_fresh() {
        let store = open(&SessionStore::in_memory());
        assert_eq!(store.catalog().len(), 3);
        assert_eq!(store.resume_state(), ResumeState::Resolved);
        assert!(!store.is_admin());
        assert_eq!(store.categories(), vec!["all", "Drinks", "Pantry"]);
    }

    #[test]
    fn test_view_filters() {
        let mut store = open(&SessionStore::in_memory());
        let now = Instant::now();

        store.set_category("Drinks");
        store.set_query("TEA", now);
        let names: Vec<_> = store.visible_products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Green Tea", "Black tea"]);
        assert!(store.is_searching(now));

        store.set_category("all");
        store.set_query("", now);
        assert_eq!(store.visible_products().len(), 3);
        assert!(!store.is_searching(now));
    }

    #[test]
    fn test_add_by_id() {
        let mut store = open(&SessionStore::in_memory());
        assert_eq!(store.add_by_id("A-1").unwrap(), 1);
        assert_eq!(store.add_by_id("A-1").unwrap(), 2);
        assert!(matches!(
            store.add_by_id("missing"),
            Err(CommerceError::ProductNotFound(_))
        ));
        assert_eq!(store.totals().subtotal_current.amount_cents, 2000);
        assert_eq!(store.totals().savings.amount_cents, 400);
    }

    #[test]
    fn test_resume_then_start_new() {
        let session = SessionStore::in_memory();
        let mut first = open(&session);
        first.add_by_id("A-2").unwrap();

        let mut second = open(&session);
        assert!(second.needs_resume_decision());
        assert_eq!(second.cart().item_count(), 1);

        second.resolve_resume(ResumeAction::StartNew).unwrap();
        assert!(second.cart().is_empty());
        assert!(session.load_cart::<CartItem>().unwrap_or_default().is_empty());

        let third = open(&session);
        assert_eq!(third.resume_state(), ResumeState::Resolved);
    }

    #[test]
    fn test_mutation_while_pending_resumes() {
        let session = SessionStore::in_memory();
        open(&session).add_by_id("A-2").unwrap();

        let mut store = open(&session);
        store.add_by_id("B-1").unwrap();
        assert_eq!(store.resume_state(), ResumeState::Resolved);
        assert_eq!(store.cart().unique_item_count(), 2);
        assert!(store.resolve_resume(ResumeAction::Resume).is_err());
    }

    #[test]
    fn test_start_new_order_settles_pending() {
        let session = SessionStore::in_memory();
        open(&session).add_by_id("A-2").unwrap();

        let mut store = open(&session);
        assert!(store.needs_resume_decision());
        store.start_new_order();
        assert_eq!(store.resume_state(), ResumeState::Resolved);
        assert!(store.cart().is_empty());
        assert_eq!(session.load_cart::<CartItem>(), Some(vec![]));
        assert!(store.resolve_resume(ResumeAction::Resume).is_err());
    }

    #[test]
    fn test_admin_flag_persists() {
        let session = SessionStore::in_memory();
        let mut store = open(&session);
        assert!(store.toggle_admin_mode());
        assert_eq!(session.cache().get_raw("storefront-admin-mode").unwrap().as_deref(), Some("true"));

        assert!(open(&session).is_admin());
        store.set_admin_mode(false);
        assert!(!open(&session).is_admin());
    }

    #[test]
    fn test_admin_edits_require_admin() {
        let mut store = open(&SessionStore::in_memory());
        assert!(matches!(
            store.remove_product("A-1"),
            Err(CommerceError::AdminModeRequired(_))
        ));
        assert!(store.upsert_record(json!({"name": "Honey"})).is_err());
        assert_eq!(store.catalog().len(), 3);
    }

    #[test]
    fn test_admin_upsert_and_remove() {
        let mut store = open(&SessionStore::in_memory());
        store.set_admin_mode(true);

        let (id, outcome) = store
            .upsert_record(json!({"name": "Honey", "currentPrice": "55"}))
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);
        assert_eq!(store.catalog().products()[0].id, id);

        let (_, outcome) = store
            .upsert_record(json!({"id": "A-2", "name": "Basmati", "category": "Pantry"}))
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Replaced);
        assert_eq!(store.catalog().get("A-2").unwrap().name, "Basmati");

        assert!(store.upsert_record(json!({"category": "x"})).is_err());
        assert!(store.upsert_record(json!([1])).is_err());

        assert!(store.remove_product("A-1").unwrap().is_some());
        assert!(store.remove_product("A-1").unwrap().is_none());
        assert_eq!(store.catalog().len(), 3);
    }

    #[test]
    fn test_cart_keeps_snapshot_after_catalog_edit() {
        let mut store = open(&SessionStore::in_memory());
        store.add_by_id("A-1").unwrap();
        store.set_admin_mode(true);
        store.remove_product("A-1").unwrap();

        assert_eq!(store.cart().get("A-1").unwrap().name, "Green Tea");
        assert_eq!(store.update_quantity("A-1", 1), QuantityChange::Updated(2));
    }

    #[test]
    fn test_checkout_snapshot() {
        let mut store = open(&SessionStore::in_memory());
        assert!(store.checkout_snapshot().is_none());
        store.add_by_id("A-2").unwrap();
        let snapshot = store.checkout_snapshot().unwrap();
        assert_eq!(snapshot.subtotal_current.amount_cents, 3500);
        assert_eq!(snapshot.item_count, 1);
    }
}
