//! Cart mutations with write-through persistence.

use crate::cart::{Cart, CartItem, CartTotals, QuantityChange};
use crate::catalog::Product;
use crate::money::Currency;
use storefront_cache::SessionStore;
use tracing::{debug, warn};

/// Owns the cart and writes it to the session store after every mutation.
///
/// A failed write is logged and leaves the in-memory cart as mutated; the
/// cart stays usable for the rest of the session and [`is_persisted`]
/// reports the gap until a later write succeeds.
///
/// [`is_persisted`]: CartEngine::is_persisted
#[derive(Debug, Clone)]
pub struct CartEngine {
    cart: Cart,
    store: SessionStore,
    persisted: bool,
}

impl CartEngine {
    /// Create an engine over an empty cart. Nothing is written until the
    /// first mutation.
    pub fn new(store: SessionStore, currency: Currency) -> Self {
        Self {
            cart: Cart::new(currency),
            store,
            persisted: true,
        }
    }

    /// Create an engine seeded from the saved cart, if any.
    ///
    /// An absent or unreadable saved cart gives an empty cart.
    pub fn restore(store: SessionStore, currency: Currency) -> Self {
        let cart = match store.load_cart::<CartItem>() {
            Some(saved) => Cart::from_saved(saved, currency),
            None => Cart::new(currency),
        };
        debug!(lines = cart.unique_item_count(), "restored cart");
        Self {
            cart,
            store,
            persisted: true,
        }
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current lines.
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// The session store written to.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Add one unit of `product` and persist. Returns the line's quantity.
    pub fn add_to_cart(&mut self, product: &Product) -> i64 {
        let quantity = self.cart.add_product(product);
        debug!(id = %product.id, quantity, "added to cart");
        self.persist();
        quantity
    }

    /// Shift a line's quantity by `delta` and persist.
    ///
    /// Unknown ids change nothing and write nothing.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> QuantityChange {
        let change = self.cart.update_quantity(id, delta);
        match change {
            QuantityChange::Unknown => debug!(id, "quantity update for unknown line"),
            _ => {
                debug!(id, delta, ?change, "updated cart quantity");
                self.persist();
            }
        }
        change
    }

    /// Remove a line outright and persist. Returns false for an unknown id.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.cart.remove(id);
        if removed {
            debug!(id, "removed cart line");
            self.persist();
        }
        removed
    }

    /// Empty the cart and persist the empty cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        debug!("cleared cart");
        self.persist();
    }

    /// Totals recomputed from the current lines.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Whether the latest cart state reached durable storage.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    fn persist(&mut self) {
        match self.store.save_cart(self.cart.items()) {
            Ok(()) => self.persisted = true,
            Err(e) => {
                warn!(
                    error = %e,
                    lines = self.cart.unique_item_count(),
                    "could not persist cart; keeping it in memory"
                );
                self.persisted = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::money::Money;
    use storefront_cache::{Cache, MemoryBackend, SessionKeys};

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: "Pantry".to_string(),
            current_price: Money::new(cents, Currency::EGP),
            original_price: Money::new(cents, Currency::EGP),
            image: None,
            description: None,
        }
    }

    fn saved(store: &SessionStore) -> Vec<(String, i64)> {
        store
            .load_cart::<CartItem>()
            .unwrap_or_default()
            .into_iter()
            .map(|i| (i.id.into_inner(), i.quantity))
            .collect()
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let store = SessionStore::in_memory();
        let mut engine = CartEngine::new(store.clone(), Currency::EGP);

        engine.add_to_cart(&product("5", 1000));
        assert_eq!(saved(&store), vec![("5".to_string(), 1)]);

        engine.add_to_cart(&product("5", 1000));
        assert_eq!(saved(&store), vec![("5".to_string(), 2)]);
        assert_eq!(engine.totals().subtotal_current.amount_cents, 2000);

        engine.update_quantity("5", -2);
        assert!(saved(&store).is_empty());
        assert!(engine.is_persisted());
    }

    #[test]
    fn test_clear_overwrites_saved_cart() {
        let store = SessionStore::in_memory();
        let mut engine = CartEngine::new(store.clone(), Currency::EGP);
        engine.add_to_cart(&product("a", 100));
        engine.add_to_cart(&product("b", 100));
        engine.clear();

        assert_eq!(store.load_cart::<CartItem>(), Some(vec![]));
    }

    #[test]
    fn test_unknown_id_writes_nothing() {
        let store = SessionStore::in_memory();
        let mut engine = CartEngine::new(store.clone(), Currency::EGP);
        assert_eq!(engine.update_quantity("missing", 1), QuantityChange::Unknown);
        assert!(!engine.remove("missing"));
        assert!(store.load_cart::<CartItem>().is_none());
    }

    #[test]
    fn test_restore() {
        let store = SessionStore::in_memory();
        let mut first = CartEngine::new(store.clone(), Currency::EGP);
        first.add_to_cart(&product("a", 100));
        first.add_to_cart(&product("a", 100));
        first.add_to_cart(&product("b", 250));

        let restored = CartEngine::restore(store, Currency::EGP);
        assert_eq!(restored.cart(), first.cart());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let cache = Cache::new(MemoryBackend::with_capacity(64));
        let store = SessionStore::new(cache, SessionKeys::default());
        let mut engine = CartEngine::new(store.clone(), Currency::EGP);

        engine.add_to_cart(&product("a-product-with-a-long-id", 100));

        assert!(!engine.is_persisted());
        assert_eq!(engine.cart().item_count(), 1);
        assert!(store.load_cart::<CartItem>().is_none());
    }
}
