//! Session persistence using the Key-Value store.
//!
//! A storefront session keeps exactly two durable values: the serialized cart
//! and the admin-mode flag. Both are overwritten in full on every change.

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

/// Default key for the serialized cart.
pub const DEFAULT_CART_KEY: &str = "storefront-cart";

/// Default key for the admin-mode flag.
pub const DEFAULT_ADMIN_KEY: &str = "storefront-admin-mode";

/// Storage keys used by a [`SessionStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionKeys {
    /// Key holding the cart as a JSON array.
    #[serde(default = "default_cart_key")]
    pub cart: String,
    /// Key holding the admin flag as `"true"` / `"false"`.
    #[serde(default = "default_admin_key")]
    pub admin_mode: String,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

fn default_admin_key() -> String {
    DEFAULT_ADMIN_KEY.to_string()
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self {
            cart: default_cart_key(),
            admin_mode: default_admin_key(),
        }
    }
}

/// Durable cart and admin-mode storage for one browsing session or device.
///
/// Generic over the cart line type so that this crate stays independent of
/// the commerce domain types.
///
/// # Example
///
/// ```
/// use storefront_cache::SessionStore;
///
/// let store = SessionStore::in_memory();
/// store.save_cart(&["tea".to_string()]).unwrap();
/// let cart: Option<Vec<String>> = store.load_cart();
/// assert_eq!(cart, Some(vec!["tea".to_string()]));
///
/// store.save_admin_mode(true).unwrap();
/// assert!(store.load_admin_mode());
/// ```
#[derive(Debug, Clone)]
pub struct SessionStore {
    cache: Cache,
    keys: SessionKeys,
}

impl SessionStore {
    /// Create a session store over `cache`.
    pub fn new(cache: Cache, keys: SessionKeys) -> Self {
        Self { cache, keys }
    }

    /// Session store over a fresh in-memory cache with default keys.
    pub fn in_memory() -> Self {
        Self::new(Cache::in_memory(), SessionKeys::default())
    }

    /// The storage keys in use.
    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// The underlying cache.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Load the saved cart.
    ///
    /// Returns `None` when nothing is stored, or when the stored value cannot
    /// be read or deserialized; a corrupt cart is logged and treated as absent.
    pub fn load_cart<T: DeserializeOwned>(&self) -> Option<Vec<T>> {
        match self.cache.get::<Vec<T>>(&self.keys.cart) {
            Ok(Some(items)) => {
                debug!(key = %self.keys.cart, lines = items.len(), "loaded saved cart");
                Some(items)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key = %self.keys.cart, error = %e, "ignoring unreadable saved cart");
                None
            }
        }
    }

    /// Overwrite the saved cart with `items`.
    pub fn save_cart<T: Serialize>(&self, items: &[T]) -> Result<(), CacheError> {
        self.cache.set(&self.keys.cart, items)
    }

    /// Load the admin-mode flag. Anything other than `"true"` reads as off.
    pub fn load_admin_mode(&self) -> bool {
        match self.cache.get_raw(&self.keys.admin_mode) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!(key = %self.keys.admin_mode, error = %e, "could not read admin flag");
                false
            }
        }
    }

    /// Persist the admin-mode flag as `"true"` or `"false"`.
    pub fn save_admin_mode(&self, enabled: bool) -> Result<(), CacheError> {
        let value = if enabled { "true" } else { "false" };
        self.cache.set_raw(&self.keys.admin_mode, value)
    }
}
