//! Durable key-value session storage for the storefront.
//!
//! Provides a small, synchronous key-value layer with automatic JSON
//! serialization, plus the session store that keeps a shopper's cart and the
//! local admin flag across restarts.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_cache::{Cache, SessionKeys, SessionStore};
//!
//! let cache = Cache::open("/var/lib/storefront/session.json")?;
//! let store = SessionStore::new(cache, SessionKeys::default());
//!
//! // Overwrite the saved cart
//! store.save_cart(&cart_items)?;
//!
//! // Read it back after a restart; corrupt data reads as `None`
//! let saved: Option<Vec<CartItem>> = store.load_cart();
//! ```

mod error;
mod kv;
mod session;

pub use error::CacheError;
pub use kv::{Cache, FileBackend, KvBackend, MemoryBackend};
pub use session::{SessionKeys, SessionStore, DEFAULT_ADMIN_KEY, DEFAULT_CART_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvBackend, SessionKeys, SessionStore};
}
