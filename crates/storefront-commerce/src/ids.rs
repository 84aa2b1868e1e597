//! Newtype IDs for type-safe identifiers.
//!
//! Product ids are namespaced by the catalog source they came from, so the
//! same raw id in two sources never produces the same `ProductId`. The few
//! namespaced ids that still coincide are told apart with a `-dup-<n>` suffix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a product in the merged catalog.
    ProductId
);
define_id!(
    /// Tag naming a catalog source; prefixes every id the source contributes.
    SourceTag
);

impl ProductId {
    /// Namespaced id for a record that carries its own raw id.
    pub fn namespaced(tag: &SourceTag, raw_id: &str) -> Self {
        Self(format!("{}-{}", tag, raw_id))
    }

    /// Namespaced id for a record without a raw id, from its position in the source.
    pub fn positional(tag: &SourceTag, index: usize) -> Self {
        Self(format!("{}-auto-{}", tag, index))
    }

    /// The `n`th alternative to an id that is already taken.
    pub fn disambiguated(&self, n: usize) -> Self {
        Self(format!("{}-dup-{}", self.0, n))
    }

    /// Generate a fresh id for a product created locally (admin edits).
    pub fn generate() -> Self {
        Self(format!("local-{}", generate_id()))
    }
}

/// Generate a unique id from the clock and a process-wide counter.
fn generate_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{:x}-{:x}", millis, counter)
}
