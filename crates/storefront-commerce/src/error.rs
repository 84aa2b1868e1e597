//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Degraded-but-usable situations (malformed catalog sources, dropped records,
/// corrupt saved carts, failed storage writes) are logged where they happen
/// and never show up here.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Catalog edits need admin mode.
    #[error("Admin mode is required to {0}")]
    AdminModeRequired(&'static str),

    /// The resume decision was applied in the wrong state.
    #[error("Invalid resume transition: cannot {action} while {from}")]
    InvalidResumeTransition { from: String, action: String },

    /// A product record failed validation.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<storefront_cache::CacheError> for CommerceError {
    fn from(e: storefront_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
