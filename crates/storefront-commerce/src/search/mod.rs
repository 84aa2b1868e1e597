//! Search module.
//!
//! Contains the category list, the filtered catalog view, and the debounced
//! "searching" indicator.

mod filter;
mod indicator;
mod view;

pub use filter::{CatalogFilter, CatalogIndex, CategorySelection};
pub use indicator::{SearchIndicator, DEFAULT_SEARCH_DEBOUNCE};
pub use view::CatalogView;
