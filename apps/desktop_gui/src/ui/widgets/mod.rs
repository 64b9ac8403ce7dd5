//! Presentational widgets: searchable selector and action button.

pub mod button;
pub mod selector;

pub use button::{ActionButton, ButtonVariant};
pub use selector::SearchableSelector;
