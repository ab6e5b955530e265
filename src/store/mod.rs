//! The collection store: cache-first loading, client-side pagination and a
//! filtered view kept consistent with the active query.

mod collection;
mod reducer;
mod state;
pub mod view;

pub use collection::CollectionStore;
pub use reducer::{StoreIntent, StoreReducer};
pub use state::{StoreSettings, StoreState};
pub use view::derive_view;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store settings: {0}")]
    InvalidSettings(String),
}
