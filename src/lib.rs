//! Client-side data layer for a remote user collection.
//!
//! The [`store::CollectionStore`] fetches the full collection once, keeps it
//! in a [`cache::PersistentCache`] with a time-to-live, materializes it page by
//! page and maintains a filtered view that always matches the active query.

pub mod cache;
pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod mvi;
pub mod source;
pub mod store;
