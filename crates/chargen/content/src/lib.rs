//! Data-driven catalog content and loaders.
//!
//! This crate houses the bundled sample catalog and provides loaders for
//! RON/TOML data files:
//! - Module definitions with their option trees (RON)
//! - Trait definitions (RON)
//! - Build configuration: point budget and cost schedules (TOML)
//!
//! Content is read once at startup and handed to the engine as a read-only
//! [`Catalog`](chargen_core::Catalog) snapshot.

#[cfg(feature = "loaders")]
pub mod embedded;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use embedded::{embedded_catalog, embedded_config};
#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, LoadResult};
