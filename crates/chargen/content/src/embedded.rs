//! Sample catalog and configuration compiled into the binary.

use chargen_core::{BuildConfig, Catalog};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

const MODULES: &str = include_str!("../data/modules.ron");
const TRAITS: &str = include_str!("../data/traits.ron");
const CONFIG: &str = include_str!("../data/build.toml");

/// Bundled sample catalog.
pub fn embedded_catalog() -> LoadResult<Catalog> {
    CatalogLoader::build(
        CatalogLoader::parse_modules(MODULES)?,
        CatalogLoader::parse_traits(TRAITS)?,
    )
}

/// Bundled build configuration.
pub fn embedded_config() -> LoadResult<BuildConfig> {
    ConfigLoader::parse(CONFIG)
}
