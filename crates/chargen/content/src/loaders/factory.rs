//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use chargen_core::{BuildConfig, Catalog};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads all build content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── build.toml
/// ├── modules.ron
/// └── traits.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "build.toml";
    pub const MODULES_FILE: &'static str = "modules.ron";
    pub const TRAITS_FILE: &'static str = "traits.ron";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load build configuration from `build.toml`.
    pub fn load_config(&self) -> LoadResult<BuildConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load the catalog from `modules.ron` and `traits.ron`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load(
            &self.data_dir.join(Self::MODULES_FILE),
            &self.data_dir.join(Self::TRAITS_FILE),
        )
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_files_name_the_path() {
        let factory = ContentFactory::new("/nonexistent/chargen");
        let err = factory.load_config().unwrap_err();
        assert!(err.to_string().contains("build.toml"));
    }
}
