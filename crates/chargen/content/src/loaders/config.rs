//! Build configuration loader.

use std::path::Path;

use chargen_core::BuildConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for build configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`BuildConfig::default`].
    pub fn load(path: &Path) -> LoadResult<BuildConfig> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<BuildConfig> {
        let config: BuildConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse build config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargen_core::CostSchedule;

    #[test]
    fn parses_schedules_and_overrides() {
        let config = ConfigLoader::parse(
            r#"
            starting_points = 14
            schedule = "catalog"

            [[ruleset_schedules]]
            ruleset = 1
            schedule = "tiered"
            "#,
        )
        .unwrap();

        assert_eq!(config.starting_points, 14);
        assert_eq!(config.unlock_cost, BuildConfig::DEFAULT_UNLOCK_COST);
        assert_eq!(config.schedule_for(1), CostSchedule::Tiered);
        assert_eq!(config.schedule_for(2), CostSchedule::Catalog);
    }

    #[test]
    fn empty_file_is_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), BuildConfig::default());
    }

    #[test]
    fn unknown_schedule_is_an_error() {
        assert!(ConfigLoader::parse(r#"schedule = "lavish""#).is_err());
    }
}
