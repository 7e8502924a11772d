//! Module and trait catalog loader.

use std::path::Path;

use chargen_core::{Catalog, ModuleDefinition, TraitDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Module catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleCatalog {
    pub modules: Vec<ModuleDefinition>,
}

/// Trait catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitCatalog {
    pub traits: Vec<TraitDefinition>,
}

/// Loader for the module and trait catalogs.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Loads both RON files and builds a validated [`Catalog`] snapshot.
    pub fn load(modules_path: &Path, traits_path: &Path) -> LoadResult<Catalog> {
        let modules = Self::load_modules(modules_path)?;
        let traits = Self::load_traits(traits_path)?;
        Self::build(modules, traits)
    }

    pub fn load_modules(path: &Path) -> LoadResult<Vec<ModuleDefinition>> {
        let content = read_file(path)?;
        Self::parse_modules(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn load_traits(path: &Path) -> LoadResult<Vec<TraitDefinition>> {
        let content = read_file(path)?;
        Self::parse_traits(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse_modules(content: &str) -> LoadResult<Vec<ModuleDefinition>> {
        let catalog: ModuleCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse module catalog RON: {}", e))?;
        Ok(catalog.modules)
    }

    pub fn parse_traits(content: &str) -> LoadResult<Vec<TraitDefinition>> {
        let catalog: TraitCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse trait catalog RON: {}", e))?;
        Ok(catalog.traits)
    }

    /// Builds the snapshot, rejecting duplicate ids.
    pub fn build(
        modules: Vec<ModuleDefinition>,
        traits: Vec<TraitDefinition>,
    ) -> LoadResult<Catalog> {
        let (module_count, trait_count) = (modules.len(), traits.len());
        let catalog = Catalog::new(modules, traits)
            .map_err(|e| anyhow::anyhow!("Invalid catalog: {}", e))?;
        tracing::debug!(modules = module_count, traits = trait_count, "catalog loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargen_core::{CatalogOracle, ModuleKind, TraitKind};

    const MODULES: &str = r#"(
        modules: [
            (
                id: "Acrobat",
                name: "Acrobat",
                kind: Secondary,
                ruleset: 2,
                options: [
                    (location: "1", name: "Reaction : Tumble", data: "AS3=1:ASH=1"),
                    (location: "2a", name: "Light Step", description: "Move quietly.", cost: 2),
                ],
            ),
        ],
    )"#;

    const TRAITS: &str = r#"(
        traits: [
            (id: "Hardy", name: "Hardy", kind: Positive, effects: Some("AH=2")),
            (id: "Clumsy", name: "Clumsy", kind: Negative),
        ],
    )"#;

    #[test]
    fn parses_modules_with_defaults() {
        let modules = CatalogLoader::parse_modules(MODULES).unwrap();
        assert_eq!(modules.len(), 1);
        let acrobat = &modules[0];
        assert_eq!(acrobat.kind, ModuleKind::Secondary);
        assert_eq!(acrobat.options[0].cost, 1);
        assert_eq!(acrobat.options[0].description, "");
        assert_eq!(acrobat.options[1].location.to_string(), "2a");
        assert_eq!(acrobat.options[1].cost, 2);
        assert!(acrobat.options[1].data.is_empty());
    }

    #[test]
    fn parses_traits() {
        let traits = CatalogLoader::parse_traits(TRAITS).unwrap();
        assert_eq!(traits[0].kind, TraitKind::Positive);
        assert_eq!(traits[0].effects.as_deref(), Some("AH=2"));
        assert_eq!(traits[1].effects, None);
    }

    #[test]
    fn malformed_location_is_rejected() {
        let bad = MODULES.replace(r#"location: "2a""#, r#"location: "2A""#);
        let err = CatalogLoader::parse_modules(&bad).unwrap_err();
        assert!(err.to_string().contains("module catalog"));
    }

    #[test]
    fn duplicate_ids_fail_to_build() {
        let modules = CatalogLoader::parse_modules(MODULES).unwrap();
        let doubled = [modules.clone(), modules].concat();
        let err = CatalogLoader::build(doubled, Vec::new()).unwrap_err();
        assert!(err.to_string().contains("duplicate module"));
    }

    #[test]
    fn builds_catalog() {
        let catalog = CatalogLoader::build(
            CatalogLoader::parse_modules(MODULES).unwrap(),
            CatalogLoader::parse_traits(TRAITS).unwrap(),
        )
        .unwrap();
        assert!(catalog.module(&"Acrobat".into()).is_some());
        assert!(catalog.trait_definition(&"Clumsy".into()).is_some());
    }
}
