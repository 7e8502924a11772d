//! Read-only catalog data: module and trait definitions.
//!
//! Definitions are authored outside the engine and loaded once. The engine
//! only ever reads them through [`CatalogOracle`], so the same transitions
//! run against an embedded snapshot, a file-backed catalog, or a test fixture.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::CatalogError;
use crate::prereq::Location;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Catalog id of a module.
    ModuleId
);
string_id!(
    /// Catalog id of a trait.
    TraitId
);

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModuleKind {
    Racial,
    Core,
    Secondary,
}

/// One node of a module's option tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleOption {
    pub location: Location,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Effect-code string.
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: String,
    /// Authored point cost, used by [`CostSchedule::Catalog`](crate::CostSchedule::Catalog).
    #[cfg_attr(feature = "serde", serde(default = "ModuleOption::default_cost"))]
    pub cost: u32,
}

impl ModuleOption {
    pub fn new(location: Location, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            location,
            name: name.into(),
            description: description.into(),
            data: String::new(),
            cost: Self::default_cost(),
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    const fn default_cost() -> u32 {
        1
    }
}

/// Purchasable package of abilities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleDefinition {
    pub id: ModuleId,
    pub name: String,
    pub kind: ModuleKind,
    /// Ruleset version the module was authored against.
    pub ruleset: u32,
    pub options: Vec<ModuleOption>,
}

impl ModuleDefinition {
    pub fn option(&self, location: &Location) -> Option<&ModuleOption> {
        self.options.iter().find(|option| option.location == *location)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TraitKind {
    /// Perk; costs points.
    Positive,
    /// Flaw; free.
    Negative,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraitDefinition {
    pub id: TraitId,
    pub name: String,
    pub kind: TraitKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Optional effect-code string, compiled like option data.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Option<String>,
}

impl TraitDefinition {
    pub fn is_positive(&self) -> bool {
        self.kind == TraitKind::Positive
    }
}

/// Read-only lookup of catalog definitions.
///
/// Absence is a plain `None`; the engine turns it into
/// [`BuildError::NotFound`](crate::BuildError::NotFound) where that matters.
pub trait CatalogOracle: Send + Sync {
    fn module(&self, id: &ModuleId) -> Option<&ModuleDefinition>;

    fn trait_definition(&self, id: &TraitId) -> Option<&TraitDefinition>;

    fn module_ids(&self) -> Vec<ModuleId>;

    fn trait_ids(&self) -> Vec<TraitId>;
}

/// In-memory catalog snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    modules: BTreeMap<ModuleId, ModuleDefinition>,
    traits: BTreeMap<TraitId, TraitDefinition>,
}

impl Catalog {
    /// Builds a snapshot, rejecting duplicate module ids, trait ids, and
    /// option locations within a module.
    pub fn new(
        modules: impl IntoIterator<Item = ModuleDefinition>,
        traits: impl IntoIterator<Item = TraitDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for module in modules {
            let mut seen = Vec::with_capacity(module.options.len());
            for option in &module.options {
                if seen.contains(&option.location) {
                    return Err(CatalogError::DuplicateOption {
                        module: module.id.clone(),
                        location: option.location,
                    });
                }
                seen.push(option.location);
            }
            if catalog.modules.contains_key(&module.id) {
                return Err(CatalogError::DuplicateModule(module.id));
            }
            catalog.modules.insert(module.id.clone(), module);
        }

        for definition in traits {
            if catalog.traits.contains_key(&definition.id) {
                return Err(CatalogError::DuplicateTrait(definition.id));
            }
            catalog.traits.insert(definition.id.clone(), definition);
        }

        Ok(catalog)
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleDefinition> {
        self.modules.values()
    }

    pub fn traits(&self) -> impl Iterator<Item = &TraitDefinition> {
        self.traits.values()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.traits.is_empty()
    }
}

impl CatalogOracle for Catalog {
    fn module(&self, id: &ModuleId) -> Option<&ModuleDefinition> {
        self.modules.get(id)
    }

    fn trait_definition(&self, id: &TraitId) -> Option<&TraitDefinition> {
        self.traits.get(id)
    }

    fn module_ids(&self) -> Vec<ModuleId> {
        self.modules.keys().cloned().collect()
    }

    fn trait_ids(&self) -> Vec<TraitId> {
        self.traits.keys().cloned().collect()
    }
}
