//! Character aggregate: base stats, selections, ledger and derived sheet.

use arrayvec::ArrayVec;

use crate::catalog::{ModuleId, TraitId, TraitKind};
use crate::config::BuildConfig;
use crate::effect::{EffectApplier, EffectDelta, EffectiveStats};
use crate::ledger::PointLedger;
use crate::prereq::Location;
use crate::stats::{BaseStats, ResourcePools};

/// Unique identifier for a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CharacterId(pub u64);

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A selected option and what it cost when it was bought.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedOption {
    pub location: Location,
    /// Build revision at which the option was selected.
    pub selected_at: u64,
    pub cost: u32,
}

/// A module the character has added, with its selected options in selection
/// order. Locations are unique within a module.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedModule {
    pub module: ModuleId,
    pub unlock_cost: u32,
    pub options: Vec<SelectedOption>,
}

impl SelectedModule {
    pub fn new(module: ModuleId, unlock_cost: u32) -> Self {
        Self {
            module,
            unlock_cost,
            options: Vec::new(),
        }
    }

    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.options.iter().map(|option| &option.location)
    }

    pub fn option(&self, location: &Location) -> Option<&SelectedOption> {
        self.options.iter().find(|option| option.location == *location)
    }

    pub fn is_selected(&self, location: &Location) -> bool {
        self.option(location).is_some()
    }

    /// Unlock cost plus every option cost.
    pub fn spent(&self) -> u32 {
        self.unlock_cost + self.options.iter().map(|option| option.cost).sum::<u32>()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectedTrait {
    pub id: TraitId,
    pub kind: TraitKind,
    pub cost: u32,
}

pub type TraitSlots = ArrayVec<SelectedTrait, { BuildConfig::MAX_TRAITS }>;

/// Everything the build engine knows about one character.
///
/// Selection state and the ledger change only through
/// [`BuildEngine`](crate::BuildEngine); `effective` is a cache of the last
/// full recompute.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    id: CharacterId,
    name: String,
    base: BaseStats,
    resources: ResourcePools,
    points: PointLedger,
    modules: Vec<SelectedModule>,
    traits: TraitSlots,
    revision: u64,
    effective: EffectiveStats,
}

impl Character {
    /// Creates a character with no selections and full resource pools.
    pub fn new(id: CharacterId, name: impl Into<String>, base: BaseStats, points: PointLedger) -> Self {
        let effective = EffectApplier::apply_folded(&base, &EffectDelta::new());
        Self {
            id,
            name: name.into(),
            resources: ResourcePools::at_max(&effective.resources),
            base,
            points,
            modules: Vec::new(),
            traits: TraitSlots::new(),
            revision: 0,
            effective,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub fn resources(&self) -> &ResourcePools {
        &self.resources
    }

    pub fn points(&self) -> &PointLedger {
        &self.points
    }

    pub fn modules(&self) -> &[SelectedModule] {
        &self.modules
    }

    pub fn module(&self, id: &ModuleId) -> Option<&SelectedModule> {
        self.modules.iter().find(|selected| selected.module == *id)
    }

    pub fn has_module(&self, id: &ModuleId) -> bool {
        self.module(id).is_some()
    }

    pub fn traits(&self) -> &[SelectedTrait] {
        &self.traits
    }

    pub fn has_trait(&self, id: &TraitId) -> bool {
        self.traits.iter().any(|selected| selected.id == *id)
    }

    /// Monotonic counter bumped by every committed transition.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn effective(&self) -> &EffectiveStats {
        &self.effective
    }

    /// Sum of every recorded charge: module unlocks, options and traits.
    pub fn recorded_spend(&self) -> u32 {
        let modules: u32 = self.modules.iter().map(SelectedModule::spent).sum();
        let traits: u32 = self.traits.iter().map(|selected| selected.cost).sum();
        modules + traits
    }

    /// Resource current values may be spent by play outside the build engine.
    pub fn resources_mut(&mut self) -> &mut ResourcePools {
        &mut self.resources
    }

    pub(crate) fn points_mut(&mut self) -> &mut PointLedger {
        &mut self.points
    }

    pub(crate) fn module_mut(&mut self, id: &ModuleId) -> Option<&mut SelectedModule> {
        self.modules.iter_mut().find(|selected| selected.module == *id)
    }

    pub(crate) fn push_module(&mut self, module: SelectedModule) {
        self.modules.push(module);
    }

    pub(crate) fn take_module(&mut self, id: &ModuleId) -> Option<SelectedModule> {
        let index = self.modules.iter().position(|selected| selected.module == *id)?;
        Some(self.modules.remove(index))
    }

    pub(crate) fn traits_mut(&mut self) -> &mut TraitSlots {
        &mut self.traits
    }

    pub(crate) fn bump_revision(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    pub(crate) fn set_effective(&mut self, effective: EffectiveStats) {
        self.resources.rebase(&effective.resources);
        self.effective = effective;
    }
}
