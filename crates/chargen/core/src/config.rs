//! Build configuration constants and tunable parameters.

use crate::catalog::{ModuleDefinition, ModuleOption, TraitDefinition, TraitKind};
use crate::ledger::CostSchedule;

/// Schedule override for modules authored against one ruleset version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RulesetSchedule {
    pub ruleset: u32,
    pub schedule: CostSchedule,
}

/// Point economy of the build engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BuildConfig {
    /// Module points a new character starts with.
    pub starting_points: u32,
    /// Cost of adding a module.
    pub unlock_cost: u32,
    pub positive_trait_cost: u32,
    pub negative_trait_cost: u32,
    /// Canonical schedule for rulesets without an override.
    pub schedule: CostSchedule,
    pub ruleset_schedules: Vec<RulesetSchedule>,
}

impl BuildConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum selected traits per character.
    pub const MAX_TRAITS: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_POINTS: u32 = 10;
    pub const DEFAULT_UNLOCK_COST: u32 = 2;
    pub const DEFAULT_POSITIVE_TRAIT_COST: u32 = 1;
    pub const DEFAULT_NEGATIVE_TRAIT_COST: u32 = 0;

    pub fn new() -> Self {
        Self {
            starting_points: Self::DEFAULT_STARTING_POINTS,
            unlock_cost: Self::DEFAULT_UNLOCK_COST,
            positive_trait_cost: Self::DEFAULT_POSITIVE_TRAIT_COST,
            negative_trait_cost: Self::DEFAULT_NEGATIVE_TRAIT_COST,
            schedule: CostSchedule::default(),
            ruleset_schedules: Vec::new(),
        }
    }

    pub fn with_schedule(mut self, schedule: CostSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_ruleset_schedule(mut self, ruleset: u32, schedule: CostSchedule) -> Self {
        self.ruleset_schedules.retain(|entry| entry.ruleset != ruleset);
        self.ruleset_schedules
            .push(RulesetSchedule { ruleset, schedule });
        self
    }

    pub fn with_starting_points(mut self, starting_points: u32) -> Self {
        self.starting_points = starting_points;
        self
    }

    pub fn schedule_for(&self, ruleset: u32) -> CostSchedule {
        self.ruleset_schedules
            .iter()
            .find(|entry| entry.ruleset == ruleset)
            .map_or(self.schedule, |entry| entry.schedule)
    }

    pub fn module_cost(&self, _module: &ModuleDefinition) -> u32 {
        self.unlock_cost
    }

    /// Cost of `option` under the schedule of the module's ruleset.
    pub fn option_cost(&self, module: &ModuleDefinition, option: &ModuleOption) -> u32 {
        self.schedule_for(module.ruleset).option_cost(option)
    }

    pub fn trait_cost(&self, definition: &TraitDefinition) -> u32 {
        match definition.kind {
            TraitKind::Positive => self.positive_trait_cost,
            TraitKind::Negative => self.negative_trait_cost,
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}
