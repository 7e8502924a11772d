//! Deterministic character build rules.
//!
//! `chargen-core` defines how module points are spent on tiered module
//! options and traits, and how the resulting selection set resolves into an
//! effective character sheet. It performs no I/O: catalog data arrives
//! through [`CatalogOracle`] and persistence belongs to the runtime. All
//! selection changes flow through [`engine::BuildEngine`].
pub mod catalog;
pub mod character;
pub mod config;
pub mod effect;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod prereq;
pub mod stats;

pub use catalog::{
    Catalog, CatalogOracle, ModuleDefinition, ModuleId, ModuleKind, ModuleOption, TraitDefinition,
    TraitId, TraitKind,
};
pub use character::{Character, CharacterId, SelectedModule, SelectedOption, SelectedTrait};
pub use config::{BuildConfig, RulesetSchedule};
pub use effect::{
    ActionRecord, EffectApplier, EffectCompiler, EffectDelta, EffectiveStats, Skill, WeaponSkill,
};
pub use engine::{
    AuditViolation, BuildCommand, BuildEngine, BuildOutcome, Recomputation, audit, recompute,
};
pub use error::{
    BuildError, BuildErrorKind, CatalogError, DomainError, ErrorSeverity, ExistingEntity,
    MissingEntity,
};
pub use ledger::{CostSchedule, PointLedger};
pub use prereq::{Location, LocationError, Prerequisite, PrerequisiteResolver};
pub use stats::{Attribute, Attributes, BaseStats, ResourceKind, ResourceMeter, ResourcePools};
