//! Effect-code language: tables, compiler, delta, and applier.
//!
//! ```text
//! catalog data ("AS3=1:ASH=1")
//!      ↓  EffectCompiler::compile
//! EffectDelta (summable bag)
//!      ↓  EffectDelta::fold
//! EffectDelta (whole selection set)
//!      ↓  EffectApplier::apply_folded
//! EffectiveStats
//! ```

pub mod applier;
pub mod compiler;
pub mod delta;
pub mod tables;

pub use applier::{ActionRecord, EffectApplier, EffectiveStats};
pub use compiler::{BonusTarget, EffectCompiler, EffectToken};
pub use delta::{ActionUsage, EffectDelta, UsageKind};
pub use tables::{Craft, Immunity, Mitigation, Skill, SkillSlot, Vision, WeaponSkill};
