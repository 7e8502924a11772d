//! Effect applier: folds deltas and lays them over base stats.
//!
//! The applier is a pure function of its inputs. It never reads the
//! previous effective sheet, so applying the same selection set twice gives
//! the same result. Resource current values are reconciled separately via
//! [`ResourcePools::rebase`](crate::stats::ResourcePools::rebase).

use std::collections::{BTreeMap, BTreeSet};

use super::delta::{ActionUsage, EffectDelta, UsageKind};
use super::tables::{Craft, Immunity, Mitigation, Skill, Vision, WeaponSkill};
use crate::catalog::{ModuleId, ModuleOption};
use crate::prereq::Location;
use crate::stats::{Attribute, Attributes, BaseStats, ResourceMaximums};

/// Action granted by an option whose name reads `"<Kind> : <Name>"`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub name: String,
    pub description: String,
    pub kind: UsageKind,
    pub source_module: ModuleId,
    pub source_option: Location,
}

impl ActionRecord {
    /// Derives an action from an option's display name, if it names one.
    pub fn from_option(module: &ModuleId, option: &ModuleOption) -> Option<Self> {
        let (label, name) = option.name.split_once(':')?;
        let kind = UsageKind::from_label(label)?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            description: option.description.clone(),
            kind,
            source_module: module.clone(),
            source_option: option.location,
        })
    }
}

/// The derived character sheet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStats {
    pub attributes: Attributes,
    pub skills: BTreeMap<Skill, i32>,
    pub crafts: BTreeMap<Craft, i32>,
    pub weapon_skills: BTreeMap<WeaponSkill, i32>,
    pub mitigation: BTreeMap<Mitigation, i32>,
    pub initiative: i32,
    pub movement: i32,
    pub resources: ResourceMaximums,
    pub immunities: BTreeSet<Immunity>,
    pub vision: Vision,
    pub languages: BTreeSet<String>,
    pub trait_flags: BTreeSet<String>,
    pub usages: BTreeMap<String, ActionUsage>,
    pub conditionals: Vec<String>,
    pub actions: Vec<ActionRecord>,
}

impl EffectiveStats {
    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    pub fn weapon_skill(&self, weapon: WeaponSkill) -> i32 {
        self.weapon_skills.get(&weapon).copied().unwrap_or(0)
    }

    pub fn craft(&self, craft: Craft) -> i32 {
        self.crafts.get(&craft).copied().unwrap_or(0)
    }

    pub fn mitigation(&self, channel: Mitigation) -> i32 {
        self.mitigation.get(&channel).copied().unwrap_or(0)
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.iter().any(|action| action.name == name)
    }
}

/// Folds [`EffectDelta`]s onto [`BaseStats`].
pub struct EffectApplier;

impl EffectApplier {
    /// Base movement before bonuses.
    pub const BASE_MOVEMENT: i32 = 6;

    /// Folds every delta and applies the result to `base`.
    ///
    /// Name-derived actions are attached separately with
    /// [`EffectApplier::attach_actions`].
    pub fn apply<'a>(
        base: &BaseStats,
        deltas: impl IntoIterator<Item = &'a EffectDelta>,
    ) -> EffectiveStats {
        let folded = EffectDelta::fold(deltas);
        Self::apply_folded(base, &folded)
    }

    /// Applies an already folded delta.
    pub fn apply_folded(base: &BaseStats, delta: &EffectDelta) -> EffectiveStats {
        let attrs = &base.attributes;

        // Attribute-derived bases first, bonuses second.
        let skills = Skill::ALL
            .iter()
            .map(|&skill| {
                let value = attrs
                    .modifier(skill.governing_attribute())
                    .saturating_add(base.rank(skill))
                    .saturating_add(delta.skill(skill));
                (skill, value)
            })
            .collect();

        let weapon_skills = WeaponSkill::ALL
            .iter()
            .map(|&weapon| {
                let bonus = delta.weapon_skills.get(&weapon).copied().unwrap_or(0);
                (
                    weapon,
                    attrs.modifier(weapon.governing_attribute()).saturating_add(bonus),
                )
            })
            .collect();

        let resources = ResourceMaximums::from_attributes(attrs).with_health_bonus(delta.health);

        let mut languages = base.languages.clone();
        languages.extend(delta.languages.iter().cloned());

        EffectiveStats {
            attributes: *attrs,
            skills,
            crafts: delta.crafts.clone(),
            weapon_skills,
            mitigation: delta.mitigation.clone(),
            initiative: attrs
                .modifier(Attribute::Agility)
                .saturating_add(delta.initiative),
            movement: Self::BASE_MOVEMENT.saturating_add(delta.movement).max(0),
            resources,
            immunities: delta.immunities.clone(),
            vision: delta.vision,
            languages,
            trait_flags: delta.trait_flags.clone(),
            usages: delta.usages.clone(),
            conditionals: delta.conditionals.clone(),
            actions: Vec::new(),
        }
    }

    /// Attaches name-derived actions, suppressing duplicate names.
    ///
    /// The first option to grant a given action name wins.
    pub fn attach_actions<'a>(
        stats: &mut EffectiveStats,
        options: impl IntoIterator<Item = (&'a ModuleId, &'a ModuleOption)>,
    ) {
        for (module, option) in options {
            let Some(record) = ActionRecord::from_option(module, option) else {
                continue;
            };
            if !stats.has_action(&record.name) {
                stats.actions.push(record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectCompiler;

    fn option(location: &str, name: &str) -> ModuleOption {
        ModuleOption::new(location.parse().expect("valid location"), name, "")
    }

    #[test]
    fn bonuses_land_on_top_of_attribute_bases() {
        let base = BaseStats::new(Attributes::new(10, 14, 10, 10, 10, 10))
            .with_rank(Skill::Stealth, 1);
        let delta = EffectCompiler::compile("AS3=1:ASH=1");

        let before = EffectApplier::apply_folded(&base, &EffectDelta::new());
        let after = EffectApplier::apply(&base, [&delta]);

        // Stealth: AGI mod 2 + rank 1
        assert_eq!(before.skill(Skill::Stealth), 3);
        assert_eq!(after.skill(Skill::Stealth), before.skill(Skill::Stealth) + 1);
        assert_eq!(before.initiative, 2);
        assert_eq!(after.initiative, before.initiative + 1);
    }

    #[test]
    fn health_bonus_raises_max() {
        let base = BaseStats::default();
        let delta = EffectCompiler::compile("AH=5");
        let stats = EffectApplier::apply(&base, [&delta]);
        assert_eq!(stats.resources.health, 15);
    }

    #[test]
    fn applying_twice_is_identical() {
        let base = BaseStats::default().with_language("Common");
        let deltas = [
            EffectCompiler::compile("AS1=2:I3:L=\"Elvish\":VD1"),
            EffectCompiler::compile("AS1=1:I3:XD2:AV=1"),
        ];
        let first = EffectApplier::apply(&base, &deltas);
        let second = EffectApplier::apply(&base, &deltas);
        assert_eq!(first, second);
        assert_eq!(first.skill(Skill::Athletics), 3);
        assert_eq!(first.movement, 7);
        assert_eq!(first.languages.len(), 2);
    }

    #[test]
    fn weapon_skills_follow_governing_attribute() {
        let base = BaseStats::new(Attributes::new(16, 8, 10, 10, 10, 10));
        let stats = EffectApplier::apply(&base, [&EffectCompiler::compile("AZ1=1")]);
        assert_eq!(stats.weapon_skill(WeaponSkill::Blades), 4);
        assert_eq!(stats.weapon_skill(WeaponSkill::Bows), -1);
    }

    #[test]
    fn named_options_become_actions_once() {
        let module = ModuleId::from("Acrobat");
        let options = [
            option("1", "Reaction : Tumble"),
            option("2a", "free action: Tumble"),
            option("2b", "Action:Vault"),
            option("3", "Passive : Balance"),
            option("4", "Action : "),
        ];

        let mut stats = EffectApplier::apply_folded(&BaseStats::default(), &EffectDelta::new());
        EffectApplier::attach_actions(&mut stats, options.iter().map(|o| (&module, o)));

        assert_eq!(stats.actions.len(), 2);
        assert_eq!(stats.actions[0].name, "Tumble");
        assert_eq!(stats.actions[0].kind, UsageKind::Reaction);
        assert_eq!(stats.actions[1].name, "Vault");
        assert_eq!(stats.actions[1].kind, UsageKind::Action);
        assert_eq!(stats.actions[1].source_option.to_string(), "2b");
    }

    #[test]
    fn extreme_bonuses_saturate_when_folded_and_applied() {
        let huge =
            EffectCompiler::compile("AV=2147483647:AH=2147483647:AS3=2147483647:ASH=2147483647");
        let base = BaseStats::new(Attributes::new(10, 14, 10, 10, 10, 10))
            .with_rank(Skill::Stealth, 1);

        let stats = EffectApplier::apply(&base, [&huge, &huge, &EffectCompiler::compile("AV=1")]);
        assert_eq!(stats.movement, i32::MAX);
        assert_eq!(stats.initiative, i32::MAX);
        assert_eq!(stats.skill(Skill::Stealth), i32::MAX);
        assert_eq!(stats.resources.health, 10 + i32::MAX as u32);

        let sunk = EffectCompiler::compile("AV=-2147483648:AZ1=-2147483648");
        let stats = EffectApplier::apply(&base, [&sunk, &sunk]);
        assert_eq!(stats.movement, 0);
        assert_eq!(stats.weapon_skill(WeaponSkill::Blades), i32::MIN);
    }
}
