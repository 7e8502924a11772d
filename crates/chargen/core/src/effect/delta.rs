//! Structured, summable result of compiling effect codes.

use std::collections::{BTreeMap, BTreeSet};

use super::tables::{Craft, Immunity, Mitigation, Skill, SkillSlot, Vision, WeaponSkill};

/// Which action economy slot a usage grant occupies.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UsageKind {
    Action,
    Reaction,
    FreeAction,
}

impl UsageKind {
    /// Maps the leading grammar character (`X`, `Z`, `Y`).
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'X' => Some(UsageKind::Action),
            'Z' => Some(UsageKind::Reaction),
            'Y' => Some(UsageKind::FreeAction),
            _ => None,
        }
    }

    /// Parses the display prefix used in option names ("Free Action : Dodge").
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("action") {
            Some(UsageKind::Action)
        } else if label.eq_ignore_ascii_case("reaction") {
            Some(UsageKind::Reaction)
        } else if label.eq_ignore_ascii_case("free action") {
            Some(UsageKind::FreeAction)
        } else {
            None
        }
    }
}

/// Limited-use grant of an action slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionUsage {
    pub kind: UsageKind,
    /// Uses recharge daily rather than per encounter.
    pub daily: bool,
    pub uses: u32,
}

/// Bag of bonuses produced by one or more effect codes.
///
/// Numeric fields sum, set fields union, usage grants are keyed by their raw
/// code (a later grant replaces an earlier one with the same key), and
/// conditional effects are carried unevaluated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDelta {
    pub skills: BTreeMap<Skill, i32>,
    pub crafts: BTreeMap<Craft, i32>,
    pub weapon_skills: BTreeMap<WeaponSkill, i32>,
    pub mitigation: BTreeMap<Mitigation, i32>,
    pub initiative: i32,
    pub health: i32,
    pub movement: i32,
    pub immunities: BTreeSet<Immunity>,
    pub vision: Vision,
    pub languages: BTreeSet<String>,
    pub trait_flags: BTreeSet<String>,
    pub usages: BTreeMap<String, ActionUsage>,
    pub conditionals: Vec<String>,
}

impl EffectDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the delta changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn add_skill_slot(&mut self, slot: SkillSlot, amount: i32) {
        match slot {
            SkillSlot::Skill(skill) => bump(self.skills.entry(skill).or_default(), amount),
            SkillSlot::Initiative => bump(&mut self.initiative, amount),
        }
    }

    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }

    /// Folds `other` into `self`.
    pub fn merge(&mut self, other: &EffectDelta) {
        sum_into(&mut self.skills, &other.skills);
        sum_into(&mut self.crafts, &other.crafts);
        sum_into(&mut self.weapon_skills, &other.weapon_skills);
        sum_into(&mut self.mitigation, &other.mitigation);
        bump(&mut self.initiative, other.initiative);
        bump(&mut self.health, other.health);
        bump(&mut self.movement, other.movement);

        self.immunities.extend(other.immunities.iter().copied());
        self.vision |= other.vision;
        self.languages.extend(other.languages.iter().cloned());
        self.trait_flags.extend(other.trait_flags.iter().cloned());

        for (code, usage) in &other.usages {
            self.usages.insert(code.clone(), *usage);
        }
        self.conditionals.extend(other.conditionals.iter().cloned());
    }

    /// Folds a sequence of deltas in order.
    pub fn fold<'a>(deltas: impl IntoIterator<Item = &'a EffectDelta>) -> EffectDelta {
        deltas.into_iter().fold(EffectDelta::new(), |mut acc, delta| {
            acc.merge(delta);
            acc
        })
    }
}

fn sum_into<K: Ord + Copy>(target: &mut BTreeMap<K, i32>, source: &BTreeMap<K, i32>) {
    for (key, amount) in source {
        bump(target.entry(*key).or_default(), *amount);
    }
}

/// Adds a bonus, saturating at the `i32` bounds. Authored effect codes are
/// not trusted to stay in range.
pub(crate) fn bump(value: &mut i32, amount: i32) {
    *value = value.saturating_add(amount);
}
