//! Base attributes - the only stats a player sets directly.
//!
//! Everything on the effective sheet is derived from these plus the
//! selections a character has bought. Derived values are never stored.

use std::collections::{BTreeMap, BTreeSet};

use crate::effect::Skill;

/// The six base attributes.
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
pub enum Attribute {
    Might,
    Agility,
    Endurance,
    Intellect,
    Awareness,
    Presence,
}

/// Attribute scores for a character.
///
/// - **Might**: melee weapon skills, athletics, stamina
/// - **Agility**: ranged weapon skills, finesse skills, initiative
/// - **Endurance**: health, stamina
/// - **Intellect**: knowledge skills, focus
/// - **Awareness**: perception skills, focus
/// - **Presence**: social skills
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub might: i32,
    pub agility: i32,
    pub endurance: i32,
    pub intellect: i32,
    pub awareness: i32,
    pub presence: i32,
}

impl Attributes {
    pub const AVERAGE: i32 = 10;

    pub const fn new(
        might: i32,
        agility: i32,
        endurance: i32,
        intellect: i32,
        awareness: i32,
        presence: i32,
    ) -> Self {
        Self {
            might,
            agility,
            endurance,
            intellect,
            awareness,
            presence,
        }
    }

    pub const fn score(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Might => self.might,
            Attribute::Agility => self.agility,
            Attribute::Endurance => self.endurance,
            Attribute::Intellect => self.intellect,
            Attribute::Awareness => self.awareness,
            Attribute::Presence => self.presence,
        }
    }

    /// Modifier for an attribute: `floor((score - 10) / 2)`.
    pub const fn modifier(&self, attribute: Attribute) -> i32 {
        (self.score(attribute) - Self::AVERAGE).div_euclid(2)
    }
}

impl Default for Attributes {
    /// All attributes at 10 (modifier 0).
    fn default() -> Self {
        Self::new(
            Self::AVERAGE,
            Self::AVERAGE,
            Self::AVERAGE,
            Self::AVERAGE,
            Self::AVERAGE,
            Self::AVERAGE,
        )
    }
}

/// Player-authored inputs to the recompute: attributes, skill ranks, and
/// languages known before any module or trait is applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub attributes: Attributes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_ranks: BTreeMap<Skill, i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub languages: BTreeSet<String>,
}

impl BaseStats {
    pub fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Sets a skill rank (builder pattern).
    #[must_use]
    pub fn with_rank(mut self, skill: Skill, rank: i32) -> Self {
        self.skill_ranks.insert(skill, rank);
        self
    }

    /// Adds a known language (builder pattern).
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.insert(language.into());
        self
    }

    pub fn rank(&self, skill: Skill) -> i32 {
        self.skill_ranks.get(&skill).copied().unwrap_or(0)
    }
}
