//! Static code tables used by the effect-code grammar.
//!
//! Catalog content refers to skills, crafts, weapon skills, mitigation
//! channels, immunities, and vision types by short codes. The tables below
//! are the only place those codes are interpreted. Lookups are plain slice
//! scans over immutable data; there is no registration at runtime.

use bitflags::bitflags;

use crate::stats::Attribute;

/// Trained skills a character can hold ranks in.
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
pub enum Skill {
    Athletics,
    Acrobatics,
    Stealth,
    Perception,
    Survival,
    Medicine,
    Investigation,
    Persuasion,
    Deception,
    Intimidation,
    Insight,
    Technology,
    Piloting,
    Lore,
}

impl Skill {
    pub const COUNT: usize = 14;

    pub const ALL: [Skill; Self::COUNT] = [
        Skill::Athletics,
        Skill::Acrobatics,
        Skill::Stealth,
        Skill::Perception,
        Skill::Survival,
        Skill::Medicine,
        Skill::Investigation,
        Skill::Persuasion,
        Skill::Deception,
        Skill::Intimidation,
        Skill::Insight,
        Skill::Technology,
        Skill::Piloting,
        Skill::Lore,
    ];

    /// Attribute whose modifier seeds this skill before ranks and bonuses.
    pub const fn governing_attribute(self) -> Attribute {
        match self {
            Skill::Athletics => Attribute::Might,
            Skill::Acrobatics | Skill::Stealth | Skill::Piloting => Attribute::Agility,
            Skill::Perception | Skill::Survival | Skill::Insight => Attribute::Awareness,
            Skill::Medicine | Skill::Investigation | Skill::Technology | Skill::Lore => {
                Attribute::Intellect
            }
            Skill::Persuasion | Skill::Deception | Skill::Intimidation => Attribute::Presence,
        }
    }
}

/// Target of an `AS<SUB>` bonus.
///
/// The skill table also carries the initiative slot (`H`), which is not a
/// trained skill but shares the skill sub-code namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkillSlot {
    Skill(Skill),
    Initiative,
}

const SKILL_CODES: &[(&str, SkillSlot)] = &[
    ("1", SkillSlot::Skill(Skill::Athletics)),
    ("2", SkillSlot::Skill(Skill::Acrobatics)),
    ("3", SkillSlot::Skill(Skill::Stealth)),
    ("4", SkillSlot::Skill(Skill::Perception)),
    ("5", SkillSlot::Skill(Skill::Survival)),
    ("6", SkillSlot::Skill(Skill::Medicine)),
    ("7", SkillSlot::Skill(Skill::Investigation)),
    ("8", SkillSlot::Skill(Skill::Persuasion)),
    ("9", SkillSlot::Skill(Skill::Deception)),
    ("10", SkillSlot::Skill(Skill::Intimidation)),
    ("11", SkillSlot::Skill(Skill::Insight)),
    ("12", SkillSlot::Skill(Skill::Technology)),
    ("13", SkillSlot::Skill(Skill::Piloting)),
    ("14", SkillSlot::Skill(Skill::Lore)),
    ("H", SkillSlot::Initiative),
];

/// Crafting disciplines.
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
pub enum Craft {
    Armorsmithing,
    Weaponsmithing,
    Alchemy,
    Cooking,
    Engineering,
    Tailoring,
    Jewelcrafting,
}

const CRAFT_CODES: &[(&str, Craft)] = &[
    ("1", Craft::Armorsmithing),
    ("2", Craft::Weaponsmithing),
    ("3", Craft::Alchemy),
    ("4", Craft::Cooking),
    ("5", Craft::Engineering),
    ("6", Craft::Tailoring),
    ("7", Craft::Jewelcrafting),
];

/// Weapon families with their own proficiency track.
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
pub enum WeaponSkill {
    Blades,
    Blunt,
    Polearms,
    Unarmed,
    Bows,
    Firearms,
    Thrown,
}

impl WeaponSkill {
    pub const COUNT: usize = 7;

    pub const ALL: [WeaponSkill; Self::COUNT] = [
        WeaponSkill::Blades,
        WeaponSkill::Blunt,
        WeaponSkill::Polearms,
        WeaponSkill::Unarmed,
        WeaponSkill::Bows,
        WeaponSkill::Firearms,
        WeaponSkill::Thrown,
    ];

    /// Melee families scale with might, ranged families with agility.
    pub const fn governing_attribute(self) -> Attribute {
        match self {
            WeaponSkill::Blades
            | WeaponSkill::Blunt
            | WeaponSkill::Polearms
            | WeaponSkill::Unarmed => Attribute::Might,
            WeaponSkill::Bows | WeaponSkill::Firearms | WeaponSkill::Thrown => Attribute::Agility,
        }
    }
}

const WEAPON_SKILL_CODES: &[(&str, WeaponSkill)] = &[
    ("1", WeaponSkill::Blades),
    ("2", WeaponSkill::Blunt),
    ("3", WeaponSkill::Polearms),
    ("4", WeaponSkill::Unarmed),
    ("5", WeaponSkill::Bows),
    ("6", WeaponSkill::Firearms),
    ("7", WeaponSkill::Thrown),
];

/// Damage channels that can be mitigated.
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
pub enum Mitigation {
    Kinetic,
    Fire,
    Cold,
    Electric,
    Acid,
    Toxic,
    Psychic,
    Radiant,
    Void,
}

const MITIGATION_CODES: &[(&str, Mitigation)] = &[
    ("1", Mitigation::Kinetic),
    ("2", Mitigation::Fire),
    ("3", Mitigation::Cold),
    ("4", Mitigation::Electric),
    ("5", Mitigation::Acid),
    ("6", Mitigation::Toxic),
    ("7", Mitigation::Psychic),
    ("8", Mitigation::Radiant),
    ("9", Mitigation::Void),
];

/// Conditions a character can be made immune to.
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
pub enum Immunity {
    Afraid,
    Bleeding,
    Blinded,
    Confused,
    Dazed,
    Deafened,
    Exhausted,
    Hidden,
    Ignited,
    Biological,
    Prone,
    Sleeping,
    Stasis,
    Stunned,
    Trapped,
    Unconscious,
    Wounded,
}

// Code 20 is a legacy alias for prone still present in authored content.
const IMMUNITY_CODES: &[(&str, Immunity)] = &[
    ("1", Immunity::Afraid),
    ("2", Immunity::Bleeding),
    ("3", Immunity::Blinded),
    ("4", Immunity::Confused),
    ("5", Immunity::Dazed),
    ("6", Immunity::Deafened),
    ("7", Immunity::Exhausted),
    ("8", Immunity::Hidden),
    ("9", Immunity::Ignited),
    ("10", Immunity::Biological),
    ("11", Immunity::Prone),
    ("12", Immunity::Sleeping),
    ("13", Immunity::Stasis),
    ("14", Immunity::Stunned),
    ("15", Immunity::Trapped),
    ("16", Immunity::Unconscious),
    ("17", Immunity::Wounded),
    ("20", Immunity::Prone),
];

bitflags! {
    /// Vision types granted by `VD<SUB>` codes.
    ///
    /// Stored as flags so folding many grants is a plain union.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Vision: u8 {
        const THERMAL = 0b0001;
        const VOID = 0b0010;
        const NORMAL = 0b0100;
        const ENHANCED = 0b1000;
    }
}

const VISION_CODES: &[(&str, Vision)] = &[
    ("1", Vision::THERMAL),
    ("2", Vision::VOID),
    ("3", Vision::NORMAL),
    ("4", Vision::ENHANCED),
];

fn lookup<T: Copy>(table: &[(&str, T)], code: &str) -> Option<T> {
    table
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, value)| *value)
}

pub fn skill_slot(code: &str) -> Option<SkillSlot> {
    lookup(SKILL_CODES, code)
}

pub fn craft(code: &str) -> Option<Craft> {
    lookup(CRAFT_CODES, code)
}

pub fn weapon_skill(code: &str) -> Option<WeaponSkill> {
    lookup(WEAPON_SKILL_CODES, code)
}

pub fn mitigation(code: &str) -> Option<Mitigation> {
    lookup(MITIGATION_CODES, code)
}

pub fn immunity(code: &str) -> Option<Immunity> {
    lookup(IMMUNITY_CODES, code)
}

pub fn vision(code: &str) -> Option<Vision> {
    lookup(VISION_CODES, code)
}
