//! Resource pools (health, stamina, focus).
//!
//! Pools are partially stored:
//! - Maximum values: computed from attributes plus folded bonuses
//! - Current values: character state (MUST be stored)
//!
//! Formulas:
//! - Health_max = 10 + 2 × END_mod + bonus
//! - Stamina_max = 10 + MIG_mod + END_mod
//! - Focus_max = 10 + INT_mod + AWA_mod

use super::attributes::{Attribute, Attributes};

/// Individual resource kinds.
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
pub enum ResourceKind {
    Health,
    Stamina,
    Focus,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::Health, Self::Stamina, Self::Focus];
}

/// Maximum resource values.
///
/// These are NOT authored - always recomputed from attributes and bonuses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMaximums {
    pub health: u32,
    pub stamina: u32,
    pub focus: u32,
}

impl ResourceMaximums {
    pub const BASE_POOL: i32 = 10;

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Health => self.health,
            ResourceKind::Stamina => self.stamina,
            ResourceKind::Focus => self.focus,
        }
    }

    /// Attribute-derived maxima before any selection bonus.
    pub fn from_attributes(attrs: &Attributes) -> Self {
        Self {
            health: Self::compute_health(attrs),
            stamina: Self::pool(
                attrs.modifier(Attribute::Might) + attrs.modifier(Attribute::Endurance),
            ),
            focus: Self::pool(
                attrs.modifier(Attribute::Intellect) + attrs.modifier(Attribute::Awareness),
            ),
        }
    }

    /// Compute health maximum
    ///
    /// Formula: 10 + 2 × END_mod (never below 1)
    pub fn compute_health(attrs: &Attributes) -> u32 {
        Self::pool(2 * attrs.modifier(Attribute::Endurance))
    }

    /// Applies a signed bonus to the health maximum, keeping it at least 1.
    #[must_use]
    pub fn with_health_bonus(mut self, bonus: i32) -> Self {
        self.health = (self.health as i64 + bonus as i64).clamp(1, u32::MAX as i64) as u32;
        self
    }

    fn pool(offset: i32) -> u32 {
        (Self::BASE_POOL + offset).max(1) as u32
    }
}

/// A single current/max pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub max: u32,
}

impl ResourceMeter {
    pub const fn new(current: u32, max: u32) -> Self {
        Self { current, max }
    }

    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Moves the meter onto a freshly recomputed maximum.
    ///
    /// A meter that was full (current at or above the previous max) follows
    /// the new max. A depleted meter keeps its current value, clamped so it
    /// never exceeds the new max. Rebasing onto the same max is a no-op,
    /// which is what makes repeated recomputes idempotent.
    pub fn rebase(&mut self, new_max: u32) {
        if self.is_full() {
            self.current = new_max;
        } else {
            self.current = self.current.min(new_max);
        }
        self.max = new_max;
    }

    pub const fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

/// Stored resource state for a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePools {
    pub health: ResourceMeter,
    pub stamina: ResourceMeter,
    pub focus: ResourceMeter,
}

impl ResourcePools {
    /// All pools full at the given maxima.
    pub const fn at_max(max: &ResourceMaximums) -> Self {
        Self {
            health: ResourceMeter::full(max.health),
            stamina: ResourceMeter::full(max.stamina),
            focus: ResourceMeter::full(max.focus),
        }
    }

    pub fn meter(&self, kind: ResourceKind) -> &ResourceMeter {
        match kind {
            ResourceKind::Health => &self.health,
            ResourceKind::Stamina => &self.stamina,
            ResourceKind::Focus => &self.focus,
        }
    }

    pub fn meter_mut(&mut self, kind: ResourceKind) -> &mut ResourceMeter {
        match kind {
            ResourceKind::Health => &mut self.health,
            ResourceKind::Stamina => &mut self.stamina,
            ResourceKind::Focus => &mut self.focus,
        }
    }

    /// Rebases every meter onto the recomputed maxima.
    pub fn rebase(&mut self, max: &ResourceMaximums) {
        for kind in ResourceKind::ALL {
            self.meter_mut(kind).rebase(max.get(kind));
        }
    }
}
