//! Module point accounting and cost schedules.

use crate::catalog::ModuleOption;
use crate::error::BuildError;

/// Total and spent module points.
///
/// `spent <= total` holds for every value reachable through [`charge`] and
/// [`refund`].
///
/// [`charge`]: PointLedger::charge
/// [`refund`]: PointLedger::refund
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "StoredLedger")
)]
pub struct PointLedger {
    total: u32,
    spent: u32,
}

/// Wire form of [`PointLedger`]; loading goes through
/// [`PointLedger::from_parts`] so a stored `spent > total` is clamped.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoredLedger {
    total: u32,
    spent: u32,
}

#[cfg(feature = "serde")]
impl From<StoredLedger> for PointLedger {
    fn from(stored: StoredLedger) -> Self {
        Self::from_parts(stored.total, stored.spent)
    }
}

impl PointLedger {
    pub const fn new(total: u32) -> Self {
        Self { total, spent: 0 }
    }

    /// Restores a ledger from stored values. `spent` is clamped to `total`.
    pub fn from_parts(total: u32, spent: u32) -> Self {
        Self {
            total,
            spent: spent.min(total),
        }
    }

    pub const fn total(&self) -> u32 {
        self.total
    }

    pub const fn spent(&self) -> u32 {
        self.spent
    }

    pub const fn available(&self) -> u32 {
        self.total.saturating_sub(self.spent)
    }

    pub const fn can_afford(&self, cost: u32) -> bool {
        self.available() >= cost
    }

    /// Fails without changing anything if `cost` exceeds what is available.
    pub fn check(&self, cost: u32) -> Result<(), BuildError> {
        if self.can_afford(cost) {
            Ok(())
        } else {
            Err(BuildError::InsufficientPoints {
                required: cost,
                available: self.available(),
            })
        }
    }

    pub fn charge(&mut self, cost: u32) -> Result<(), BuildError> {
        self.check(cost)?;
        self.spent += cost;
        Ok(())
    }

    /// Refunds up to `cost`; spent never drops below zero.
    pub fn refund(&mut self, cost: u32) {
        self.spent = self.spent.saturating_sub(cost);
    }

    /// Grants additional points (level-up, GM award).
    pub fn grant(&mut self, points: u32) {
        self.total = self.total.saturating_add(points);
    }
}

/// How much a module option costs.
///
/// Module unlock cost is configured separately on
/// [`BuildConfig`](crate::BuildConfig) and is the same for every schedule.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CostSchedule {
    /// Every option costs 1.
    #[default]
    Flat,
    /// Legacy pricing: tier 5 and deeper cost 3, shallower tiers cost 2.
    Tiered,
    /// The option's authored `cost` field.
    Catalog,
}

impl CostSchedule {
    pub const FLAT_OPTION_COST: u32 = 1;
    pub const TIERED_DEEP_FROM: u32 = 5;
    pub const TIERED_DEEP_COST: u32 = 3;
    pub const TIERED_SHALLOW_COST: u32 = 2;

    pub fn option_cost(&self, option: &ModuleOption) -> u32 {
        match self {
            Self::Flat => Self::FLAT_OPTION_COST,
            Self::Tiered if option.location.tier_number() >= Self::TIERED_DEEP_FROM => {
                Self::TIERED_DEEP_COST
            }
            Self::Tiered => Self::TIERED_SHALLOW_COST,
            Self::Catalog => option.cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuildErrorKind;

    fn option(raw: &str, cost: u32) -> ModuleOption {
        ModuleOption::new(raw.parse().unwrap(), raw, "").with_cost(cost)
    }

    #[test]
    fn charge_and_refund() {
        let mut ledger = PointLedger::new(5);
        ledger.charge(2).unwrap();
        ledger.charge(3).unwrap();
        assert_eq!(ledger.available(), 0);

        let err = ledger.charge(1).unwrap_err();
        assert_eq!(err.kind(), BuildErrorKind::InsufficientPoints);
        assert_eq!(ledger.spent(), 5);

        ledger.refund(4);
        assert_eq!(ledger.spent(), 1);
        ledger.refund(10);
        assert_eq!(ledger.spent(), 0);
    }

    #[test]
    fn zero_cost_is_always_affordable() {
        let mut ledger = PointLedger::from_parts(3, 3);
        assert!(ledger.can_afford(0));
        ledger.charge(0).unwrap();
        assert_eq!(ledger.available(), 0);
    }

    #[test]
    fn from_parts_clamps_spent() {
        let ledger = PointLedger::from_parts(4, 9);
        assert_eq!(ledger.spent(), 4);
    }

    #[test]
    fn granted_points_are_spendable() {
        let mut ledger = PointLedger::from_parts(2, 2);
        assert!(!ledger.can_afford(1));

        ledger.grant(3);
        assert_eq!((ledger.total(), ledger.available()), (5, 3));
        ledger.charge(3).unwrap();
        assert_eq!(ledger.spent(), ledger.total());

        ledger.grant(u32::MAX);
        assert_eq!(ledger.total(), u32::MAX);
    }

    #[test]
    fn schedules_price_options() {
        let shallow = option("2a", 4);
        let deep = option("5", 4);

        assert_eq!(CostSchedule::Flat.option_cost(&shallow), 1);
        assert_eq!(CostSchedule::Flat.option_cost(&deep), 1);
        assert_eq!(CostSchedule::Tiered.option_cost(&shallow), 2);
        assert_eq!(CostSchedule::Tiered.option_cost(&deep), 3);
        assert_eq!(CostSchedule::Catalog.option_cost(&deep), 4);
    }

    #[test]
    fn schedule_names_parse() {
        assert_eq!("tiered".parse::<CostSchedule>().unwrap(), CostSchedule::Tiered);
        assert_eq!(CostSchedule::default(), CostSchedule::Flat);
    }
}
