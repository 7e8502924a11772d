//! Consistency checks over a stored character.
//!
//! Used after loading a character from storage and by the property tests.
//! The trait cap needs no check here: [`TraitSlots`](crate::character::TraitSlots)
//! cannot hold more than [`BuildConfig::MAX_TRAITS`] entries.

use crate::catalog::{CatalogOracle, ModuleId, TraitId};
use crate::character::Character;
use crate::config::BuildConfig;
use crate::prereq::Location;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuditViolation {
    /// Ledger disagrees with the sum of recorded charges.
    PointsMismatch { spent: u32, recorded: u32 },
    /// A selected option sits in a tier whose parent tier is empty.
    BrokenChain {
        module: ModuleId,
        location: Location,
        missing_tier: u32,
    },
    DuplicateOption { module: ModuleId, location: Location },
    DuplicateTrait(TraitId),
    /// A recorded charge differs from what the current configuration would
    /// charge. Refunds still use the recorded value.
    CostDrift {
        module: ModuleId,
        location: Location,
        recorded: u32,
        current: u32,
    },
}

pub fn audit<C>(character: &Character, catalog: &C, config: &BuildConfig) -> Vec<AuditViolation>
where
    C: CatalogOracle + ?Sized,
{
    let mut violations = Vec::new();

    let spent = character.points().spent();
    let recorded = character.recorded_spend();
    if spent != recorded {
        violations.push(AuditViolation::PointsMismatch { spent, recorded });
    }

    for selected in character.modules() {
        let mut seen: Vec<Location> = Vec::with_capacity(selected.options.len());
        for option in &selected.options {
            if seen.contains(&option.location) {
                violations.push(AuditViolation::DuplicateOption {
                    module: selected.module.clone(),
                    location: option.location,
                });
            }
            seen.push(option.location);
        }

        for option in &selected.options {
            let tier = option.location.tier_number();
            if tier > 1 && !seen.iter().any(|location| location.tier_number() == tier - 1) {
                violations.push(AuditViolation::BrokenChain {
                    module: selected.module.clone(),
                    location: option.location,
                    missing_tier: tier - 1,
                });
            }
        }

        let Some(definition) = catalog.module(&selected.module) else {
            continue;
        };
        for option in &selected.options {
            let Some(authored) = definition.option(&option.location) else {
                continue;
            };
            let current = config.option_cost(definition, authored);
            if current != option.cost {
                violations.push(AuditViolation::CostDrift {
                    module: selected.module.clone(),
                    location: option.location,
                    recorded: option.cost,
                    current,
                });
            }
        }
    }

    let traits = character.traits();
    for (index, selected) in traits.iter().enumerate() {
        if traits[..index].iter().any(|earlier| earlier.id == selected.id) {
            violations.push(AuditViolation::DuplicateTrait(selected.id.clone()));
        }
    }

    violations
}
