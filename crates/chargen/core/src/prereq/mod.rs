//! Prerequisite resolution over a module's option tree.
//!
//! The resolver is a pure function of the location being tested and the
//! locations already selected in the same module.

mod location;

pub use location::{Location, LocationError, Prerequisite};

use crate::catalog::ModuleId;
use crate::error::BuildError;

pub struct PrerequisiteResolver;

impl PrerequisiteResolver {
    /// Whether `location` may be selected given the module's current
    /// selections.
    pub fn can_select<'a>(
        location: &Location,
        selected: impl IntoIterator<Item = &'a Location>,
    ) -> bool {
        match location.prerequisite() {
            Prerequisite::Root => true,
            Prerequisite::AnyInTier(tier) => selected
                .into_iter()
                .any(|candidate| candidate.tier_number() == tier),
        }
    }

    /// Whether `location` may be removed: nothing deeper is still selected.
    pub fn can_deselect<'a>(
        location: &Location,
        selected: impl IntoIterator<Item = &'a Location>,
    ) -> bool {
        Self::dependents(location, selected).is_empty()
    }

    /// Selected locations in strictly deeper tiers than `location`.
    pub fn dependents<'a>(
        location: &Location,
        selected: impl IntoIterator<Item = &'a Location>,
    ) -> Vec<Location> {
        selected
            .into_iter()
            .filter(|candidate| candidate.tier_number() > location.tier_number())
            .copied()
            .collect()
    }

    pub fn check_select<'a>(
        module: &ModuleId,
        location: &Location,
        selected: impl IntoIterator<Item = &'a Location>,
    ) -> Result<(), BuildError> {
        if Self::can_select(location, selected) {
            return Ok(());
        }
        let required_tier = match location.prerequisite() {
            Prerequisite::AnyInTier(tier) => tier,
            Prerequisite::Root => location.tier_number(),
        };
        Err(BuildError::PrerequisiteNotMet {
            module: module.clone(),
            location: *location,
            required_tier,
        })
    }

    pub fn check_deselect<'a>(
        module: &ModuleId,
        location: &Location,
        selected: impl IntoIterator<Item = &'a Location>,
    ) -> Result<(), BuildError> {
        let dependents = Self::dependents(location, selected);
        if dependents.is_empty() {
            Ok(())
        } else {
            Err(BuildError::HasDependents {
                module: module.clone(),
                location: *location,
                dependents,
            })
        }
    }
}
