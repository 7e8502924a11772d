//! Build transitions.
//!
//! The [`BuildEngine`] is the only writer of a character's selection state.
//! Every transition runs the same pipeline:
//!
//! ```text
//! validate (no mutation)  →  mutate + charge/refund  →  full recompute
//! ```
//!
//! A failed validation returns a [`BuildError`] and the character is
//! untouched. Validation performs every check before the first write, so the
//! mutate step cannot fail.

mod audit;
mod resolve;

pub use audit::{AuditViolation, audit};
pub use resolve::{Recomputation, recompute};

use crate::catalog::{CatalogOracle, ModuleId, TraitId};
use crate::character::{Character, SelectedModule, SelectedOption, SelectedTrait};
use crate::config::BuildConfig;
use crate::error::{BuildError, ExistingEntity, MissingEntity};
use crate::ledger::PointLedger;
use crate::prereq::{Location, PrerequisiteResolver};

/// Player intent accepted by [`BuildEngine::execute`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildCommand {
    AddModule { module: ModuleId },
    RemoveModule { module: ModuleId },
    /// `location` is the raw catalog string, validated by the engine.
    SelectOption { module: ModuleId, location: String },
    DeselectOption { module: ModuleId, location: String },
    AddTrait { id: TraitId },
    RemoveTrait { id: TraitId },
}

impl BuildCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddModule { .. } => "add_module",
            Self::RemoveModule { .. } => "remove_module",
            Self::SelectOption { .. } => "select_option",
            Self::DeselectOption { .. } => "deselect_option",
            Self::AddTrait { .. } => "add_trait",
            Self::RemoveTrait { .. } => "remove_trait",
        }
    }
}

/// Result of a committed transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildOutcome {
    pub charged: u32,
    pub refunded: u32,
    /// Ledger after the transition.
    pub points: PointLedger,
    /// Revision after the transition.
    pub revision: u64,
    /// Selections the recompute could not resolve.
    pub missing: Vec<MissingEntity>,
}

/// Build engine over one character.
pub struct BuildEngine<'a, C: CatalogOracle + ?Sized> {
    character: &'a mut Character,
    catalog: &'a C,
    config: &'a BuildConfig,
}

impl<'a, C: CatalogOracle + ?Sized> BuildEngine<'a, C> {
    pub fn new(character: &'a mut Character, catalog: &'a C, config: &'a BuildConfig) -> Self {
        Self {
            character,
            catalog,
            config,
        }
    }

    pub fn character(&self) -> &Character {
        &*self.character
    }

    /// Routes a command to its transition.
    pub fn execute(&mut self, command: &BuildCommand) -> Result<BuildOutcome, BuildError> {
        let result = match command {
            BuildCommand::AddModule { module } => self.add_module(module),
            BuildCommand::RemoveModule { module } => self.remove_module(module),
            BuildCommand::SelectOption { module, location } => {
                self.select_option(module, location)
            }
            BuildCommand::DeselectOption { module, location } => {
                self.deselect_option(module, location)
            }
            BuildCommand::AddTrait { id } => self.add_trait(id),
            BuildCommand::RemoveTrait { id } => self.remove_trait(id),
        };

        match &result {
            Ok(outcome) => tracing::debug!(
                character = %self.character.id(),
                command = command.as_str(),
                charged = outcome.charged,
                refunded = outcome.refunded,
                available = outcome.points.available(),
                revision = outcome.revision,
                "build transition committed"
            ),
            Err(err) => tracing::debug!(
                character = %self.character.id(),
                command = command.as_str(),
                kind = %err.kind(),
                "build transition rejected"
            ),
        }

        result
    }

    pub fn add_module(&mut self, module: &ModuleId) -> Result<BuildOutcome, BuildError> {
        if self.character.has_module(module) {
            return Err(BuildError::AlreadyExists(ExistingEntity::Module(
                module.clone(),
            )));
        }
        let definition = self
            .catalog
            .module(module)
            .ok_or_else(|| BuildError::NotFound(MissingEntity::CatalogModule(module.clone())))?;
        let cost = self.config.module_cost(definition);
        self.character.points().check(cost)?;

        self.character.points_mut().charge(cost)?;
        self.character
            .push_module(SelectedModule::new(module.clone(), cost));
        Ok(self.commit(cost, 0))
    }

    /// Removes a module and every selection in it, refunding what each was
    /// charged.
    pub fn remove_module(&mut self, module: &ModuleId) -> Result<BuildOutcome, BuildError> {
        let removed = self
            .character
            .take_module(module)
            .ok_or_else(|| BuildError::NotFound(MissingEntity::SelectedModule(module.clone())))?;

        let refund = removed.spent();
        self.character.points_mut().refund(refund);
        Ok(self.commit(0, refund))
    }

    pub fn select_option(
        &mut self,
        module: &ModuleId,
        location: &str,
    ) -> Result<BuildOutcome, BuildError> {
        let location = parse_location(location)?;
        self.select_location(module, location)
    }

    pub fn select_location(
        &mut self,
        module: &ModuleId,
        location: Location,
    ) -> Result<BuildOutcome, BuildError> {
        let selected = self
            .character
            .module(module)
            .ok_or_else(|| BuildError::NotFound(MissingEntity::SelectedModule(module.clone())))?;
        let definition = self
            .catalog
            .module(module)
            .ok_or_else(|| BuildError::NotFound(MissingEntity::CatalogModule(module.clone())))?;
        let option = definition.option(&location).ok_or_else(|| {
            BuildError::NotFound(MissingEntity::CatalogOption {
                module: module.clone(),
                location,
            })
        })?;
        if selected.is_selected(&location) {
            return Err(BuildError::AlreadySelected {
                module: module.clone(),
                location,
            });
        }
        PrerequisiteResolver::check_select(module, &location, selected.locations())?;
        let cost = self.config.option_cost(definition, option);
        self.character.points().check(cost)?;

        self.character.points_mut().charge(cost)?;
        let selected_at = self.character.bump_revision();
        if let Some(selected) = self.character.module_mut(module) {
            selected.options.push(SelectedOption {
                location,
                selected_at,
                cost,
            });
        }
        Ok(self.commit_at(cost, 0))
    }

    pub fn deselect_option(
        &mut self,
        module: &ModuleId,
        location: &str,
    ) -> Result<BuildOutcome, BuildError> {
        let location = parse_location(location)?;
        self.deselect_location(module, location)
    }

    pub fn deselect_location(
        &mut self,
        module: &ModuleId,
        location: Location,
    ) -> Result<BuildOutcome, BuildError> {
        let selected = self
            .character
            .module(module)
            .ok_or_else(|| BuildError::NotFound(MissingEntity::SelectedModule(module.clone())))?;
        let chosen = selected.option(&location).ok_or_else(|| {
            BuildError::NotFound(MissingEntity::SelectedOption {
                module: module.clone(),
                location,
            })
        })?;
        let refund = chosen.cost;
        PrerequisiteResolver::check_deselect(module, &location, selected.locations())?;

        if let Some(selected) = self.character.module_mut(module) {
            selected.options.retain(|option| option.location != location);
        }
        self.character.points_mut().refund(refund);
        Ok(self.commit(0, refund))
    }

    pub fn add_trait(&mut self, id: &TraitId) -> Result<BuildOutcome, BuildError> {
        let definition = self
            .catalog
            .trait_definition(id)
            .ok_or_else(|| BuildError::NotFound(MissingEntity::CatalogTrait(id.clone())))?;
        if self.character.has_trait(id) {
            return Err(BuildError::AlreadyExists(ExistingEntity::Trait(id.clone())));
        }
        // Cap before cost: a full slate is rejected even with points to spare.
        if self.character.traits().len() >= BuildConfig::MAX_TRAITS {
            return Err(BuildError::TraitCapReached {
                cap: BuildConfig::MAX_TRAITS,
            });
        }
        let cost = self.config.trait_cost(definition);
        self.character.points().check(cost)?;

        let slot = SelectedTrait {
            id: id.clone(),
            kind: definition.kind,
            cost,
        };
        self.character.points_mut().charge(cost)?;
        if self.character.traits_mut().try_push(slot).is_err() {
            // Cap was checked above; roll the charge back.
            self.character.points_mut().refund(cost);
            return Err(BuildError::TraitCapReached {
                cap: BuildConfig::MAX_TRAITS,
            });
        }
        Ok(self.commit(cost, 0))
    }

    pub fn remove_trait(&mut self, id: &TraitId) -> Result<BuildOutcome, BuildError> {
        let index = self
            .character
            .traits()
            .iter()
            .position(|selected| selected.id == *id)
            .ok_or_else(|| BuildError::NotFound(MissingEntity::SelectedTrait(id.clone())))?;

        let removed = self.character.traits_mut().remove(index);
        self.character.points_mut().refund(removed.cost);
        Ok(self.commit(0, removed.cost))
    }

    /// Recomputes the effective sheet without changing any selection.
    ///
    /// Returns the selections the catalog could not resolve.
    pub fn refresh(&mut self) -> Vec<MissingEntity> {
        let Recomputation { effective, missing } = recompute(&*self.character, self.catalog);
        self.character.set_effective(effective);
        missing
    }

    /// Checks ledger, prerequisite chains and trait slots for consistency.
    pub fn audit(&self) -> Vec<AuditViolation> {
        audit::audit(&*self.character, self.catalog, self.config)
    }

    fn commit(&mut self, charged: u32, refunded: u32) -> BuildOutcome {
        self.character.bump_revision();
        self.commit_at(charged, refunded)
    }

    /// Recompute after a mutation whose revision has already been bumped.
    fn commit_at(&mut self, charged: u32, refunded: u32) -> BuildOutcome {
        let missing = self.refresh();
        BuildOutcome {
            charged,
            refunded,
            points: *self.character.points(),
            revision: self.character.revision(),
            missing,
        }
    }
}

fn parse_location(raw: &str) -> Result<Location, BuildError> {
    raw.parse()
        .map_err(|reason| BuildError::invalid_location(raw, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        Catalog, ModuleDefinition, ModuleKind, ModuleOption, TraitDefinition, TraitKind,
    };
    use crate::character::CharacterId;
    use crate::error::BuildErrorKind;
    use crate::stats::BaseStats;

    fn catalog() -> Catalog {
        let option = |raw: &str, name: &str, data: &str| {
            ModuleOption::new(raw.parse().unwrap(), name, "").with_data(data)
        };
        Catalog::new(
            [ModuleDefinition {
                id: "Acrobat".into(),
                name: "Acrobat".into(),
                kind: ModuleKind::Secondary,
                ruleset: 2,
                options: vec![
                    option("1", "Reaction : Tumble", "AS1=1"),
                    option("2", "Footwork", "AV=1"),
                    option("2a", "Free Action : Kip Up", "I11"),
                ],
            }],
            [TraitDefinition {
                id: "Hardy".into(),
                name: "Hardy".into(),
                kind: TraitKind::Positive,
                description: String::new(),
                effects: Some("AH=2".into()),
            }],
        )
        .unwrap()
    }

    fn character(points: u32) -> Character {
        Character::new(
            CharacterId(7),
            "Wren",
            BaseStats::default(),
            PointLedger::new(points),
        )
    }

    #[test]
    fn selection_revisions_are_monotonic() {
        let catalog = catalog();
        let config = BuildConfig::new();
        let mut hero = character(10);
        let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
        let acrobat = ModuleId::from("Acrobat");

        engine.add_module(&acrobat).unwrap();
        let first = engine.select_option(&acrobat, "1").unwrap();
        let second = engine.select_option(&acrobat, "2").unwrap();
        assert!(second.revision > first.revision);

        let module = engine.character().module(&acrobat).unwrap();
        assert_eq!(module.options[0].selected_at, first.revision);
        assert_eq!(module.options[1].selected_at, second.revision);
    }

    #[test]
    fn effects_and_actions_follow_selections() {
        let catalog = catalog();
        let config = BuildConfig::new();
        let mut hero = character(10);
        let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
        let acrobat = ModuleId::from("Acrobat");

        engine.add_module(&acrobat).unwrap();
        engine.select_option(&acrobat, "1").unwrap();
        engine.select_option(&acrobat, "2a").unwrap_err();
        engine.select_option(&acrobat, "2").unwrap();
        engine.select_option(&acrobat, "2a").unwrap();
        engine.add_trait(&"Hardy".into()).unwrap();

        let sheet = engine.character().effective();
        assert_eq!(sheet.movement, 7);
        assert_eq!(sheet.resources.health, 12);
        assert!(sheet.has_action("Tumble"));
        assert!(sheet.has_action("Kip Up"));
        assert_eq!(engine.character().resources().health.current, 12);

        engine.remove_module(&acrobat).unwrap();
        let sheet = engine.character().effective();
        assert_eq!(sheet.movement, 6);
        assert!(sheet.actions.is_empty());
        assert_eq!(engine.character().points().spent(), 1);
    }

    #[test]
    fn failures_leave_character_untouched() {
        let catalog = catalog();
        let config = BuildConfig::new();
        let mut hero = character(10);
        let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
        let acrobat = ModuleId::from("Acrobat");
        engine.add_module(&acrobat).unwrap();
        let before = engine.character().clone();

        let cases = [
            (
                BuildCommand::SelectOption {
                    module: acrobat.clone(),
                    location: "2x!".into(),
                },
                BuildErrorKind::InvalidLocation,
            ),
            (
                BuildCommand::SelectOption {
                    module: acrobat.clone(),
                    location: "9".into(),
                },
                BuildErrorKind::NotFound,
            ),
            (
                BuildCommand::SelectOption {
                    module: "Ghost".into(),
                    location: "1".into(),
                },
                BuildErrorKind::NotFound,
            ),
            (
                BuildCommand::AddModule {
                    module: acrobat.clone(),
                },
                BuildErrorKind::AlreadyExists,
            ),
            (
                BuildCommand::DeselectOption {
                    module: acrobat.clone(),
                    location: "1".into(),
                },
                BuildErrorKind::NotFound,
            ),
            (
                BuildCommand::RemoveTrait { id: "Hardy".into() },
                BuildErrorKind::NotFound,
            ),
        ];

        for (command, kind) in cases {
            let err = engine.execute(&command).unwrap_err();
            assert_eq!(err.kind(), kind, "{command:?}");
            assert_eq!(engine.character(), &before);
        }
    }

    #[test]
    fn granted_points_keep_ledger_in_step() {
        let catalog = catalog();
        let config = BuildConfig::new();
        let acrobat = ModuleId::from("Acrobat");
        let mut hero = character(3);
        {
            let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
            engine.add_module(&acrobat).unwrap();
            engine.select_option(&acrobat, "1").unwrap();
            let err = engine.select_option(&acrobat, "2").unwrap_err();
            assert_eq!(err.kind(), BuildErrorKind::InsufficientPoints);
        }

        hero.points_mut().grant(2);

        let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
        engine.select_option(&acrobat, "2").unwrap();
        engine.add_trait(&"Hardy".into()).unwrap();
        let points = engine.character().points();
        assert_eq!((points.spent(), points.total()), (5, 5));
        assert_eq!(points.spent(), engine.character().recorded_spend());
        assert!(engine.audit().is_empty());
    }

    #[test]
    fn audit_is_clean_after_transitions() {
        let catalog = catalog();
        let config = BuildConfig::new();
        let mut hero = character(10);
        let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
        let acrobat = ModuleId::from("Acrobat");

        engine.add_module(&acrobat).unwrap();
        engine.select_option(&acrobat, "1").unwrap();
        engine.select_option(&acrobat, "2").unwrap();
        engine.add_trait(&"Hardy".into()).unwrap();
        assert!(engine.audit().is_empty());
    }

    #[test]
    fn missing_catalog_entries_are_skipped() {
        let catalog = catalog();
        let config = BuildConfig::new();
        let mut hero = character(10);
        {
            let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
            let acrobat = ModuleId::from("Acrobat");
            engine.add_module(&acrobat).unwrap();
            engine.select_option(&acrobat, "1").unwrap();
            engine.add_trait(&"Hardy".into()).unwrap();
        }

        let empty = Catalog::default();
        let mut engine = BuildEngine::new(&mut hero, &empty, &config);
        let missing = engine.refresh();
        assert_eq!(
            missing,
            vec![
                MissingEntity::CatalogModule("Acrobat".into()),
                MissingEntity::CatalogTrait("Hardy".into()),
            ]
        );
        assert_eq!(engine.character().effective().resources.health, 10);
        // Removal refunds recorded costs even without the catalog entry.
        engine.remove_module(&"Acrobat".into()).unwrap();
        assert_eq!(engine.character().points().spent(), 1);
    }
}
