//! Full recompute of the effective sheet from the selection set.

use crate::catalog::{CatalogOracle, ModuleId, ModuleOption};
use crate::character::Character;
use crate::effect::{EffectApplier, EffectCompiler, EffectDelta, EffectiveStats};
use crate::error::MissingEntity;

/// Result of [`recompute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recomputation {
    pub effective: EffectiveStats,
    /// Selections whose definitions are no longer in the catalog.
    pub missing: Vec<MissingEntity>,
}

/// Recomputes the effective sheet from base stats and every selection.
///
/// Reads nothing from the previous sheet. Unresolvable selections contribute
/// nothing and are reported in [`Recomputation::missing`].
pub fn recompute<C>(character: &Character, catalog: &C) -> Recomputation
where
    C: CatalogOracle + ?Sized,
{
    let mut missing = Vec::new();
    let mut deltas: Vec<EffectDelta> = Vec::new();
    let mut granted: Vec<(&ModuleId, &ModuleOption)> = Vec::new();

    for selected in character.modules() {
        let Some(definition) = catalog.module(&selected.module) else {
            tracing::warn!(
                character = %character.id(),
                module = %selected.module,
                "selected module missing from catalog; skipping"
            );
            missing.push(MissingEntity::CatalogModule(selected.module.clone()));
            continue;
        };

        for option in &selected.options {
            let Some(definition) = definition.option(&option.location) else {
                tracing::warn!(
                    character = %character.id(),
                    module = %selected.module,
                    location = %option.location,
                    "selected option missing from catalog; skipping"
                );
                missing.push(MissingEntity::CatalogOption {
                    module: selected.module.clone(),
                    location: option.location,
                });
                continue;
            };
            deltas.push(EffectCompiler::compile(&definition.data));
            granted.push((&selected.module, definition));
        }
    }

    for selected in character.traits() {
        match catalog.trait_definition(&selected.id) {
            Some(definition) => {
                if let Some(effects) = &definition.effects {
                    deltas.push(EffectCompiler::compile(effects));
                }
            }
            None => {
                tracing::warn!(
                    character = %character.id(),
                    trait_id = %selected.id,
                    "selected trait missing from catalog; skipping"
                );
                missing.push(MissingEntity::CatalogTrait(selected.id.clone()));
            }
        }
    }

    let mut effective = EffectApplier::apply(character.base(), &deltas);
    EffectApplier::attach_actions(&mut effective, granted);

    Recomputation { effective, missing }
}
