//! End-to-end build scenarios over the fixture catalog.

mod common;

use chargen_core::effect::Immunity;
use chargen_core::{
    BuildCommand, BuildEngine, BuildErrorKind, EffectApplier, EffectCompiler, ModuleId, Skill,
};
use common::{ACROBAT, catalog, character, config};

#[test]
fn scenario_a_unlock_then_root_then_branch_gate() {
    let catalog = catalog();
    let config = config();
    let mut hero = character(10);
    let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
    let acrobat = ModuleId::from(ACROBAT);

    let outcome = engine.add_module(&acrobat).expect("unlock");
    assert_eq!(outcome.charged, 2);
    assert_eq!(outcome.points.available(), 8);

    let err = engine.select_option(&acrobat, "2a").unwrap_err();
    assert_eq!(err.kind(), BuildErrorKind::PrerequisiteNotMet);
    assert_eq!(engine.character().points().spent(), 2);

    engine.select_option(&acrobat, "1").expect("tier 1 is always open");
    assert_eq!(engine.character().points().spent(), 3);
}

#[test]
fn scenario_b_skill_and_initiative_bonus() {
    let delta = EffectCompiler::compile("AS3=1:ASH=1");
    assert_eq!(delta.skill(Skill::Stealth), 1);
    assert_eq!(delta.initiative, 1);

    let catalog = catalog();
    let config = config();
    let mut hero = character(10);
    let before = hero.effective().clone();
    let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
    let acrobat = ModuleId::from(ACROBAT);
    engine.add_module(&acrobat).unwrap();
    engine.select_option(&acrobat, "1").unwrap();

    let after = engine.character().effective();
    assert_eq!(after.skill(Skill::Stealth), before.skill(Skill::Stealth) + 1);
    assert_eq!(after.initiative, before.initiative + 1);
    assert_eq!(after.skill(Skill::Athletics), before.skill(Skill::Athletics));

    // Applying the compiled delta directly agrees with the engine.
    let direct = EffectApplier::apply(engine.character().base(), [&delta]);
    assert_eq!(direct.skill(Skill::Stealth), after.skill(Skill::Stealth));
}

#[test]
fn scenario_c_health_bonus_applies_once() {
    let catalog = catalog();
    let config = config();
    let mut hero = character(10);
    let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
    let acrobat = ModuleId::from(ACROBAT);
    engine.add_module(&acrobat).unwrap();
    engine.select_option(&acrobat, "1").unwrap();

    let health = engine.character().resources().health;
    assert_eq!((health.current, health.max), (10, 10));

    engine.select_option(&acrobat, "2").unwrap();
    let health = engine.character().resources().health;
    assert_eq!((health.current, health.max), (15, 15));

    let snapshot = engine.character().clone();
    assert!(engine.refresh().is_empty());
    assert!(engine.refresh().is_empty());
    assert_eq!(engine.character(), &snapshot);
}

#[test]
fn depleted_health_is_not_topped_up() {
    let catalog = catalog();
    let config = config();
    let mut hero = character(10);
    hero.resources_mut().health.current = 4;

    let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
    let acrobat = ModuleId::from(ACROBAT);
    engine.add_module(&acrobat).unwrap();
    engine.select_option(&acrobat, "1").unwrap();
    engine.select_option(&acrobat, "2").unwrap();

    let health = engine.character().resources().health;
    assert_eq!((health.current, health.max), (4, 15));

    engine.deselect_option(&acrobat, "2").unwrap();
    let health = engine.character().resources().health;
    assert_eq!((health.current, health.max), (4, 10));
}

#[test]
fn scenario_d_dependents_block_deselect() {
    let catalog = catalog();
    let config = config();
    let mut hero = character(10);
    let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
    let acrobat = ModuleId::from(ACROBAT);
    engine.add_module(&acrobat).unwrap();
    engine.select_option(&acrobat, "1").unwrap();
    engine.select_option(&acrobat, "2").unwrap();
    engine.select_option(&acrobat, "2a").unwrap();
    // "2a" stays in tier 2, so dropping the bare tier leaves {1, 2a}.
    engine.deselect_option(&acrobat, "2").unwrap();

    let spent = engine.character().points().spent();
    let err = engine.deselect_option(&acrobat, "1").unwrap_err();
    assert_eq!(err.kind(), BuildErrorKind::HasDependents);
    assert_eq!(engine.character().points().spent(), spent);

    let first = engine.deselect_option(&acrobat, "2a").unwrap();
    assert_eq!(first.refunded, 1);
    assert_eq!(first.points.spent(), spent - 1);

    let second = engine.deselect_option(&acrobat, "1").unwrap();
    assert_eq!(second.refunded, 1);
    assert_eq!(second.points.spent(), spent - 2);
    assert!(engine.character().module(&acrobat).unwrap().options.is_empty());
}

#[test]
fn scenario_e_exhausted_budget_rejects_selection() {
    let catalog = catalog();
    let config = config();
    let mut hero = character(10);
    let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
    let acrobat = ModuleId::from(ACROBAT);

    engine.add_module(&acrobat).unwrap();
    for location in ["1", "2", "2a", "2b", "3", "4"] {
        engine.select_option(&acrobat, location).unwrap();
    }
    engine.add_trait(&"Lucky".into()).unwrap();
    engine.add_trait(&"Hardy".into()).unwrap();
    assert_eq!(engine.character().points().spent(), 10);
    assert_eq!(engine.character().points().total(), 10);

    let before = engine.character().clone();
    let err = engine
        .execute(&BuildCommand::SelectOption {
            module: acrobat.clone(),
            location: "5".into(),
        })
        .unwrap_err();
    assert_eq!(err.kind(), BuildErrorKind::InsufficientPoints);
    assert_eq!(engine.character(), &before);
}

#[test]
fn module_removal_refunds_everything_it_charged() {
    let catalog = catalog();
    let config = config();
    let mut hero = character(10);
    let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
    let acrobat = ModuleId::from(ACROBAT);
    engine.add_module(&acrobat).unwrap();
    engine.select_option(&acrobat, "1").unwrap();
    engine.select_option(&acrobat, "2").unwrap();
    engine.select_option(&acrobat, "2a").unwrap();
    assert!(
        engine
            .character()
            .effective()
            .immunities
            .contains(&Immunity::Prone)
    );

    let outcome = engine.remove_module(&acrobat).unwrap();
    assert_eq!(outcome.refunded, 5);
    assert_eq!(outcome.points.spent(), 0);
    assert!(!engine.character().has_module(&acrobat));
    assert!(engine.character().effective().immunities.is_empty());

    let err = engine.remove_module(&acrobat).unwrap_err();
    assert_eq!(err.kind(), BuildErrorKind::NotFound);
}

#[test]
fn trait_effects_share_the_effect_pipeline() {
    let catalog = catalog();
    let config = config();
    let mut hero = character(10);
    let mut engine = BuildEngine::new(&mut hero, &catalog, &config);

    engine.add_trait(&"Keen".into()).unwrap();
    engine.add_trait(&"Polyglot".into()).unwrap();
    engine.add_trait(&"Clumsy".into()).unwrap();

    let sheet = engine.character().effective();
    assert_eq!(sheet.skill(Skill::Perception), 1);
    assert!(sheet.languages.contains("Trade Cant"));
    assert_eq!(engine.character().points().spent(), 2);

    let outcome = engine.remove_trait(&"Clumsy".into()).unwrap();
    assert_eq!(outcome.refunded, 0);
    let outcome = engine.remove_trait(&"Keen".into()).unwrap();
    assert_eq!(outcome.refunded, 1);
    assert_eq!(engine.character().effective().skill(Skill::Perception), 0);
}
