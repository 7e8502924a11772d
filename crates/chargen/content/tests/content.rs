use std::fs;
use std::path::Path;

use chargen_content::{ContentFactory, embedded_catalog, embedded_config};
use chargen_core::{
    BaseStats, BuildEngine, Catalog, CatalogOracle, Character, CharacterId, CostSchedule,
    ModuleId, PointLedger, Skill,
};

#[test]
fn embedded_catalog_loads_and_drives_engine() {
    let catalog = embedded_catalog().expect("bundled catalog parses");
    let config = embedded_config().expect("bundled config parses");
    assert_eq!(config.schedule_for(1), CostSchedule::Tiered);
    assert_eq!(config.schedule_for(2), CostSchedule::Flat);

    let mut hero = Character::new(
        CharacterId(1),
        "Wren",
        BaseStats::default(),
        PointLedger::new(config.starting_points),
    );
    let mut engine = BuildEngine::new(&mut hero, &catalog, &config);
    let acrobat = ModuleId::from("Acrobat");

    engine.add_module(&acrobat).unwrap();
    engine.select_option(&acrobat, "1").unwrap();
    let sheet = engine.character().effective();
    assert_eq!(sheet.skill(Skill::Stealth), 1);
    assert_eq!(sheet.initiative, 1);
    assert!(sheet.has_action("Tumble"));
    assert!(engine.audit().is_empty());
}

#[test]
fn bundled_options_are_reachable() {
    let catalog = embedded_catalog().unwrap();
    for module in catalog.modules() {
        for option in &module.options {
            let tier = option.location.tier_number();
            if tier > 1 {
                let parent = if option.location.is_branched() { tier } else { tier - 1 };
                assert!(
                    module
                        .options
                        .iter()
                        .any(|other| other.location.tier_number() == parent
                            && other.location != option.location),
                    "{} {} is unreachable",
                    module.id,
                    option.location
                );
            }
        }
    }
}

#[test]
fn legacy_modules_use_tiered_prices() {
    let catalog = embedded_catalog().unwrap();
    let config = embedded_config().unwrap();
    let brawler = catalog.module(&"Brawler".into()).unwrap();
    let deep = brawler.option(&"5".parse().unwrap()).unwrap();
    let shallow = brawler.option(&"1".parse().unwrap()).unwrap();
    assert_eq!(config.option_cost(brawler, deep), 3);
    assert_eq!(config.option_cost(brawler, shallow), 2);
}

fn copy_bundled_data(to: &Path) {
    let from = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    for file in [
        ContentFactory::CONFIG_FILE,
        ContentFactory::MODULES_FILE,
        ContentFactory::TRAITS_FILE,
    ] {
        fs::copy(from.join(file), to.join(file)).unwrap();
    }
}

#[test]
fn factory_loads_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    copy_bundled_data(dir.path());

    let factory = ContentFactory::new(dir.path());
    let catalog: Catalog = factory.load_catalog().unwrap();
    let config = factory.load_config().unwrap();

    assert_eq!(catalog, embedded_catalog().unwrap());
    assert_eq!(config, embedded_config().unwrap());
}

#[test]
fn factory_reports_broken_files() {
    let dir = tempfile::tempdir().unwrap();
    copy_bundled_data(dir.path());
    fs::write(dir.path().join(ContentFactory::TRAITS_FILE), "(traits: [ (id: ) ])").unwrap();

    let err = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("trait catalog"), "{message}");
    assert!(message.contains(ContentFactory::TRAITS_FILE), "{message}");
}
