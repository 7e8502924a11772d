#![allow(dead_code)]

use chargen_core::{
    BaseStats, BuildConfig, Catalog, Character, CharacterId, ModuleDefinition, ModuleKind,
    ModuleOption, PointLedger, TraitDefinition, TraitKind,
};

pub const ACROBAT: &str = "Acrobat";
pub const BRAWLER: &str = "Brawler";

fn option(location: &str, name: &str, data: &str) -> ModuleOption {
    ModuleOption::new(location.parse().expect("fixture location"), name, "").with_data(data)
}

fn positive(id: &str, effects: Option<&str>) -> TraitDefinition {
    TraitDefinition {
        id: id.into(),
        name: id.to_string(),
        kind: TraitKind::Positive,
        description: String::new(),
        effects: effects.map(str::to_string),
    }
}

fn negative(id: &str) -> TraitDefinition {
    TraitDefinition {
        id: id.into(),
        name: id.to_string(),
        kind: TraitKind::Negative,
        description: String::new(),
        effects: None,
    }
}

pub fn catalog() -> Catalog {
    let acrobat = ModuleDefinition {
        id: ACROBAT.into(),
        name: "Acrobat".into(),
        kind: ModuleKind::Secondary,
        ruleset: 2,
        options: vec![
            option("1", "Reaction : Tumble", "AS3=1:ASH=1"),
            option("2", "Sure Footing", "AH=5"),
            option("2a", "Free Action : Kip Up", "I11"),
            option("2b", "Light Step", "AV=1"),
            option("3", "Action : Vault", "XD"),
            option("4", "Evasion", "AD1=1"),
            option("5", "Wall Run", "AV=2"),
        ],
    };
    let brawler = ModuleDefinition {
        id: BRAWLER.into(),
        name: "Brawler".into(),
        kind: ModuleKind::Core,
        ruleset: 1,
        options: vec![
            option("1", "Action : Haymaker", "AZ4=1"),
            option("2", "Iron Chin", "I5"),
            option("2a", "Grappler", "AS1=1"),
            option("3", "Thick Skin", "AD1=1"),
            option("5", "Unbreakable", "AH=3"),
        ],
    };

    Catalog::new(
        [acrobat, brawler],
        [
            positive("Lucky", None),
            positive("Hardy", Some("AH=2")),
            positive("Keen", Some("VD4:AS4=1")),
            positive("Polyglot", Some(r#"L="Trade Cant""#)),
            negative("Clumsy"),
            negative("Frail"),
        ],
    )
    .expect("fixture catalog is valid")
}

pub fn character(points: u32) -> Character {
    Character::new(
        CharacterId(1),
        "Wren",
        BaseStats::default(),
        PointLedger::new(points),
    )
}

pub fn config() -> BuildConfig {
    BuildConfig::new()
}
