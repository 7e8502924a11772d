//! CLI configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use chargen_core::CharacterId;

/// Configuration for one CLI session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Catalog directory. `None` uses the catalog compiled into the binary.
    pub data_dir: Option<PathBuf>,
    /// Directory holding character saves. `None` keeps characters in memory.
    pub save_dir: Option<PathBuf>,
    pub character: CharacterId,
    pub name: String,
    /// Overrides the configured starting budget for new characters.
    pub starting_points: Option<u32>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            save_dir: default_save_dir(),
            character: CharacterId(1),
            name: "Adventurer".to_string(),
            starting_points: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CHARGEN_DATA_DIR` - Directory with `build.toml`, `modules.ron` and
    ///   `traits.ron` (default: bundled catalog)
    /// - `CHARGEN_SAVE_DIR` - Directory for character saves (default:
    ///   platform data directory; `memory` disables persistence)
    /// - `CHARGEN_CHARACTER` - Character id to open or create (default: 1)
    /// - `CHARGEN_NAME` - Name for a newly created character
    /// - `CHARGEN_POINTS` - Starting module points for new characters
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("CHARGEN_DATA_DIR").ok().map(PathBuf::from);

        if let Ok(dir) = env::var("CHARGEN_SAVE_DIR") {
            config.save_dir = (dir != "memory").then(|| PathBuf::from(dir));
        }

        if let Some(id) = read_env::<u64>("CHARGEN_CHARACTER") {
            config.character = CharacterId(id);
        }

        if let Ok(name) = env::var("CHARGEN_NAME") {
            config.name = name;
        }

        config.starting_points = read_env::<u32>("CHARGEN_POINTS");

        config
    }
}

fn default_save_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "chargen").map(|dirs| dirs.data_dir().join("characters"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
