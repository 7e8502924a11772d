//! File-based CharacterRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use chargen_core::{Character, CharacterId};

use super::{CharacterRepository, RepositoryError, Result};

/// File-based implementation of CharacterRepository.
///
/// Stores each character as `character_{id}.bin` in bincode format. Writes
/// go to a temp file first and are renamed into place, so a crash never
/// leaves a half-written save behind.
pub struct FileCharacterRepository {
    base_dir: PathBuf,
}

impl FileCharacterRepository {
    /// Create a new file-based repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn character_path(&self, id: CharacterId) -> PathBuf {
        self.base_dir.join(format!("character_{}.bin", id.0))
    }
}

impl CharacterRepository for FileCharacterRepository {
    fn save(&self, character: &Character) -> Result<()> {
        let path = self.character_path(character.id());
        let temp_path = path.with_extension("bin.tmp");

        let bytes = bincode::serialize(character)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            character = %character.id(),
            revision = character.revision(),
            path = %path.display(),
            "saved character"
        );

        Ok(())
    }

    fn load(&self, id: CharacterId) -> Result<Option<Character>> {
        let path = self.character_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let character: Character = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        tracing::debug!(character = %id, path = %path.display(), "loaded character");

        Ok(Some(character))
    }

    fn exists(&self, id: CharacterId) -> bool {
        self.character_path(id).exists()
    }

    fn delete(&self, id: CharacterId) -> Result<()> {
        let path = self.character_path(id);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!(character = %id, "deleted character");
        }

        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<CharacterId>> {
        let mut ids = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id_str) = filename
                    .strip_prefix("character_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && let Ok(id) = id_str.parse::<u64>()
            {
                ids.push(CharacterId(id));
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargen_core::{BaseStats, PointLedger};

    #[test]
    fn saves_round_trip_and_list_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCharacterRepository::new(dir.path()).unwrap();
        let wren = Character::new(
            CharacterId(12),
            "Wren",
            BaseStats::default(),
            PointLedger::new(10),
        );

        repo.save(&wren).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a save").unwrap();

        assert_eq!(repo.load(CharacterId(12)).unwrap(), Some(wren));
        assert_eq!(repo.list_ids().unwrap(), vec![CharacterId(12)]);
        assert!(!dir.path().join("character_12.bin.tmp").exists());
    }

    #[test]
    fn overspent_ledger_is_clamped_on_load() {
        let bytes = bincode::serialize(&(4u32, 9u32)).unwrap();
        let ledger: PointLedger = bincode::deserialize(&bytes).unwrap();

        assert_eq!(ledger.total(), 4);
        assert_eq!(ledger.spent(), 4);
        assert_eq!(ledger.available(), 0);
    }
}
