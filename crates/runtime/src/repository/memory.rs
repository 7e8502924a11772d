//! In-memory CharacterRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use chargen_core::{Character, CharacterId};

use super::{CharacterRepository, RepositoryError, Result};

/// In-memory implementation of CharacterRepository.
pub struct InMemoryCharacterRepo {
    characters: RwLock<HashMap<CharacterId, Character>>,
}

impl InMemoryCharacterRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            characters: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCharacterRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterRepository for InMemoryCharacterRepo {
    fn save(&self, character: &Character) -> Result<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        characters.insert(character.id(), character.clone());
        Ok(())
    }

    fn load(&self, id: CharacterId) -> Result<Option<Character>> {
        let characters = self
            .characters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(characters.get(&id).cloned())
    }

    fn exists(&self, id: CharacterId) -> bool {
        self.characters
            .read()
            .map(|characters| characters.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: CharacterId) -> Result<()> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        characters.remove(&id);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<CharacterId>> {
        let characters = self
            .characters
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<CharacterId> = characters.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
