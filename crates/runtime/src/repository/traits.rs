//! Repository contract for saving and loading characters.

use chargen_core::{Character, CharacterId};

use super::error::Result;

/// Persistence for the character aggregate.
///
/// A saved character carries its attributes, selection state, point ledger
/// and the last effective sheet. Static catalog content never goes through a
/// repository.
pub trait CharacterRepository: Send + Sync {
    /// Save (or overwrite) a character.
    fn save(&self, character: &Character) -> Result<()>;

    /// Load a character by id.
    fn load(&self, id: CharacterId) -> Result<Option<Character>>;

    /// Check if a character exists.
    fn exists(&self, id: CharacterId) -> bool;

    /// Delete a character. Deleting a missing character is not an error.
    fn delete(&self, id: CharacterId) -> Result<()>;

    /// List all stored character ids in ascending order.
    fn list_ids(&self) -> Result<Vec<CharacterId>>;
}
