//! Repository layer for character persistence.
//!
//! Repositories handle data that changes as players build characters.
//! Catalog content is read-only and is never stored through a repository.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileCharacterRepository;
pub use memory::InMemoryCharacterRepo;
pub use traits::CharacterRepository;
