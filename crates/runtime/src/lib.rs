//! Async runtime for character builds.
//!
//! Each open character is owned by a worker task that applies build commands
//! one at a time through [`chargen_core::BuildEngine`] and persists the
//! result through a [`CharacterRepository`]. Clients talk to workers through
//! cloneable [`CharacterHandle`]s and observe outcomes as [`BuildEvent`]s.
pub mod api;
pub mod repository;
pub mod runtime;
pub mod workers;

pub use api::{BuildEvent, CharacterHandle, Result, RuntimeError};
pub use repository::{
    CharacterRepository, FileCharacterRepository, InMemoryCharacterRepo, RepositoryError,
};
pub use runtime::{BuildRuntime, RuntimeBuilder, RuntimeConfig};
