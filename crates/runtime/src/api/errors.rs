//! Error types surfaced by the runtime API.

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinError;

use chargen_core::{BuildError, CharacterId};

use crate::repository::RepositoryError;

/// Errors surfaced by the runtime API.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The build engine rejected a command. The character is unchanged.
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("character {0} not found")]
    CharacterNotFound(CharacterId),

    #[error("character {0} already exists")]
    CharacterExists(CharacterId),

    #[error("runtime is missing a catalog")]
    MissingCatalog,

    #[error("character worker command channel closed")]
    CommandChannelClosed,

    #[error("character worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("character worker task failed")]
    WorkerJoin(#[source] JoinError),
}

impl RuntimeError {
    /// Build rejection carried by this error, if any.
    pub fn as_build(&self) -> Option<&BuildError> {
        match self {
            Self::Build(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
