//! Build events broadcast by character workers.

use chargen_core::{BuildCommand, BuildError, BuildOutcome, CharacterId};

/// Notification published after every command a worker processes.
#[derive(Clone, Debug)]
pub enum BuildEvent {
    /// The command was applied and the character persisted.
    Committed {
        character: CharacterId,
        command: BuildCommand,
        outcome: BuildOutcome,
    },
    /// The engine rejected the command.
    Rejected {
        character: CharacterId,
        command: BuildCommand,
        error: BuildError,
    },
    /// A worker stopped and released its character.
    Closed { character: CharacterId },
}

impl BuildEvent {
    pub fn character(&self) -> CharacterId {
        match self {
            Self::Committed { character, .. }
            | Self::Rejected { character, .. }
            | Self::Closed { character } => *character,
        }
    }
}
