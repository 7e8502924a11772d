//! Character worker that owns one character and applies build commands.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use chargen_core::{
    AuditViolation, BuildCommand, BuildConfig, BuildEngine, BuildOutcome, CatalogOracle,
    Character, MissingEntity, audit,
};

use crate::api::{BuildEvent, Result};
use crate::repository::CharacterRepository;

/// Commands processed by a [`CharacterWorker`].
pub enum Command {
    Execute {
        command: BuildCommand,
        reply: oneshot::Sender<Result<BuildOutcome>>,
    },
    Snapshot {
        reply: oneshot::Sender<Character>,
    },
    Refresh {
        reply: oneshot::Sender<Result<Vec<MissingEntity>>>,
    },
    Audit {
        reply: oneshot::Sender<Vec<AuditViolation>>,
    },
    Shutdown,
}

/// Single writer for one character.
///
/// Each command runs against a working copy. The copy replaces the live
/// character only after the repository accepted it, so the stored save and
/// the in-memory state never diverge.
pub struct CharacterWorker {
    character: Character,
    catalog: Arc<dyn CatalogOracle>,
    config: Arc<BuildConfig>,
    repository: Arc<dyn CharacterRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<BuildEvent>,
}

impl CharacterWorker {
    pub fn new(
        character: Character,
        catalog: Arc<dyn CatalogOracle>,
        config: Arc<BuildConfig>,
        repository: Arc<dyn CharacterRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<BuildEvent>,
    ) -> Self {
        Self {
            character,
            catalog,
            config,
            repository,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        let id = self.character.id();
        tracing::debug!(character = %id, "character worker started");

        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                else => break,
            }
        }

        let _ = self.event_tx.send(BuildEvent::Closed { character: id });
        tracing::debug!(character = %id, "character worker stopped");
    }

    /// Returns `false` when the worker should stop.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Execute { command, reply } => {
                let result = self.execute(command);
                let _ = reply.send(result);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.character.clone());
            }
            Command::Refresh { reply } => {
                let _ = reply.send(self.refresh());
            }
            Command::Audit { reply } => {
                let _ = reply.send(audit(&self.character, &*self.catalog, &self.config));
            }
            Command::Shutdown => return false,
        }
        true
    }

    fn execute(&mut self, command: BuildCommand) -> Result<BuildOutcome> {
        let mut working = self.character.clone();
        let mut engine = BuildEngine::new(&mut working, &*self.catalog, &self.config);

        let outcome = match engine.execute(&command) {
            Ok(outcome) => outcome,
            Err(error) => {
                let _ = self.event_tx.send(BuildEvent::Rejected {
                    character: self.character.id(),
                    command,
                    error: error.clone(),
                });
                return Err(error.into());
            }
        };

        for missing in &outcome.missing {
            tracing::warn!(character = %working.id(), %missing, "selection not in catalog");
        }

        self.repository.save(&working)?;
        self.character = working;

        let _ = self.event_tx.send(BuildEvent::Committed {
            character: self.character.id(),
            command,
            outcome: outcome.clone(),
        });

        Ok(outcome)
    }

    fn refresh(&mut self) -> Result<Vec<MissingEntity>> {
        let mut working = self.character.clone();
        let missing = BuildEngine::new(&mut working, &*self.catalog, &self.config).refresh();

        if working != self.character {
            self.repository.save(&working)?;
            self.character = working;
        }

        Ok(missing)
    }
}
