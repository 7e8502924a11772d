//! Cloneable façade for talking to a character worker.

use tokio::sync::{broadcast, mpsc, oneshot};

use chargen_core::{
    AuditViolation, BuildCommand, BuildOutcome, Character, CharacterId, MissingEntity, ModuleId,
    TraitId,
};

use super::{BuildEvent, Result, RuntimeError};
use crate::workers::Command;

/// Client-facing handle to one character.
///
/// Commands are queued to the character's worker, which applies them one at
/// a time. Handles are cheap to clone and may be shared across tasks.
#[derive(Clone, Debug)]
pub struct CharacterHandle {
    id: CharacterId,
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<BuildEvent>,
}

impl CharacterHandle {
    pub(crate) fn new(
        id: CharacterId,
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<BuildEvent>,
    ) -> Self {
        Self {
            id,
            command_tx,
            event_tx,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    /// Subscribe to build events from every character in the runtime.
    pub fn subscribe(&self) -> broadcast::Receiver<BuildEvent> {
        self.event_tx.subscribe()
    }

    pub async fn execute(&self, command: BuildCommand) -> Result<BuildOutcome> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Execute { command, reply }).await?;
        rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    pub async fn add_module(&self, module: impl Into<ModuleId>) -> Result<BuildOutcome> {
        self.execute(BuildCommand::AddModule {
            module: module.into(),
        })
        .await
    }

    pub async fn remove_module(&self, module: impl Into<ModuleId>) -> Result<BuildOutcome> {
        self.execute(BuildCommand::RemoveModule {
            module: module.into(),
        })
        .await
    }

    pub async fn select_option(
        &self,
        module: impl Into<ModuleId>,
        location: impl Into<String>,
    ) -> Result<BuildOutcome> {
        self.execute(BuildCommand::SelectOption {
            module: module.into(),
            location: location.into(),
        })
        .await
    }

    pub async fn deselect_option(
        &self,
        module: impl Into<ModuleId>,
        location: impl Into<String>,
    ) -> Result<BuildOutcome> {
        self.execute(BuildCommand::DeselectOption {
            module: module.into(),
            location: location.into(),
        })
        .await
    }

    pub async fn add_trait(&self, id: impl Into<TraitId>) -> Result<BuildOutcome> {
        self.execute(BuildCommand::AddTrait { id: id.into() }).await
    }

    pub async fn remove_trait(&self, id: impl Into<TraitId>) -> Result<BuildOutcome> {
        self.execute(BuildCommand::RemoveTrait { id: id.into() }).await
    }

    /// Current character state as seen by the worker.
    pub async fn snapshot(&self) -> Result<Character> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot { reply }).await?;
        rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Recompute against the current catalog and persist the result.
    pub async fn refresh(&self) -> Result<Vec<MissingEntity>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Refresh { reply }).await?;
        rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    pub async fn audit(&self) -> Result<Vec<AuditViolation>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Audit { reply }).await?;
        rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    pub(crate) async fn stop(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }
}
