//! Runtime orchestrator that owns character workers.
//!
//! [`BuildRuntime`] shares one catalog and one build configuration across
//! every open character. Each open character gets its own worker task, so
//! commands against one character are serialized while different characters
//! proceed independently.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, mpsc};
use tokio::task::JoinHandle;

use chargen_core::{
    BaseStats, BuildConfig, BuildEngine, CatalogOracle, Character, CharacterId, PointLedger,
};

use crate::api::{BuildEvent, CharacterHandle, Result, RuntimeError};
use crate::repository::{CharacterRepository, InMemoryCharacterRepo};
use crate::workers::{CharacterWorker, Command};

/// Channel sizing for the runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: 32,
            event_buffer_size: 100,
        }
    }
}

struct WorkerEntry {
    handle: CharacterHandle,
    task: JoinHandle<()>,
}

/// Main runtime that manages character workers.
pub struct BuildRuntime {
    catalog: Arc<dyn CatalogOracle>,
    config: Arc<BuildConfig>,
    repository: Arc<dyn CharacterRepository>,
    runtime_config: RuntimeConfig,
    event_tx: broadcast::Sender<BuildEvent>,
    workers: Mutex<HashMap<CharacterId, WorkerEntry>>,
}

impl BuildRuntime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn build_config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn repository(&self) -> &Arc<dyn CharacterRepository> {
        &self.repository
    }

    /// Subscribe to build events from every character.
    pub fn subscribe(&self) -> broadcast::Receiver<BuildEvent> {
        self.event_tx.subscribe()
    }

    /// Create a character with the configured starting budget and open it.
    pub async fn create_character(
        &self,
        id: CharacterId,
        name: impl Into<String>,
        base: BaseStats,
    ) -> Result<CharacterHandle> {
        let mut workers = self.workers.lock().await;
        if workers.contains_key(&id) || self.repository.exists(id) {
            return Err(RuntimeError::CharacterExists(id));
        }

        let character = Character::new(
            id,
            name,
            base,
            PointLedger::new(self.config.starting_points),
        );
        self.repository.save(&character)?;

        tracing::info!(character = %id, name = character.name(), "created character");

        let entry = self.spawn_worker(character);
        let handle = entry.handle.clone();
        workers.insert(id, entry);
        Ok(handle)
    }

    /// Open a stored character, reusing the live worker when there is one.
    ///
    /// Loading recomputes the sheet against the current catalog and logs
    /// audit findings. A character that references content the catalog no
    /// longer carries still opens.
    pub async fn open_character(&self, id: CharacterId) -> Result<CharacterHandle> {
        let mut workers = self.workers.lock().await;
        if let Some(entry) = workers.get(&id)
            && !entry.task.is_finished()
        {
            return Ok(entry.handle.clone());
        }

        let mut character = self
            .repository
            .load(id)?
            .ok_or(RuntimeError::CharacterNotFound(id))?;

        let mut engine = BuildEngine::new(&mut character, &*self.catalog, &self.config);
        for missing in engine.refresh() {
            tracing::warn!(character = %id, %missing, "stored selection not in catalog");
        }
        for violation in engine.audit() {
            tracing::warn!(character = %id, ?violation, "stored character failed audit");
        }
        self.repository.save(&character)?;

        tracing::info!(character = %id, revision = character.revision(), "opened character");

        let entry = self.spawn_worker(character);
        let handle = entry.handle.clone();
        workers.insert(id, entry);
        Ok(handle)
    }

    /// Stop the character's worker (if running) and remove its save.
    pub async fn delete_character(&self, id: CharacterId) -> Result<()> {
        let entry = self.workers.lock().await.remove(&id);
        if let Some(entry) = entry {
            Self::stop_worker(entry).await?;
        } else if !self.repository.exists(id) {
            return Err(RuntimeError::CharacterNotFound(id));
        }

        self.repository.delete(id)?;
        tracing::info!(character = %id, "deleted character");
        Ok(())
    }

    /// Stop one worker and keep its save.
    pub async fn close_character(&self, id: CharacterId) -> Result<()> {
        let entry = self
            .workers
            .lock()
            .await
            .remove(&id)
            .ok_or(RuntimeError::CharacterNotFound(id))?;
        Self::stop_worker(entry).await
    }

    pub async fn open_ids(&self) -> Vec<CharacterId> {
        let mut ids: Vec<CharacterId> = self.workers.lock().await.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Gracefully stop every worker.
    pub async fn shutdown(self) -> Result<()> {
        let workers = self.workers.into_inner();
        for (_, entry) in workers {
            Self::stop_worker(entry).await?;
        }
        Ok(())
    }

    fn spawn_worker(&self, character: Character) -> WorkerEntry {
        let id = character.id();
        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.runtime_config.command_buffer_size);

        let worker = CharacterWorker::new(
            character,
            Arc::clone(&self.catalog),
            Arc::clone(&self.config),
            Arc::clone(&self.repository),
            command_rx,
            self.event_tx.clone(),
        );

        let task = tokio::spawn(async move {
            worker.run().await;
        });

        WorkerEntry {
            handle: CharacterHandle::new(id, command_tx, self.event_tx.clone()),
            task,
        }
    }

    async fn stop_worker(entry: WorkerEntry) -> Result<()> {
        // A worker that already exited has dropped its receiver.
        let _ = entry.handle.stop().await;
        drop(entry.handle);
        entry.task.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`BuildRuntime`].
pub struct RuntimeBuilder {
    catalog: Option<Arc<dyn CatalogOracle>>,
    config: BuildConfig,
    repository: Option<Arc<dyn CharacterRepository>>,
    runtime_config: RuntimeConfig,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            catalog: None,
            config: BuildConfig::default(),
            repository: None,
            runtime_config: RuntimeConfig::default(),
        }
    }

    pub fn catalog(mut self, catalog: Arc<dyn CatalogOracle>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    /// Defaults to [`InMemoryCharacterRepo`].
    pub fn repository(mut self, repository: Arc<dyn CharacterRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn runtime_config(mut self, runtime_config: RuntimeConfig) -> Self {
        self.runtime_config = runtime_config;
        self
    }

    pub fn build(self) -> Result<BuildRuntime> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryCharacterRepo::new()));
        let (event_tx, _) = broadcast::channel(self.runtime_config.event_buffer_size);

        Ok(BuildRuntime {
            catalog,
            config: Arc::new(self.config),
            repository,
            runtime_config: self.runtime_config,
            event_tx,
            workers: Mutex::new(HashMap::new()),
        })
    }
}
