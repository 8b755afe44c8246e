//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the simulation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use game_content::ContentBundle;
use game_core::{Minutes, Room, SessionState};

use crate::api::{CommandProvider, PlayerCommand, Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::recorder::{SessionMeta, SessionRecorder};
use crate::relay::{CollectorSink, NullSink, Relay};
use crate::repository::{InMemorySessionLog, SessionLogRepository};
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Participant identifier stamped on every log entry.
    pub player_id: String,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            player_id: "anonymous".to_string(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// End-of-session accounting returned by [`RuntimeHandle::finish`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub player_id: String,
    pub session_uuid: Uuid,
    pub elapsed: Minutes,
    pub interactions: usize,
    pub trace_points: usize,
    pub discovered_rooms: usize,
}

/// Main runtime that orchestrates the session simulation
///
/// Design: Runtime owns the worker and coordinates execution.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    // Shared handle (can be cloned for clients)
    handle: RuntimeHandle,

    // Command provider (injected by user)
    provider: Option<Box<dyn CommandProvider>>,

    // Background worker
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Set the command provider
    pub fn set_provider(&mut self, provider: impl CommandProvider + 'static) {
        self.provider = Some(Box::new(provider));
    }

    /// Execute a single scheduler step.
    ///
    /// Returns false when the session finished or the provider quit.
    pub async fn step(&mut self) -> Result<bool> {
        let provider = self
            .provider
            .as_mut()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let state = self.handle.query_state().await?;
        if state.is_finished() {
            return Ok(false);
        }

        match provider.next_command(&state).await? {
            PlayerCommand::Move(input) => {
                // Movement input is frozen while a popup is open; the
                // command is swallowed, not an error.
                if state.dialog.is_idle() {
                    self.handle.advance_frame(input).await?;
                }
            }
            PlayerCommand::Choose(choice) => {
                self.handle.choose(choice).await?;
            }
            PlayerCommand::Defer => {
                self.handle.defer().await?;
            }
            PlayerCommand::Confirm => {
                self.handle.confirm().await?;
            }
            PlayerCommand::Quit => return Ok(false),
        }

        Ok(true)
    }

    /// Drive the session until it finishes or the provider quits, then flush
    /// and return the summary.
    pub async fn run(&mut self) -> Result<SessionSummary> {
        while self.step().await? {}
        self.handle.finish().await
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        drop(self.provider);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    rooms: Vec<Room>,
    sink: Option<Arc<dyn CollectorSink>>,
    repository: Option<Box<dyn SessionLogRepository>>,
    provider: Option<Box<dyn CommandProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            rooms: Vec::new(),
            sink: None,
            repository: None,
            provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Provide the room list for the session
    pub fn rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }

    /// Convenience: wire oracles and rooms from a loaded content bundle
    pub fn content(self, bundle: ContentBundle) -> Self {
        let ContentBundle {
            config,
            rooms,
            mask,
        } = bundle;
        self.oracles(OracleManager::new(mask, config)).rooms(rooms)
    }

    /// Set the collector sink (defaults to a discarding sink)
    pub fn sink(mut self, sink: Arc<dyn CollectorSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Set the local session log repository (defaults to in-memory)
    pub fn repository(mut self, repository: Box<dyn SessionLogRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the command provider (optional; required before `run`)
    pub fn provider(mut self, provider: impl CommandProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn the session worker
    pub fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let spawn = oracles.config().spawn;
        let state = SessionState::new(self.rooms, spawn);

        let recorder = SessionRecorder::new(SessionMeta::new(self.config.player_id.clone()));
        let relay = Relay::new(self.sink.unwrap_or_else(|| Arc::new(NullSink)));
        let repository = self
            .repository
            .unwrap_or_else(|| Box::new(InMemorySessionLog::new()));

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let bus = EventBus::with_capacity(self.config.event_buffer_size);

        let worker = SessionWorker::new(
            state,
            oracles,
            recorder,
            relay,
            repository,
            command_rx,
            bus.clone(),
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        let handle = RuntimeHandle::new(command_tx, bus);

        Ok(Runtime {
            handle,
            provider: self.provider,
            worker_handle,
        })
    }
}
