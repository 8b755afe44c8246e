//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the session or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{ChoiceResult, ConfirmResult, DeferResult, FrameResult, MoveInput, SessionState};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::runtime::SessionSummary;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Advance one frame of the game-update step.
    pub async fn advance_frame(&self, input: MoveInput) -> Result<FrameResult> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::AdvanceFrame {
                input,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Resolve the open dialog with a choice.
    pub async fn choose(&self, choice: usize) -> Result<ChoiceResult> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Choose {
                choice,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Hold the presented room and close the dialog.
    pub async fn defer(&self) -> Result<DeferResult> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Defer { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Acknowledge a resolved dialog and close it.
    pub async fn confirm(&self) -> Result<ConfirmResult> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Confirm { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current session state (read-only snapshot)
    pub async fn query_state(&self) -> Result<SessionState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::QueryState { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// End the session: flush the trajectory to the collector and return the
    /// summary. Idempotent on an already-finished session.
    pub async fn finish(&self) -> Result<SessionSummary> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Finish { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - Dialog lifecycle and session termination
    /// - `Topic::Telemetry` - Log entries and trace samples
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
