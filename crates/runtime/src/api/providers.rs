//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`CommandProvider`] implementations so the session
//! can run with human input, scripted fixtures, or policies.
use std::collections::VecDeque;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use game_core::{MoveInput, SessionState};

use super::errors::Result;

/// One player-issued command per scheduler step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Advance one frame with the given movement input.
    Move(MoveInput),
    /// Resolve the open dialog with a choice index.
    Choose(usize),
    /// Hold the room and close the dialog.
    Defer,
    /// Acknowledge a resolved dialog.
    Confirm,
    /// Stop driving the session.
    Quit,
}

/// Trait for providing commands based on the current session state.
///
/// Different implementations can handle:
/// - Human input (from a frontend)
/// - Scripted/replayed sessions
/// - Testing fixtures
#[async_trait]
pub trait CommandProvider: Send {
    /// Provide the next command given a read-only state snapshot.
    async fn next_command(&mut self, state: &SessionState) -> Result<PlayerCommand>;
}

/// A provider that always idles. Useful for soak tests or as a fallback.
pub struct IdleProvider;

#[async_trait]
impl CommandProvider for IdleProvider {
    async fn next_command(&mut self, _state: &SessionState) -> Result<PlayerCommand> {
        Ok(PlayerCommand::Move(MoveInput::IDLE))
    }
}

/// Replays a fixed command sequence, then quits.
pub struct ScriptedProvider {
    commands: VecDeque<PlayerCommand>,
}

impl ScriptedProvider {
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }
}

#[async_trait]
impl CommandProvider for ScriptedProvider {
    async fn next_command(&mut self, _state: &SessionState) -> Result<PlayerCommand> {
        Ok(self.commands.pop_front().unwrap_or(PlayerCommand::Quit))
    }
}
