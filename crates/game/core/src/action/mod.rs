//! Action domain: every session mutation is an explicit action.
//!
//! The frame action advances movement, the clock, and trigger detection;
//! the dialog actions (choose / defer / confirm) drive the popup lifecycle.
//! All of them flow through the same three-phase transition pipeline so the
//! engine remains the single authority over state.

mod choose;
mod confirm;
mod defer;
mod frame;

pub use choose::{ChooseAction, ChooseError, ChoiceResult};
pub use confirm::{ConfirmAction, ConfirmError, ConfirmResult};
pub use defer::{DeferAction, DeferError, DeferResult};
pub use frame::{FrameAction, FrameError, FrameResult, MoveInput};

use crate::env::SessionEnv;
use crate::state::SessionState;

/// Defines how a concrete action variant mutates session state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. All hooks
/// receive read-only access to environment facts via [`SessionEnv`] and must
/// stay side-effect free.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(
        &self,
        _state: &SessionState,
        _env: &SessionEnv<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the session state directly.
    /// Implementations may assume `pre_validate` has already run.
    fn apply(
        &self,
        state: &mut SessionState,
        env: &SessionEnv<'_>,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(
        &self,
        _state: &SessionState,
        _env: &SessionEnv<'_>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Top-level action enum covering every session mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// One frame of the game-update step: movement, clock, triggers.
    Frame(FrameAction),
    /// Resolve the open dialog with a choice.
    Choose(ChooseAction),
    /// Hold the room: close the dialog without resolving.
    Defer(DeferAction),
    /// Acknowledge a resolved dialog and close it.
    Confirm(ConfirmAction),
}

impl Action {
    pub fn frame(input: MoveInput) -> Self {
        Self::Frame(FrameAction::new(input))
    }

    pub fn idle_frame() -> Self {
        Self::Frame(FrameAction::idle())
    }

    pub fn choose(choice: usize) -> Self {
        Self::Choose(ChooseAction::new(choice))
    }

    pub fn defer() -> Self {
        Self::Defer(DeferAction)
    }

    pub fn confirm() -> Self {
        Self::Confirm(ConfirmAction)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Action::Frame(_) => "frame",
            Action::Choose(_) => "choose",
            Action::Defer(_) => "defer",
            Action::Confirm(_) => "confirm",
        }
    }
}

/// Action-specific execution results surfaced to the runtime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Frame(FrameResult),
    Choose(ChoiceResult),
    Defer(DeferResult),
    Confirm(ConfirmResult),
}
