//! Frame scheduling and action execution pipeline.
//!
//! The [`SessionEngine`] is the authoritative reducer for
//! [`SessionState`]. It orchestrates the transition phases and surfaces rich
//! error information for the runtime. All state mutations, from per-frame
//! movement to dialog resolution, flow through the same execute() pipeline.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, ActionResult};
use crate::env::SessionEnv;
use crate::state::SessionState;

/// Session engine that manages action execution and the popup lifecycle.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
///
/// Frame actions and dialog actions use the same execution path, ensuring
/// every mutation is auditable through the action sequence number.
pub struct SessionEngine<'a> {
    state: &'a mut SessionState,
}

impl<'a> SessionEngine<'a> {
    /// Creates a new engine borrowing the given state.
    pub fn new(state: &'a mut SessionState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &SessionState {
        self.state
    }

    /// Executes an action by routing it through the transition pipeline.
    ///
    /// On success the session's action sequence number is incremented; a
    /// rejected action leaves the state untouched by construction (every
    /// transition validates before it mutates).
    pub fn execute(
        &mut self,
        env: &SessionEnv<'_>,
        action: &Action,
    ) -> Result<ActionResult, ExecuteError> {
        let result = transition::execute_transition(action, self.state, env)?;

        self.state.clock.sequence += 1;

        Ok(result)
    }
}
