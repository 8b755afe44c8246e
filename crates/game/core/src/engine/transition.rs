//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionResult, ActionTransition};
use crate::env::SessionEnv;
use crate::state::SessionState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the
/// result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the session state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut SessionState,
    env: &SessionEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes an action to its transition and wraps the result in [`ActionResult`].
///
/// This is the internal implementation used by `SessionEngine::execute()`.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut SessionState,
    env: &SessionEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Frame(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Frame)
            .map_err(ExecuteError::Frame),
        Action::Choose(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Choose)
            .map_err(ExecuteError::Choose),
        Action::Defer(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Defer)
            .map_err(ExecuteError::Defer),
        Action::Confirm(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Confirm)
            .map_err(ExecuteError::Confirm),
    }
}
