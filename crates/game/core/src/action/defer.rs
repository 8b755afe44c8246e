use crate::action::ActionTransition;
use crate::env::SessionEnv;
use crate::state::{DialogState, Minutes, RoomId, SessionState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeferError {
    #[error("no dialog is open")]
    DialogNotOpen,

    #[error("room {0} not found")]
    RoomNotFound(RoomId),
}

/// Room-level hold: closes the open dialog without resolving the task.
///
/// The room stays silent while the player remains inside its radius; leaving
/// and re-entering re-arms it. Task status and the cycle pointer are
/// untouched, so the same task is presented again on re-entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeferAction;

/// Data for one deferred interaction, consumed by the log recorder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeferResult {
    pub room: RoomId,
    pub task_index: usize,
    pub room_name: String,
    pub task_name: String,
    pub elapsed: Minutes,
}

impl ActionTransition for DeferAction {
    type Error = DeferError;
    type Result = DeferResult;

    fn pre_validate(&self, state: &SessionState, _env: &SessionEnv<'_>) -> Result<(), DeferError> {
        if !state.dialog.is_open() {
            return Err(DeferError::DialogNotOpen);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut SessionState,
        _env: &SessionEnv<'_>,
    ) -> Result<DeferResult, DeferError> {
        let DialogState::Open { room, task } = state.dialog else {
            return Err(DeferError::DialogNotOpen);
        };

        let room_state = state.room_mut(room).ok_or(DeferError::RoomNotFound(room))?;
        room_state.ignore_until_exit = true;

        let room_name = room_state.name.clone();
        let task_name = room_state
            .task(task)
            .map(|t| t.name.clone())
            .unwrap_or_default();

        state.dialog = DialogState::Idle;

        Ok(DeferResult {
            room,
            task_index: task,
            room_name,
            task_name,
            elapsed: state.clock.accumulated,
        })
    }

    fn post_validate(&self, state: &SessionState, _env: &SessionEnv<'_>) -> Result<(), DeferError> {
        if !state.dialog.is_idle() {
            return Err(DeferError::DialogNotOpen);
        }
        Ok(())
    }
}
