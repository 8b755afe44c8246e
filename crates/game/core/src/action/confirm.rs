use crate::action::ActionTransition;
use crate::env::SessionEnv;
use crate::state::{DialogState, RoomId, SessionState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfirmError {
    #[error("no resolved dialog to confirm")]
    DialogNotResolved,

    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("config oracle not available")]
    MissingConfig,

    #[error("cycle pointer out of bounds after confirm in room {0}")]
    PointerOutOfBounds(RoomId),
}

/// Acknowledges the displayed outcome and closes the popup.
///
/// Advances the room's cycle pointer by one regardless of whether the task
/// completed or re-deferred, so the just-handled task is skipped on this
/// pass and only revisited when the circular scan wraps back to it. Then
/// checks the session clock against its limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmResult {
    pub room: RoomId,
    /// True when this confirm moved the session to the finished phase.
    pub finished: bool,
}

impl ActionTransition for ConfirmAction {
    type Error = ConfirmError;
    type Result = ConfirmResult;

    fn pre_validate(
        &self,
        state: &SessionState,
        _env: &SessionEnv<'_>,
    ) -> Result<(), ConfirmError> {
        if !state.dialog.is_resolved() {
            return Err(ConfirmError::DialogNotResolved);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut SessionState,
        env: &SessionEnv<'_>,
    ) -> Result<ConfirmResult, ConfirmError> {
        let config = env.config().map_err(|_| ConfirmError::MissingConfig)?;

        let DialogState::Resolved { room, .. } = state.dialog else {
            return Err(ConfirmError::DialogNotResolved);
        };

        let room_state = state
            .room_mut(room)
            .ok_or(ConfirmError::RoomNotFound(room))?;
        room_state.advance_pointer();

        state.dialog = DialogState::Idle;

        let finished = if state.clock.has_reached(config.max_time_minutes()) {
            state.finish()
        } else {
            false
        };

        Ok(ConfirmResult { room, finished })
    }

    fn post_validate(
        &self,
        state: &SessionState,
        _env: &SessionEnv<'_>,
    ) -> Result<(), ConfirmError> {
        for (index, room) in state.rooms.iter().enumerate() {
            if !room.tasks.is_empty() && room.current_task_index >= room.tasks.len() {
                return Err(ConfirmError::PointerOutOfBounds(RoomId(index as u32)));
            }
        }
        Ok(())
    }
}
