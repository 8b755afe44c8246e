use crate::action::ActionTransition;
use crate::config::SessionConfig;
use crate::env::SessionEnv;
use crate::state::{DialogState, Minutes, RoomId, SessionState, TaskStatus};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChooseError {
    #[error("no dialog is open")]
    DialogNotOpen,

    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("task {task} not found in room {room}")]
    TaskNotFound { room: RoomId, task: usize },

    #[error("choice {choice} out of range ({available} available)")]
    ChoiceOutOfRange { choice: usize, available: usize },
}

/// Resolves the presented task with one of its choices.
///
/// The reserved fourth choice leaves the task pending (defer-within-event);
/// every other choice completes it. Either way the choice's time cost lands
/// on the clock and the dialog moves to the resolved display state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChooseAction {
    pub choice: usize,
}

impl ChooseAction {
    pub fn new(choice: usize) -> Self {
        Self { choice }
    }
}

/// Data for one resolved interaction, consumed by the log recorder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceResult {
    pub room: RoomId,
    pub task_index: usize,
    pub room_name: String,
    pub task_name: String,
    pub choice_text: String,
    pub result_text: String,
    pub time_cost: Minutes,
    /// Accumulated simulated time after this resolution.
    pub elapsed: Minutes,
    pub completed: bool,
}

impl ActionTransition for ChooseAction {
    type Error = ChooseError;
    type Result = ChoiceResult;

    fn pre_validate(&self, state: &SessionState, _env: &SessionEnv<'_>) -> Result<(), ChooseError> {
        let DialogState::Open { room, task } = state.dialog else {
            return Err(ChooseError::DialogNotOpen);
        };

        let room_state = state.room(room).ok_or(ChooseError::RoomNotFound(room))?;
        let task_state = room_state
            .task(task)
            .ok_or(ChooseError::TaskNotFound { room, task })?;

        if self.choice >= task_state.choices.len() {
            return Err(ChooseError::ChoiceOutOfRange {
                choice: self.choice,
                available: task_state.choices.len(),
            });
        }

        Ok(())
    }

    fn apply(
        &self,
        state: &mut SessionState,
        _env: &SessionEnv<'_>,
    ) -> Result<ChoiceResult, ChooseError> {
        let DialogState::Open { room, task } = state.dialog else {
            return Err(ChooseError::DialogNotOpen);
        };

        let room_state = state.room_mut(room).ok_or(ChooseError::RoomNotFound(room))?;
        let room_name = room_state.name.clone();
        let task_state = room_state
            .task_mut(task)
            .ok_or(ChooseError::TaskNotFound { room, task })?;

        let choice = task_state
            .choices
            .get(self.choice)
            .ok_or(ChooseError::ChoiceOutOfRange {
                choice: self.choice,
                available: task_state.choices.len(),
            })?
            .clone();

        // The reserved slot re-defers instead of completing.
        let completed = self.choice != SessionConfig::DEFER_CHOICE_INDEX;
        task_state.status = if completed {
            TaskStatus::Completed
        } else {
            TaskStatus::Pending
        };
        let task_name = task_state.name.clone();

        state.clock.add(choice.time);
        state.dialog = DialogState::Resolved {
            room,
            task,
            choice: self.choice,
        };

        Ok(ChoiceResult {
            room,
            task_index: task,
            room_name,
            task_name,
            choice_text: choice.text,
            result_text: choice.result,
            time_cost: choice.time,
            elapsed: state.clock.accumulated,
            completed,
        })
    }

    fn post_validate(
        &self,
        state: &SessionState,
        _env: &SessionEnv<'_>,
    ) -> Result<(), ChooseError> {
        if !state.dialog.is_resolved() {
            return Err(ChooseError::DialogNotOpen);
        }
        Ok(())
    }
}
