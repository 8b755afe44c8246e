use crate::state::types::common::RoomId;

/// Lifecycle of the event popup, held as an explicit state field rather than
/// being derived from any presentation layer.
///
/// `Resolved` is the transient display-of-outcome state within the same
/// popup, between choice selection and the closing confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DialogState {
    #[default]
    Idle,
    Open {
        room: RoomId,
        task: usize,
    },
    Resolved {
        room: RoomId,
        task: usize,
        choice: usize,
    },
}

impl DialogState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, DialogState::Idle)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Open { .. })
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self, DialogState::Resolved { .. })
    }
}

/// Whole-session lifecycle. `Finished` is terminal: every transition
/// afterwards is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Running,
    Finished,
}
