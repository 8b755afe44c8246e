//! Error types for the action execution pipeline.

use crate::action::{ChooseError, ConfirmError, DeferError, FrameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the session engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("frame action failed: {0}")]
    Frame(TransitionPhaseError<FrameError>),

    #[error("choose action failed: {0}")]
    Choose(TransitionPhaseError<ChooseError>),

    #[error("defer action failed: {0}")]
    Defer(TransitionPhaseError<DeferError>),

    #[error("confirm action failed: {0}")]
    Confirm(TransitionPhaseError<ConfirmError>),
}

impl ExecuteError {
    /// The pipeline phase that rejected the action.
    pub fn phase(&self) -> TransitionPhase {
        match self {
            ExecuteError::Frame(e) => e.phase,
            ExecuteError::Choose(e) => e.phase,
            ExecuteError::Defer(e) => e.phase,
            ExecuteError::Confirm(e) => e.phase,
        }
    }
}
