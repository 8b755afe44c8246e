//! Typed events published by the session worker.

use serde::{Deserialize, Serialize};

use game_core::{Minutes, RoomId, TransitionPhase};

use crate::recorder::{InteractionEntry, TracePoint};

/// Choice presentation data carried with a dialog-opened event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoicePrompt {
    pub text: String,
    pub time: Minutes,
}

/// Session lifecycle and dialog state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A trigger scan opened the event popup. Movement stays frozen until
    /// the dialog closes.
    DialogOpened {
        room: RoomId,
        room_name: String,
        task_name: String,
        description: String,
        choices: Vec<ChoicePrompt>,
    },
    /// A choice resolved; the popup now shows its outcome text.
    DialogResolved {
        room: RoomId,
        result_text: String,
        time_cost: Minutes,
    },
    /// The popup closed (confirm or defer).
    DialogClosed { room: RoomId },
    /// An action was rejected by the transition pipeline.
    ActionRejected {
        kind: String,
        phase: TransitionPhase,
        message: String,
    },
    /// The session reached its simulated-time ceiling. Published exactly
    /// once.
    SessionFinished { elapsed: Minutes },
}

/// Immutable telemetry records, mirrored to the relay and repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TelemetryEvent {
    Interaction(InteractionEntry),
    Trace(TracePoint),
}
