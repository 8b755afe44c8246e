//! Spatial trigger detection.
//!
//! Each tick the detector walks the room list in stable source order and
//! compares the player's Euclidean distance against every trigger radius.
//! Rooms defined earlier in the source table take precedence among
//! overlapping radii: at most one room yields an event per tick, and the
//! scan stops at the first room that both triggers and has a selectable
//! task. Rooms after the firing one keep their flags until the next tick.

use crate::rules::cycle::{CycleOutcome, select_next_task};
use crate::state::{RoomId, SessionState};

/// The room/task pair the detector resolved for event emission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerHit {
    pub room: RoomId,
    pub task: usize,
}

/// Result of one trigger scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanOutcome {
    pub hit: Option<TriggerHit>,
    /// Rooms whose cycle selector reported the contradiction case this tick.
    pub contradictions: Vec<RoomId>,
}

/// Evaluates every room against the player position, updating discovery and
/// hold flags, and resolves at most one event.
pub fn scan(state: &mut SessionState) -> ScanOutcome {
    let player = state.player.position;
    let mut outcome = ScanOutcome::default();

    for (index, room) in state.rooms.iter_mut().enumerate() {
        let id = RoomId(index as u32);

        if room.contains(player) {
            room.is_discovered = true;

            if room.ignore_until_exit {
                continue;
            }

            match select_next_task(room) {
                CycleOutcome::Selected(task) => {
                    outcome.hit = Some(TriggerHit { room: id, task });
                    break;
                }
                CycleOutcome::NoPending => {}
                CycleOutcome::Contradiction => outcome.contradictions.push(id),
            }
        } else {
            // Leaving the radius re-arms a deferred room.
            room.ignore_until_exit = false;
        }
    }

    outcome
}
