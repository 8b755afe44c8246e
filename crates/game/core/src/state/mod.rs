//! Authoritative session state representation.
//!
//! This module owns the data structures that describe the player, rooms,
//! clock, and popup lifecycle. Runtime layers clone or query this state but
//! mutate it exclusively through the engine.
pub mod types;

pub use types::{
    Choice, ChoiceList, ClockState, DialogState, Minutes, PlayerState, Position, Room, RoomId,
    SessionPhase, Task, TaskStatus,
};

/// Canonical snapshot of the deterministic session state.
///
/// This is the explicit session context object: it is created at session
/// start, owned by the runtime worker, and torn down at session end. No
/// subsystem holds state outside of it.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub phase: SessionPhase,
    pub clock: ClockState,
    pub player: PlayerState,
    /// Rooms in stable source order; earlier rooms take precedence when
    /// trigger radii overlap.
    pub rooms: Vec<Room>,
    pub dialog: DialogState,
}

impl SessionState {
    /// Creates a fresh running session with the given rooms and spawn point.
    pub fn new(rooms: Vec<Room>, spawn: Position) -> Self {
        Self {
            phase: SessionPhase::Running,
            clock: ClockState::new(),
            player: PlayerState::at(spawn),
            rooms,
            dialog: DialogState::Idle,
        }
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.as_index())
    }

    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id.as_index())
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    /// Moves the session to the terminal phase. Idempotent: returns true only
    /// on the transition that actually finished the session.
    pub fn finish(&mut self) -> bool {
        if self.phase == SessionPhase::Finished {
            return false;
        }
        self.phase = SessionPhase::Finished;
        true
    }

    /// Count of rooms the player has discovered so far.
    pub fn discovered_count(&self) -> usize {
        self.rooms.iter().filter(|room| room.is_discovered).count()
    }
}
