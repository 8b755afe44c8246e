//! Task cycle selection.
//!
//! A room presents its tasks in a fixed author-defined sequence. The cycle
//! pointer remembers where the player left off; selection skips completed
//! tasks and wraps circularly so earlier tasks come back around without
//! re-scanning from zero on every visit.

use crate::state::Room;

/// Outcome of running the cycle selector against one room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CycleOutcome {
    /// A pending task was found; the cycle pointer has snapped to its index.
    Selected(usize),
    /// Every task in the room is resolved; no event fires.
    NoPending,
    /// Pending count was positive but the circular scan found nothing.
    ///
    /// Unreachable while status reads and the scan happen on one thread; kept
    /// explicit so callers log it instead of guessing a recovery.
    Contradiction,
}

/// Finds the next pending task for a triggered, non-held room.
///
/// Normalizes an out-of-range pointer to 0 first (the wraparound rule), then
/// scans up to `tasks.len()` consecutive indices circularly from the pointer.
/// The pointer snaps to the selected index rather than merely advancing.
pub fn select_next_task(room: &mut Room) -> CycleOutcome {
    if room.pending_count() == 0 {
        return CycleOutcome::NoPending;
    }

    room.normalize_pointer();

    let len = room.tasks.len();
    for offset in 0..len {
        let index = (room.current_task_index + offset) % len;
        if room.tasks[index].is_pending() {
            room.current_task_index = index;
            return CycleOutcome::Selected(index);
        }
    }

    debug_assert!(false, "pending count positive but circular scan found none");
    CycleOutcome::Contradiction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Position, Task, TaskStatus};

    fn room_with_statuses(statuses: &[TaskStatus]) -> Room {
        let mut room = Room::new("lab", Position::new(10.0, 10.0), 5.0);
        for (i, status) in statuses.iter().enumerate() {
            let mut task = Task::new(format!("task-{i}"), "", Some(i as u32 + 1));
            task.status = *status;
            room.tasks.push(task);
        }
        room
    }

    #[test]
    fn selects_first_pending_from_pointer() {
        use TaskStatus::*;
        let mut room = room_with_statuses(&[Completed, Pending, Pending]);
        room.current_task_index = 1;

        assert_eq!(select_next_task(&mut room), CycleOutcome::Selected(1));
        assert_eq!(room.current_task_index, 1);
    }

    #[test]
    fn skips_completed_and_wraps_circularly() {
        use TaskStatus::*;
        let mut room = room_with_statuses(&[Pending, Completed, Completed]);
        room.current_task_index = 1;

        assert_eq!(select_next_task(&mut room), CycleOutcome::Selected(0));
        assert_eq!(room.current_task_index, 0);
    }

    #[test]
    fn out_of_range_pointer_resets_to_zero() {
        use TaskStatus::*;
        let mut room = room_with_statuses(&[Pending, Pending]);
        room.current_task_index = 2;

        assert_eq!(select_next_task(&mut room), CycleOutcome::Selected(0));
    }

    #[test]
    fn fully_resolved_room_yields_nothing() {
        use TaskStatus::*;
        let mut room = room_with_statuses(&[Completed, Completed]);

        assert_eq!(select_next_task(&mut room), CycleOutcome::NoPending);
        assert!(room.current_task_index < room.tasks.len());
    }

    #[test]
    fn empty_room_yields_nothing() {
        let mut room = room_with_statuses(&[]);
        assert_eq!(select_next_task(&mut room), CycleOutcome::NoPending);
    }

    #[test]
    fn pointer_stays_in_bounds_after_selection() {
        use TaskStatus::*;
        let mut room = room_with_statuses(&[Completed, Pending, Completed]);
        room.current_task_index = 5;

        select_next_task(&mut room);
        assert!(room.current_task_index < room.tasks.len());
    }
}
