use arrayvec::ArrayVec;

use crate::config::SessionConfig;
use crate::state::types::common::{Minutes, Position};

/// Resolution status of a task. Mutable only via choice resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

/// One selectable resolution of a task.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Choice {
    pub text: String,
    pub result: String,
    pub time: Minutes,
}

impl Choice {
    pub fn new(text: impl Into<String>, result: impl Into<String>, time: Minutes) -> Self {
        Self {
            text: text.into(),
            result: result.into(),
            time,
        }
    }
}

/// Fixed-capacity choice list; the reserved fourth slot is the
/// defer-within-event choice.
pub type ChoiceList = ArrayVec<Choice, { SessionConfig::MAX_CHOICES }>;

/// A single encounterable prompt within a room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub name: String,
    pub description: String,
    /// Author-defined intra-room sequence. Tasks are sorted by this at
    /// construction; ties and absent values keep source order.
    pub order: Option<u32>,
    pub choices: ChoiceList,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(name: impl Into<String>, description: impl Into<String>, order: Option<u32>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            order,
            choices: ChoiceList::new(),
            status: TaskStatus::Pending,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }
}

/// A named circular trigger zone with an ordered task list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub name: String,
    pub center: Position,
    pub radius: f32,
    pub tasks: Vec<Task>,
    /// Set the first time the player enters the trigger radius; never reset.
    pub is_discovered: bool,
    /// True only while the player stays inside the radius after deferring.
    pub ignore_until_exit: bool,
    /// Cycle pointer: where the next task scan begins.
    pub current_task_index: usize,
}

impl Room {
    pub fn new(name: impl Into<String>, center: Position, radius: f32) -> Self {
        Self {
            name: name.into(),
            center,
            radius,
            tasks: Vec::new(),
            is_discovered: false,
            ignore_until_exit: false,
            current_task_index: 0,
        }
    }

    /// Whether a position falls inside the trigger radius (strict).
    pub fn contains(&self, position: Position) -> bool {
        position.distance_to(self.center) < self.radius
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_pending()).count()
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn task_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }

    /// Clamps an out-of-range cycle pointer back to the start of the list.
    ///
    /// Required because advancing past the final task leaves the pointer at
    /// `tasks.len()` conceptually; the wraparound keeps it in bounds.
    pub fn normalize_pointer(&mut self) {
        if self.current_task_index >= self.tasks.len() {
            self.current_task_index = 0;
        }
    }

    /// Advances the cycle pointer by one, wrapping at the end of the list so
    /// the in-bounds invariant holds across ticks.
    pub fn advance_pointer(&mut self) {
        if self.tasks.is_empty() {
            self.current_task_index = 0;
            return;
        }
        self.current_task_index = (self.current_task_index + 1) % self.tasks.len();
    }

    /// Sorts tasks by their author-defined order, keeping source order for
    /// ties and unordered entries. Called once at construction time.
    pub fn sort_tasks(&mut self) {
        self.tasks.sort_by_key(|task| task.order.unwrap_or(u32::MAX));
    }
}
