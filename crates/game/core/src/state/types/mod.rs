mod clock;
mod common;
mod dialog;
mod room;

pub use clock::ClockState;
pub use common::{Minutes, PlayerState, Position, RoomId};
pub use dialog::{DialogState, SessionPhase};
pub use room::{Choice, ChoiceList, Room, Task, TaskStatus};
