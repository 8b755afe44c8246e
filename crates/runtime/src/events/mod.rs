//! Topic-based event bus for flexible event routing.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ChoicePrompt, SessionEvent, TelemetryEvent};
