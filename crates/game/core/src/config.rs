use crate::state::{Minutes, Position};

/// Session configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Per-frame displacement in mask-pixel units along each pressed axis.
    pub move_speed: f32,
    /// Movement ticks that make up one accrued time unit.
    pub move_ticks_per_time_unit: u32,
    /// Simulated minutes added per completed accrual interval.
    pub time_unit_minutes: Minutes,
    /// Ceiling on accumulated simulated time; reaching it finishes the
    /// session.
    pub max_time_minutes: Minutes,
    /// Movement ticks between trace samples.
    pub trace_sample_interval: u32,
    /// Maximum trajectory points relayed at session end; longer traces are
    /// subsampled.
    pub trace_relay_cap: usize,
    /// Player spawn point.
    pub spawn: Position,
}

impl SessionConfig {
    // ===== compile-time constants =====
    /// Maximum choices per task, including the reserved defer slot.
    pub const MAX_CHOICES: usize = 4;
    /// Choice index that resolves a task without completing it.
    pub const DEFER_CHOICE_INDEX: usize = 3;
    /// Per-axis tolerance for merging source rows into one room.
    pub const ROOM_MERGE_TOLERANCE: f32 = 5.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_SPEED: f32 = 2.0;
    pub const DEFAULT_MOVE_TICKS_PER_TIME_UNIT: u32 = 60;
    pub const DEFAULT_TIME_UNIT_MINUTES: Minutes = Minutes(1);
    pub const DEFAULT_MAX_TIME_MINUTES: Minutes = Minutes(480);
    pub const DEFAULT_TRACE_SAMPLE_INTERVAL: u32 = 10;
    pub const DEFAULT_TRACE_RELAY_CAP: usize = 2000;

    pub fn new() -> Self {
        Self {
            move_speed: Self::DEFAULT_MOVE_SPEED,
            move_ticks_per_time_unit: Self::DEFAULT_MOVE_TICKS_PER_TIME_UNIT,
            time_unit_minutes: Self::DEFAULT_TIME_UNIT_MINUTES,
            max_time_minutes: Self::DEFAULT_MAX_TIME_MINUTES,
            trace_sample_interval: Self::DEFAULT_TRACE_SAMPLE_INTERVAL,
            trace_relay_cap: Self::DEFAULT_TRACE_RELAY_CAP,
            spawn: Position::ORIGIN,
        }
    }

    pub fn with_max_time(max_time_minutes: Minutes) -> Self {
        Self {
            max_time_minutes,
            ..Self::new()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
