use crate::config::SessionConfig;
use crate::state::{Minutes, Position};

/// Read-only access to tunable session parameters.
pub trait ConfigOracle: Send + Sync {
    fn move_speed(&self) -> f32;
    fn move_ticks_per_time_unit(&self) -> u32;
    fn time_unit_minutes(&self) -> Minutes;
    fn max_time_minutes(&self) -> Minutes;
    fn trace_sample_interval(&self) -> u32;
    fn trace_relay_cap(&self) -> usize;
    fn spawn(&self) -> Position;
}

/// The config struct is its own oracle; loaders hand it straight to the
/// runtime.
impl ConfigOracle for SessionConfig {
    fn move_speed(&self) -> f32 {
        self.move_speed
    }

    fn move_ticks_per_time_unit(&self) -> u32 {
        self.move_ticks_per_time_unit
    }

    fn time_unit_minutes(&self) -> Minutes {
        self.time_unit_minutes
    }

    fn max_time_minutes(&self) -> Minutes {
        self.max_time_minutes
    }

    fn trace_sample_interval(&self) -> u32 {
        self.trace_sample_interval
    }

    fn trace_relay_cap(&self) -> usize {
        self.trace_relay_cap
    }

    fn spawn(&self) -> Position {
        self.spawn
    }
}
