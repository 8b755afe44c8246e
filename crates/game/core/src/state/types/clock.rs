use crate::state::types::common::Minutes;

/// Simulated-time accumulator gating session termination.
///
/// Two independent pathways feed `accumulated`: movement ticks (one fixed
/// unit per configured number of ticks while the player is actively moving)
/// and choice time costs (added atomically at resolution). The counter is
/// monotonically non-decreasing within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockState {
    pub accumulated: Minutes,
    /// Total movement ticks observed this session.
    pub move_ticks: u32,
    /// Sequence number of executed actions, incremented by the engine.
    pub sequence: u64,
}

impl ClockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a choice time cost.
    pub fn add(&mut self, cost: Minutes) {
        self.accumulated = self.accumulated.saturating_add(cost);
    }

    /// Records one movement tick and returns the minutes accrued by it, if
    /// the tick completed a full accrual interval.
    pub fn record_move_tick(&mut self, ticks_per_unit: u32, unit: Minutes) -> Option<Minutes> {
        self.move_ticks = self.move_ticks.saturating_add(1);
        if ticks_per_unit > 0 && self.move_ticks % ticks_per_unit == 0 {
            self.accumulated = self.accumulated.saturating_add(unit);
            Some(unit)
        } else {
            None
        }
    }

    /// Pure predicate against the configured ceiling.
    pub fn has_reached(&self, limit: Minutes) -> bool {
        self.accumulated >= limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_ticks_accrue_on_interval_boundaries() {
        let mut clock = ClockState::new();

        for _ in 0..9 {
            assert_eq!(clock.record_move_tick(10, Minutes(1)), None);
        }
        assert_eq!(clock.record_move_tick(10, Minutes(1)), Some(Minutes(1)));
        assert_eq!(clock.accumulated, Minutes(1));
        assert_eq!(clock.move_ticks, 10);

        for _ in 0..10 {
            clock.record_move_tick(10, Minutes(1));
        }
        assert_eq!(clock.accumulated, Minutes(2));
    }

    #[test]
    fn accumulated_time_is_monotone() {
        let mut clock = ClockState::new();
        let mut last = clock.accumulated;

        for tick in 0..100 {
            if tick % 3 == 0 {
                clock.add(Minutes(5));
            }
            clock.record_move_tick(4, Minutes(1));
            assert!(clock.accumulated >= last);
            last = clock.accumulated;
        }
    }

    #[test]
    fn limit_predicate_is_inclusive() {
        let mut clock = ClockState::new();
        clock.add(Minutes(480));
        assert!(clock.has_reached(Minutes(480)));
        assert!(!clock.has_reached(Minutes(481)));
    }
}
