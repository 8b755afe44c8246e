use crate::action::ActionTransition;
use crate::env::SessionEnv;
use crate::rules;
use crate::rules::TriggerHit;
use crate::state::{DialogState, Minutes, Position, RoomId, SessionState};

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameError {
    #[error("frame advanced while the dialog is open")]
    DialogOpen,

    #[error("map oracle not available")]
    MissingMap,

    #[error("config oracle not available")]
    MissingConfig,

    #[error("player ended the frame inside a wall at {x:.1}, {y:.1}")]
    PlayerInsideWall { x: f32, y: f32 },
}

/// Per-frame 8-way movement intent. Components are clamped to -1..=1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveInput {
    pub dx: i8,
    pub dy: i8,
}

impl MoveInput {
    pub const IDLE: Self = Self { dx: 0, dy: 0 };

    pub fn new(dx: i8, dy: i8) -> Self {
        Self {
            dx: dx.clamp(-1, 1),
            dy: dy.clamp(-1, 1),
        }
    }

    #[inline]
    pub fn is_idle(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// One tick of the game-update step.
///
/// Movement and collision run first, then clock accrual, then the limit
/// check, and only then trigger detection; a popup can therefore never open
/// in a tick that ran out the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameAction {
    pub input: MoveInput,
}

impl FrameAction {
    pub fn new(input: MoveInput) -> Self {
        Self { input }
    }

    pub fn idle() -> Self {
        Self {
            input: MoveInput::IDLE,
        }
    }
}

/// What one frame did to the session.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameResult {
    /// Player position after the frame.
    pub position: Position,
    pub moved: bool,
    /// Minutes accrued by the movement pathway this frame.
    pub minutes_accrued: Minutes,
    /// Whether this frame landed on the trace sampling cadence.
    pub trace_sampled: bool,
    /// Dialog opened by the trigger scan, if any.
    pub opened: Option<TriggerHit>,
    /// True when this frame moved the session to the finished phase.
    pub finished: bool,
    /// Rooms whose selector reported the contradiction case.
    pub contradictions: Vec<RoomId>,
}

impl ActionTransition for FrameAction {
    type Error = FrameError;
    type Result = FrameResult;

    fn pre_validate(&self, state: &SessionState, _env: &SessionEnv<'_>) -> Result<(), FrameError> {
        if !state.dialog.is_idle() {
            return Err(FrameError::DialogOpen);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut SessionState,
        env: &SessionEnv<'_>,
    ) -> Result<FrameResult, FrameError> {
        let config = env.config().map_err(|_| FrameError::MissingConfig)?;

        let mut result = FrameResult {
            position: state.player.position,
            ..FrameResult::default()
        };

        // A finished session ignores every further tick.
        if state.is_finished() {
            return Ok(result);
        }

        if !self.input.is_idle() {
            let map = env.map().map_err(|_| FrameError::MissingMap)?;
            let speed = config.move_speed();
            let origin = state.player.position;
            let mut next = origin;

            // Each axis resolves independently against the mask, so sliding
            // along a wall works.
            if self.input.dx != 0 {
                let candidate = Position::new(next.x + f32::from(self.input.dx) * speed, next.y);
                if !map.blocks(candidate) {
                    next = candidate;
                }
            }
            if self.input.dy != 0 {
                let candidate = Position::new(next.x, next.y + f32::from(self.input.dy) * speed);
                if !map.blocks(candidate) {
                    next = candidate;
                }
            }

            if next != origin {
                state.player.position = next;
                result.position = next;
                result.moved = true;

                if let Some(minutes) = state.clock.record_move_tick(
                    config.move_ticks_per_time_unit(),
                    config.time_unit_minutes(),
                ) {
                    result.minutes_accrued = minutes;
                }

                let interval = config.trace_sample_interval();
                result.trace_sampled = interval > 0 && state.clock.move_ticks % interval == 0;
            }
        }

        if state.clock.has_reached(config.max_time_minutes()) {
            result.finished = state.finish();
            return Ok(result);
        }

        let scan = rules::trigger::scan(state);
        result.contradictions = scan.contradictions;
        if let Some(hit) = scan.hit {
            state.dialog = DialogState::Open {
                room: hit.room,
                task: hit.task,
            };
            result.opened = Some(hit);
        }

        Ok(result)
    }

    fn post_validate(&self, state: &SessionState, env: &SessionEnv<'_>) -> Result<(), FrameError> {
        if let Ok(map) = env.map() {
            let position = state.player.position;
            if map.blocks(position) {
                return Err(FrameError::PlayerInsideWall {
                    x: position.x,
                    y: position.y,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::env::{Env, MapOracle, MaskDimensions};
    use crate::state::{Choice, Room, Task};

    /// 100x100 field whose right half (x >= 50) is solid wall.
    struct WalledField;

    impl MapOracle for WalledField {
        fn dimensions(&self) -> MaskDimensions {
            MaskDimensions::new(100, 100)
        }

        fn is_wall(&self, x: i32, _y: i32) -> bool {
            x >= 50
        }
    }

    fn env<'a>(map: &'a WalledField, config: &'a SessionConfig) -> SessionEnv<'a> {
        Env::with_all(map, config).as_session_env()
    }

    fn exec(state: &mut SessionState, env: &SessionEnv<'_>, input: MoveInput) -> FrameResult {
        let action = FrameAction::new(input);
        action.pre_validate(state, env).unwrap();
        let result = action.apply(state, env).unwrap();
        action.post_validate(state, env).unwrap();
        result
    }

    #[test]
    fn movement_applies_speed_per_axis() {
        let map = WalledField;
        let config = SessionConfig::default();
        let mut state = SessionState::new(Vec::new(), Position::new(10.0, 10.0));

        let result = exec(&mut state, &env(&map, &config), MoveInput::new(1, -1));
        assert!(result.moved);
        assert_eq!(state.player.position, Position::new(12.0, 8.0));
    }

    #[test]
    fn wall_blocks_one_axis_and_slides_the_other() {
        let map = WalledField;
        let config = SessionConfig::default();
        let mut state = SessionState::new(Vec::new(), Position::new(49.0, 10.0));

        let result = exec(&mut state, &env(&map, &config), MoveInput::new(1, 1));
        assert!(result.moved);
        // x blocked by the wall column, y free.
        assert_eq!(state.player.position, Position::new(49.0, 12.0));
    }

    #[test]
    fn idle_frame_accrues_no_time() {
        let map = WalledField;
        let config = SessionConfig::default();
        let mut state = SessionState::new(Vec::new(), Position::new(10.0, 10.0));

        for _ in 0..500 {
            exec(&mut state, &env(&map, &config), MoveInput::IDLE);
        }
        assert_eq!(state.clock.accumulated, Minutes::ZERO);
        assert_eq!(state.clock.move_ticks, 0);
    }

    #[test]
    fn movement_ticks_feed_the_clock() {
        let map = WalledField;
        let mut config = SessionConfig::default();
        config.move_ticks_per_time_unit = 5;
        config.move_speed = 0.1;
        let mut state = SessionState::new(Vec::new(), Position::new(10.0, 10.0));

        for _ in 0..10 {
            exec(&mut state, &env(&map, &config), MoveInput::new(1, 0));
        }
        assert_eq!(state.clock.accumulated, Minutes(2));
    }

    #[test]
    fn reaching_the_limit_finishes_exactly_once_and_skips_triggers() {
        let map = WalledField;
        let mut config = SessionConfig::default();
        config.move_ticks_per_time_unit = 1;
        config.time_unit_minutes = Minutes(10);
        config.max_time_minutes = Minutes(10);
        config.move_speed = 0.1;

        let mut room = Room::new("near", Position::new(10.0, 10.0), 50.0);
        let mut task = Task::new("t", "d", Some(1));
        task.choices.push(Choice::new("c", "r", Minutes(1)));
        room.tasks.push(task);

        let mut state = SessionState::new(vec![room], Position::new(10.0, 10.0));

        let first = exec(&mut state, &env(&map, &config), MoveInput::new(1, 0));
        assert!(first.finished);
        assert!(first.opened.is_none());
        assert!(state.is_finished());

        // Further ticks are inert.
        let second = exec(&mut state, &env(&map, &config), MoveInput::new(1, 0));
        assert!(!second.finished);
        assert!(!second.moved);
        assert_eq!(state.clock.accumulated, Minutes(10));
    }

    #[test]
    fn trigger_scan_opens_the_dialog() {
        let map = WalledField;
        let config = SessionConfig::default();

        let mut room = Room::new("ward", Position::new(12.0, 10.0), 8.0);
        let mut task = Task::new("t", "d", Some(1));
        task.choices.push(Choice::new("c", "r", Minutes(1)));
        room.tasks.push(task);

        let mut state = SessionState::new(vec![room], Position::new(10.0, 10.0));
        let result = exec(&mut state, &env(&map, &config), MoveInput::IDLE);

        assert!(result.opened.is_some());
        assert!(state.dialog.is_open());
    }

    #[test]
    fn frame_is_rejected_while_dialog_open() {
        let map = WalledField;
        let config = SessionConfig::default();
        let mut state = SessionState::new(Vec::new(), Position::new(10.0, 10.0));
        state.dialog = DialogState::Open {
            room: RoomId(0),
            task: 0,
        };

        let action = FrameAction::idle();
        assert_eq!(
            action.pre_validate(&state, &env(&map, &config)),
            Err(FrameError::DialogOpen)
        );
    }
}
