//! Engine-level session flow scenarios driven straight through the
//! three-phase action pipeline.

use game_content::CollisionMask;
use game_core::{
    Action, ActionResult, Choice, DialogState, Minutes, MoveInput, Position, Room, SessionConfig,
    SessionEngine, SessionEnv, SessionState, Task, TaskStatus,
};

struct Harness {
    state: SessionState,
    mask: CollisionMask,
    config: SessionConfig,
}

impl Harness {
    fn new(rooms: Vec<Room>, spawn: Position, config: SessionConfig) -> Self {
        Self {
            state: SessionState::new(rooms, spawn),
            mask: CollisionMask::from_fn(200, 200, |_, _| false),
            config,
        }
    }

    fn execute(&mut self, action: Action) -> ActionResult {
        let env: SessionEnv<'_> = SessionEnv::with_all(&self.mask, &self.config);
        let mut engine = SessionEngine::new(&mut self.state);
        engine.execute(&env, &action).expect("action accepted")
    }

    fn idle_frame(&mut self) -> game_core::FrameResult {
        match self.execute(Action::idle_frame()) {
            ActionResult::Frame(result) => result,
            other => panic!("expected frame result, got {other:?}"),
        }
    }

    fn choose(&mut self, choice: usize) -> game_core::ChoiceResult {
        match self.execute(Action::choose(choice)) {
            ActionResult::Choose(result) => result,
            other => panic!("expected choose result, got {other:?}"),
        }
    }

    fn defer(&mut self) -> game_core::DeferResult {
        match self.execute(Action::defer()) {
            ActionResult::Defer(result) => result,
            other => panic!("expected defer result, got {other:?}"),
        }
    }

    fn confirm(&mut self) -> game_core::ConfirmResult {
        match self.execute(Action::confirm()) {
            ActionResult::Confirm(result) => result,
            other => panic!("expected confirm result, got {other:?}"),
        }
    }

    fn teleport(&mut self, position: Position) {
        self.state.player.position = position;
    }

    fn assert_pointers_in_bounds(&self) {
        for room in &self.state.rooms {
            if !room.tasks.is_empty() {
                assert!(room.current_task_index < room.tasks.len());
            }
        }
    }
}

fn task_with_choices(name: &str, order: u32, times: &[u32]) -> Task {
    let mut task = Task::new(name, format!("{name} description"), Some(order));
    for (i, &time) in times.iter().enumerate() {
        task.choices.push(Choice::new(
            format!("choice-{i}"),
            format!("result-{i}"),
            Minutes(time),
        ));
    }
    task
}

fn two_task_room() -> Room {
    let mut room = Room::new("ward", Position::new(100.0, 100.0), 20.0);
    room.tasks.push(task_with_choices("rounds", 1, &[5, 10]));
    room.tasks.push(task_with_choices("charting", 2, &[3]));
    room
}

const OUTSIDE: Position = Position { x: 10.0, y: 10.0 };
const INSIDE: Position = Position { x: 100.0, y: 100.0 };

#[test]
fn ordered_tasks_fire_in_sequence_across_visits() {
    let mut harness = Harness::new(vec![two_task_room()], INSIDE, SessionConfig::default());

    // Entering the radius fires the order-1 task.
    let frame = harness.idle_frame();
    let hit = frame.opened.expect("task fires");
    assert_eq!(hit.task, 0);
    assert_eq!(
        harness.state.rooms[0].tasks[0].name,
        "rounds",
        "order-1 task presented first"
    );

    // Choosing with time=5 accrues exactly 5 minutes and completes the task.
    let outcome = harness.choose(0);
    assert_eq!(outcome.time_cost, Minutes(5));
    assert_eq!(harness.state.clock.accumulated, Minutes(5));
    assert!(outcome.completed);
    assert_eq!(harness.state.rooms[0].tasks[0].status, TaskStatus::Completed);

    let confirm = harness.confirm();
    assert!(!confirm.finished);
    assert_eq!(harness.state.rooms[0].current_task_index, 1);
    harness.assert_pointers_in_bounds();

    // Leave and re-enter: the order-2 task fires.
    harness.teleport(OUTSIDE);
    assert!(harness.idle_frame().opened.is_none());
    harness.teleport(INSIDE);
    let hit = harness.idle_frame().opened.expect("second task fires");
    assert_eq!(hit.task, 1);
}

#[test]
fn defer_holds_the_room_until_exit_and_reentry() {
    let mut room = Room::new("ward", Position::new(100.0, 100.0), 20.0);
    room.tasks.push(task_with_choices("rounds", 1, &[5]));
    let mut harness = Harness::new(vec![room], INSIDE, SessionConfig::default());

    assert!(harness.idle_frame().opened.is_some());
    harness.defer();
    assert!(harness.state.rooms[0].ignore_until_exit);
    assert_eq!(harness.state.rooms[0].tasks[0].status, TaskStatus::Pending);
    assert_eq!(harness.state.rooms[0].current_task_index, 0);

    // Continued presence yields no popup.
    for _ in 0..20 {
        assert!(harness.idle_frame().opened.is_none());
    }

    // Exit clears the hold; re-entry fires the same task again.
    harness.teleport(OUTSIDE);
    harness.idle_frame();
    assert!(!harness.state.rooms[0].ignore_until_exit);
    harness.teleport(INSIDE);
    let hit = harness.idle_frame().opened.expect("re-entry fires");
    assert_eq!(hit.task, 0);
}

#[test]
fn fourth_choice_leaves_task_pending_and_wraps_back() {
    let mut room = Room::new("ward", Position::new(100.0, 100.0), 20.0);
    room.tasks.push(task_with_choices("rounds", 1, &[5, 5, 5, 2]));
    room.tasks.push(task_with_choices("charting", 2, &[3]));
    let mut harness = Harness::new(vec![room], INSIDE, SessionConfig::default());

    harness.idle_frame();
    let outcome = harness.choose(SessionConfig::DEFER_CHOICE_INDEX);
    assert!(!outcome.completed);
    assert_eq!(harness.state.rooms[0].tasks[0].status, TaskStatus::Pending);
    // The reserved choice still costs its time.
    assert_eq!(harness.state.clock.accumulated, Minutes(2));

    // Pointer advances past the re-deferred task on confirm.
    harness.confirm();
    assert_eq!(harness.state.rooms[0].current_task_index, 1);

    // Next visit scans from the pointer: task 2 first.
    harness.teleport(OUTSIDE);
    harness.idle_frame();
    harness.teleport(INSIDE);
    let hit = harness.idle_frame().opened.expect("task 2 fires");
    assert_eq!(hit.task, 1);
    harness.choose(0);
    harness.confirm();

    // With task 2 completed the circular scan wraps back to the still
    // pending task 1.
    harness.teleport(OUTSIDE);
    harness.idle_frame();
    harness.teleport(INSIDE);
    let hit = harness.idle_frame().opened.expect("wraps to task 1");
    assert_eq!(hit.task, 0);
}

#[test]
fn fully_resolved_room_is_silent_but_discovered() {
    let mut room = Room::new("ward", Position::new(100.0, 100.0), 20.0);
    room.tasks.push(task_with_choices("rounds", 1, &[5]));
    let mut harness = Harness::new(vec![room], INSIDE, SessionConfig::default());

    harness.idle_frame();
    harness.choose(0);
    harness.confirm();

    harness.teleport(OUTSIDE);
    harness.idle_frame();
    harness.teleport(INSIDE);
    assert!(harness.idle_frame().opened.is_none());
    assert!(harness.state.rooms[0].is_discovered);
}

#[test]
fn limit_reached_at_confirm_finishes_exactly_once() {
    let mut room = Room::new("ward", Position::new(100.0, 100.0), 20.0);
    room.tasks.push(task_with_choices("rounds", 1, &[10]));
    let config = SessionConfig::with_max_time(Minutes(10));
    let mut harness = Harness::new(vec![room], INSIDE, config);

    harness.idle_frame();
    let outcome = harness.choose(0);
    assert_eq!(outcome.elapsed, Minutes(10));
    // Not finished yet: the limit check happens on confirm-close.
    assert!(harness.state.is_running());

    let confirm = harness.confirm();
    assert!(confirm.finished);
    assert!(harness.state.is_finished());

    // Further ticks produce no state changes and no second finish.
    let before = harness.state.clone();
    for _ in 0..10 {
        let frame = harness.idle_frame();
        assert!(!frame.finished);
        assert!(frame.opened.is_none());
    }
    assert_eq!(harness.state.phase, before.phase);
    assert_eq!(harness.state.clock.accumulated, before.clock.accumulated);
    assert_eq!(harness.state.rooms, before.rooms);
}

#[test]
fn earlier_room_takes_precedence_with_overlapping_radii() {
    let mut first = Room::new("alpha", Position::new(100.0, 100.0), 30.0);
    let mut done = task_with_choices("done", 1, &[5]);
    done.status = TaskStatus::Completed;
    first.tasks.push(done);

    let mut second = Room::new("beta", Position::new(110.0, 100.0), 30.0);
    second.tasks.push(task_with_choices("fresh", 1, &[5]));

    let mut harness = Harness::new(vec![first, second], INSIDE, SessionConfig::default());

    // Room alpha has nothing pending, so beta's event fires.
    let hit = harness.idle_frame().opened.expect("beta fires");
    assert_eq!(hit.room.as_index(), 1);

    // Give alpha a pending task again: alpha now wins the overlap.
    harness.defer();
    harness.state.rooms[0].tasks[0].status = TaskStatus::Pending;
    harness.state.rooms[1].ignore_until_exit = false;
    let hit = harness.idle_frame().opened.expect("alpha fires");
    assert_eq!(hit.room.as_index(), 0);
}

#[test]
fn accumulated_time_never_decreases() {
    let mut room = two_task_room();
    room.tasks.push(task_with_choices("extra", 3, &[0, 7]));
    let mut config = SessionConfig::default();
    config.move_ticks_per_time_unit = 3;
    config.time_unit_minutes = Minutes(1);
    let mut harness = Harness::new(vec![room], OUTSIDE, config);

    let mut last = Minutes::ZERO;
    let mut check = |clock: Minutes, last: &mut Minutes| {
        assert!(clock >= *last);
        *last = clock;
    };

    for step in 0..60 {
        if harness.state.dialog.is_open() {
            if step % 2 == 0 {
                harness.choose(0);
            } else {
                harness.defer();
            }
        } else if harness.state.dialog.is_resolved() {
            harness.confirm();
        } else if step % 5 == 0 {
            harness.teleport(INSIDE);
            harness.idle_frame();
        } else if step % 5 == 1 {
            harness.teleport(OUTSIDE);
            harness.idle_frame();
        } else {
            harness.execute(Action::frame(MoveInput::new(1, 0)));
        }
        check(harness.state.clock.accumulated, &mut last);
        harness.assert_pointers_in_bounds();
    }
}

#[test]
fn movement_is_frozen_while_dialog_open() {
    let mut room = Room::new("ward", Position::new(100.0, 100.0), 20.0);
    room.tasks.push(task_with_choices("rounds", 1, &[5]));
    let mut harness = Harness::new(vec![room], INSIDE, SessionConfig::default());

    harness.idle_frame();
    assert!(harness.state.dialog.is_open());

    // A frame while the dialog is open is rejected by pre-validation.
    let env: SessionEnv<'_> = SessionEnv::with_all(&harness.mask, &harness.config);
    let mut engine = SessionEngine::new(&mut harness.state);
    let error = engine
        .execute(&env, &Action::frame(MoveInput::new(1, 0)))
        .expect_err("frame rejected while dialog open");
    assert_eq!(error.phase(), game_core::TransitionPhase::PreValidate);

    // Dialog state is untouched by the rejected action.
    assert!(harness.state.dialog.is_open());
    assert_eq!(
        harness.state.dialog,
        DialogState::Open {
            room: game_core::RoomId(0),
            task: 0
        }
    );
}
