//! Deterministic session logic and data types shared across clients.
//!
//! `game-core` defines the canonical rules (actions, engine, session state)
//! and exposes pure APIs that can be reused by both the runtime and offline
//! tools. All state mutation flows through [`engine::SessionEngine`], and
//! supporting crates depend on the types re-exported here.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod rules;
pub mod state;

pub use action::{
    Action, ActionResult, ActionTransition, ChooseAction, ChooseError, ChoiceResult, ConfirmAction,
    ConfirmError, ConfirmResult, DeferAction, DeferError, DeferResult, FrameAction, FrameError,
    FrameResult, MoveInput,
};
pub use config::SessionConfig;
pub use engine::{ExecuteError, SessionEngine, TransitionPhase, TransitionPhaseError};
pub use env::{ConfigOracle, Env, MapOracle, MaskDimensions, OracleError, SessionEnv};
pub use rules::{CycleOutcome, ScanOutcome, TriggerHit};
pub use state::{
    Choice, ChoiceList, ClockState, DialogState, Minutes, PlayerState, Position, Room, RoomId,
    SessionPhase, SessionState, Task, TaskStatus,
};
