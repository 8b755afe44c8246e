//! Session worker that owns the authoritative [`game_core::SessionState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], executes actions via
//! [`game_core::SessionEngine`], and publishes events. Because the worker
//! processes one command at a time, movement and trigger evaluation never
//! interleave with dialog resolution, and only one room's event can ever be
//! active.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use game_core::{
    Action, ActionResult, ChoiceResult, ConfirmResult, DeferResult, FrameResult, MoveInput,
    SessionEngine, SessionState, TriggerHit,
};

use crate::api::{Result, RuntimeError};
use crate::events::{ChoicePrompt, Event, EventBus, SessionEvent, TelemetryEvent};
use crate::oracle::OracleManager;
use crate::recorder::SessionRecorder;
use crate::relay::{CollectorMessage, Relay};
use crate::repository::SessionLogRepository;
use crate::runtime::SessionSummary;

/// Commands that can be sent to the session worker
pub(crate) enum Command {
    /// Advance one frame: movement, clock accrual, trigger detection.
    AdvanceFrame {
        input: MoveInput,
        reply: oneshot::Sender<Result<FrameResult>>,
    },
    /// Resolve the open dialog with a choice.
    Choose {
        choice: usize,
        reply: oneshot::Sender<Result<ChoiceResult>>,
    },
    /// Hold the room and close the dialog.
    Defer {
        reply: oneshot::Sender<Result<DeferResult>>,
    },
    /// Acknowledge a resolved dialog.
    Confirm {
        reply: oneshot::Sender<Result<ConfirmResult>>,
    },
    /// Query the current session state (read-only).
    QueryState { reply: oneshot::Sender<SessionState> },
    /// End the session and flush the trajectory.
    Finish {
        reply: oneshot::Sender<SessionSummary>,
    },
}

/// Background task that processes session commands.
pub(crate) struct SessionWorker {
    state: SessionState,
    oracles: OracleManager,
    recorder: SessionRecorder,
    relay: Relay,
    repository: Box<dyn SessionLogRepository>,
    command_rx: mpsc::Receiver<Command>,
    bus: EventBus,
    finish_announced: bool,
}

impl SessionWorker {
    pub(crate) fn new(
        state: SessionState,
        oracles: OracleManager,
        recorder: SessionRecorder,
        relay: Relay,
        repository: Box<dyn SessionLogRepository>,
        command_rx: mpsc::Receiver<Command>,
        bus: EventBus,
    ) -> Self {
        Self {
            state,
            oracles,
            recorder,
            relay,
            repository,
            command_rx,
            bus,
            finish_announced: false,
        }
    }

    /// Main worker loop.
    pub(crate) async fn run(mut self) {
        info!(
            session = %self.recorder.meta().session_uuid,
            player = %self.recorder.meta().player_id,
            rooms = self.state.rooms.len(),
            "session worker started"
        );

        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }

        debug!("session worker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::AdvanceFrame { input, reply } => {
                let _ = reply.send(self.advance_frame(input));
            }
            Command::Choose { choice, reply } => {
                let _ = reply.send(self.choose(choice));
            }
            Command::Defer { reply } => {
                let _ = reply.send(self.defer());
            }
            Command::Confirm { reply } => {
                let _ = reply.send(self.confirm());
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
            Command::Finish { reply } => {
                self.state.finish();
                self.announce_finish();
                let _ = reply.send(self.summary());
            }
        }
    }

    /// Executes an action through the engine, publishing a rejection event
    /// on failure. A rejected action never halts the session loop.
    fn execute(&mut self, action: &Action) -> Result<ActionResult> {
        let env = self.oracles.as_session_env();
        let mut engine = SessionEngine::new(&mut self.state);

        match engine.execute(&env, action) {
            Ok(result) => Ok(result),
            Err(error) => {
                warn!(kind = action.kind(), %error, "action rejected");
                self.bus.publish(Event::Session(SessionEvent::ActionRejected {
                    kind: action.kind().to_string(),
                    phase: error.phase(),
                    message: error.to_string(),
                }));
                Err(RuntimeError::Execute(error))
            }
        }
    }

    fn advance_frame(&mut self, input: MoveInput) -> Result<FrameResult> {
        let ActionResult::Frame(result) = self.execute(&Action::frame(input))? else {
            return Err(RuntimeError::UnexpectedActionResult { kind: "frame" });
        };

        for room in &result.contradictions {
            // Pending count said yes but the circular scan found nothing.
            // Single-threaded execution makes this unreachable; log loudly
            // instead of guessing a recovery.
            warn!(room = %room, "cycle selector contradiction; no event fired");
        }

        if result.trace_sampled {
            let point = self
                .recorder
                .record_trace(result.position, self.state.clock.accumulated);
            self.bus
                .publish(Event::Telemetry(TelemetryEvent::Trace(point)));
        }

        if let Some(hit) = result.opened {
            self.recorder.note_dialog_opened();
            self.publish_dialog_opened(hit);
        }

        if result.finished {
            self.announce_finish();
        }

        Ok(result)
    }

    fn choose(&mut self, choice: usize) -> Result<ChoiceResult> {
        let ActionResult::Choose(result) = self.execute(&Action::choose(choice))? else {
            return Err(RuntimeError::UnexpectedActionResult { kind: "choose" });
        };

        let entry = self.recorder.record_choice(&result);
        if let Err(error) = self.repository.append(&entry) {
            warn!(%error, "failed to persist interaction entry");
        }
        self.relay.send(CollectorMessage::log(&entry));
        self.bus
            .publish(Event::Telemetry(TelemetryEvent::Interaction(entry)));
        self.bus
            .publish(Event::Session(SessionEvent::DialogResolved {
                room: result.room,
                result_text: result.result_text.clone(),
                time_cost: result.time_cost,
            }));

        Ok(result)
    }

    fn defer(&mut self) -> Result<DeferResult> {
        let ActionResult::Defer(result) = self.execute(&Action::defer())? else {
            return Err(RuntimeError::UnexpectedActionResult { kind: "defer" });
        };

        let entry = self.recorder.record_defer(&result);
        if let Err(error) = self.repository.append(&entry) {
            warn!(%error, "failed to persist interaction entry");
        }
        self.relay.send(CollectorMessage::log(&entry));
        self.bus
            .publish(Event::Telemetry(TelemetryEvent::Interaction(entry)));
        self.bus.publish(Event::Session(SessionEvent::DialogClosed {
            room: result.room,
        }));

        Ok(result)
    }

    fn confirm(&mut self) -> Result<ConfirmResult> {
        let ActionResult::Confirm(result) = self.execute(&Action::confirm())? else {
            return Err(RuntimeError::UnexpectedActionResult { kind: "confirm" });
        };

        self.bus.publish(Event::Session(SessionEvent::DialogClosed {
            room: result.room,
        }));

        if result.finished {
            self.announce_finish();
        }

        Ok(result)
    }

    fn publish_dialog_opened(&self, hit: TriggerHit) {
        let Some(room) = self.state.room(hit.room) else {
            return;
        };
        let Some(task) = room.task(hit.task) else {
            return;
        };

        self.bus.publish(Event::Session(SessionEvent::DialogOpened {
            room: hit.room,
            room_name: room.name.clone(),
            task_name: task.name.clone(),
            description: task.description.clone(),
            choices: task
                .choices
                .iter()
                .map(|choice| ChoicePrompt {
                    text: choice.text.clone(),
                    time: choice.time,
                })
                .collect(),
        }));
    }

    /// Publishes the finished event and flushes the trajectory, exactly once.
    fn announce_finish(&mut self) {
        if self.finish_announced {
            return;
        }
        self.finish_announced = true;

        let elapsed = self.state.clock.accumulated;
        info!(%elapsed, "session finished");
        self.bus
            .publish(Event::Session(SessionEvent::SessionFinished { elapsed }));

        let trace = self
            .recorder
            .trajectory_for_relay(self.oracles.config().trace_relay_cap);
        self.relay
            .send(CollectorMessage::trajectory(self.recorder.meta(), &trace));
    }

    fn summary(&self) -> SessionSummary {
        SessionSummary {
            player_id: self.recorder.meta().player_id.clone(),
            session_uuid: self.recorder.meta().session_uuid,
            elapsed: self.state.clock.accumulated,
            interactions: self.recorder.entries().len(),
            trace_points: self.recorder.trace().len(),
            discovered_rooms: self.state.discovered_count(),
        }
    }
}
