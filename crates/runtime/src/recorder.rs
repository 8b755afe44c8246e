//! Log and trace recording.
//!
//! The engine stays pure, so everything wall-clock flavored happens here:
//! the recorder stamps engine outcomes with real timestamps, per-decision
//! latency, and session identifiers, producing the immutable records that
//! feed the relay and the local repository.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use game_core::{ChoiceResult, DeferResult, Minutes, Position};

/// Identity of one session run, fixed at start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMeta {
    pub player_id: String,
    pub session_uuid: Uuid,
    pub started_at: DateTime<Utc>,
}

impl SessionMeta {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            session_uuid: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}

/// Immutable record of one resolved or deferred interaction.
///
/// Created on every resolution or hold action; never mutated; appended to
/// the ordered session log and relayed immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEntry {
    pub player_id: String,
    pub session_uuid: Uuid,
    pub session_start: DateTime<Utc>,
    pub recorded_at: DateTime<Utc>,
    /// Simulated elapsed time at record.
    pub elapsed: Minutes,
    /// Real-world seconds between dialog open and the decision, when known.
    pub decision_seconds: Option<f64>,
    pub location: String,
    pub event: String,
    pub choice: String,
    pub result: String,
}

/// One sampled point of the movement trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub x: f32,
    pub y: f32,
    pub sim_time: Minutes,
    pub real_time: DateTime<Utc>,
}

/// Accumulates session telemetry: interaction entries and the movement
/// trace. Both are append-only.
pub struct SessionRecorder {
    meta: SessionMeta,
    entries: Vec<InteractionEntry>,
    trace: Vec<TracePoint>,
    dialog_opened_at: Option<Instant>,
}

impl SessionRecorder {
    pub fn new(meta: SessionMeta) -> Self {
        Self {
            meta,
            entries: Vec::new(),
            trace: Vec::new(),
            dialog_opened_at: None,
        }
    }

    pub fn meta(&self) -> &SessionMeta {
        &self.meta
    }

    pub fn entries(&self) -> &[InteractionEntry] {
        &self.entries
    }

    pub fn trace(&self) -> &[TracePoint] {
        &self.trace
    }

    /// Marks the moment a dialog opened, starting the decision-latency
    /// stopwatch.
    pub fn note_dialog_opened(&mut self) {
        self.dialog_opened_at = Some(Instant::now());
    }

    fn take_decision_seconds(&mut self) -> Option<f64> {
        self.dialog_opened_at
            .take()
            .map(|opened| opened.elapsed().as_secs_f64())
    }

    /// Records a resolved choice and returns the appended entry.
    pub fn record_choice(&mut self, outcome: &ChoiceResult) -> InteractionEntry {
        let entry = InteractionEntry {
            player_id: self.meta.player_id.clone(),
            session_uuid: self.meta.session_uuid,
            session_start: self.meta.started_at,
            recorded_at: Utc::now(),
            elapsed: outcome.elapsed,
            decision_seconds: self.take_decision_seconds(),
            location: outcome.room_name.clone(),
            event: outcome.task_name.clone(),
            choice: outcome.choice_text.clone(),
            result: outcome.result_text.clone(),
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Records a room-level hold and returns the appended entry.
    pub fn record_defer(&mut self, outcome: &DeferResult) -> InteractionEntry {
        let entry = InteractionEntry {
            player_id: self.meta.player_id.clone(),
            session_uuid: self.meta.session_uuid,
            session_start: self.meta.started_at,
            recorded_at: Utc::now(),
            elapsed: outcome.elapsed,
            decision_seconds: self.take_decision_seconds(),
            location: outcome.room_name.clone(),
            event: outcome.task_name.clone(),
            choice: "deferred".to_string(),
            result: String::new(),
        };
        self.entries.push(entry.clone());
        entry
    }

    /// Appends one movement trace sample.
    pub fn record_trace(&mut self, position: Position, sim_time: Minutes) -> TracePoint {
        let point = TracePoint {
            x: position.x,
            y: position.y,
            sim_time,
            real_time: Utc::now(),
        };
        self.trace.push(point);
        point
    }

    /// Returns the trace for relay, subsampled by stride when it exceeds
    /// the cap. The first and last points always survive.
    pub fn trajectory_for_relay(&self, cap: usize) -> Vec<TracePoint> {
        subsample(&self.trace, cap)
    }
}

fn subsample(trace: &[TracePoint], cap: usize) -> Vec<TracePoint> {
    if cap == 0 || trace.len() <= cap {
        return trace.to_vec();
    }

    let stride = trace.len().div_ceil(cap);
    let mut sampled: Vec<TracePoint> = trace.iter().step_by(stride).copied().collect();

    if let (Some(last_sampled), Some(last)) = (sampled.last(), trace.last())
        && last_sampled != last
    {
        sampled.push(*last);
    }
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(i: usize) -> TracePoint {
        TracePoint {
            x: i as f32,
            y: 0.0,
            sim_time: Minutes(i as u32),
            real_time: Utc::now(),
        }
    }

    #[test]
    fn short_traces_pass_through() {
        let trace: Vec<_> = (0..10).map(point).collect();
        assert_eq!(subsample(&trace, 10).len(), 10);
    }

    #[test]
    fn long_traces_subsample_keeping_endpoints() {
        let trace: Vec<_> = (0..100).map(point).collect();
        let sampled = subsample(&trace, 10);
        assert!(sampled.len() <= 11);
        assert_eq!(sampled.first(), trace.first());
        assert_eq!(sampled.last(), trace.last());
    }

    #[test]
    fn recorder_appends_in_order() {
        let mut recorder = SessionRecorder::new(SessionMeta::new("p01"));
        recorder.record_trace(Position::new(1.0, 2.0), Minutes(0));
        recorder.record_trace(Position::new(3.0, 4.0), Minutes(1));
        assert_eq!(recorder.trace().len(), 2);
        assert_eq!(recorder.trace()[0].x, 1.0);
        assert_eq!(recorder.trace()[1].sim_time, Minutes(1));
    }
}
