//! Wire shapes for the spreadsheet-backed collector.
//!
//! The collector dispatches on the `type` field: `"trajectory"` and
//! `"image"` are special-cased, anything else lands in the interaction log
//! sheet. Field names follow the collector's column mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recorder::{InteractionEntry, SessionMeta, TracePoint};

/// Timestamp format the collector stores verbatim.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// One message to the collector endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CollectorMessage {
    Log(LogPayload),
    Trajectory(TrajectoryPayload),
    Image(ImagePayload),
}

/// One resolved or deferred interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPayload {
    pub player_id: String,
    #[serde(rename = "sessionUUID")]
    pub session_uuid: Uuid,
    pub start_time: String,
    pub timestamp: String,
    /// Simulated elapsed minutes at record.
    pub elapsed_time: u32,
    /// Real-world decision latency in seconds.
    pub decision_time: Option<f64>,
    pub location: String,
    pub event: String,
    pub choice: String,
    pub result: String,
}

/// The batched movement trace sent at session end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPayload {
    pub player_id: String,
    #[serde(rename = "sessionUUID")]
    pub session_uuid: Uuid,
    pub start_time: String,
    pub history: Vec<TrajectoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub real_time: String,
    /// Simulated minutes at the sample.
    pub time: u32,
    pub x: f32,
    pub y: f32,
}

/// Optional rendered-frame snapshot, passed through as opaque base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub player_id: String,
    #[serde(rename = "sessionUUID")]
    pub session_uuid: Uuid,
    pub start_time: String,
    pub image: String,
}

impl CollectorMessage {
    pub fn log(entry: &InteractionEntry) -> Self {
        Self::Log(LogPayload {
            player_id: entry.player_id.clone(),
            session_uuid: entry.session_uuid,
            start_time: format_timestamp(entry.session_start),
            timestamp: format_timestamp(entry.recorded_at),
            elapsed_time: entry.elapsed.0,
            decision_time: entry.decision_seconds,
            location: entry.location.clone(),
            event: entry.event.clone(),
            choice: entry.choice.clone(),
            result: entry.result.clone(),
        })
    }

    pub fn trajectory(meta: &SessionMeta, trace: &[TracePoint]) -> Self {
        Self::Trajectory(TrajectoryPayload {
            player_id: meta.player_id.clone(),
            session_uuid: meta.session_uuid,
            start_time: format_timestamp(meta.started_at),
            history: trace
                .iter()
                .map(|point| TrajectoryPoint {
                    real_time: format_timestamp(point.real_time),
                    time: point.sim_time.0,
                    x: point.x,
                    y: point.y,
                })
                .collect(),
        })
    }

    pub fn image(meta: &SessionMeta, base64_image: impl Into<String>) -> Self {
        Self::Image(ImagePayload {
            player_id: meta.player_id.clone(),
            session_uuid: meta.session_uuid,
            start_time: format_timestamp(meta.started_at),
            image: base64_image.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Minutes;

    #[test]
    fn log_payload_uses_collector_field_names() {
        let entry = InteractionEntry {
            player_id: "p01".into(),
            session_uuid: Uuid::nil(),
            session_start: Utc::now(),
            recorded_at: Utc::now(),
            elapsed: Minutes(42),
            decision_seconds: Some(3.5),
            location: "ward".into(),
            event: "rounds".into(),
            choice: "assist".into(),
            result: "done".into(),
        };

        let value = serde_json::to_value(CollectorMessage::log(&entry)).unwrap();
        assert_eq!(value["type"], "log");
        assert_eq!(value["playerId"], "p01");
        assert_eq!(value["sessionUUID"], Uuid::nil().to_string());
        assert_eq!(value["elapsedTime"], 42);
        assert_eq!(value["decisionTime"], 3.5);
        assert_eq!(value["location"], "ward");
    }

    #[test]
    fn trajectory_payload_nests_history_points() {
        let meta = SessionMeta::new("p02");
        let trace = vec![TracePoint {
            x: 1.5,
            y: 2.5,
            sim_time: Minutes(7),
            real_time: Utc::now(),
        }];

        let value = serde_json::to_value(CollectorMessage::trajectory(&meta, &trace)).unwrap();
        assert_eq!(value["type"], "trajectory");
        assert_eq!(value["history"][0]["time"], 7);
        assert_eq!(value["history"][0]["x"], 1.5);
    }
}
