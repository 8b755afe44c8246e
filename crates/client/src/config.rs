//! Client configuration sourced from environment variables.

use std::path::PathBuf;

/// Environment-driven configuration for the client binary.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Directory holding `config.toml`, `tasks.csv`, and `mask.png`.
    pub data_dir: PathBuf,
    /// Participant identifier stamped on every log entry.
    pub player_id: String,
    /// Collector endpoint; unset disables the relay.
    pub collector_url: Option<String>,
    /// Where local session logs land; defaults to the platform data dir.
    pub log_dir: PathBuf,
    /// RON session script to replay.
    pub script_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let data_dir = std::env::var("FIELDWALK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let player_id =
            std::env::var("FIELDWALK_PLAYER_ID").unwrap_or_else(|_| "anonymous".to_string());

        let collector_url = std::env::var("FIELDWALK_COLLECTOR_URL").ok();

        let log_dir = std::env::var("FIELDWALK_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_log_dir());

        let script_path = std::env::var("FIELDWALK_SCRIPT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("session.ron"));

        Self {
            data_dir,
            player_id,
            collector_url,
            log_dir,
            script_path,
        }
    }
}

fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "fieldwalk")
        .map(|dirs| dirs.data_dir().join("sessions"))
        .unwrap_or_else(|| PathBuf::from("sessions"))
}
