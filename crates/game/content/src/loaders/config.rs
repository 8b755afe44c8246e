//! Session configuration loader.

use std::path::Path;

use game_core::SessionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for session configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys fall back to the
    /// compiled-in defaults.
    pub fn load(path: &Path) -> LoadResult<SessionConfig> {
        let content = read_file(path)?;
        let config: SessionConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Minutes, Position};

    #[test]
    fn parses_full_config() {
        let config: SessionConfig = toml::from_str(
            r#"
move_speed = 3.5
move_ticks_per_time_unit = 30
time_unit_minutes = 2
max_time_minutes = 120
trace_sample_interval = 5
trace_relay_cap = 500
spawn = { x = 12.0, y = 34.0 }
"#,
        )
        .unwrap();

        assert_eq!(config.move_speed, 3.5);
        assert_eq!(config.max_time_minutes, Minutes(120));
        assert_eq!(config.spawn, Position::new(12.0, 34.0));
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config: SessionConfig = toml::from_str("max_time_minutes = 60\n").unwrap();
        assert_eq!(config.max_time_minutes, Minutes(60));
        assert_eq!(config.move_speed, SessionConfig::DEFAULT_MOVE_SPEED);
        assert_eq!(
            config.trace_relay_cap,
            SessionConfig::DEFAULT_TRACE_RELAY_CAP
        );
    }
}
