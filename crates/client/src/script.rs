//! RON session scripts.
//!
//! A script is the recorded command sequence of one session, replayable for
//! fixtures and pilot runs:
//!
//! ```ron
//! (
//!     commands: [
//!         Move((dx: 1, dy: 0)),
//!         Move((dx: 1, dy: 0)),
//!         Choose(0),
//!         Confirm,
//!         Quit,
//!     ],
//! )
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use runtime::{PlayerCommand, ScriptedProvider};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionScript {
    pub commands: Vec<PlayerCommand>,
}

impl SessionScript {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session script {}", path.display()))?;
        ron::from_str(&content)
            .with_context(|| format!("failed to parse session script {}", path.display()))
    }

    pub fn into_provider(self) -> ScriptedProvider {
        ScriptedProvider::new(self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_session_script() {
        let script: SessionScript = ron::from_str(
            "(commands: [Move((dx: 1, dy: 0)), Choose(0), Defer, Confirm, Quit])",
        )
        .unwrap();
        assert_eq!(script.commands.len(), 5);
        assert_eq!(script.commands[1], PlayerCommand::Choose(0));
    }
}
