//! Concrete oracle bundle handed to the engine each tick.

use game_content::CollisionMask;
use game_core::{SessionConfig, SessionEnv};

/// Owns the loaded oracles and lends them to the engine as a [`SessionEnv`].
pub struct OracleManager {
    mask: CollisionMask,
    config: SessionConfig,
}

impl OracleManager {
    pub fn new(mask: CollisionMask, config: SessionConfig) -> Self {
        Self { mask, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mask(&self) -> &CollisionMask {
        &self.mask
    }

    /// Borrows the oracles as a trait-object environment for the engine.
    pub fn as_session_env(&self) -> SessionEnv<'_> {
        SessionEnv::with_all(&self.mask, &self.config)
    }
}
