//! Traits describing read-only world data.
//!
//! Oracles expose the static collision mask and tunable parameters. The
//! [`Env`] aggregate bundles them so the engine can access everything it
//! needs without hard coupling to concrete implementations.
mod config;
mod error;
mod map;

pub use config::ConfigOracle;
pub use error::OracleError;
pub use map::{MapOracle, MaskDimensions};

/// Aggregates read-only oracles required by the action pipeline.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, M, C>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    map: Option<&'a M>,
    config: Option<&'a C>,
}

pub type SessionEnv<'a> = Env<'a, dyn MapOracle + 'a, dyn ConfigOracle + 'a>;

impl<'a, M, C> Env<'a, M, C>
where
    M: MapOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    pub fn new(map: Option<&'a M>, config: Option<&'a C>) -> Self {
        Self { map, config }
    }

    pub fn with_all(map: &'a M, config: &'a C) -> Self {
        Self::new(Some(map), Some(config))
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            config: None,
        }
    }

    /// Returns the MapOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }
}

impl<'a, M, C> Env<'a, M, C>
where
    M: MapOracle + 'a,
    C: ConfigOracle + 'a,
{
    /// Converts this environment into a trait-object based `SessionEnv`.
    pub fn as_session_env(&self) -> SessionEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        Env::new(map, config)
    }
}
