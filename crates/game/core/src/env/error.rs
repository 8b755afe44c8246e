/// Errors raised when a required oracle is missing from the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("map oracle not available")]
    MapNotAvailable,

    #[error("config oracle not available")]
    ConfigNotAvailable,
}
