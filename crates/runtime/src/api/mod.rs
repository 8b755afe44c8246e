//! Public API types for embedding the runtime.

mod errors;
mod handle;
mod providers;

pub use errors::{RepositoryError, Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use providers::{CommandProvider, IdleProvider, PlayerCommand, ScriptedProvider};
