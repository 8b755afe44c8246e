//! Runtime orchestration for the deterministic session simulation.
//!
//! This crate wires together the command provider abstraction, oracle access,
//! the log/trace recorder, the best-effort collector relay, and the session
//! worker into a cohesive runtime API. Consumers embed [`Runtime`] to drive
//! frames, subscribe to events, and interact with the session through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`recorder`] stamps engine outcomes into immutable telemetry records
//! - [`relay`] delivers telemetry to the external collector, best-effort
//! - [`repository`] persists the local session log
//! - `workers` keeps the session task internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod recorder;
pub mod relay;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{
    CommandProvider, IdleProvider, PlayerCommand, Result, RuntimeError, RuntimeHandle,
    ScriptedProvider,
};
pub use events::{Event, EventBus, SessionEvent, TelemetryEvent, Topic};
pub use oracle::OracleManager;
pub use recorder::{InteractionEntry, SessionMeta, SessionRecorder, TracePoint};
pub use relay::{
    CapturingSink, CollectorMessage, CollectorSink, HttpCollectorSink, NullSink, Relay, RelayError,
};
pub use repository::{
    FileSessionLog, InMemorySessionLog, RepositoryError, SessionLogRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, SessionSummary};
