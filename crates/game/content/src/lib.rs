//! Data-driven content definitions and loaders.
//!
//! This crate turns on-disk session content into the structures the runtime
//! feeds to the engine:
//! - Tabular task source (delimited text) → deduplicated rooms with ordered
//!   task lists
//! - Collision-mask bitmap (PNG) → walkability oracle
//! - Session configuration (TOML)
//!
//! Content is consumed by runtime oracles and initial session state; it never
//! appears in the engine's mutable state except through construction.

pub mod loaders;

pub use loaders::{
    CollisionMask, ConfigLoader, ContentBundle, ContentFactory, MaskLoader, TaskTableLoader,
};
