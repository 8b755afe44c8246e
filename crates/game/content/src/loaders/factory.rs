//! Content factory for building session inputs from a data directory.

use std::path::{Path, PathBuf};

use game_core::{Room, SessionConfig};

use crate::loaders::{CollisionMask, ConfigLoader, LoadResult, MaskLoader, TaskTableLoader};

/// Everything the runtime needs to start a session.
pub struct ContentBundle {
    pub config: SessionConfig,
    pub rooms: Vec<Room>,
    pub mask: CollisionMask,
}

/// Content factory that loads all session content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tasks.csv
/// └── mask.png
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load session configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<SessionConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load rooms from `tasks.csv`.
    pub fn load_rooms(&self) -> LoadResult<Vec<Room>> {
        TaskTableLoader::load(&self.data_dir.join("tasks.csv"))
    }

    /// Load the collision mask from `mask.png`.
    pub fn load_mask(&self) -> LoadResult<CollisionMask> {
        MaskLoader::load(&self.data_dir.join("mask.png"))
    }

    /// Load the full content bundle.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        let config = self.load_config()?;
        let rooms = self.load_rooms()?;
        let mask = self.load_mask()?;

        tracing::info!(
            rooms = rooms.len(),
            tasks = rooms.iter().map(|room| room.tasks.len()).sum::<usize>(),
            "loaded session content from {}",
            self.data_dir.display()
        );

        Ok(ContentBundle {
            config,
            rooms,
            mask,
        })
    }
}
