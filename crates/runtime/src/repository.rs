//! Local session log persistence.
//!
//! Interaction entries append to a JSON-lines file, one object per line, so
//! the password-gated admin surface (out of scope here) can read and export
//! them without replaying a session.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::recorder::InteractionEntry;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("log file already exists: {0}")]
    LogAlreadyExists(String),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("serialization error")]
    Serialize(#[from] serde_json::Error),
}

/// Append-only store for interaction entries.
pub trait SessionLogRepository: Send {
    fn append(&mut self, entry: &InteractionEntry) -> Result<()>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// JSON-lines file repository.
pub struct FileSessionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    appended: usize,
}

impl FileSessionLog {
    /// Create a new session log file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file already exists (prevents accidental
    /// overwrites of a previous session).
    pub fn create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename.as_ref());
        if path.exists() {
            return Err(RepositoryError::LogAlreadyExists(
                path.display().to_string(),
            ));
        }

        let file = OpenOptions::new().create_new(true).write(true).open(&path)?;

        tracing::debug!("created session log: {}", path.display());

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            appended: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry back from a session log file.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<InteractionEntry>> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line)?);
        }
        Ok(entries)
    }
}

impl SessionLogRepository for FileSessionLog {
    fn append(&mut self, entry: &InteractionEntry) -> Result<()> {
        serde_json::to_writer(&mut self.writer, entry)?;
        self.writer.write_all(b"\n")?;
        // Flush per entry: an abandoned session must not lose its tail.
        self.writer.flush()?;
        self.appended += 1;
        Ok(())
    }

    fn len(&self) -> usize {
        self.appended
    }
}

/// In-memory repository for tests and collector-less runs.
#[derive(Default)]
pub struct InMemorySessionLog {
    entries: Vec<InteractionEntry>,
}

impl InMemorySessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[InteractionEntry] {
        &self.entries
    }
}

impl SessionLogRepository for InMemorySessionLog {
    fn append(&mut self, entry: &InteractionEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::SessionMeta;
    use chrono::Utc;
    use game_core::Minutes;

    fn entry(choice: &str) -> InteractionEntry {
        let meta = SessionMeta::new("p01");
        InteractionEntry {
            player_id: meta.player_id,
            session_uuid: meta.session_uuid,
            session_start: meta.started_at,
            recorded_at: Utc::now(),
            elapsed: Minutes(5),
            decision_seconds: None,
            location: "ward".into(),
            event: "rounds".into(),
            choice: choice.into(),
            result: "ok".into(),
        }
    }

    #[test]
    fn appended_entries_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = FileSessionLog::create(dir.path(), "session.jsonl").unwrap();

        log.append(&entry("a")).unwrap();
        log.append(&entry("b")).unwrap();
        assert_eq!(log.len(), 2);

        let entries = FileSessionLog::read_all(log.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].choice, "a");
        assert_eq!(entries[1].choice, "b");
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let _log = FileSessionLog::create(dir.path(), "session.jsonl").unwrap();

        assert!(matches!(
            FileSessionLog::create(dir.path(), "session.jsonl"),
            Err(RepositoryError::LogAlreadyExists(_))
        ));
    }
}
