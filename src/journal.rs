use crate::event::ProbeEvent;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced while loading a recorded event journal.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("failed to read event journal {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse event journal {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads an event journal, a JSON array of probe events in arrival order,
/// from disk.
pub fn load_journal(path: impl AsRef<Path>) -> Result<Vec<ProbeEvent>, JournalError> {
    let path = path.as_ref();
    let payload = fs::read_to_string(path).map_err(|source| JournalError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_journal(&payload).map_err(|source| JournalError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses journal JSON without touching the filesystem.
pub fn parse_journal(payload: &str) -> Result<Vec<ProbeEvent>, serde_json::Error> {
    serde_json::from_str(payload)
}
