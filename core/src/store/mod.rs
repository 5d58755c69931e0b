//! Condition state persistence
//!
//! One JSON file holds the payloads of every condition that asked to be
//! persisted. The file is rewritten wholesale on each save; stale entries
//! from earlier runs never survive a rewrite. Loading is fail-soft at two
//! levels: an unreadable or version-mismatched file yields an empty set,
//! and a single bad entry is skipped without aborting the rest.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use statusdeck_types::{ConditionKind, StatePayload};

/// State file format version (increment when the entry shape changes).
/// A mismatched version discards the file and starts from defaults.
const STATE_VERSION: u32 = 1;

const FILE_NAME: &str = "condition_state.json";

/// Root document of the persisted state file.
#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    version: u32,
    conditions: Vec<StateEntry>,
}

/// One persisted condition. The kind is kept as a raw tag so an entry
/// written by a build with a larger catalog parses and is skipped, rather
/// than failing the whole document.
#[derive(Debug, Serialize, Deserialize)]
struct StateEntry {
    kind: String,
    state: StatePayload,
}

/// Errors from the fallible half of the codec. These never cross the
/// registry boundary; callers log and continue with in-memory state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize state for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Reads and writes the single condition state file.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all persisted entries.
    ///
    /// A missing file is not an error; it yields an empty set and the
    /// registry falls back to an all-default catalog. Parse failures and
    /// version mismatches discard the file. Entries with an unknown kind
    /// tag or a non-object payload are skipped individually.
    pub fn load(&self) -> Vec<(ConditionKind, StatePayload)> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "failed to read state file");
                return Vec::new();
            }
        };

        let file = match serde_json::from_str::<StateFile>(&content) {
            Ok(file) if file.version == STATE_VERSION => file,
            Ok(file) => {
                tracing::info!(
                    found = file.version,
                    expected = STATE_VERSION,
                    "state file version mismatch, starting from defaults"
                );
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "failed to parse state file, starting from defaults");
                return Vec::new();
            }
        };

        let mut entries = Vec::with_capacity(file.conditions.len());
        for entry in file.conditions {
            match ConditionKind::from_tag(&entry.kind) {
                Some(kind) => entries.push((kind, entry.state)),
                None => {
                    tracing::warn!(tag = %entry.kind, "skipping unknown condition in state file");
                }
            }
        }
        entries
    }

    /// Rewrite the state file with the given entries.
    ///
    /// Failures are logged and swallowed; the in-memory registry state
    /// stays authoritative and the next successful save catches up.
    pub fn save(&self, entries: &[(ConditionKind, StatePayload)]) {
        if let Err(e) = self.try_save(entries) {
            tracing::warn!(error = %e, "failed to save condition state");
        }
    }

    fn try_save(&self, entries: &[(ConditionKind, StatePayload)]) -> Result<(), StoreError> {
        let file = StateFile {
            version: STATE_VERSION,
            conditions: entries
                .iter()
                .map(|(kind, state)| StateEntry {
                    kind: kind.tag().to_string(),
                    state: state.clone(),
                })
                .collect(),
        };

        let content = serde_json::to_string_pretty(&file).map_err(|e| StoreError::Serialize {
            path: self.path.clone(),
            source: e,
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        }

        fs::write(&self.path, content).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Remove the state file if present (host "reset" action).
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Default state file location under the user config directory.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("statusdeck").join(FILE_NAME))
}
