use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::state::models::{ReleaseMarker, ReleaseMarkers, SeenState};

/// Whole-file read-modify-write of the state document. No locking.
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

    /// Missing or unreadable state is treated as empty.
    pub fn load(&self) -> SeenState {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No state file yet, starting empty");
                return SeenState::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Could not read state file, starting empty");
                return SeenState::default();
            }
        };

        parse_state(&text).unwrap_or_else(|| {
            warn!(path = %self.path.display(), "State file is malformed, starting empty");
            SeenState::default()
        })
    }

    pub fn save(&self, state: &SeenState) -> Result<(), SaveStateError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SaveStateError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let data = serde_json::to_string_pretty(state)
            .map_err(|source| SaveStateError::Serialize { source })?;

        fs::write(&self.path, data).map_err(|source| SaveStateError::Write {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), "Saved state");
        Ok(())
    }
}

/// Reads the current JSON document as well as the older layouts:
/// a JSON list of processed ids, or a plain-text last release.
/// `None` means the content looked like JSON but did not parse.
pub fn parse_state(text: &str) -> Option<SeenState> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Some(SeenState::default());
    }

    if trimmed.starts_with('{') {
        return serde_json::from_str(trimmed).ok();
    }

    if trimmed.starts_with('[') {
        let processed: Vec<String> = serde_json::from_str(trimmed).ok()?;
        return Some(SeenState {
            releases: ReleaseMarkers {
                last_seen: None,
                processed,
                pending: None,
            },
            ..SeenState::default()
        });
    }

    Some(SeenState {
        releases: ReleaseMarkers {
            last_seen: Some(ReleaseMarker {
                id: trimmed.to_string(),
                name: trimmed.to_string(),
            }),
            processed: Vec::new(),
            pending: None,
        },
        ..SeenState::default()
    })
}

#[derive(Debug, Error)]
pub enum SaveStateError {
    #[error("CreateDir {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialize: {source}")]
    Serialize { source: serde_json::Error },

    #[error("Write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
