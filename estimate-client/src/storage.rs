use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use estimate_core::session::{DraftSession, SessionStorage, StorageError};

/// File name of the single session slot.
const SLOT_FILE: &str = "draft-session.json";

/// Durable session slot backed by one JSON file. The whole session is
/// rewritten on every save; `clear` removes the file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The platform data directory slot (e.g. `~/.local/share/estimate/` on
    /// Linux). `None` when no home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "estimate").map(|dirs| dirs.data_dir().join(SLOT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<DraftSession>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        let session = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::Corrupt(format!("{}: {e}", self.path.display())))?;
        Ok(Some(session))
    }

    fn save(
        &self,
        session: &DraftSession,
    ) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(session)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        fs::write(&self.path, bytes)?;
        tracing::debug!(path = %self.path.display(), "session slot written");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
