//! Durable per-tenant workspace storage.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use gardenkit_core::PersistenceError;

use crate::model::WorkspaceData;
use crate::serialization::{decode_workspace, encode_workspace};

/// Storage backend keyed by tenant.
pub trait PersistenceProvider: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored for `key`.
    fn load(&self, key: &str) -> Result<Option<WorkspaceData>, PersistenceError>;

    fn save(&self, key: &str, data: &WorkspaceData) -> Result<(), PersistenceError>;
}

/// Loads the tenant's workspace, seeding a fresh one when storage is
/// empty, unreadable, corrupt or from a newer version.
pub fn load_or_seed(provider: &dyn PersistenceProvider, key: &str) -> WorkspaceData {
    match provider.load(key) {
        Ok(Some(data)) => {
            tracing::info!("Loaded workspace for tenant '{}'", key);
            data
        }
        Ok(None) => {
            tracing::info!("No stored workspace for tenant '{}', seeding", key);
            WorkspaceData::seed()
        }
        Err(e) => {
            tracing::warn!("Failed to load workspace for tenant '{}': {}; seeding", key, e);
            WorkspaceData::seed()
        }
    }
}

/// Receives settled workspace snapshots for deferred saving.
pub trait SnapshotSink: Send + Sync {
    fn offer(&self, data: &WorkspaceData);

    /// True while an offered snapshot has not been written yet.
    fn is_pending(&self) -> bool {
        false
    }
}

/// In-process storage holding encoded JSON, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text under `key`, bypassing encoding.
    pub fn insert_raw(&self, key: &str, json: impl Into<String>) {
        self.entries.lock().insert(key.to_string(), json.into());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }
}

impl PersistenceProvider for MemoryProvider {
    fn load(&self, key: &str) -> Result<Option<WorkspaceData>, PersistenceError> {
        match self.entries.lock().get(key) {
            Some(json) => decode_workspace(json).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, data: &WorkspaceData) -> Result<(), PersistenceError> {
        let json = encode_workspace(data)?;
        self.entries.lock().insert(key.to_string(), json);
        Ok(())
    }
}

/// One JSON file per tenant under a root directory.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    root: PathBuf,
}

impl JsonFileProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Provider rooted in the platform data directory.
    pub fn default_location() -> Result<Self, PersistenceError> {
        let dir = dirs::data_dir().ok_or(PersistenceError::NoStorageDir)?;
        Ok(Self::new(dir.join("gardenkit").join("workspaces")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding `key`. Characters unsafe in file names are replaced.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let name = if name.is_empty() { "default".to_string() } else { name };
        self.root.join(format!("{name}.json"))
    }
}

impl PersistenceProvider for JsonFileProvider {
    fn load(&self, key: &str) -> Result<Option<WorkspaceData>, PersistenceError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)?;
        decode_workspace(&json).map(Some)
    }

    fn save(&self, key: &str, data: &WorkspaceData) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, encode_workspace(data)?)?;
        // rename is atomic on the same filesystem, so readers never see a partial file
        std::fs::rename(&tmp, &path)?;
        tracing::debug!("Saved workspace for tenant '{}' to {:?}", key, path);
        Ok(())
    }
}
