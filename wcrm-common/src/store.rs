//! Client-local persisted state
//!
//! A single key: the last-selected tenant identifier, stored as a small
//! file under the data folder and re-read at session start. No cross-tab
//! or cross-process synchronization.

use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

const CURRENT_TENANT_FILE: &str = "current_tenant";

/// Persists the last-selected tenant identifier
#[derive(Debug, Clone)]
pub struct TenantSelectionStore {
    path: PathBuf,
}

impl TenantSelectionStore {
    pub fn new(data_folder: &Path) -> Self {
        Self { path: data_folder.join(CURRENT_TENANT_FILE) }
    }

    /// Last saved selection, `None` when absent or unreadable
    pub fn load(&self) -> Option<Uuid> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match content.trim().parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring unparseable tenant selection in {}", self.path.display());
                None
            }
        }
    }

    /// Save the selection; failures are logged, not fatal, since the
    /// selection only seeds the next session's default
    pub fn save(&self, tenant_id: Uuid) {
        if let Err(e) = std::fs::write(&self.path, tenant_id.to_string()) {
            warn!("Could not persist tenant selection: {}", e);
        }
    }

    /// Remove the stored selection (sign-out)
    pub fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!("Could not clear tenant selection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_selection() {
        let dir = TempDir::new().unwrap();
        let store = TenantSelectionStore::new(dir.path());
        assert_eq!(store.load(), None);

        let id = Uuid::new_v4();
        store.save(id);
        assert_eq!(store.load(), Some(id));

        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn garbage_content_reads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = TenantSelectionStore::new(dir.path());
        std::fs::write(dir.path().join(CURRENT_TENANT_FILE), "not-a-uuid").unwrap();
        assert_eq!(store.load(), None);
    }
}
