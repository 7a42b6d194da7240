#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

use crate::disputes::models::DisputeItem;

/// Storage key for the registry snapshot, mirrored as the file name on disk.
pub const DISPUTED_ITEMS_KEY: &str = "disputedItems";

/// Durable snapshot seam for the dispute-item registry.
/// The whole working set is serialized under one fixed key on every save.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, items: &[DisputeItem]) -> Result<()>;

    /// Missing or corrupt data degrades to an empty list, never an error.
    fn load(&self) -> Vec<DisputeItem>;

    fn clear(&self) -> Result<()>;
}

/// One JSON file per key under a base directory; the server-side stand-in
/// for browser local storage.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(format!("{DISPUTED_ITEMS_KEY}.json")),
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn save(&self, items: &[DisputeItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating snapshot dir {}", parent.display()))?;
        }
        let json = serde_json::to_string(items)?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing snapshot to {}", self.path.display()))
    }

    fn load(&self) -> Vec<DisputeItem> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!("discarding corrupt dispute snapshot: {e}");
                Vec::new()
            }
        }
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory snapshot for registry tests. Stores the serialized form so the
/// round-trip still exercises JSON encoding.
#[cfg(test)]
pub struct MemorySnapshotStore {
    inner: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            inner: std::sync::Mutex::new(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_none()
    }
}

#[cfg(test)]
impl SnapshotStore for MemorySnapshotStore {
    fn save(&self, items: &[DisputeItem]) -> Result<()> {
        *self.inner.lock().unwrap() = Some(serde_json::to_string(items)?);
        Ok(())
    }

    fn load(&self) -> Vec<DisputeItem> {
        self.inner
            .lock()
            .unwrap()
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    fn clear(&self) -> Result<()> {
        *self.inner.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> DisputeItem {
        DisputeItem {
            id: id.to_string(),
            creditor: "Midland Credit".to_string(),
            account: "1234".to_string(),
            date_opened: "2021-03-01".to_string(),
            balance: "$540".to_string(),
            item_type: "Collection".to_string(),
            disputed: true,
            has_experian: true,
            has_equifax: false,
            has_transunion: false,
            group_name: Some("Collections".to_string()),
            bureau: Some(crate::groups::models::Bureau::Experian),
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());

        let items = vec![item("a1-Experian"), item("a2-Experian")];
        store.save(&items).unwrap();
        assert_eq!(store.load(), items);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());
        std::fs::write(
            dir.path().join(format!("{DISPUTED_ITEMS_KEY}.json")),
            "{not json",
        )
        .unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_clear_removes_snapshot_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());

        store.save(&[item("a1-Experian")]).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());

        // clearing again is a no-op
        store.clear().unwrap();
    }
}
