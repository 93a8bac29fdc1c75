use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, PathResolver};
use crate::utils::persistence::replace_file;

use super::{Result, Slot, StorageBackend};

const SLOT_EXTENSION: &str = "json";

/// Stores each slot as `<root>/<slot>.json`, replacing files atomically.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.root.join(format!("{}.{}", slot.key(), SLOT_EXTENSION))
    }
}

impl StorageBackend for JsonStorage {
    fn read_slot(&self, slot: Slot) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write_slot(&self, slot: Slot, data: &str) -> Result<()> {
        let path = self.slot_path(slot);
        replace_file(&path, data)?;
        tracing::debug!(slot = %slot, path = %path.display(), "slot written");
        Ok(())
    }
}
