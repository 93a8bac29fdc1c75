use std::{collections::HashMap, sync::Mutex};

use crate::errors::LedgerError;

use super::{Result, Slot, StorageBackend};

/// Volatile backend for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<Slot, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, e.g. with deliberately corrupt data.
    pub fn with_slot(self, slot: Slot, data: impl Into<String>) -> Self {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(slot, data.into());
        }
        self
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Slot, String>>> {
        self.slots
            .lock()
            .map_err(|_| LedgerError::Persistence("memory storage lock poisoned".into()))
    }
}

impl StorageBackend for MemoryStorage {
    fn read_slot(&self, slot: Slot) -> Result<Option<String>> {
        Ok(self.lock()?.get(&slot).cloned())
    }

    fn write_slot(&self, slot: Slot, data: &str) -> Result<()> {
        self.lock()?.insert(slot, data.to_string());
        Ok(())
    }
}
