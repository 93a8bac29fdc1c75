pub mod json_backend;
pub mod memory;

use std::fmt;

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Named storage slots, one per persisted collection or preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Transactions,
    Categories,
    Goals,
    Debts,
    Currency,
    DarkMode,
}

impl Slot {
    pub fn key(self) -> &'static str {
        match self {
            Slot::Transactions => "transactions",
            Slot::Categories => "categories",
            Slot::Goals => "goals",
            Slot::Debts => "debts",
            Slot::Currency => "currency",
            Slot::DarkMode => "darkMode",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Abstraction over key-value persistence holding one JSON document per slot.
///
/// Writes must be durable before they return; a failed write leaves the
/// previous value in place.
pub trait StorageBackend: Send + Sync {
    /// Returns `None` when the slot has never been written.
    fn read_slot(&self, slot: Slot) -> Result<Option<String>>;
    fn write_slot(&self, slot: Slot, data: &str) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
