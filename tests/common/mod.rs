#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use finstudent_core::{core::ledger_store::LedgerStore, storage::JsonStorage};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn open_store(dir: &Path) -> LedgerStore {
    let storage = JsonStorage::new(Some(dir.to_path_buf())).expect("create json storage");
    LedgerStore::open(Box::new(storage))
}

/// Fresh store in its own directory.
pub fn setup_store() -> (LedgerStore, PathBuf) {
    let dir = temp_dir();
    (open_store(&dir), dir)
}
