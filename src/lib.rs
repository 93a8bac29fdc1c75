#![doc(test(attr(deny(warnings))))]

//! FinStudent core: the ledger, analytics, and backup primitives behind a
//! student-focused personal finance tracker.
//!
//! A [`LedgerStore`](crate::core::ledger_store::LedgerStore) owns the live
//! ledger and persists every change through a
//! [`StorageBackend`](crate::storage::StorageBackend). Aggregations in
//! [`analytics`] are pure functions over ledger snapshots.

pub mod analytics;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod transfer;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("FinStudent core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
