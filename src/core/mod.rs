pub mod ledger_store;
pub mod services;
pub mod utils;
