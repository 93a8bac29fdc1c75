//! Ledger record types and the in-memory snapshot that groups them.

pub mod category;
pub mod common;
pub mod debt;
pub mod goal;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::{default_categories, Category, CategoryIcon, DEFAULT_CATEGORY_COLOR};
pub use common::{Identifiable, RecordId};
pub use debt::{Debt, DebtKind};
pub use goal::{Goal, CONTRIBUTION_PRESETS};
pub use ledger::{resolve_id, Ledger};
pub use transaction::{Transaction, TransactionKind};
