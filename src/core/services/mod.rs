pub mod category_service;
pub mod debt_service;
pub mod goal_service;
pub mod summary_service;
pub mod transaction_service;

pub use category_service::CategoryService;
pub use debt_service::DebtService;
pub use goal_service::GoalService;
pub use summary_service::{DashboardSummary, GoalProgressView, SummaryService};
pub use transaction_service::TransactionService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
    #[error("{0} not found")]
    NotFound(String),
}
