//! Business logic helpers for recording and deleting transactions.

use crate::ledger::{common::ensure_positive_amount, Ledger, RecordId, Transaction};

use super::{CategoryService, ServiceError, ServiceResult};

/// Provides validated add/remove helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates and records a transaction, returning its identifier.
    ///
    /// The category is matched case-insensitively and stored under its
    /// canonical spelling.
    pub fn add(ledger: &mut Ledger, mut transaction: Transaction) -> ServiceResult<RecordId> {
        Self::normalize(ledger, &mut transaction)?;
        Ok(ledger.add_transaction(transaction))
    }

    /// Applies `mutator` to a copy of the transaction and stores it if valid.
    /// The record keeps its id and position. Its kind is fixed at creation.
    pub fn update<F>(ledger: &mut Ledger, id: &RecordId, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Transaction),
    {
        let current = ledger
            .transaction(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Transaction {id}")))?;
        let kind = current.kind;
        let mut updated = current.clone();
        mutator(&mut updated);
        if updated.kind != kind {
            return Err(ServiceError::Invalid(format!(
                "Transaction {id} was recorded as {kind}; its type cannot be changed"
            )));
        }
        updated.id = id.clone();
        Self::normalize(ledger, &mut updated)?;
        if let Some(slot) = ledger.transaction_mut(id) {
            *slot = updated;
        }
        Ok(())
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove(ledger: &mut Ledger, id: &RecordId) -> ServiceResult<Transaction> {
        ledger
            .remove_transaction(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Transaction {id}")))
    }

    fn normalize(ledger: &Ledger, transaction: &mut Transaction) -> ServiceResult<()> {
        ensure_positive_amount(transaction.amount, "Amount").map_err(ServiceError::Invalid)?;
        transaction.category = CategoryService::resolve_name(ledger, &transaction.category)?.to_string();
        transaction.note = transaction.note.trim().to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;
    use chrono::Utc;

    #[test]
    fn add_normalizes_category_and_note() {
        let mut ledger = Ledger::new();
        let txn = Transaction::new(TransactionKind::Expense, 42.0, "food", Utc::now())
            .with_note("  lunch ");
        let id = TransactionService::add(&mut ledger, txn).unwrap();
        let stored = ledger.transaction(&id).unwrap();
        assert_eq!(stored.category, "Food");
        assert_eq!(stored.note, "lunch");
    }

    #[test]
    fn add_rejects_non_positive_or_nan_amounts() {
        let mut ledger = Ledger::new();
        for amount in [0.0, -5.0, f64::NAN] {
            let txn = Transaction::new(TransactionKind::Expense, amount, "Food", Utc::now());
            let err = TransactionService::add(&mut ledger, txn).expect_err("invalid amount");
            assert!(matches!(err, ServiceError::Invalid(_)));
        }
        assert!(ledger.transactions.is_empty());
    }

    #[test]
    fn add_rejects_unknown_category() {
        let mut ledger = Ledger::new();
        let txn = Transaction::new(TransactionKind::Income, 10.0, "Lottery", Utc::now());
        assert!(TransactionService::add(&mut ledger, txn).is_err());
        assert!(ledger.transactions.is_empty());
    }

    #[test]
    fn remove_returns_deleted_transaction() {
        let mut ledger = Ledger::new();
        let txn = Transaction::new(TransactionKind::Income, 10.0, "Salary", Utc::now());
        let id = TransactionService::add(&mut ledger, txn).unwrap();

        let removed = TransactionService::remove(&mut ledger, &id).unwrap();
        assert_eq!(removed.id, id);
        let err = TransactionService::remove(&mut ledger, &id).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn update_validates_and_keeps_position() {
        let mut ledger = Ledger::new();
        let older = Transaction::new(TransactionKind::Expense, 5.0, "Food", Utc::now());
        let older = TransactionService::add(&mut ledger, older).unwrap();
        let newer = Transaction::new(TransactionKind::Expense, 9.0, "Fun", Utc::now());
        TransactionService::add(&mut ledger, newer).unwrap();

        let bad = TransactionService::update(&mut ledger, &older, |txn| txn.amount = -2.0);
        assert!(bad.is_err());
        let flipped = TransactionService::update(&mut ledger, &older, |txn| {
            txn.kind = TransactionKind::Income
        });
        assert!(matches!(flipped, Err(ServiceError::Invalid(_))));
        assert_eq!(ledger.transactions[1].kind, TransactionKind::Expense);
        let unknown = TransactionService::update(&mut ledger, &older, |txn| {
            txn.category = "Nowhere".into()
        });
        assert!(unknown.is_err());

        TransactionService::update(&mut ledger, &older, |txn| {
            txn.amount = 6.5;
            txn.category = "transport".into();
        })
        .unwrap();
        assert_eq!(ledger.transactions[1].id, older);
        assert_eq!(ledger.transactions[1].amount, 6.5);
        assert_eq!(ledger.transactions[1].category, "Transport");
    }
}
