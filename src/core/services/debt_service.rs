use crate::ledger::{common::ensure_positive_amount, Debt, Ledger, RecordId};

use super::{ServiceError, ServiceResult};

/// Tracks udhaar: money borrowed from or lent to other people.
pub struct DebtService;

impl DebtService {
    pub fn add(ledger: &mut Ledger, mut debt: Debt) -> ServiceResult<RecordId> {
        debt.person_name = debt.person_name.trim().to_string();
        debt.is_paid = false;
        Self::validate(&debt)?;
        Ok(ledger.add_debt(debt))
    }

    /// Flips the paid flag and returns the new value.
    pub fn toggle_paid(ledger: &mut Ledger, id: &RecordId) -> ServiceResult<bool> {
        let debt = ledger
            .debt_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Debt {id}")))?;
        debt.is_paid = !debt.is_paid;
        Ok(debt.is_paid)
    }

    /// Applies `mutator` to the debt, rolling back if the result is invalid.
    pub fn update<F>(ledger: &mut Ledger, id: &RecordId, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Debt),
    {
        let debt = ledger
            .debt_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Debt {id}")))?;
        let original = debt.clone();
        mutator(debt);
        debt.id = original.id.clone();
        if let Err(err) = Self::validate(debt) {
            *debt = original;
            return Err(err);
        }
        Ok(())
    }

    pub fn remove(ledger: &mut Ledger, id: &RecordId) -> ServiceResult<Debt> {
        ledger
            .remove_debt(id)
            .ok_or_else(|| ServiceError::NotFound(format!("Debt {id}")))
    }

    fn validate(debt: &Debt) -> ServiceResult<()> {
        if debt.person_name.trim().is_empty() {
            return Err(ServiceError::Invalid("Person name cannot be empty".into()));
        }
        ensure_positive_amount(debt.amount, "Amount").map_err(ServiceError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::debt_summary;
    use crate::ledger::DebtKind;
    use chrono::Utc;

    #[test]
    fn toggle_flips_and_excludes_from_summary() {
        let mut ledger = Ledger::new();
        let id = DebtService::add(
            &mut ledger,
            Debt::new("Bilal", 400.0, DebtKind::Borrowed, Utc::now()),
        )
        .unwrap();
        assert_eq!(debt_summary(&ledger.debts).owed_by_user, 400.0);

        assert!(DebtService::toggle_paid(&mut ledger, &id).unwrap());
        assert_eq!(debt_summary(&ledger.debts).owed_by_user, 0.0);
        assert_eq!(ledger.debts.len(), 1, "paid debts stay listed");

        assert!(!DebtService::toggle_paid(&mut ledger, &id).unwrap());
        assert_eq!(ledger.debt(&id).unwrap().amount, 400.0);
    }

    #[test]
    fn add_validates_person_and_amount() {
        let mut ledger = Ledger::new();
        let blank = Debt::new(" ", 5.0, DebtKind::Lent, Utc::now());
        assert!(DebtService::add(&mut ledger, blank).is_err());
        let negative = Debt::new("Zara", -5.0, DebtKind::Lent, Utc::now());
        assert!(DebtService::add(&mut ledger, negative).is_err());
        assert!(ledger.debts.is_empty());
    }

    #[test]
    fn update_and_remove() {
        let mut ledger = Ledger::new();
        let id =
            DebtService::add(&mut ledger, Debt::new("Zara", 50.0, DebtKind::Lent, Utc::now()))
                .unwrap();
        assert!(DebtService::update(&mut ledger, &id, |debt| debt.amount = f64::NAN).is_err());
        assert_eq!(ledger.debt(&id).unwrap().amount, 50.0);

        DebtService::update(&mut ledger, &id, |debt| debt.amount = 75.0).unwrap();
        let removed = DebtService::remove(&mut ledger, &id).unwrap();
        assert_eq!(removed.amount, 75.0);
        assert!(DebtService::remove(&mut ledger, &id).is_err());
    }
}
