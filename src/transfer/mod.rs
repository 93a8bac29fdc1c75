//! Whole-ledger backup files for export and import.
//!
//! A backup is a single JSON object. Every top-level key is optional on
//! import and only the keys present overwrite the matching collection.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    currency::Currency,
    errors::LedgerError,
    ledger::{
        common::ensure_positive_amount, Category, Debt, Goal, Identifiable, Ledger, Transaction,
    },
    storage::Slot,
    utils::persistence,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Goal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debts: Option<Vec<Debt>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

impl BackupDocument {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            transactions: Some(ledger.transactions.clone()),
            categories: Some(ledger.categories.clone()),
            goals: Some(ledger.goals.clone()),
            debts: Some(ledger.debts.clone()),
            dark_mode: Some(ledger.preferences.dark_mode),
            currency: Some(ledger.preferences.currency),
        }
    }

    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a backup. Nothing is applied here.
    pub fn from_json(data: &str) -> Result<Self, LedgerError> {
        let document: Self = serde_json::from_str(data)
            .map_err(|err| LedgerError::Import(format!("malformed backup: {err}")))?;
        document.validate()?;
        Ok(document)
    }

    /// Slots this document would overwrite.
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::new();
        if self.transactions.is_some() {
            slots.push(Slot::Transactions);
        }
        if self.categories.is_some() {
            slots.push(Slot::Categories);
        }
        if self.goals.is_some() {
            slots.push(Slot::Goals);
        }
        if self.debts.is_some() {
            slots.push(Slot::Debts);
        }
        if self.dark_mode.is_some() {
            slots.push(Slot::DarkMode);
        }
        if self.currency.is_some() {
            slots.push(Slot::Currency);
        }
        slots
    }

    /// Overwrites the collections present in the document.
    pub fn apply_to(self, ledger: &mut Ledger) {
        if let Some(transactions) = self.transactions {
            ledger.transactions = transactions;
        }
        if let Some(categories) = self.categories {
            ledger.categories = categories;
        }
        if let Some(goals) = self.goals {
            ledger.goals = goals;
        }
        if let Some(debts) = self.debts {
            ledger.debts = debts;
        }
        if let Some(dark_mode) = self.dark_mode {
            ledger.preferences.dark_mode = dark_mode;
        }
        if let Some(currency) = self.currency {
            ledger.preferences.currency = currency;
        }
    }

    /// Checks amounts, category names and id uniqueness without applying anything.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if let Some(transactions) = &self.transactions {
            ensure_unique_ids(transactions, "transaction")?;
        }
        if let Some(categories) = &self.categories {
            ensure_unique_ids(categories, "category")?;
            validate_category_names(categories)?;
        }
        if let Some(goals) = &self.goals {
            ensure_unique_ids(goals, "goal")?;
        }
        if let Some(debts) = &self.debts {
            ensure_unique_ids(debts, "debt")?;
        }
        for txn in self.transactions.iter().flatten() {
            ensure_positive_amount(txn.amount, &format!("transaction {} amount", txn.id))
                .map_err(LedgerError::Import)?;
        }
        for goal in self.goals.iter().flatten() {
            if goal.name.trim().is_empty() {
                return Err(LedgerError::Import(format!("goal {} has no name", goal.id)));
            }
            ensure_positive_amount(goal.target_amount, &format!("goal {} target", goal.id))
                .map_err(LedgerError::Import)?;
            if !goal.current_amount.is_finite() || goal.current_amount < 0.0 {
                return Err(LedgerError::Import(format!(
                    "goal {} has a negative saved amount",
                    goal.id
                )));
            }
        }
        for debt in self.debts.iter().flatten() {
            ensure_positive_amount(debt.amount, &format!("debt {} amount", debt.id))
                .map_err(LedgerError::Import)?;
        }
        Ok(())
    }
}

fn ensure_unique_ids<T: Identifiable>(items: &[T], what: &str) -> Result<(), LedgerError> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.id()) {
            return Err(LedgerError::Import(format!(
                "duplicate {what} id `{}`",
                item.id()
            )));
        }
    }
    Ok(())
}

fn validate_category_names(categories: &[Category]) -> Result<(), LedgerError> {
    let mut seen = HashSet::new();
    for category in categories {
        let name = category.name.trim();
        if name.is_empty() {
            return Err(LedgerError::Import(format!(
                "category {} has no name",
                category.id
            )));
        }
        if !seen.insert(name.to_ascii_lowercase()) {
            return Err(LedgerError::Import(format!(
                "category `{name}` appears more than once"
            )));
        }
    }
    Ok(())
}

/// Default export file name for a backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("finstudent_backup_{}.json", date.format("%Y-%m-%d"))
}

pub fn export_to_path(document: &BackupDocument, path: &Path) -> Result<(), LedgerError> {
    persistence::save_json_to_file(document, path)
}

/// Reads and validates a backup file. Any failure is reported as an import error.
pub fn read_backup_file(path: &Path) -> Result<BackupDocument, LedgerError> {
    let data = std::fs::read_to_string(path).map_err(|err| {
        LedgerError::Import(format!("cannot read `{}`: {err}", path.display()))
    })?;
    BackupDocument::from_json(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{DebtKind, TransactionKind};
    use chrono::Utc;

    #[test]
    fn partial_document_only_touches_present_keys() {
        let mut ledger = Ledger::new();
        ledger.add_goal(Goal::new("Keep me", 10.0, Utc::now()));
        let doc = BackupDocument::from_json(r#"{"darkMode": false, "transactions": []}"#).unwrap();
        assert_eq!(doc.slots(), vec![Slot::Transactions, Slot::DarkMode]);
        doc.apply_to(&mut ledger);
        assert!(!ledger.preferences.dark_mode);
        assert_eq!(ledger.goals.len(), 1);
        assert_eq!(ledger.categories.len(), 8);
    }

    #[test]
    fn null_currency_is_ignored() {
        let doc = BackupDocument::from_json(r#"{"currency": null}"#).unwrap();
        assert!(doc.currency.is_none());
        assert!(doc.slots().is_empty());
    }

    #[test]
    fn rejects_malformed_and_invalid_documents() {
        assert!(matches!(
            BackupDocument::from_json("[1,2"),
            Err(LedgerError::Import(_))
        ));
        let negative = r#"{"transactions":[{"id":"a","amount":-4,"type":"expense","category":"Food","note":"","date":"2024-01-01T00:00:00Z"}]}"#;
        assert!(matches!(
            BackupDocument::from_json(negative),
            Err(LedgerError::Import(_))
        ));
        let bad_currency = r#"{"currency":{"code":"ZZZ","symbol":"z","name":"Zed"}}"#;
        assert!(BackupDocument::from_json(bad_currency).is_err());
    }

    #[test]
    fn rejects_blank_or_repeated_categories_and_ids() {
        let named = |id: &str, name: &str| {
            let mut category = Category::new(name, Default::default(), "#000000");
            category.id = id.into();
            category
        };
        let document = |categories: Vec<Category>| BackupDocument {
            categories: Some(categories),
            ..BackupDocument::default()
        };

        let case_clash = document(vec![named("a", "Food"), named("b", " food ")]);
        assert!(matches!(case_clash.validate(), Err(LedgerError::Import(_))));
        let blank = document(vec![named("a", "Food"), named("b", "  ")]);
        assert!(blank.validate().is_err());
        let same_id = document(vec![named("a", "Food"), named("a", "Rent")]);
        assert!(same_id.validate().is_err());
        assert!(document(vec![named("a", "Food"), named("b", "Rent")])
            .validate()
            .is_ok());

        let snack = Transaction::new(TransactionKind::Expense, 3.0, "Food", Utc::now());
        let twice = BackupDocument {
            transactions: Some(vec![snack.clone(), snack]),
            ..BackupDocument::default()
        };
        assert!(twice.validate().is_err());
    }

    #[test]
    fn export_import_reproduces_collections() {
        let mut ledger = Ledger::new();
        let snack = Transaction::new(TransactionKind::Expense, 12.5, "Food", Utc::now());
        ledger.add_transaction(snack.with_note("samosa"));
        ledger.add_goal(Goal::new("Bike", 900.0, Utc::now()));
        ledger.add_debt(Debt::new("Hamza", 60.0, DebtKind::Borrowed, Utc::now()));
        ledger.preferences.currency = Currency::Usd;

        let json = BackupDocument::from_ledger(&ledger).to_json().unwrap();
        let mut restored = Ledger::new();
        restored.preferences.currency = Currency::Eur;
        BackupDocument::from_json(&json).unwrap().apply_to(&mut restored);
        assert_eq!(restored, ledger);
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(backup_file_name(date), "finstudent_backup_2024-03-09.json");
    }
}
