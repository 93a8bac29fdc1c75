use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::Preferences;
use crate::core::services::{
    CategoryService, DebtService, GoalService, ServiceResult, TransactionService,
};
use crate::currency::Currency;
use crate::errors::LedgerError;
use crate::ledger::{
    default_categories, Category, CategoryIcon, Debt, Goal, Ledger, RecordId, Transaction,
};
use crate::storage::{Slot, StorageBackend};
use crate::transfer::{self, BackupDocument};

/// Emitted after a mutation has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub slots: Vec<Slot>,
}

pub type Subscriber = Box<dyn Fn(&StoreEvent, &Ledger) + Send + Sync>;

/// Owns the ledger snapshot and keeps it in step with storage.
///
/// Every mutation runs against a draft copy, writes the affected slots, and
/// only then replaces the live snapshot. A failed validation or write leaves
/// the snapshot untouched.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    subscribers: Vec<Subscriber>,
    warnings: Vec<String>,
}

impl LedgerStore {
    /// Loads every slot. Unreadable or malformed slots fall back to defaults
    /// and are reported through [`LedgerStore::warnings`].
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let mut warnings = Vec::new();
        let defaults = Preferences::default();
        let ledger = Ledger {
            transactions: load_slot(storage.as_ref(), Slot::Transactions, &mut warnings)
                .unwrap_or_default(),
            categories: load_slot(storage.as_ref(), Slot::Categories, &mut warnings)
                .unwrap_or_else(default_categories),
            goals: load_slot(storage.as_ref(), Slot::Goals, &mut warnings).unwrap_or_default(),
            debts: load_slot(storage.as_ref(), Slot::Debts, &mut warnings).unwrap_or_default(),
            preferences: Preferences {
                currency: load_slot(storage.as_ref(), Slot::Currency, &mut warnings)
                    .unwrap_or(defaults.currency),
                dark_mode: load_slot(storage.as_ref(), Slot::DarkMode, &mut warnings)
                    .unwrap_or(defaults.dark_mode),
            },
        };
        info!(
            transactions = ledger.transactions.len(),
            categories = ledger.categories.len(),
            goals = ledger.goals.len(),
            debts = ledger.debts.len(),
            "ledger loaded"
        );
        Self {
            ledger,
            storage,
            subscribers: Vec::new(),
            warnings,
        }
    }

    pub fn snapshot(&self) -> &Ledger {
        &self.ledger
    }

    pub fn preferences(&self) -> Preferences {
        self.ledger.preferences
    }

    /// Problems found while loading; empty when every slot was readable.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&StoreEvent, &Ledger) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> ServiceResult<RecordId> {
        let id = self.mutate(&[Slot::Transactions], |ledger| {
            TransactionService::add(ledger, transaction)
        })?;
        info!(%id, "transaction added");
        Ok(id)
    }

    pub fn remove_transaction(&mut self, id: &RecordId) -> ServiceResult<Transaction> {
        let removed = self.mutate(&[Slot::Transactions], |ledger| {
            TransactionService::remove(ledger, id)
        })?;
        info!(%id, "transaction removed");
        Ok(removed)
    }

    pub fn update_transaction<F>(&mut self, id: &RecordId, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Transaction),
    {
        self.mutate(&[Slot::Transactions], |ledger| {
            TransactionService::update(ledger, id, mutator)
        })?;
        debug!(%id, "transaction updated");
        Ok(())
    }

    pub fn add_category(
        &mut self,
        name: &str,
        icon: CategoryIcon,
        color: &str,
    ) -> ServiceResult<RecordId> {
        let id = self.mutate(&[Slot::Categories], |ledger| {
            CategoryService::add(ledger, name, icon, color)
        })?;
        info!(%id, name = name.trim(), "category added");
        Ok(id)
    }

    /// Renames cascade to transactions, so both slots are written.
    pub fn update_category<F>(&mut self, id: &RecordId, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Category),
    {
        self.mutate(&[Slot::Categories, Slot::Transactions], |ledger| {
            CategoryService::update(ledger, id, mutator)
        })?;
        debug!(%id, "category updated");
        Ok(())
    }

    pub fn remove_category(&mut self, id: &RecordId) -> ServiceResult<Category> {
        let removed = self.mutate(&[Slot::Categories], |ledger| {
            CategoryService::remove(ledger, id)
        })?;
        info!(%id, name = %removed.name, "category removed");
        Ok(removed)
    }

    pub fn add_goal(&mut self, goal: Goal) -> ServiceResult<RecordId> {
        let id = self.mutate(&[Slot::Goals], |ledger| GoalService::add(ledger, goal))?;
        info!(%id, "goal added");
        Ok(id)
    }

    /// Returns the goal's new saved total.
    pub fn contribute_to_goal(&mut self, id: &RecordId, amount: f64) -> ServiceResult<f64> {
        let total = self.mutate(&[Slot::Goals], |ledger| {
            GoalService::contribute(ledger, id, amount)
        })?;
        info!(%id, amount, total, "goal contribution recorded");
        Ok(total)
    }

    pub fn update_goal<F>(&mut self, id: &RecordId, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Goal),
    {
        self.mutate(&[Slot::Goals], |ledger| GoalService::update(ledger, id, mutator))?;
        debug!(%id, "goal updated");
        Ok(())
    }

    pub fn remove_goal(&mut self, id: &RecordId) -> ServiceResult<Goal> {
        let removed = self.mutate(&[Slot::Goals], |ledger| GoalService::remove(ledger, id))?;
        info!(%id, "goal removed");
        Ok(removed)
    }

    pub fn add_debt(&mut self, debt: Debt) -> ServiceResult<RecordId> {
        let id = self.mutate(&[Slot::Debts], |ledger| DebtService::add(ledger, debt))?;
        info!(%id, "debt added");
        Ok(id)
    }

    /// Returns the new paid flag.
    pub fn toggle_debt_paid(&mut self, id: &RecordId) -> ServiceResult<bool> {
        let paid = self.mutate(&[Slot::Debts], |ledger| DebtService::toggle_paid(ledger, id))?;
        info!(%id, paid, "debt status toggled");
        Ok(paid)
    }

    pub fn update_debt<F>(&mut self, id: &RecordId, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Debt),
    {
        self.mutate(&[Slot::Debts], |ledger| DebtService::update(ledger, id, mutator))?;
        debug!(%id, "debt updated");
        Ok(())
    }

    pub fn remove_debt(&mut self, id: &RecordId) -> ServiceResult<Debt> {
        let removed = self.mutate(&[Slot::Debts], |ledger| DebtService::remove(ledger, id))?;
        info!(%id, "debt removed");
        Ok(removed)
    }

    pub fn set_currency(&mut self, currency: Currency) -> ServiceResult<()> {
        self.mutate(&[Slot::Currency], |ledger| {
            ledger.preferences.currency = currency;
            Ok(())
        })?;
        info!(code = currency.code(), "currency changed");
        Ok(())
    }

    pub fn set_dark_mode(&mut self, dark_mode: bool) -> ServiceResult<()> {
        self.mutate(&[Slot::DarkMode], |ledger| {
            ledger.preferences.dark_mode = dark_mode;
            Ok(())
        })?;
        info!(dark_mode, "theme changed");
        Ok(())
    }

    /// Wipes history, goals and debts and restores the starter categories.
    pub fn reset(&mut self) -> ServiceResult<()> {
        self.mutate(
            &[Slot::Transactions, Slot::Categories, Slot::Goals, Slot::Debts],
            |ledger| {
                ledger.reset();
                Ok(())
            },
        )?;
        warn!("ledger reset to defaults");
        Ok(())
    }

    pub fn export_backup(&self) -> BackupDocument {
        BackupDocument::from_ledger(&self.ledger)
    }

    /// Validates `document`, then replaces the collections it carries.
    /// Returns the slots written.
    pub fn import_backup(&mut self, document: BackupDocument) -> ServiceResult<Vec<Slot>> {
        document.validate()?;
        let slots = document.slots();
        self.mutate(&slots, |ledger| {
            document.apply_to(ledger);
            Ok(())
        })?;
        info!(slots = slots.len(), "backup imported");
        Ok(slots)
    }

    pub fn export_file(&self, path: &Path) -> ServiceResult<()> {
        transfer::export_to_path(&self.export_backup(), path)?;
        info!(path = %path.display(), "backup exported");
        Ok(())
    }

    /// Reads, validates, then applies a backup file. On any failure the
    /// ledger is unchanged.
    pub fn import_file(&mut self, path: &Path) -> ServiceResult<Vec<Slot>> {
        let document = transfer::read_backup_file(path).map_err(|err| {
            warn!(path = %path.display(), error = %err, "backup rejected");
            err
        })?;
        self.import_backup(document)
    }

    fn mutate<T, F>(&mut self, slots: &[Slot], op: F) -> ServiceResult<T>
    where
        F: FnOnce(&mut Ledger) -> ServiceResult<T>,
    {
        let mut draft = self.ledger.clone();
        let output = op(&mut draft)?;
        let encoded = slots
            .iter()
            .map(|&slot| Ok((slot, encode_slot(&draft, slot)?)))
            .collect::<Result<Vec<_>, LedgerError>>()?;
        for (written, (slot, data)) in encoded.iter().enumerate() {
            if let Err(err) = self.storage.write_slot(*slot, data) {
                warn!(%slot, error = %err, "slot write failed; restoring earlier slots");
                self.restore_slots(&slots[..written]);
                return Err(err.into());
            }
        }
        self.ledger = draft;
        if !slots.is_empty() {
            let event = StoreEvent {
                slots: slots.to_vec(),
            };
            for subscriber in &self.subscribers {
                subscriber(&event, &self.ledger);
            }
        }
        Ok(output)
    }

    /// Rewrites `slots` from the live snapshot after a failed multi-slot write.
    fn restore_slots(&self, slots: &[Slot]) {
        for &slot in slots {
            let restored = encode_slot(&self.ledger, slot)
                .and_then(|data| self.storage.write_slot(slot, &data));
            if let Err(err) = restored {
                warn!(%slot, error = %err, "unable to restore slot after failed write");
            }
        }
    }
}

fn encode_slot(ledger: &Ledger, slot: Slot) -> Result<String, LedgerError> {
    let json = match slot {
        Slot::Transactions => serde_json::to_string(&ledger.transactions)?,
        Slot::Categories => serde_json::to_string(&ledger.categories)?,
        Slot::Goals => serde_json::to_string(&ledger.goals)?,
        Slot::Debts => serde_json::to_string(&ledger.debts)?,
        Slot::Currency => serde_json::to_string(&ledger.preferences.currency)?,
        Slot::DarkMode => serde_json::to_string(&ledger.preferences.dark_mode)?,
    };
    Ok(json)
}

fn load_slot<T: DeserializeOwned>(
    storage: &dyn StorageBackend,
    slot: Slot,
    warnings: &mut Vec<String>,
) -> Option<T> {
    let data = match storage.read_slot(slot) {
        Ok(data) => data?,
        Err(err) => {
            warn!(%slot, error = %err, "unable to read slot; using defaults");
            warnings.push(format!("{slot}: {err}"));
            return None;
        }
    };
    match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(%slot, error = %err, "malformed slot; using defaults");
            warnings.push(format!("{slot}: {err}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{DebtKind, TransactionKind};
    use crate::storage::MemoryStorage;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    fn store() -> LedgerStore {
        LedgerStore::open(Box::new(MemoryStorage::new()))
    }

    #[test]
    fn fresh_store_uses_defaults() {
        let store = store();
        assert!(store.snapshot().transactions.is_empty());
        assert_eq!(store.snapshot().categories, default_categories());
        assert_eq!(store.preferences(), Preferences::default());
        assert!(store.warnings().is_empty());
    }

    #[test]
    fn corrupt_slots_fall_back_with_warnings() {
        let storage = MemoryStorage::new()
            .with_slot(Slot::Transactions, "{oops")
            .with_slot(Slot::DarkMode, "false");
        let store = LedgerStore::open(Box::new(storage));
        assert!(store.snapshot().transactions.is_empty());
        assert!(!store.preferences().dark_mode);
        assert_eq!(store.warnings().len(), 1);
        assert!(store.warnings()[0].starts_with("transactions"));
    }

    #[test]
    fn failed_validation_leaves_snapshot_untouched() {
        let mut store = store();
        let before = store.snapshot().clone();
        let bad = Transaction::new(TransactionKind::Expense, -1.0, "Food", Utc::now());
        assert!(store.add_transaction(bad).is_err());
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn subscribers_see_each_persisted_change() {
        let mut store = store();
        let seen: Arc<Mutex<Vec<Vec<Slot>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |event, _| sink.lock().unwrap().push(event.slots.clone()));

        let id = store
            .add_debt(Debt::new("Ayesha", 40.0, DebtKind::Lent, Utc::now()))
            .unwrap();
        store.toggle_debt_paid(&id).unwrap();
        store.set_currency(Currency::Inr).unwrap();
        let _ = store.remove_debt(&RecordId::from("missing"));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![vec![Slot::Debts], vec![Slot::Debts], vec![Slot::Currency]]
        );
    }

    #[test]
    fn import_only_replaces_present_collections() {
        let mut store = store();
        store
            .add_goal(Goal::new("Console", 500.0, Utc::now()))
            .unwrap();
        let document = BackupDocument {
            transactions: Some(vec![Transaction::new(
                TransactionKind::Income,
                900.0,
                "Salary",
                Utc::now(),
            )]),
            ..BackupDocument::default()
        };
        let slots = store.import_backup(document).unwrap();
        assert_eq!(slots, vec![Slot::Transactions]);
        assert_eq!(store.snapshot().transactions.len(), 1);
        assert_eq!(store.snapshot().goals.len(), 1);
    }

    #[test]
    fn category_rename_writes_both_slots() {
        let mut store = store();
        store
            .add_transaction(Transaction::new(
                TransactionKind::Expense,
                40.0,
                "Food",
                Utc::now(),
            ))
            .unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |event, _| sink.lock().unwrap().push(event.slots.clone()));

        let food = store.snapshot().category_by_name("Food").unwrap().id.clone();
        store
            .update_category(&food, |category| category.name = "Meals".into())
            .unwrap();
        assert!(store.remove_category(&food).is_err());

        assert_eq!(store.snapshot().transactions[0].category, "Meals");
        assert_eq!(
            *seen.lock().unwrap(),
            vec![vec![Slot::Categories, Slot::Transactions]]
        );
    }
}
