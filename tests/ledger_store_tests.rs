mod common;

use std::fs;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};
use finstudent_core::{
    analytics,
    core::ledger_store::LedgerStore,
    currency::Currency,
    errors::LedgerError,
    ledger::{default_categories, Debt, DebtKind, Goal, RecordId, Transaction, TransactionKind},
    storage::{self, JsonStorage, Slot, StorageBackend},
    transfer::BackupDocument,
};

use common::{open_store, setup_store, temp_dir};

fn expense(amount: f64, category: &str) -> Transaction {
    let date = Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap();
    Transaction::new(TransactionKind::Expense, amount, category, date)
}

fn income(amount: f64) -> Transaction {
    let date = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    Transaction::new(TransactionKind::Income, amount, "Salary", date)
}

/// JSON storage that refuses its `fail_on`-th write (counting from zero).
struct FlakyStorage {
    inner: JsonStorage,
    writes: AtomicUsize,
    fail_on: usize,
}

impl StorageBackend for FlakyStorage {
    fn read_slot(&self, slot: Slot) -> storage::Result<Option<String>> {
        self.inner.read_slot(slot)
    }

    fn write_slot(&self, slot: Slot, data: &str) -> storage::Result<()> {
        if self.writes.fetch_add(1, Ordering::SeqCst) == self.fail_on {
            return Err(LedgerError::Io(io::Error::new(
                io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.inner.write_slot(slot, data)
    }
}

fn flaky_store(dir: &std::path::Path, fail_on: usize) -> LedgerStore {
    let inner = JsonStorage::new(Some(dir.to_path_buf())).unwrap();
    LedgerStore::open(Box::new(FlakyStorage {
        inner,
        writes: AtomicUsize::new(0),
        fail_on,
    }))
}

#[test]
fn changes_survive_reopening_the_store() {
    let (mut store, dir) = setup_store();
    store.add_transaction(income(1200.0)).unwrap();
    store.add_transaction(expense(80.0, "food")).unwrap();
    store
        .add_goal(Goal::new("Laptop", 900.0, Utc::now()))
        .unwrap();
    store
        .add_debt(Debt::new("Sana", 150.0, DebtKind::Borrowed, Utc::now()))
        .unwrap();
    store.set_currency(Currency::Gbp).unwrap();
    store.set_dark_mode(false).unwrap();

    let reopened = open_store(&dir);
    assert_eq!(reopened.snapshot(), store.snapshot());
    assert!(reopened.warnings().is_empty());
    assert_eq!(reopened.snapshot().transactions[0].category, "Food");
    assert!(dir.join("darkMode.json").exists());
}

#[test]
fn deleting_a_transaction_updates_every_aggregate() {
    let (mut store, _dir) = setup_store();
    store.add_transaction(income(1000.0)).unwrap();
    let lunch = store.add_transaction(expense(300.0, "Food")).unwrap();
    store.add_transaction(expense(200.0, "Transport")).unwrap();

    let ledger = store.snapshot();
    assert_eq!(analytics::net_balance(&ledger.transactions), 500.0);
    assert_eq!(
        analytics::category_breakdown(&ledger.transactions)[0].category,
        "Food"
    );

    store.remove_transaction(&lunch).unwrap();
    let ledger = store.snapshot();
    assert!(ledger.transaction(&lunch).is_none());
    assert_eq!(analytics::net_balance(&ledger.transactions), 800.0);
    let breakdown = analytics::category_breakdown(&ledger.transactions);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].category, "Transport");
    assert_eq!(breakdown[0].percent, 100);
    assert_eq!(
        analytics::health_score(&ledger.transactions),
        analytics::HealthScore::Scored(80)
    );

    assert!(store.remove_transaction(&lunch).is_err());
}

#[test]
fn corrupt_slot_file_falls_back_without_touching_others() {
    let (mut store, dir) = setup_store();
    store
        .add_goal(Goal::new("Trip", 400.0, Utc::now()))
        .unwrap();
    store.add_transaction(income(50.0)).unwrap();
    fs::write(dir.join("transactions.json"), "{definitely not json").unwrap();

    let reopened = open_store(&dir);
    assert!(reopened.snapshot().transactions.is_empty());
    assert_eq!(reopened.snapshot().goals.len(), 1);
    assert_eq!(reopened.warnings().len(), 1);
}

#[test]
fn export_then_import_reproduces_the_ledger() {
    let (mut source, _dir) = setup_store();
    source.add_transaction(income(2500.0)).unwrap();
    source
        .add_transaction(expense(99.5, "Fun").with_note("cinema"))
        .unwrap();
    source
        .add_category("Gym", Default::default(), "#FFFFFF")
        .unwrap();
    let goal = source
        .add_goal(Goal::new("Phone", 300.0, Utc::now()))
        .unwrap();
    source.contribute_to_goal(&goal, 120.0).unwrap();
    source
        .add_debt(Debt::new("Omar", 40.0, DebtKind::Lent, Utc::now()))
        .unwrap();
    source.set_currency(Currency::Eur).unwrap();

    let backup = temp_dir().join("backup.json");
    source.export_file(&backup).unwrap();

    let (mut target, target_dir) = setup_store();
    let slots = target.import_file(&backup).unwrap();
    assert_eq!(slots.len(), 6);
    assert_eq!(target.snapshot(), source.snapshot());
    assert_eq!(open_store(&target_dir).snapshot(), source.snapshot());
}

#[test]
fn rejected_import_changes_nothing() {
    let (mut store, dir) = setup_store();
    store.add_transaction(income(700.0)).unwrap();
    let before = store.snapshot().clone();
    let on_disk = fs::read_to_string(dir.join("transactions.json")).unwrap();

    let backup = temp_dir().join("bad.json");
    fs::write(
        &backup,
        r##"{"transactions":[],"goals":[{"id":"g1","name":"x","targetAmount":0,"currentAmount":0,"deadline":"2024-01-01T00:00:00Z","color":"#000"}]}"##,
    )
    .unwrap();
    assert!(store.import_file(&backup).is_err());
    assert!(store.import_file(&dir.join("missing.json")).is_err());

    assert_eq!(store.snapshot(), &before);
    assert_eq!(
        fs::read_to_string(dir.join("transactions.json")).unwrap(),
        on_disk
    );
}

#[test]
fn browser_backup_keeps_ids_verbatim() {
    let backup = temp_dir().join("finstudent_backup_2024-05-02.json");
    fs::write(
        &backup,
        r##"{
            "transactions": [
                {"id":"k3j9x0abc","amount":250,"type":"expense","category":"Food","note":"chai","date":"2024-05-01T10:00:00.000Z"}
            ],
            "categories": [
                {"id":"cat-1","name":"Food","icon":"Utensils","color":"#FB923C"},
                {"id":"m1","name":"Pets","icon":"Dog","color":"#000000"}
            ],
            "darkMode": false,
            "currency": {"code":"USD","symbol":"$","name":"US Dollar"}
        }"##,
    )
    .unwrap();

    let (mut store, _dir) = setup_store();
    store.import_file(&backup).unwrap();
    let ledger = store.snapshot();
    assert_eq!(ledger.transactions[0].id, RecordId::from("k3j9x0abc"));
    assert_eq!(ledger.categories.len(), 2);
    assert_eq!(ledger.categories[1].icon, Default::default());
    assert_eq!(ledger.preferences.currency, Currency::Usd);
    assert!(!ledger.preferences.dark_mode);
    assert!(ledger.goals.is_empty());
}

#[test]
fn reset_restores_defaults_but_keeps_preferences() {
    let (mut store, dir) = setup_store();
    store.add_transaction(income(10.0)).unwrap();
    store
        .add_category("Books", Default::default(), "#123456")
        .unwrap();
    store
        .add_goal(Goal::new("Bike", 100.0, Utc::now()))
        .unwrap();
    store
        .add_debt(Debt::new("Ali", 5.0, DebtKind::Borrowed, Utc::now()))
        .unwrap();
    store.set_currency(Currency::Jpy).unwrap();

    store.reset().unwrap();
    for ledger in [store.snapshot().clone(), open_store(&dir).snapshot().clone()] {
        assert!(ledger.transactions.is_empty());
        assert!(ledger.goals.is_empty());
        assert!(ledger.debts.is_empty());
        assert_eq!(ledger.categories, default_categories());
        assert_eq!(ledger.preferences.currency, Currency::Jpy);
    }
}

#[test]
fn goal_and_debt_edits_validate_before_saving() {
    let (mut store, dir) = setup_store();
    let goal = store
        .add_goal(Goal::new("Camera", 200.0, Utc::now()))
        .unwrap();
    store
        .update_goal(&goal, |goal| goal.name = "DSLR camera".into())
        .unwrap();
    assert!(store
        .update_goal(&goal, |goal| goal.target_amount = -1.0)
        .is_err());

    let debt = store
        .add_debt(Debt::new("Hina", 60.0, DebtKind::Lent, Utc::now()))
        .unwrap();
    store.update_debt(&debt, |debt| debt.amount = 45.0).unwrap();
    assert!(store
        .update_debt(&debt, |debt| debt.person_name.clear())
        .is_err());
    assert!(store.toggle_debt_paid(&debt).unwrap());

    let reopened = open_store(&dir);
    let saved_goal = reopened.snapshot().goal(&goal).unwrap();
    assert_eq!(saved_goal.name, "DSLR camera");
    assert_eq!(saved_goal.target_amount, 200.0);
    let saved_debt = reopened.snapshot().debt(&debt).unwrap();
    assert_eq!(saved_debt.amount, 45.0);
    assert_eq!(saved_debt.person_name, "Hina");
    assert!(saved_debt.is_paid);
}

#[test]
fn contributions_past_target_are_stored_but_progress_caps() {
    let (mut store, _dir) = setup_store();
    let goal = store
        .add_goal(Goal::new("Concert", 100.0, Utc::now()))
        .unwrap();
    store.contribute_to_goal(&goal, 100.0).unwrap();
    assert_eq!(store.contribute_to_goal(&goal, 50.0).unwrap(), 150.0);
    assert!(store.contribute_to_goal(&goal, 0.0).is_err());

    let saved = store.snapshot().goal(&goal).unwrap();
    assert_eq!(saved.current_amount, 150.0);
    assert_eq!(analytics::goal_progress(saved), 100);
}

#[test]
fn failed_import_write_restores_earlier_slots() {
    let (mut store, dir) = setup_store();
    store.add_transaction(income(700.0)).unwrap();
    drop(store);

    // Transactions are written first, then categories fail.
    let mut store = flaky_store(&dir, 1);
    let document = BackupDocument {
        transactions: Some(vec![expense(5.0, "Food")]),
        categories: Some(default_categories()),
        ..BackupDocument::default()
    };
    assert!(store.import_backup(document).is_err());
    assert_eq!(store.snapshot().transactions[0].amount, 700.0);

    let reopened = open_store(&dir);
    assert!(reopened.warnings().is_empty());
    assert_eq!(reopened.snapshot().transactions.len(), 1);
    assert_eq!(reopened.snapshot().transactions[0].amount, 700.0);
}

#[test]
fn failed_rename_write_keeps_transactions_on_old_name() {
    let (mut store, dir) = setup_store();
    store.add_transaction(expense(30.0, "Food")).unwrap();
    drop(store);

    let mut store = flaky_store(&dir, 1);
    let food = store.snapshot().category_by_name("Food").unwrap().id.clone();
    assert!(store
        .update_category(&food, |category| category.name = "Meals".into())
        .is_err());

    let reopened = open_store(&dir);
    let ledger = reopened.snapshot();
    assert!(ledger.category_by_name("Food").is_some());
    assert_eq!(ledger.transactions[0].category, "Food");
}

#[test]
fn hand_built_import_is_validated() {
    let (mut store, dir) = setup_store();
    let mut refund = expense(50.0, "Food");
    refund.amount = -50.0;
    let negative = BackupDocument {
        transactions: Some(vec![refund]),
        ..BackupDocument::default()
    };
    assert!(store.import_backup(negative).is_err());

    let mut clash = default_categories();
    clash[1].name = "food".into();
    let duplicated = BackupDocument {
        categories: Some(clash),
        ..BackupDocument::default()
    };
    assert!(store.import_backup(duplicated).is_err());

    assert!(store.snapshot().transactions.is_empty());
    assert_eq!(store.snapshot().categories, default_categories());
    assert!(!dir.join("transactions.json").exists());
}

#[test]
fn overflowing_contribution_keeps_goals_loadable() {
    let (mut store, dir) = setup_store();
    let bike = store
        .add_goal(Goal::new("Bike", 100.0, Utc::now()))
        .unwrap();
    store
        .add_goal(Goal::new("Books", 40.0, Utc::now()))
        .unwrap();
    store.contribute_to_goal(&bike, f64::MAX).unwrap();
    assert!(store.contribute_to_goal(&bike, f64::MAX).is_err());

    let reopened = open_store(&dir);
    assert!(reopened.warnings().is_empty());
    assert_eq!(reopened.snapshot().goals.len(), 2);
    assert_eq!(reopened.snapshot().goal(&bike).unwrap().current_amount, f64::MAX);
}
