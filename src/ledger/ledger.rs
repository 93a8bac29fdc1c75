use serde::{Deserialize, Serialize};

use crate::config::Preferences;

use super::{
    category::{default_categories, Category},
    common::{Identifiable, RecordId},
    debt::Debt,
    goal::Goal,
    transaction::Transaction,
};

/// Snapshot of every collection owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: default_categories(),
            goals: Vec::new(),
            debts: Vec::new(),
            preferences: Preferences::default(),
        }
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest transactions come first.
    pub fn add_transaction(&mut self, transaction: Transaction) -> RecordId {
        let id = transaction.id.clone();
        self.transactions.insert(0, transaction);
        id
    }

    pub fn add_category(&mut self, category: Category) -> RecordId {
        let id = category.id.clone();
        self.categories.push(category);
        id
    }

    pub fn add_goal(&mut self, goal: Goal) -> RecordId {
        let id = goal.id.clone();
        self.goals.push(goal);
        id
    }

    /// Newest debts come first.
    pub fn add_debt(&mut self, debt: Debt) -> RecordId {
        let id = debt.id.clone();
        self.debts.insert(0, debt);
        id
    }

    pub fn transaction(&self, id: &RecordId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| &txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: &RecordId) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| &txn.id == id)
    }

    pub fn category(&self, id: &RecordId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn category_mut(&mut self, id: &RecordId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| &category.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.matches_name(name))
    }

    pub fn goal(&self, id: &RecordId) -> Option<&Goal> {
        self.goals.iter().find(|goal| &goal.id == id)
    }

    pub fn goal_mut(&mut self, id: &RecordId) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|goal| &goal.id == id)
    }

    pub fn debt(&self, id: &RecordId) -> Option<&Debt> {
        self.debts.iter().find(|debt| &debt.id == id)
    }

    pub fn debt_mut(&mut self, id: &RecordId) -> Option<&mut Debt> {
        self.debts.iter_mut().find(|debt| &debt.id == id)
    }

    pub fn remove_transaction(&mut self, id: &RecordId) -> Option<Transaction> {
        remove_by_id(&mut self.transactions, id)
    }

    pub fn remove_category(&mut self, id: &RecordId) -> Option<Category> {
        remove_by_id(&mut self.categories, id)
    }

    pub fn remove_goal(&mut self, id: &RecordId) -> Option<Goal> {
        remove_by_id(&mut self.goals, id)
    }

    pub fn remove_debt(&mut self, id: &RecordId) -> Option<Debt> {
        remove_by_id(&mut self.debts, id)
    }

    /// Clears history, goals and debts and restores the starter categories.
    /// Preferences are kept.
    pub fn reset(&mut self) {
        self.transactions.clear();
        self.goals.clear();
        self.debts.clear();
        self.categories = default_categories();
    }
}

fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: &RecordId) -> Option<T> {
    let index = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(index))
}

/// Expands a short id prefix to the single matching record id.
pub fn resolve_id<'a, T, I>(items: I, prefix: &str) -> Option<RecordId>
where
    T: Identifiable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return None;
    }
    let mut matches = items
        .into_iter()
        .filter(|item| item.id().as_str().starts_with(prefix));
    let first = matches.next()?;
    if first.id().as_str() == prefix || matches.next().is_none() {
        Some(first.id().clone())
    } else {
        None
    }
}
