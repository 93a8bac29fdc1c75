//! Derived views over a ledger snapshot.
//!
//! Everything here is a pure function of its inputs and is recomputed in full
//! on each call. All sums are all-time; nothing is filtered by period unless a
//! function says so. Empty inputs produce zero-valued results.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Weekday};
use serde::Serialize;

use crate::ledger::{Debt, DebtKind, Goal, Transaction, TransactionKind};

pub const DEFAULT_SERIES_DAYS: usize = 7;

/// Income minus expense over every transaction.
pub fn net_balance(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::signed_amount).sum()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Totals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// All-time income and expense sums.
pub fn period_totals(transactions: &[Transaction]) -> Totals {
    transactions
        .iter()
        .fold(Totals::default(), |mut totals, txn| {
            match txn.kind {
                TransactionKind::Income => totals.income += txn.amount,
                TransactionKind::Expense => totals.expense += txn.amount,
            }
            totals
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Whole percent of all expenses; 0 when there are no expenses.
    pub percent: u32,
}

/// Expense totals per category name, largest first. Ties keep first-seen order.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64)> = Vec::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        match index.get(txn.category.as_str()) {
            Some(&slot) => groups[slot].1 += txn.amount,
            None => {
                index.insert(txn.category.as_str(), groups.len());
                groups.push((txn.category.as_str(), txn.amount));
            }
        }
    }
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total_expense: f64 = groups.iter().map(|(_, total)| total).sum();
    groups
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category: category.to_string(),
            total,
            percent: percent_of(total, total_expense),
        })
        .collect()
}

fn percent_of(part: f64, whole: f64) -> u32 {
    if whole > 0.0 {
        (part / whole * 100.0).round().max(0.0) as u32
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub label: &'static str,
    pub total: f64,
}

/// Expense totals for the `days` calendar days ending on `now`'s date,
/// oldest first. Days are taken in `now`'s timezone.
pub fn daily_series<Tz: TimeZone>(
    transactions: &[Transaction],
    days: usize,
    now: &DateTime<Tz>,
) -> Vec<DailyTotal> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut per_day: HashMap<NaiveDate, f64> = HashMap::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        let day = txn.date.with_timezone(&tz).date_naive();
        *per_day.entry(day).or_insert(0.0) += txn.amount;
    }

    // Newest first; the series stops where the calendar runs out.
    let mut dates: Vec<NaiveDate> = (0..days)
        .map_while(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .collect();
    dates.reverse();

    dates
        .into_iter()
        .map(|date| DailyTotal {
            date,
            label: weekday_initial(date.weekday()),
            total: per_day.get(&date).copied().unwrap_or(0.0),
        })
        .collect()
}

pub fn weekday_initial(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "M",
        Weekday::Tue | Weekday::Thu => "T",
        Weekday::Wed => "W",
        Weekday::Fri => "F",
        Weekday::Sat | Weekday::Sun => "S",
    }
}

/// Share of income kept, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthScore {
    /// No income recorded yet.
    NoIncome,
    Scored(u8),
}

impl HealthScore {
    pub fn value(self) -> u8 {
        match self {
            HealthScore::NoIncome => 0,
            HealthScore::Scored(score) => score,
        }
    }

    pub fn verdict(self) -> HealthVerdict {
        match self {
            HealthScore::NoIncome => HealthVerdict::StartTracking,
            HealthScore::Scored(score) if score > 50 => HealthVerdict::Thriving,
            HealthScore::Scored(score) if score > 0 => HealthVerdict::OnTrack,
            HealthScore::Scored(_) => HealthVerdict::Overspending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthVerdict {
    Thriving,
    OnTrack,
    /// Expenses have reached or passed income.
    Overspending,
    StartTracking,
}

impl HealthVerdict {
    pub fn message(self) -> &'static str {
        match self {
            HealthVerdict::Thriving => "Impressive! You're saving more than half of what you earn.",
            HealthVerdict::OnTrack => "You're on the right track, but watch those small expenses.",
            HealthVerdict::Overspending => {
                "Your spending has caught up with your income. Time to cut back."
            }
            HealthVerdict::StartTracking => "Start tracking more income to see your score grow!",
        }
    }
}

pub fn health_score(transactions: &[Transaction]) -> HealthScore {
    let totals = period_totals(transactions);
    if totals.income > 0.0 {
        let raw = (totals.net() / totals.income * 100.0).round();
        HealthScore::Scored(raw.clamp(0.0, 100.0) as u8)
    } else {
        HealthScore::NoIncome
    }
}

/// Display progress toward a goal, clamped to 100. A non-positive target reads as 0.
pub fn goal_progress(goal: &Goal) -> u8 {
    if goal.target_amount > 0.0 && goal.current_amount.is_finite() {
        let raw = (goal.current_amount / goal.target_amount * 100.0).round();
        raw.clamp(0.0, 100.0) as u8
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DebtSummary {
    /// Outstanding amounts the user borrowed.
    pub owed_by_user: f64,
    /// Outstanding amounts the user lent out.
    pub owed_to_user: f64,
}

impl DebtSummary {
    pub fn net(&self) -> f64 {
        self.owed_to_user - self.owed_by_user
    }
}

/// Sums unpaid debts by direction. Paid debts are ignored.
pub fn debt_summary(debts: &[Debt]) -> DebtSummary {
    debts
        .iter()
        .filter(|debt| debt.is_outstanding())
        .fold(DebtSummary::default(), |mut summary, debt| {
            match debt.kind {
                DebtKind::Borrowed => summary.owed_by_user += debt.amount,
                DebtKind::Lent => summary.owed_to_user += debt.amount,
            }
            summary
        })
}

/// Transaction list filter: optional kind plus a case-insensitive search over
/// note and category.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub search: String,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || txn.note.to_lowercase().contains(&needle)
            || txn.category.to_lowercase().contains(&needle)
    }
}

pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    transactions.iter().filter(|txn| filter.matches(txn)).collect()
}

/// Groups transactions by calendar day in `tz`, keeping input order both for
/// the groups and within each group.
pub fn group_by_day<'a, Tz: TimeZone>(
    transactions: &[&'a Transaction],
    tz: &Tz,
) -> Vec<(NaiveDate, Vec<&'a Transaction>)> {
    let mut groups: Vec<(NaiveDate, Vec<&'a Transaction>)> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    for &txn in transactions {
        let day = txn.date.with_timezone(tz).date_naive();
        match index.get(&day) {
            Some(&slot) => groups[slot].1.push(txn),
            None => {
                index.insert(day, groups.len());
                groups.push((day, vec![txn]));
            }
        }
    }
    groups
}
