use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::analytics::{
    self, CategoryShare, DailyTotal, DebtSummary, HealthScore, Totals, DEFAULT_SERIES_DAYS,
};
use crate::ledger::{Goal, Ledger, RecordId, Transaction};

const TOP_CATEGORY_LIMIT: usize = 5;
const GOAL_PREVIEW_LIMIT: usize = 3;
const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgressView {
    pub id: RecordId,
    pub name: String,
    pub current_amount: f64,
    pub target_amount: f64,
    pub percent: u8,
}

impl From<&Goal> for GoalProgressView {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id.clone(),
            name: goal.name.clone(),
            current_amount: goal.current_amount,
            target_amount: goal.target_amount,
            percent: analytics::goal_progress(goal),
        }
    }
}

/// Everything the home screen shows, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub balance: f64,
    pub totals: Totals,
    pub health: HealthScore,
    pub top_categories: Vec<CategoryShare>,
    pub daily: Vec<DailyTotal>,
    pub goals: Vec<GoalProgressView>,
    pub recent: Vec<Transaction>,
    pub debts: DebtSummary,
}

pub struct SummaryService;

impl SummaryService {
    pub fn dashboard<Tz: TimeZone>(ledger: &Ledger, now: &DateTime<Tz>) -> DashboardSummary {
        let transactions = &ledger.transactions;
        let mut top_categories = analytics::category_breakdown(transactions);
        top_categories.truncate(TOP_CATEGORY_LIMIT);
        DashboardSummary {
            balance: analytics::net_balance(transactions),
            totals: analytics::period_totals(transactions),
            health: analytics::health_score(transactions),
            top_categories,
            daily: analytics::daily_series(transactions, DEFAULT_SERIES_DAYS, now),
            goals: ledger
                .goals
                .iter()
                .take(GOAL_PREVIEW_LIMIT)
                .map(GoalProgressView::from)
                .collect(),
            recent: transactions.iter().take(RECENT_LIMIT).cloned().collect(),
            debts: analytics::debt_summary(&ledger.debts),
        }
    }

    pub fn goal_overview(ledger: &Ledger) -> Vec<GoalProgressView> {
        ledger.goals.iter().map(GoalProgressView::from).collect()
    }
}
