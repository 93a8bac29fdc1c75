use crate::analytics::{DailyTotal, HealthScore};
use crate::cli::args::ParsedArgs;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::{CliContext, CommandResult};
use crate::core::services::{DashboardSummary, SummaryService};
use crate::currency::Currency;
use crate::ledger::{Ledger, TransactionKind};

const BAR_WIDTH: usize = 20;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Show balance, health score, weekly spending and previews",
        "summary",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut CliContext, _args: &ParsedArgs) -> CommandResult {
    let now = context.now;
    let ledger = context.store()?.snapshot();
    let currency = ledger.preferences.currency;
    let summary = SummaryService::dashboard(ledger, &now);

    print_overview(&summary, currency);
    print_week(&summary.daily, currency);
    print_top_categories(ledger, &summary, currency);
    print_goals(&summary, currency);
    print_debts(&summary, currency);
    print_recent(ledger, &summary, currency);
    Ok(())
}

fn print_overview(summary: &DashboardSummary, currency: Currency) {
    output::section("Dashboard");
    output::info(format!("  Balance   {}", currency.format(summary.balance)));
    let income = output::signed_money(TransactionKind::Income, summary.totals.income, currency);
    let expense =
        output::signed_money(TransactionKind::Expense, summary.totals.expense, currency);
    output::info(format!(
        "  Income    {}",
        output::tint(TransactionKind::Income, &income)
    ));
    output::info(format!(
        "  Expenses  {}",
        output::tint(TransactionKind::Expense, &expense)
    ));
    let score = match summary.health {
        HealthScore::NoIncome => "--".to_string(),
        HealthScore::Scored(value) => value.to_string(),
    };
    output::info(format!(
        "  Health    {score:>3}  {}",
        summary.health.verdict().message()
    ));
}

fn print_week(daily: &[DailyTotal], currency: Currency) {
    output::section("Last 7 days");
    let peak = daily.iter().map(|day| day.total).fold(0.0_f64, f64::max);
    for day in daily {
        let percent = if peak > 0.0 {
            (day.total / peak * 100.0).round() as u32
        } else {
            0
        };
        output::info(format!(
            "  {} {}  {:>10}",
            day.label,
            output::progress_bar(percent, BAR_WIDTH),
            currency.format(day.total)
        ));
    }
}

fn print_top_categories(ledger: &Ledger, summary: &DashboardSummary, currency: Currency) {
    output::section("Top categories");
    if summary.top_categories.is_empty() {
        output::info("  No spending recorded yet.");
        return;
    }
    for share in &summary.top_categories {
        let icon = ledger
            .category_by_name(&share.category)
            .map(|category| category.icon);
        output::info(format!(
            "  {:<20} {:>10} {:>4}%",
            output::category_label(&share.category, icon),
            currency.format(share.total),
            share.percent
        ));
    }
}

fn print_goals(summary: &DashboardSummary, currency: Currency) {
    output::section("Savings goals");
    if summary.goals.is_empty() {
        output::info("  No goals yet. Add one with `add-goal`.");
        return;
    }
    for goal in &summary.goals {
        output::info(format!(
            "  {:<18} {} {:>3}%  {} / {}",
            goal.name,
            output::progress_bar(goal.percent.into(), 10),
            goal.percent,
            currency.format(goal.current_amount),
            currency.format(goal.target_amount)
        ));
    }
}

fn print_debts(summary: &DashboardSummary, currency: Currency) {
    output::section("Udhaar");
    output::info(format!(
        "  You owe      {}",
        currency.format(summary.debts.owed_by_user)
    ));
    output::info(format!(
        "  Owed to you  {}",
        currency.format(summary.debts.owed_to_user)
    ));
}

fn print_recent(ledger: &Ledger, summary: &DashboardSummary, currency: Currency) {
    output::section("Recent activity");
    if summary.recent.is_empty() {
        output::info("  Nothing recorded yet. Try `add expense 250 Food`.");
        return;
    }
    for txn in &summary.recent {
        let icon = ledger.category_by_name(&txn.category).map(|c| c.icon);
        let amount = output::signed_money(txn.kind, txn.amount, currency);
        output::info(format!(
            "  {}  {:<20} {:>10}  {}",
            txn.id.short(),
            output::category_label(&txn.category, icon),
            output::tint(txn.kind, &amount),
            txn.note
        ));
    }
}
