use chrono::Utc;

use crate::analytics::debt_summary;
use crate::cli::args::{local_noon, parse_amount, parse_date, ParsedArgs};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::{resolve, CliContext, CliError, CommandResult};
use crate::ledger::{Debt, DebtKind};

const ADD_USAGE: &str = "add-debt <borrowed|lent> <person> <amount> [--date YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("debts", "List udhaar (borrowed and lent money)", "debts", cmd_list),
        CommandEntry::new("add-debt", "Record money borrowed or lent", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "toggle-debt",
            "Mark a debt paid or unpaid",
            "toggle-debt <id>",
            cmd_toggle,
        ),
        CommandEntry::new(
            "delete-debt",
            "Delete a debt record",
            "delete-debt <id>",
            cmd_delete,
        ),
    ]
}

fn cmd_list(context: &mut CliContext, _args: &ParsedArgs) -> CommandResult {
    let ledger = context.store()?.snapshot();
    let currency = ledger.preferences.currency;
    let summary = debt_summary(&ledger.debts);

    for (kind, title, total) in [
        (DebtKind::Borrowed, "You owe", summary.owed_by_user),
        (DebtKind::Lent, "Owed to you", summary.owed_to_user),
    ] {
        output::section(format!("{title}: {}", currency.format(total)));
        let mut any = false;
        for debt in ledger.debts.iter().filter(|debt| debt.kind == kind) {
            any = true;
            let status = if debt.is_paid { "[paid]" } else { "" };
            output::info(format!(
                "  {}  {:<18} {:>10}  {}  {status}",
                debt.id.short(),
                debt.person_name,
                currency.format(debt.amount),
                debt.date.format("%Y-%m-%d")
            ));
        }
        if !any {
            output::info("  Nothing here.");
        }
    }
    output::info(format!("\nNet position: {}", currency.format(summary.net())));
    Ok(())
}

fn cmd_add(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let raw_kind = args.required(0, ADD_USAGE)?;
    let kind = DebtKind::parse(raw_kind)
        .ok_or_else(|| CliError::Usage(format!("`{raw_kind}` is not `borrowed` or `lent`")))?;
    let person = args.required(1, ADD_USAGE)?;
    let amount = parse_amount(args.required(2, ADD_USAGE)?)?;
    let date = match args.option("date") {
        Some(raw) => local_noon(parse_date(raw)?),
        None => context.now.with_timezone(&Utc),
    };

    let store = context.store()?;
    let id = store.add_debt(Debt::new(person, amount, kind, date))?;
    output::success(format!(
        "Recorded {} {kind} with {} ({}).",
        store.preferences().currency.format(amount),
        person.trim(),
        id.short()
    ));
    Ok(())
}

fn cmd_toggle(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let prefix = args.required(0, "toggle-debt <id>")?;
    let store = context.store()?;
    let id = resolve(&store.snapshot().debts, prefix, "debt")?;
    let paid = store.toggle_debt_paid(&id)?;
    let state = if paid { "paid" } else { "unpaid" };
    output::success(format!("Marked debt {} as {state}.", id.short()));
    Ok(())
}

fn cmd_delete(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let prefix = args.required(0, "delete-debt <id>")?;
    let store = context.store()?;
    let id = resolve(&store.snapshot().debts, prefix, "debt")?;
    let removed = store.remove_debt(&id)?;
    output::success(format!(
        "Deleted debt with {} ({}).",
        removed.person_name,
        store.preferences().currency.format(removed.amount)
    ));
    Ok(())
}
