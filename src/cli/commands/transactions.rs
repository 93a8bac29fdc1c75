use chrono::{Local, Utc};

use crate::analytics::{filter_transactions, group_by_day, TransactionFilter};
use crate::cli::args::{local_noon, parse_amount, parse_date, ParsedArgs};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::{resolve, CliContext, CliError, CommandResult};
use crate::ledger::{Transaction, TransactionKind};

const ADD_USAGE: &str =
    "add <income|expense> <amount> <category> [--note TEXT] [--date YYYY-MM-DD]";
const EDIT_USAGE: &str =
    "edit <id> [--amount N] [--category NAME] [--note TEXT] [--date YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record income or an expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "list",
            "List transactions grouped by day",
            "list [--type income|expense] [--search TEXT]",
            cmd_list,
        ),
        CommandEntry::new("edit", "Change a recorded transaction", EDIT_USAGE, cmd_edit),
        CommandEntry::new("delete", "Delete a transaction", "delete <id>", cmd_delete),
    ]
}

fn parse_kind(raw: &str) -> Result<TransactionKind, CliError> {
    TransactionKind::parse(raw)
        .ok_or_else(|| CliError::Usage(format!("`{raw}` is not `income` or `expense`")))
}

fn cmd_add(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let kind = parse_kind(args.required(0, ADD_USAGE)?)?;
    let amount = parse_amount(args.required(1, ADD_USAGE)?)?;
    let category = args.required(2, ADD_USAGE)?;
    let date = match args.option("date") {
        Some(raw) => local_noon(parse_date(raw)?),
        None => context.now.with_timezone(&Utc),
    };
    let mut transaction = Transaction::new(kind, amount, category, date);
    if let Some(note) = args.option("note") {
        transaction = transaction.with_note(note);
    }

    let store = context.store()?;
    let id = store.add_transaction(transaction)?;
    let currency = store.preferences().currency;
    let recorded = store
        .snapshot()
        .transaction(&id)
        .map(|txn| txn.category.clone())
        .unwrap_or_default();
    output::success(format!(
        "Recorded {kind} of {} in {recorded} ({}).",
        currency.format(amount),
        id.short()
    ));
    Ok(())
}

fn cmd_list(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let kind = match args.option("type") {
        Some(raw) if !raw.eq_ignore_ascii_case("all") => Some(parse_kind(raw)?),
        _ => None,
    };
    let filter = TransactionFilter {
        kind,
        search: args.option("search").unwrap_or_default().to_string(),
    };

    let ledger = context.store()?.snapshot();
    let currency = ledger.preferences.currency;
    let matches = filter_transactions(&ledger.transactions, &filter);
    if matches.is_empty() {
        output::info("No transactions found.");
        return Ok(());
    }

    for (day, transactions) in group_by_day(&matches, &Local) {
        output::section(day.format("%a %d %b %Y"));
        for txn in transactions {
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
    Ok(())
}

fn cmd_edit(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let prefix = args.required(0, EDIT_USAGE)?;
    let amount = args.option("amount").map(parse_amount).transpose()?;
    let date = args
        .option("date")
        .map(|raw| parse_date(raw).map(local_noon))
        .transpose()?;
    let category = args.option("category");
    let note = args.option("note");
    if amount.is_none() && date.is_none() && category.is_none() && note.is_none() {
        return Err(CliError::Usage(format!("nothing to change; usage: {EDIT_USAGE}")));
    }

    let store = context.store()?;
    let id = resolve(&store.snapshot().transactions, prefix, "transaction")?;
    store.update_transaction(&id, |txn| {
        if let Some(amount) = amount {
            txn.amount = amount;
        }
        if let Some(date) = date {
            txn.date = date;
        }
        if let Some(category) = category {
            txn.category = category.to_string();
        }
        if let Some(note) = note {
            txn.note = note.to_string();
        }
    })?;
    output::success(format!("Updated transaction {}.", id.short()));
    Ok(())
}

fn cmd_delete(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let prefix = args.required(0, "delete <id>")?;
    let store = context.store()?;
    let id = resolve(&store.snapshot().transactions, prefix, "transaction")?;
    let removed = store.remove_transaction(&id)?;
    let currency = store.preferences().currency;
    output::success(format!(
        "Deleted {} of {} in {}.",
        removed.kind,
        currency.format(removed.amount),
        removed.category
    ));
    Ok(())
}
