use crate::cli::args::{local_noon, parse_amount, parse_date, ParsedArgs};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::{resolve, CliContext, CliError, CommandResult};
use crate::core::services::SummaryService;
use crate::ledger::{Goal, CONTRIBUTION_PRESETS};

const ADD_USAGE: &str = "add-goal <name> <target> <deadline YYYY-MM-DD> [--color #RRGGBB]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("goals", "List savings goals", "goals", cmd_list),
        CommandEntry::new("add-goal", "Create a savings goal", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "contribute",
            "Add money to a savings goal",
            "contribute <goal-id> <amount>",
            cmd_contribute,
        ),
        CommandEntry::new("delete-goal", "Delete a savings goal", "delete-goal <id>", cmd_delete),
    ]
}

fn cmd_list(context: &mut CliContext, _args: &ParsedArgs) -> CommandResult {
    let ledger = context.store()?.snapshot();
    let currency = ledger.preferences.currency;
    output::section("Savings goals");
    if ledger.goals.is_empty() {
        output::info("  No goals yet.");
        return Ok(());
    }
    for (goal, view) in ledger
        .goals
        .iter()
        .zip(SummaryService::goal_overview(ledger))
    {
        let status = if goal.is_reached() { "  reached" } else { "" };
        output::info(format!(
            "  {}  {:<18} {} {:>3}%  {} / {}  due {}{status}",
            goal.id.short(),
            goal.name,
            output::progress_bar(view.percent.into(), 10),
            view.percent,
            currency.format(goal.current_amount),
            currency.format(goal.target_amount),
            goal.deadline.format("%Y-%m-%d")
        ));
    }
    Ok(())
}

fn cmd_add(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let name = args.required(0, ADD_USAGE)?;
    let target = parse_amount(args.required(1, ADD_USAGE)?)?;
    let deadline = local_noon(parse_date(args.required(2, ADD_USAGE)?)?);
    let mut goal = Goal::new(name, target, deadline);
    if let Some(color) = args.option("color") {
        goal.color = color.to_string();
    }

    let store = context.store()?;
    let id = store.add_goal(goal)?;
    output::success(format!(
        "Created goal `{}` for {} ({}).",
        name.trim(),
        store.preferences().currency.format(target),
        id.short()
    ));
    Ok(())
}

fn cmd_contribute(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let prefix = args.required(0, "contribute <goal-id> <amount>")?;
    let raw_amount = args.positional(1).ok_or_else(|| {
        let presets: Vec<String> = CONTRIBUTION_PRESETS
            .iter()
            .map(|amount| amount.to_string())
            .collect();
        CliError::Usage(format!(
            "usage: contribute <goal-id> <amount> (quick amounts: {})",
            presets.join(", ")
        ))
    })?;
    let amount = parse_amount(raw_amount)?;

    let store = context.store()?;
    let id = resolve(&store.snapshot().goals, prefix, "goal")?;
    let total = store.contribute_to_goal(&id, amount)?;
    let currency = store.preferences().currency;
    if let Some(goal) = store.snapshot().goal(&id) {
        output::success(format!(
            "Saved {} towards `{}`: {} of {}.",
            currency.format(amount),
            goal.name,
            currency.format(total),
            currency.format(goal.target_amount)
        ));
        if goal.is_reached() {
            output::success("Goal reached!");
        }
    }
    Ok(())
}

fn cmd_delete(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let prefix = args.required(0, "delete-goal <id>")?;
    let store = context.store()?;
    let id = resolve(&store.snapshot().goals, prefix, "goal")?;
    let removed = store.remove_goal(&id)?;
    output::success(format!("Deleted goal `{}`.", removed.name));
    Ok(())
}
