use crate::cli::args::ParsedArgs;
use crate::cli::registry::CommandEntry;
use crate::cli::{apply_preferences, output, CliContext, CliError, CommandResult};
use crate::config::Theme;
use crate::currency::Currency;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "currency",
            "Show or change the display currency",
            "currency [CODE]",
            cmd_currency,
        ),
        CommandEntry::new(
            "theme",
            "Show or change the color theme",
            "theme [dark|light]",
            cmd_theme,
        ),
        CommandEntry::new(
            "reset",
            "Erase transactions, goals and debts",
            "reset --yes",
            cmd_reset,
        ),
    ]
}

fn cmd_currency(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let store = context.store()?;
    let Some(code) = args.positional(0) else {
        let current = store.preferences().currency;
        output::section("Currencies");
        for currency in Currency::ALL {
            let marker = if currency == current { "*" } else { " " };
            output::info(format!("  {marker} {currency}"));
        }
        return Ok(());
    };

    let currency = Currency::from_code(code).ok_or_else(|| {
        let codes: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
        CliError::Usage(format!(
            "Unknown currency `{code}`. Choose one of: {}",
            codes.join(", ")
        ))
    })?;
    store.set_currency(currency)?;
    output::success(format!("Amounts are now shown in {currency}."));
    Ok(())
}

fn cmd_theme(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let store = context.store()?;
    let Some(raw) = args.positional(0) else {
        let theme = match store.preferences().theme() {
            Theme::Dark => "dark",
            Theme::Light => "light",
        };
        output::info(format!("Theme: {theme}"));
        return Ok(());
    };

    let theme = Theme::parse(raw)
        .ok_or_else(|| CliError::Usage(format!("`{raw}` is not `dark` or `light`")))?;
    store.set_dark_mode(theme.is_dark())?;
    apply_preferences(store.preferences());
    output::success(format!(
        "Switched to {} mode.",
        if theme.is_dark() { "dark" } else { "light" }
    ));
    Ok(())
}

fn cmd_reset(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    if !args.flag("yes") {
        return Err(CliError::Usage(
            "This erases all transactions, goals and debts. Re-run with `reset --yes`.".into(),
        ));
    }
    context.store()?.reset()?;
    output::success("All data cleared. Default categories restored.");
    Ok(())
}
