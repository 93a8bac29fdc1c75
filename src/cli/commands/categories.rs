use crate::cli::args::ParsedArgs;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::{CliContext, CommandResult};
use crate::core::services::{CategoryService, ServiceError};
use crate::ledger::{CategoryIcon, Ledger, RecordId, DEFAULT_CATEGORY_COLOR};

const ADD_USAGE: &str = "add-category <name> [--icon KEY] [--color #RRGGBB]";
const RENAME_USAGE: &str = "rename-category <name> <new-name>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("categories", "List categories", "categories", cmd_list),
        CommandEntry::new("add-category", "Create a category", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "rename-category",
            "Rename a category and the transactions filed under it",
            RENAME_USAGE,
            cmd_rename,
        ),
        CommandEntry::new(
            "delete-category",
            "Delete a category with no transactions",
            "delete-category <name>",
            cmd_delete,
        ),
        CommandEntry::new("icons", "List available category icons", "icons", cmd_icons),
    ]
}

fn cmd_list(context: &mut CliContext, _args: &ParsedArgs) -> CommandResult {
    let ledger = context.store()?.snapshot();
    output::section("Categories");
    for category in &ledger.categories {
        output::info(format!(
            "  {:<22} {}  {}",
            output::category_label(&category.name, Some(category.icon)),
            category.color,
            category.id.short()
        ));
    }
    Ok(())
}

fn cmd_add(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let name = args.required(0, ADD_USAGE)?;
    let icon = match args.option("icon") {
        Some(key) => {
            let icon = CategoryIcon::from_key(key);
            if !icon.key().eq_ignore_ascii_case(key.trim()) {
                output::warning(format!(
                    "Unknown icon `{key}`; using `{}`. Run `icons` for the list.",
                    icon.key()
                ));
            }
            icon
        }
        None => CategoryIcon::default(),
    };
    let color = args.option("color").unwrap_or(DEFAULT_CATEGORY_COLOR);

    context.store()?.add_category(name, icon, color)?;
    output::success(format!(
        "Added category {}.",
        output::category_label(name.trim(), Some(icon))
    ));
    Ok(())
}

fn category_id(ledger: &Ledger, name: &str) -> CommandResult<RecordId> {
    let canonical = CategoryService::resolve_name(ledger, name)?;
    let category = ledger
        .category_by_name(canonical)
        .ok_or_else(|| ServiceError::NotFound(format!("Category `{canonical}`")))?;
    Ok(category.id.clone())
}

fn cmd_rename(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let name = args.required(0, RENAME_USAGE)?;
    let new_name = args.required(1, RENAME_USAGE)?;
    let store = context.store()?;
    let id = category_id(store.snapshot(), name)?;
    store.update_category(&id, |category| category.name = new_name.to_string())?;
    output::success(format!("Renamed category to `{}`.", new_name.trim()));
    Ok(())
}

fn cmd_delete(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let name = args.required(0, "delete-category <name>")?;
    let store = context.store()?;
    let id = category_id(store.snapshot(), name)?;
    let removed = store.remove_category(&id)?;
    output::success(format!("Deleted category `{}`.", removed.name));
    Ok(())
}

fn cmd_icons(_context: &mut CliContext, _args: &ParsedArgs) -> CommandResult {
    output::section("Icons");
    for icon in CategoryIcon::ALL {
        output::info(format!("  {} {}", icon.glyph(), icon.key()));
    }
    Ok(())
}
