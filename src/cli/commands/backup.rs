use std::path::PathBuf;

use crate::cli::args::ParsedArgs;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::{apply_preferences, CliContext, CommandResult};
use crate::transfer::backup_file_name;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write a JSON backup of all data",
            "export [PATH]",
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Restore data from a JSON backup",
            "import <PATH>",
            cmd_import,
        ),
    ]
}

fn cmd_export(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let path = args
        .positional(0)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(backup_file_name(context.now.date_naive())));
    context.store()?.export_file(&path)?;
    output::success(format!("Backup written to {}.", path.display()));
    Ok(())
}

fn cmd_import(context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let path = PathBuf::from(args.required(0, "import <PATH>")?);
    let store = context.store()?;
    let slots = store.import_file(&path)?;
    apply_preferences(store.preferences());
    if slots.is_empty() {
        output::warning("The backup did not contain any data.");
        return Ok(());
    }
    let names: Vec<String> = slots.iter().map(ToString::to_string).collect();
    output::success(format!("Data restored: {}.", names.join(", ")));
    Ok(())
}
