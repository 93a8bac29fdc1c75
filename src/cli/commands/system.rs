use crate::cli::args::ParsedArgs;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::{CliContext, CommandResult};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
    ]
}

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for entry in registry.list() {
        output::info(format!("  {:<14} {}", entry.name, entry.description));
    }
    output::info("Use `help <command>` for details.");
}

fn cmd_version(_context: &mut CliContext, _args: &ParsedArgs) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("FinStudent {}", meta.version));
    output::info(format!(
        "  Build hash : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::info(format!("  Built at   : {}", meta.timestamp));
    output::info(format!("  Target     : {}", meta.target));
    output::info(format!("  Profile    : {}", meta.profile));
    output::info(format!("  Rustc      : {}", meta.rustc));
    Ok(())
}

fn cmd_help(_context: &mut CliContext, args: &ParsedArgs) -> CommandResult {
    let registry = CommandRegistry::new(super::all_definitions());
    let Some(name) = args.positional(0) else {
        print_overview(&registry);
        return Ok(());
    };
    match registry.get(&name.to_lowercase()) {
        Some(entry) => {
            output::section(format!("Help: {}", entry.name));
            output::info(format!("  {}", entry.description));
            output::info(format!("  Usage: {}", entry.usage));
        }
        None => {
            output::warning(format!("Unknown command `{name}`."));
            if let Some(close) = registry.suggest(name) {
                output::info(format!("Suggestion: `{close}`?"));
            }
        }
    }
    Ok(())
}
