//! Command-line front end: `finstudent_cli <command> [args] [--options]`.

pub mod args;
pub mod commands;
pub mod output;
pub mod registry;

use std::path::PathBuf;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::config::Preferences;
use crate::core::ledger_store::LedgerStore;
use crate::core::services::ServiceError;
use crate::errors::LedgerError;
use crate::ledger::{resolve_id, Identifiable, RecordId};
use crate::storage::JsonStorage;

use self::args::ParsedArgs;
use self::output::OutputPreferences;
use self::registry::CommandRegistry;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    UnknownCommand(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type CommandResult<T = ()> = Result<T, CliError>;

/// State shared by command handlers. The ledger store is opened on first use
/// so that `help` and `version` never touch the data directory.
pub struct CliContext {
    data_dir: Option<PathBuf>,
    store: Option<LedgerStore>,
    pub now: DateTime<Local>,
}

impl CliContext {
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        Self {
            data_dir,
            store: None,
            now: Local::now(),
        }
    }

    pub fn store(&mut self) -> Result<&mut LedgerStore, CliError> {
        let store = match self.store.take() {
            Some(store) => store,
            None => self.open_store()?,
        };
        Ok(self.store.insert(store))
    }

    fn open_store(&self) -> Result<LedgerStore, CliError> {
        let storage = JsonStorage::new(self.data_dir.clone())?;
        tracing::debug!(path = %storage.base_dir().display(), "opening ledger");
        let store = LedgerStore::open(Box::new(storage));
        for problem in store.warnings() {
            output::warning(format!(
                "Saved data could not be read ({problem}); defaults were used."
            ));
        }
        apply_preferences(store.preferences());
        Ok(store)
    }
}

pub(crate) fn apply_preferences(prefs: Preferences) {
    output::set_preferences(OutputPreferences {
        theme: prefs.theme(),
        plain: std::env::var_os("NO_COLOR").is_some(),
    });
}

/// Expands a short id to a record id, rejecting unknown or ambiguous prefixes.
pub(crate) fn resolve<T: Identifiable>(
    items: &[T],
    prefix: &str,
    what: &str,
) -> Result<RecordId, CliError> {
    resolve_id(items, prefix).ok_or_else(|| {
        CliError::Usage(format!(
            "No single {what} matches `{prefix}`; use more characters of the id."
        ))
    })
}

/// Runs one command. `args` excludes the program name.
pub fn run(args: Vec<String>) -> CommandResult {
    let registry = CommandRegistry::new(commands::all_definitions());
    let Some((name, rest)) = args.split_first() else {
        commands::system::print_overview(&registry);
        return Ok(());
    };
    let name = name.to_lowercase();
    let name = match name.as_str() {
        "-h" | "--help" => "help".to_string(),
        "-v" | "--version" => "version".to_string(),
        _ => name,
    };

    let entry = registry.get(&name).ok_or_else(|| {
        let hint = registry
            .suggest(&name)
            .map(|close| format!(" Did you mean `{close}`?"))
            .unwrap_or_default();
        CliError::UnknownCommand(format!(
            "Unknown command `{name}`. Run `help` to see available commands.{hint}"
        ))
    })?;

    let parsed = ParsedArgs::parse(rest);
    let data_dir = parsed.option("data-dir").map(PathBuf::from);
    let mut context = CliContext::new(data_dir);
    tracing::debug!(command = entry.name, "dispatching command");
    (entry.handler)(&mut context, &parsed)
}
