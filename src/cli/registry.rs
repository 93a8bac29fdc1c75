use std::collections::HashMap;

use strsim::levenshtein;

use super::{args::ParsedArgs, CliContext, CommandResult};

pub type CommandHandler = fn(&mut CliContext, &ParsedArgs) -> CommandResult;

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Clone)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(entries: Vec<CommandEntry>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for entry in entries {
            order.push(entry.name);
            commands.insert(entry.name, entry);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    /// Entries in registration order.
    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    /// Closest registered command name, if any is within a few edits.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        self.order
            .iter()
            .map(|name| (levenshtein(name, input), *name))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut CliContext, _: &ParsedArgs) -> CommandResult {
        Ok(())
    }

    #[test]
    fn keeps_order_and_suggests_near_misses() {
        let registry = CommandRegistry::new(vec![
            CommandEntry::new("summary", "", "", noop),
            CommandEntry::new("goals", "", "", noop),
        ]);
        let names: Vec<_> = registry.list().map(|entry| entry.name).collect();
        assert_eq!(names, vec!["summary", "goals"]);
        assert_eq!(registry.suggest("goal"), Some("goals"));
        assert_eq!(registry.suggest("sumary"), Some("summary"));
        assert_eq!(registry.suggest("xyzzyplugh"), None);
    }
}
