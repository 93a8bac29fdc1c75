pub mod backup;
pub mod categories;
pub mod dashboard;
pub mod debts;
pub mod goals;
pub mod settings;
pub mod system;
pub mod transactions;

use super::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(dashboard::definitions());
    commands.extend(transactions::definitions());
    commands.extend(categories::definitions());
    commands.extend(goals::definitions());
    commands.extend(debts::definitions());
    commands.extend(settings::definitions());
    commands.extend(backup::definitions());
    commands.extend(system::definitions());
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn command_names_are_unique() {
        let definitions = all_definitions();
        let names: HashSet<_> = definitions.iter().map(|entry| entry.name).collect();
        assert_eq!(names.len(), definitions.len());
        assert!(names.contains("summary"));
        assert!(names.contains("import"));
    }
}
