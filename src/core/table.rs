//! Command table: name to command mapping with ordered prefix search.

use std::collections::BTreeMap;
use std::ops::Bound;

use bevy::log::debug;

use super::{CommandEntry, ConsoleCommand};

/// Registered console commands, keyed by unique name.
///
/// Names are kept in ascending byte order, so prefix search needs no sort.
///
/// # Examples
///
/// ```ignore
/// let mut table = CommandTable::new();
///
/// table.register(ConsoleCommand::new("quit", |_, world| {
///     world.write_message(AppExit::Success);
///     Ok(())
/// }));
///
/// assert!(table.contains("quit"));
/// assert_eq!(table.prefix_search("q"), vec!["quit"]);
/// ```
#[derive(Debug, Default)]
pub struct CommandTable {
    entries: BTreeMap<Box<str>, CommandEntry>,
}

impl CommandTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// An unknown name creates a new entry. A known name only gains the
    /// handler; the flags and manual of the first registration are kept.
    /// Returns `true` if the name was new.
    pub fn register(&mut self, cmd: ConsoleCommand) -> bool {
        if let Some(existing) = self.entries.get_mut(cmd.name()) {
            debug!(
                "Console: Appending handler #{} to '{}'",
                existing.handlers().len() + 1,
                existing.name()
            );
            existing.add_handler(cmd.into_handler());
            return false;
        }

        let entry = cmd.into_command();
        self.entries.insert(entry.name().into(), entry);
        true
    }

    /// Remove a command and all of its handlers.
    ///
    /// Removing an unknown name is a no-op that returns `None`.
    pub fn unregister(&mut self, name: &str) -> Option<CommandEntry> {
        self.entries.remove(name)
    }

    /// Remove every command.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Exact-match lookup.
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.get(name)
    }

    /// Check if a command exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get the number of commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All names starting with `partial`, ascending. An empty `partial`
    /// matches every name.
    pub fn prefix_search(&self, partial: &str) -> Vec<String> {
        self.prefix_iter(partial)
            .map(|entry| entry.name().to_string())
            .collect()
    }

    /// Iterate over commands whose name starts with `prefix`, ascending.
    pub fn prefix_iter<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a CommandEntry> {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(name, _)| name.starts_with(prefix))
            .map(|(_, entry)| entry)
    }

    /// Iterate over all commands, ascending by name.
    pub fn iter(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.values()
    }
}
