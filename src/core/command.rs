//! Console commands and the context their handlers run in.

use std::io::{self, Write};
use std::time::SystemTime;

use bevy::prelude::*;
use thiserror::Error;

use super::{CommandTable, History, Scrollback, LEVEL_INFO};

/// Fallback manual line for commands registered without one.
pub const NO_DESCRIPTION: &str = "No description";

/// Failure reported by a command handler.
///
/// The dispatcher classifies these for reporting; none of them ever
/// propagates past [`Console::submit`](super::Console::submit).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The handler asked for an argument that was not given.
    #[error("argument {} was requested but only {count} given", .index + 1)]
    ArgumentCount { index: usize, count: usize },
    /// An argument could not be parsed into the expected type.
    #[error("argument {} ('{value}') is not a valid {expected}", .index + 1)]
    ArgumentFormat {
        index: usize,
        value: String,
        expected: &'static str,
    },
    /// Any other handler failure.
    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    /// Create a generic handler failure.
    pub fn failed(message: impl Into<String>) -> Self {
        CommandError::Failed(message.into())
    }
}

/// Result returned by command handlers.
pub type CommandResult = Result<(), CommandError>;

/// Arguments passed to a command handler.
#[derive(Debug, Clone)]
pub struct CommandArgs<'a> {
    /// The trimmed input line.
    raw: &'a str,
    /// Parsed arguments (excluding command name).
    args: Vec<&'a str>,
}

impl<'a> CommandArgs<'a> {
    /// Create new command args from a raw string and parsed arguments.
    pub fn new(raw: &'a str, args: Vec<&'a str>) -> Self {
        Self { raw, args }
    }

    /// Get the raw command string.
    #[inline]
    pub fn raw(&self) -> &str {
        self.raw
    }

    /// Get the number of arguments.
    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Check if there are no arguments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Get an argument by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// Get a required argument.
    pub fn arg(&self, index: usize) -> Result<&'a str, CommandError> {
        self.get(index).ok_or(CommandError::ArgumentCount {
            index,
            count: self.args.len(),
        })
    }

    /// Parse a required argument as a specific type.
    pub fn parse<T: std::str::FromStr>(&self, index: usize) -> Result<T, CommandError> {
        let value = self.arg(index)?;
        value.parse().map_err(|_| CommandError::ArgumentFormat {
            index,
            value: value.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Parse an optional argument, falling back to `default` when absent.
    ///
    /// A present but malformed argument is still an error.
    pub fn parse_or<T: std::str::FromStr>(&self, index: usize, default: T) -> Result<T, CommandError> {
        if index < self.args.len() {
            self.parse(index)
        } else {
            Ok(default)
        }
    }

    /// Parse a switch argument (`on/off`, `true/false`, `yes/no`, `1/0`).
    pub fn parse_switch(&self, index: usize) -> Result<bool, CommandError> {
        let value = self.arg(index)?;
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(CommandError::ArgumentFormat {
                index,
                value: value.to_string(),
                expected: "switch",
            }),
        }
    }

    /// Get all arguments as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[&'a str] {
        &self.args
    }

    /// Iterate over arguments.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.args.iter().copied()
    }

    /// Join all arguments with a separator.
    pub fn join(&self, separator: &str) -> String {
        self.args.join(separator)
    }

    /// Join arguments starting from an index.
    pub fn join_from(&self, start: usize, separator: &str) -> String {
        self.args.get(start..).unwrap_or(&[]).join(separator)
    }
}

/// Indexing past the end raises an argument-count fault for the running command.
impl std::ops::Index<usize> for CommandArgs<'_> {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        match self.args.get(index) {
            Some(&arg) => arg,
            None => std::panic::panic_any(CommandError::ArgumentCount {
                index,
                count: self.args.len(),
            }),
        }
    }
}

/// Everything a handler can see and touch while it runs.
///
/// Handlers also receive `&mut World`; the [`Console`](super::Console)
/// resource itself is not in the world during dispatch, so console state is
/// reached through this context.
pub struct CommandContext<'a> {
    pub(crate) name: &'a str,
    pub(crate) args: CommandArgs<'a>,
    pub(crate) timestamp: SystemTime,
    pub(crate) commands: &'a CommandTable,
    pub(crate) scrollback: &'a mut Scrollback,
    pub(crate) history: &'a mut History,
    pub(crate) history_on_execute: &'a mut bool,
    pub(crate) show_timestamps: bool,
}

impl<'a> CommandContext<'a> {
    /// The command name as typed.
    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    pub fn args(&self) -> &CommandArgs<'a> {
        &self.args
    }

    /// When the submission was dispatched.
    #[inline]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Read access to every registered command.
    #[inline]
    pub fn commands(&self) -> &'a CommandTable {
        self.commands
    }

    pub fn scrollback(&mut self) -> &mut Scrollback {
        &mut *self.scrollback
    }

    pub fn history(&mut self) -> &mut History {
        &mut *self.history
    }

    /// Log a level-0 line.
    pub fn log(&mut self, message: impl AsRef<str>) {
        self.scrollback.log(message, LEVEL_INFO);
    }

    pub fn log_level(&mut self, message: impl AsRef<str>, level: u8) {
        self.scrollback.log(message, level);
    }

    /// Write the whole log the way the console formats it.
    pub fn save_log<W: Write>(&self, writer: W) -> io::Result<()> {
        self.scrollback.save(writer, self.show_timestamps)
    }

    /// Whether this command records itself in history.
    ///
    /// Handlers may flip it; the change is seen by the remaining handlers
    /// of this dispatch and discarded afterwards.
    #[inline]
    pub fn history_on_execute(&self) -> bool {
        *self.history_on_execute
    }

    pub fn set_history_on_execute(&mut self, enabled: bool) {
        *self.history_on_execute = enabled;
    }
}

/// Type alias for command handler functions.
///
/// Handlers receive:
/// - `ctx`: name, arguments, timestamp and console state
/// - `world`: Mutable access to the Bevy world
pub type CommandHandler =
    Box<dyn Fn(&mut CommandContext<'_>, &mut World) -> CommandResult + Send + Sync>;

/// A registered command: one name, one or more handlers.
pub struct CommandEntry {
    name: Box<str>,
    handlers: Vec<CommandHandler>,
    log_on_execute: bool,
    history_on_execute: bool,
    manual: Vec<String>,
}

impl CommandEntry {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handlers in registration order.
    #[inline]
    pub fn handlers(&self) -> &[CommandHandler] {
        &self.handlers
    }

    /// Whether the submitted line is echoed to the log before running.
    #[inline]
    pub fn log_on_execute(&self) -> bool {
        self.log_on_execute
    }

    /// Whether the submitted line is recorded in history.
    #[inline]
    pub fn history_on_execute(&self) -> bool {
        self.history_on_execute
    }

    /// Manual lines. Never empty.
    #[inline]
    pub fn manual(&self) -> &[String] {
        &self.manual
    }

    /// First manual line.
    pub fn summary(&self) -> &str {
        self.manual.first().map(String::as_str).unwrap_or(NO_DESCRIPTION)
    }

    pub(crate) fn add_handler(&mut self, handler: CommandHandler) {
        self.handlers.push(handler);
    }
}

impl std::fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("handlers", &self.handlers.len())
            .field("log_on_execute", &self.log_on_execute)
            .field("history_on_execute", &self.history_on_execute)
            .field("manual", &self.manual)
            .finish()
    }
}

/// A command registration.
///
/// # Examples
///
/// ```ignore
/// let spawn = ConsoleCommand::new("spawn", |ctx, world| {
///     let count: u32 = ctx.args().parse(0)?;
///     world.resource_mut::<SpawnQueue>().push(count);
///     ctx.log(format!("Spawning {}", count));
///     Ok(())
/// })
/// .manual(["Spawn enemies", "usage: spawn <count>"]);
///
/// let secret = ConsoleCommand::new("login", |_ctx, _world| Ok(()))
///     .history_on_execute(false)
///     .log_on_execute(false);
/// ```
pub struct ConsoleCommand {
    name: Box<str>,
    handler: CommandHandler,
    log_on_execute: bool,
    history_on_execute: bool,
    manual: Vec<String>,
}

impl ConsoleCommand {
    /// Create a new command with the given name and handler.
    pub fn new<F>(name: impl Into<Box<str>>, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &mut World) -> CommandResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            handler: Box::new(handler),
            log_on_execute: true,
            history_on_execute: true,
            manual: Vec::new(),
        }
    }

    /// Set whether the submitted line is echoed to the log.
    pub fn log_on_execute(mut self, enabled: bool) -> Self {
        self.log_on_execute = enabled;
        self
    }

    /// Set whether the submitted line is recorded in history.
    pub fn history_on_execute(mut self, enabled: bool) -> Self {
        self.history_on_execute = enabled;
        self
    }

    /// Set the manual lines.
    pub fn manual<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manual = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Get the command name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Turn the registration into a table entry.
    pub(crate) fn into_command(self) -> CommandEntry {
        let manual = if self.manual.is_empty() {
            vec![NO_DESCRIPTION.to_string()]
        } else {
            self.manual
        };

        CommandEntry {
            name: self.name,
            handlers: vec![self.handler],
            log_on_execute: self.log_on_execute,
            history_on_execute: self.history_on_execute,
            manual,
        }
    }

    /// Take only the handler, for appending to an existing command.
    pub(crate) fn into_handler(self) -> CommandHandler {
        self.handler
    }
}

impl std::fmt::Debug for ConsoleCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleCommand")
            .field("name", &self.name)
            .field("log_on_execute", &self.log_on_execute)
            .field("history_on_execute", &self.history_on_execute)
            .field("manual", &self.manual)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_args_basic() {
        let args = CommandArgs::new("echo hello world", vec!["hello", "world"]);
        assert_eq!(args.len(), 2);
        assert_eq!(args.get(0), Some("hello"));
        assert_eq!(args.get(1), Some("world"));
        assert_eq!(args.get(2), None);
        assert_eq!(&args[1], "world");
    }

    #[test]
    fn test_command_args_required() {
        let args = CommandArgs::new("give sword", vec!["sword"]);
        assert_eq!(args.arg(0), Ok("sword"));
        assert_eq!(
            args.arg(1),
            Err(CommandError::ArgumentCount { index: 1, count: 1 })
        );
    }

    #[test]
    fn test_command_args_parse() {
        let args = CommandArgs::new("set 42 abc", vec!["42", "abc"]);
        assert_eq!(args.parse::<i32>(0), Ok(42));
        assert!(matches!(
            args.parse::<i32>(1),
            Err(CommandError::ArgumentFormat { index: 1, .. })
        ));
        assert!(matches!(
            args.parse::<i32>(2),
            Err(CommandError::ArgumentCount { index: 2, count: 2 })
        ));
        assert_eq!(args.parse_or::<i32>(5, 7), Ok(7));
        assert!(args.parse_or::<i32>(1, 7).is_err());
    }

    #[test]
    fn test_command_args_switch() {
        let args = CommandArgs::new("debug on OFF maybe", vec!["on", "OFF", "maybe"]);
        assert_eq!(args.parse_switch(0), Ok(true));
        assert_eq!(args.parse_switch(1), Ok(false));
        assert!(args.parse_switch(2).is_err());
    }

    #[test]
    fn test_command_args_join() {
        let args = CommandArgs::new("echo hello world", vec!["hello", "world"]);
        assert_eq!(args.join(" "), "hello world");
        assert_eq!(args.join_from(1, " "), "world");
        assert_eq!(args.join_from(5, " "), "");
    }

    #[test]
    fn test_index_out_of_bounds_raises_count_error() {
        let args = CommandArgs::new("noop", Vec::new());
        let payload = std::panic::catch_unwind(|| args[0].len()).unwrap_err();
        assert_eq!(
            payload.downcast_ref::<CommandError>(),
            Some(&CommandError::ArgumentCount { index: 0, count: 0 })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = CommandError::ArgumentCount { index: 1, count: 1 };
        assert_eq!(err.to_string(), "argument 2 was requested but only 1 given");

        let err = CommandError::ArgumentFormat {
            index: 0,
            value: "x".into(),
            expected: "i32",
        };
        assert_eq!(err.to_string(), "argument 1 ('x') is not a valid i32");
    }

    #[test]
    fn test_console_command_defaults() {
        let cmd = ConsoleCommand::new("test", |_ctx, _world| Ok(())).into_command();

        assert_eq!(cmd.name(), "test");
        assert!(cmd.log_on_execute());
        assert!(cmd.history_on_execute());
        assert_eq!(cmd.manual(), &[NO_DESCRIPTION]);
        assert_eq!(cmd.handlers().len(), 1);
    }

    #[test]
    fn test_console_command_builder() {
        let cmd = ConsoleCommand::new("login", |_ctx, _world| Ok(()))
            .log_on_execute(false)
            .history_on_execute(false)
            .manual(["Log in", "usage: login <user>"])
            .into_command();

        assert!(!cmd.log_on_execute());
        assert!(!cmd.history_on_execute());
        assert_eq!(cmd.summary(), "Log in");
        assert_eq!(cmd.manual().len(), 2);
    }
}
