//! Handler invocation and outcome classification.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use bevy::prelude::*;

use super::{CommandContext, CommandEntry, CommandError};

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// A known command ran every handler without a fault, or the line was empty.
    Success,
    /// A handler asked for an argument that was not given.
    ArgumentCountFault,
    /// A handler could not parse an argument.
    ArgumentFormatFault,
    /// Any other handler failure, with its message.
    HandlerFault(String),
    /// No command has the submitted name.
    CommandNotFound,
}

impl ExecutionOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success)
    }

    /// Whether a handler faulted.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            ExecutionOutcome::ArgumentCountFault
                | ExecutionOutcome::ArgumentFormatFault
                | ExecutionOutcome::HandlerFault(_)
        )
    }
}

impl From<&CommandError> for ExecutionOutcome {
    fn from(err: &CommandError) -> Self {
        match err {
            CommandError::ArgumentCount { .. } => ExecutionOutcome::ArgumentCountFault,
            CommandError::ArgumentFormat { .. } => ExecutionOutcome::ArgumentFormatFault,
            CommandError::Failed(message) => ExecutionOutcome::HandlerFault(message.clone()),
        }
    }
}

/// Run every handler of `command` in registration order.
///
/// Panics inside a handler are caught and turned into errors. The first
/// failing handler ends the run.
pub(crate) fn run_handlers(
    command: &CommandEntry,
    ctx: &mut CommandContext<'_>,
    world: &mut World,
) -> Result<(), CommandError> {
    for handler in command.handlers() {
        let result = catch_unwind(AssertUnwindSafe(|| handler(ctx, world)));

        match result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(err),
            Err(payload) => return Err(panic_to_error(payload)),
        }
    }
    Ok(())
}

/// Recover a [`CommandError`] from a panic payload.
fn panic_to_error(payload: Box<dyn Any + Send>) -> CommandError {
    if let Some(err) = payload.downcast_ref::<CommandError>() {
        err.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        CommandError::Failed(s.to_string())
    } else if let Some(s) = payload.downcast_ref::<String>() {
        CommandError::Failed(s.clone())
    } else {
        CommandError::Failed("Unknown panic".to_string())
    }
}

/// Diagnostic line logged for a faulted command.
pub(crate) fn fault_message(name: &str, err: &CommandError) -> String {
    match err {
        CommandError::ArgumentCount { .. } => {
            format!("Command '{}': too few arguments ({})", name, err)
        }
        CommandError::ArgumentFormat { .. } => {
            format!("Command '{}': bad argument ({})", name, err)
        }
        CommandError::Failed(message) => format!("Command '{}' failed: {}", name, message),
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;
    use crate::core::{CommandArgs, CommandTable, ConsoleCommand, History, Scrollback};

    fn run(cmd: ConsoleCommand, args: Vec<&str>) -> (Result<(), CommandError>, World) {
        let mut table = CommandTable::new();
        let name = cmd.name().to_string();
        table.register(cmd);

        let mut world = World::new();
        let mut scrollback = Scrollback::new(0, 10);
        let mut history = History::new();
        let mut flag = true;
        let entry = table.get(&name).unwrap();
        let mut ctx = CommandContext {
            name: &name,
            args: CommandArgs::new(&name, args),
            timestamp: SystemTime::now(),
            commands: &table,
            scrollback: &mut scrollback,
            history: &mut history,
            history_on_execute: &mut flag,
            show_timestamps: false,
        };
        let result = run_handlers(entry, &mut ctx, &mut world);
        (result, world)
    }

    #[test]
    fn test_success() {
        let (result, _) = run(ConsoleCommand::new("ok", |_, _| Ok(())), vec![]);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_returned_error_keeps_class() {
        let (result, _) = run(
            ConsoleCommand::new("num", |ctx, _| ctx.args().parse::<i32>(0).map(drop)),
            vec!["abc"],
        );
        let err = result.unwrap_err();
        assert_eq!(ExecutionOutcome::from(&err), ExecutionOutcome::ArgumentFormatFault);
    }

    #[test]
    fn test_index_panic_is_count_fault() {
        let (result, _) = run(
            ConsoleCommand::new("first", |ctx, _| {
                let _ = ctx.args()[0].len();
                Ok(())
            }),
            vec![],
        );
        assert_eq!(
            result,
            Err(CommandError::ArgumentCount { index: 0, count: 0 })
        );
    }

    #[test]
    fn test_plain_panic_is_handler_fault() {
        let (result, _) = run(ConsoleCommand::new("boom", |_, _| panic!("kaboom")), vec![]);
        assert_eq!(result, Err(CommandError::Failed("kaboom".into())));

        let (result, _) = run(
            ConsoleCommand::new("boom", |_, _| panic!("code {}", 7)),
            vec![],
        );
        assert_eq!(result, Err(CommandError::Failed("code 7".into())));
    }

    #[test]
    fn test_outcome_helpers() {
        assert!(ExecutionOutcome::Success.is_success());
        assert!(!ExecutionOutcome::CommandNotFound.is_success());
        assert!(!ExecutionOutcome::CommandNotFound.is_fault());
        assert!(ExecutionOutcome::HandlerFault("x".into()).is_fault());
    }

    #[test]
    fn test_fault_message() {
        let err = CommandError::failed("no such file");
        assert_eq!(fault_message("savelog", &err), "Command 'savelog' failed: no such file");
    }
}
