//! Core console types.
//!
//! This module provides the fundamental building blocks:
//! - [`Console`] - The console resource: submission, editing, scrolling
//! - [`ConsoleCommand`] - Command registrations with handlers
//! - [`CommandTable`] - Name to command mapping with prefix search
//! - [`Scrollback`] - Bounded log with a filtered, paged view
//! - [`History`] and [`LineEditor`] - Input line and its history
//! - [`tokenize`] - Whitespace tokenizer
//! - Messages for communication between host and console

mod log;
mod view;
mod scrollback;
mod history;
mod editor;
mod tokenizer;
mod command;
mod table;
mod dispatch;
mod clipboard;
mod panel;
mod events;
mod console;

pub use log::{format_timestamp, LogBuffer, LogEntry, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_INFO, LEVEL_WARN};
pub use view::{LevelVisibility, ViewWindow};
pub use scrollback::Scrollback;
pub use history::History;
pub use editor::{common_prefix, Completion, LineEditor};
pub use tokenizer::{tokenize, tokenize_string, TokenizedCommand};
pub use command::{
    CommandArgs, CommandContext, CommandEntry, CommandError, CommandHandler, CommandResult,
    ConsoleCommand, NO_DESCRIPTION,
};
pub use table::CommandTable;
pub use dispatch::ExecutionOutcome;
pub use clipboard::{ClipboardProvider, ConsoleClipboard};
pub use panel::PanelState;
pub use events::{
    ConsoleClearEvent, ConsoleEventsPlugin, ConsoleExecutedEvent, ConsoleInputEvent,
    ConsoleKeyEvent, ConsoleOutputEvent, ConsoleRequest, ConsoleToggleEvent, EditKey,
};
pub use console::{Console, ConsoleSnapshot, SnapshotLine};
