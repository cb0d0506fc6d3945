//! Console messages for communication between the host and the console.
//!
//! Messages are the primary mechanism for:
//! - Host -> Console: submitted lines, key presses, log output, open/close
//! - Console -> Host: submission outcomes

use bevy::prelude::*;

use super::{ExecutionOutcome, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_INFO, LEVEL_WARN};

/// Message sent when a line is submitted to the console.
///
/// The console will tokenize and dispatch it.
///
/// # Examples
///
/// ```ignore
/// fn submit_command(mut events: MessageWriter<ConsoleInputEvent>) {
///     events.write(ConsoleInputEvent::new("echo hello"));
///     // Run without echoing the line or fault diagnostics to the log.
///     events.write(ConsoleInputEvent::silent("debug_log on"));
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub struct ConsoleInputEvent {
    /// The raw line to execute.
    pub command: String,
    /// Whether the echoed line and fault diagnostics go to the log.
    pub add_to_log: bool,
}

impl ConsoleInputEvent {
    /// Create a new input event that logs.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            add_to_log: true,
        }
    }

    /// Create an input event that leaves the log untouched.
    pub fn silent(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            add_to_log: false,
        }
    }
}

/// Editing and navigation keys understood by the line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKey {
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Recall an older history entry.
    HistoryUp,
    /// Recall a newer history entry.
    HistoryDown,
    Tab,
    /// Submit the current input.
    Submit,
    PageUp,
    PageDown,
    /// Scroll towards older output by a fraction of a page.
    ScrollUp,
    /// Scroll towards newer output by a fraction of a page.
    ScrollDown,
    /// Insert the text of the [`ConsoleClipboard`](super::ConsoleClipboard).
    PasteClipboard,
}

/// Keyboard input destined for the console's line editor.
///
/// Hosts translate their platform input into these; the console applies
/// them in the order they arrive.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleKeyEvent {
    /// A typed character.
    Char(char),
    /// Text pasted by the host.
    Paste(String),
    /// An editing or navigation key.
    Key(EditKey),
}

/// Message sent when output should be appended to the console log.
///
/// # Examples
///
/// ```ignore
/// fn log_to_console(mut events: MessageWriter<ConsoleOutputEvent>) {
///     events.write(ConsoleOutputEvent::info("Game started"));
///     events.write(ConsoleOutputEvent::error("Failed to load config"));
///     events.write(ConsoleOutputEvent::new(7, "custom channel"));
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleOutputEvent {
    /// The message text.
    pub message: String,
    /// The log level.
    pub level: u8,
}

impl ConsoleOutputEvent {
    /// Create a new output event.
    pub fn new(level: u8, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    /// Create a debug message. Dropped unless debug logging is on.
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(LEVEL_DEBUG, message)
    }

    /// Create an info message.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LEVEL_INFO, message)
    }

    /// Create a warning message.
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(LEVEL_WARN, message)
    }

    /// Create an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LEVEL_ERROR, message)
    }
}

/// Message asking the console to open or close.
#[derive(Message, Debug, Clone, Copy)]
pub struct ConsoleToggleEvent {
    /// Whether the console should open.
    pub open: bool,
}

impl ConsoleToggleEvent {
    /// Create an event for opening the console.
    pub fn opened() -> Self {
        Self { open: true }
    }

    /// Create an event for closing the console.
    pub fn closed() -> Self {
        Self { open: false }
    }
}

/// Message requesting the console to clear its log.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ConsoleClearEvent;

/// Any host request, on one ordered channel.
///
/// The typed messages above are drained kind by kind, so their relative
/// order within a frame is lost. Requests written as `ConsoleRequest` are
/// applied exactly in the order they were written, before the typed ones.
///
/// # Examples
///
/// ```ignore
/// fn type_and_submit(mut requests: MessageWriter<ConsoleRequest>) {
///     requests.write(ConsoleKeyEvent::Paste("echo hi".into()).into());
///     requests.write(ConsoleKeyEvent::Key(EditKey::Submit).into());
///     requests.write(ConsoleClearEvent.into());
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub enum ConsoleRequest {
    Input(ConsoleInputEvent),
    Key(ConsoleKeyEvent),
    Output(ConsoleOutputEvent),
    Toggle(ConsoleToggleEvent),
    Clear,
}

impl From<ConsoleInputEvent> for ConsoleRequest {
    fn from(event: ConsoleInputEvent) -> Self {
        ConsoleRequest::Input(event)
    }
}

impl From<ConsoleKeyEvent> for ConsoleRequest {
    fn from(event: ConsoleKeyEvent) -> Self {
        ConsoleRequest::Key(event)
    }
}

impl From<ConsoleOutputEvent> for ConsoleRequest {
    fn from(event: ConsoleOutputEvent) -> Self {
        ConsoleRequest::Output(event)
    }
}

impl From<ConsoleToggleEvent> for ConsoleRequest {
    fn from(event: ConsoleToggleEvent) -> Self {
        ConsoleRequest::Toggle(event)
    }
}

impl From<ConsoleClearEvent> for ConsoleRequest {
    fn from(_: ConsoleClearEvent) -> Self {
        ConsoleRequest::Clear
    }
}

/// Message written after every submission.
///
/// # Examples
///
/// ```ignore
/// fn watch_failures(mut events: MessageReader<ConsoleExecutedEvent>) {
///     for event in events.read() {
///         if !event.outcome.is_success() {
///             warn!("'{}' ended with {:?}", event.line, event.outcome);
///         }
///     }
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleExecutedEvent {
    /// The trimmed line that was submitted.
    pub line: String,
    pub outcome: ExecutionOutcome,
}

/// Plugin that registers all console messages.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleKeyEvent>()
            .add_message::<ConsoleOutputEvent>()
            .add_message::<ConsoleToggleEvent>()
            .add_message::<ConsoleClearEvent>()
            .add_message::<ConsoleRequest>()
            .add_message::<ConsoleExecutedEvent>();
    }
}
