//! The console engine.
//!
//! [`Console`] ties the command table, the scrollback, the history and the
//! line editor together and implements submission. It is a plain resource;
//! [`ConsolePlugin`](crate::ConsolePlugin) feeds it from messages once per
//! frame, and tests drive it directly against a bare [`World`].

use std::io::{self, Write};
use std::time::SystemTime;

use bevy::prelude::*;

use super::dispatch::{fault_message, run_handlers};
use super::{
    tokenize, ClipboardProvider, CommandArgs, CommandContext, CommandResult, CommandTable,
    Completion, ConsoleClipboard, ConsoleCommand, EditKey, ExecutionOutcome, History, LineEditor,
    PanelState, Scrollback, LEVEL_ERROR, LEVEL_INFO,
};
use crate::config::ConsoleConfig;

/// One line of the current page, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotLine {
    /// The entry formatted with the console's timestamp setting.
    pub text: String,
    pub level: u8,
    /// Presentation color for the level, if one is set.
    pub color: Option<Color>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleSnapshot {
    /// The current page, oldest first.
    pub lines: Vec<SnapshotLine>,
    pub input: String,
    /// Cursor position in characters.
    pub cursor: usize,
    pub prompt: String,
    pub scroll_offset: usize,
    pub visible_count: usize,
    pub state: PanelState,
}

/// An interactive command console.
///
/// # Examples
///
/// ```ignore
/// fn setup(mut console: ResMut<Console>) {
///     console.register_cmd(
///         ConsoleCommand::new("spawn", |ctx, world| {
///             let count: u32 = ctx.args().parse(0)?;
///             world.resource_mut::<SpawnQueue>().push(count);
///             ctx.log(format!("Spawning {}", count));
///             Ok(())
///         })
///         .manual(["Spawn enemies", "usage: spawn <count>"]),
///     );
///     console.log("Console ready");
/// }
/// ```
#[derive(Resource, Debug)]
pub struct Console {
    commands: CommandTable,
    scrollback: Scrollback,
    history: History,
    editor: LineEditor,
    error_reporting: bool,
    show_timestamps: bool,
    prompt: String,
    state: PanelState,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(&ConsoleConfig::default())
    }
}

impl Console {
    /// Create an empty console from a configuration.
    pub fn new(config: &ConsoleConfig) -> Self {
        let mut scrollback = Scrollback::new(config.capacity, config.page_size);
        scrollback.set_debug_logging(config.debug_logging);
        for &level in &config.hidden_levels {
            scrollback.set_level_visible(level, false);
        }

        Self {
            commands: CommandTable::new(),
            scrollback,
            history: History::new(),
            editor: LineEditor::new(),
            error_reporting: config.error_reporting,
            show_timestamps: config.show_timestamps,
            prompt: config.prompt.clone(),
            state: PanelState::default(),
        }
    }

    /// Re-apply a configuration to a running console.
    ///
    /// Shrinking the capacity evicts the oldest entries. Levels hidden by the
    /// current state but absent from `config.hidden_levels` become visible.
    pub fn apply_config(&mut self, config: &ConsoleConfig) {
        let evicted = self.scrollback.set_capacity(config.capacity);
        if evicted > 0 {
            debug!("Console: Capacity change evicted {} entries", evicted);
        }
        self.scrollback.set_page_size(config.page_size);
        self.scrollback.set_debug_logging(config.debug_logging);

        for level in self.scrollback.visibility().hidden() {
            if !config.hidden_levels.contains(&level) {
                self.scrollback.set_level_visible(level, true);
            }
        }
        for &level in &config.hidden_levels {
            if self.scrollback.level_visible(level) {
                self.scrollback.set_level_visible(level, false);
            }
        }

        self.error_reporting = config.error_reporting;
        self.show_timestamps = config.show_timestamps;
        self.prompt = config.prompt.clone();
    }

    /// The configuration matching the console's current state.
    pub fn config(&self) -> ConsoleConfig {
        ConsoleConfig {
            capacity: self.scrollback.buffer().capacity(),
            page_size: self.scrollback.view().page_size(),
            debug_logging: self.scrollback.debug_logging(),
            error_reporting: self.error_reporting,
            show_timestamps: self.show_timestamps,
            prompt: self.prompt.clone(),
            hidden_levels: self.scrollback.visibility().hidden(),
        }
    }

    /// Register a handler under `name` with default flags and no manual.
    ///
    /// Returns `true` if the name was new.
    pub fn register<F>(&mut self, name: impl Into<Box<str>>, handler: F) -> bool
    where
        F: Fn(&mut CommandContext<'_>, &mut World) -> CommandResult + Send + Sync + 'static,
    {
        self.register_cmd(ConsoleCommand::new(name, handler))
    }

    /// Register a command. A known name gains another handler.
    pub fn register_cmd(&mut self, cmd: ConsoleCommand) -> bool {
        self.commands.register(cmd)
    }

    /// Remove a command. Returns `false` if it was not registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.commands.unregister(name).is_some()
    }

    /// Remove every command, built-ins included.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Log a level-0 line.
    pub fn log(&mut self, message: impl AsRef<str>) -> bool {
        self.scrollback.log(message, LEVEL_INFO)
    }

    /// Log a line. Returns `false` if it was suppressed.
    pub fn log_level(&mut self, message: impl AsRef<str>, level: u8) -> bool {
        self.scrollback.log(message, level)
    }

    /// Remove every log entry. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        self.scrollback.clear()
    }

    /// Write the whole log, one formatted entry per line.
    pub fn save_log<W: Write>(&self, writer: W) -> io::Result<()> {
        self.scrollback.save(writer, self.show_timestamps)
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn scrollback_mut(&mut self) -> &mut Scrollback {
        &mut self.scrollback
    }

    /// Tokenize and dispatch a line.
    ///
    /// With `add_to_log` off, neither the echoed line nor fault diagnostics
    /// reach the log. Faults never escape this call.
    pub fn submit(&mut self, line: &str, add_to_log: bool, world: &mut World) -> ExecutionOutcome {
        let Some(tokens) = tokenize(line) else {
            if add_to_log {
                self.scrollback.log(&self.prompt, LEVEL_INFO);
            }
            return ExecutionOutcome::Success;
        };
        let echo = format!("{}{}", self.prompt, tokens.raw);

        let Some(command) = self.commands.get(tokens.command) else {
            self.history.push(tokens.raw);
            self.history.reset_cursor();
            if add_to_log {
                self.scrollback.log(&echo, LEVEL_INFO);
                if self.error_reporting {
                    self.scrollback
                        .log(format!("Unknown command: '{}'", tokens.command), LEVEL_ERROR);
                }
            }
            return ExecutionOutcome::CommandNotFound;
        };

        let record_history = command.history_on_execute();
        let mut history_on_execute = record_history;

        if command.log_on_execute() && add_to_log {
            self.scrollback.log(&echo, LEVEL_INFO);
        }

        let mut ctx = CommandContext {
            name: tokens.command,
            args: CommandArgs::new(tokens.raw, tokens.args),
            timestamp: SystemTime::now(),
            commands: &self.commands,
            scrollback: &mut self.scrollback,
            history: &mut self.history,
            history_on_execute: &mut history_on_execute,
            show_timestamps: self.show_timestamps,
        };
        let result = run_handlers(command, &mut ctx, world);

        if record_history {
            self.history.push(tokens.raw);
        }

        match result {
            Ok(()) => ExecutionOutcome::Success,
            Err(err) => {
                debug!("Console: '{}' faulted: {}", tokens.command, err);
                if add_to_log && self.error_reporting {
                    self.scrollback
                        .log(fault_message(tokens.command, &err), LEVEL_ERROR);
                }
                ExecutionOutcome::from(&err)
            }
        }
    }

    /// Submit a line with logging. Returns `true` iff a known command ran
    /// without a fault; an empty line ran nothing.
    pub fn execute(&mut self, line: &str, world: &mut World) -> bool {
        let has_command = tokenize(line).is_some();
        self.submit(line, true, world).is_success() && has_command
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn insert_char(&mut self, c: char) {
        self.editor.insert_char(c);
    }

    pub fn insert_text(&mut self, text: &str) {
        self.editor.insert_text(text);
    }

    /// Insert the provider's text at the cursor. Returns `false` if it had none.
    pub fn paste(&mut self, clipboard: &dyn ClipboardProvider) -> bool {
        match clipboard.get_text() {
            Some(text) => {
                self.editor.insert_text(&text);
                true
            }
            None => false,
        }
    }

    pub fn backspace(&mut self) {
        self.editor.backspace();
    }

    pub fn delete(&mut self) {
        self.editor.delete();
    }

    pub fn move_left(&mut self) {
        self.editor.move_left();
    }

    pub fn move_right(&mut self) {
        self.editor.move_right();
    }

    pub fn home(&mut self) {
        self.editor.home();
    }

    pub fn end(&mut self) {
        self.editor.end();
    }

    /// Replace the input with the next older history entry.
    pub fn history_up(&mut self) -> bool {
        match self.history.older() {
            Some(entry) => {
                self.editor.set_text(entry);
                true
            }
            None => false,
        }
    }

    /// Replace the input with the next newer history entry.
    pub fn history_down(&mut self) -> bool {
        match self.history.newer() {
            Some(entry) => {
                self.editor.set_text(entry);
                true
            }
            None => false,
        }
    }

    /// Complete the input against command names.
    ///
    /// The first press on an ambiguous input lists the candidates in the log.
    pub fn tab_complete(&mut self) -> Completion {
        let commands = &self.commands;
        let completion = self
            .editor
            .tab_complete(|partial| commands.prefix_search(partial));

        if let Completion::Ambiguous(candidates) = &completion {
            for candidate in candidates {
                self.scrollback.log(candidate, LEVEL_INFO);
            }
        }
        completion
    }

    /// Submit the input and empty the editor.
    pub fn submit_input(&mut self, world: &mut World) -> ExecutionOutcome {
        let line = self.editor.take();
        self.submit(&line, true, world)
    }

    /// Apply one editing key. Returns the outcome if the key submitted.
    pub fn handle_key(&mut self, key: EditKey, world: &mut World) -> Option<ExecutionOutcome> {
        match key {
            EditKey::Backspace => self.backspace(),
            EditKey::Delete => self.delete(),
            EditKey::Left => self.move_left(),
            EditKey::Right => self.move_right(),
            EditKey::Home => self.home(),
            EditKey::End => self.end(),
            EditKey::HistoryUp => {
                self.history_up();
            }
            EditKey::HistoryDown => {
                self.history_down();
            }
            EditKey::Tab => {
                self.tab_complete();
            }
            EditKey::Submit => return Some(self.submit_input(world)),
            EditKey::PageUp => {
                self.page_up();
            }
            EditKey::PageDown => {
                self.page_down();
            }
            EditKey::ScrollUp => {
                let step = self.scrollback.scroll_step() as isize;
                self.scroll_by(-step);
            }
            EditKey::ScrollDown => {
                let step = self.scrollback.scroll_step() as isize;
                self.scroll_by(step);
            }
            EditKey::PasteClipboard => {
                let text = world
                    .get_resource::<ConsoleClipboard>()
                    .and_then(ConsoleClipboard::get_text);
                match text {
                    Some(text) => self.editor.insert_text(&text),
                    None => debug!("Console: Paste requested but no clipboard text"),
                }
            }
        }
        None
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn page_up(&mut self) -> bool {
        self.scrollback.page_up()
    }

    pub fn page_down(&mut self) -> bool {
        self.scrollback.page_down()
    }

    pub fn scroll_by(&mut self, delta: isize) -> bool {
        self.scrollback.scroll_by(delta)
    }

    /// Number of entries that pass the level filter.
    pub fn visible_count(&self) -> usize {
        self.scrollback.visible_count()
    }

    /// Number of stored entries.
    pub fn total_count(&self) -> usize {
        self.scrollback.total_count()
    }

    pub fn level_visible(&self, level: u8) -> bool {
        self.scrollback.level_visible(level)
    }

    pub fn set_level_visible(&mut self, level: u8, visible: bool) {
        self.scrollback.set_level_visible(level, visible);
    }

    pub fn toggle_level(&mut self, level: u8) -> bool {
        self.scrollback.toggle_level(level)
    }

    pub fn level_color(&self, level: u8) -> Option<Color> {
        self.scrollback.level_color(level)
    }

    pub fn set_level_color(&mut self, level: u8, color: Color) {
        self.scrollback.set_level_color(level, color);
    }

    /// Change the capacity. Returns the number of evicted entries.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.scrollback.set_capacity(capacity)
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.scrollback.set_page_size(page_size);
    }

    pub fn debug_logging(&self) -> bool {
        self.scrollback.debug_logging()
    }

    pub fn set_debug_logging(&mut self, enabled: bool) {
        self.scrollback.set_debug_logging(enabled);
    }

    pub fn error_reporting(&self) -> bool {
        self.error_reporting
    }

    pub fn set_error_reporting(&mut self, enabled: bool) {
        self.error_reporting = enabled;
    }

    pub fn show_timestamps(&self) -> bool {
        self.show_timestamps
    }

    pub fn set_show_timestamps(&mut self, enabled: bool) {
        self.show_timestamps = enabled;
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn open(&mut self) -> bool {
        self.state.open()
    }

    pub fn close(&mut self) -> bool {
        self.state.close()
    }

    pub fn finish_transition(&mut self) {
        self.state.finish_transition();
    }

    pub fn toggle(&mut self) {
        self.state.toggle();
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_opening(&self) -> bool {
        self.state.is_opening()
    }

    pub fn is_closing(&self) -> bool {
        self.state.is_closing()
    }

    /// Capture what a renderer needs to draw the console.
    pub fn snapshot(&self) -> ConsoleSnapshot {
        let lines = self
            .scrollback
            .page()
            .map(|entry| SnapshotLine {
                text: entry.format(self.show_timestamps),
                level: entry.level(),
                color: self.scrollback.level_color(entry.level()),
            })
            .collect();

        ConsoleSnapshot {
            lines,
            input: self.editor.text().to_string(),
            cursor: self.editor.cursor(),
            prompt: self.prompt.clone(),
            scroll_offset: self.scrollback.view().scroll_offset(),
            visible_count: self.scrollback.visible_count(),
            state: self.state,
        }
    }
}
