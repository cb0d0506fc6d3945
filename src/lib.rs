//! An embeddable command console for Bevy.
//!
//! bevy_scrollback_console provides the engine behind an in-game console,
//! without drawing anything:
//!
//! - **Commands**: named handlers with manuals, several handlers per name
//! - **Dispatch**: whitespace tokenizing, fault isolation, history policy
//! - **Line editor**: cursor editing, history recall, tab completion
//! - **Scrollback**: bounded, leveled log with a filtered, paged view
//!
//! # Features
//!
//! - `capture` (default): forward `tracing` events into the console log
//! - `terminal`: stdin/stdout backend for dedicated servers
//! - `persist`: RON persistence of settings and history (`writeconfig`)
//! - `full`: Enable capture + persist
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_scrollback_console::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ConsolePlugin)
//!         .add_systems(Startup, setup_console)
//!         .run();
//! }
//!
//! fn setup_console(mut console: ResMut<Console>) {
//!     console.register_cmd(
//!         ConsoleCommand::new("gravity", |ctx, world| {
//!             let value: f32 = ctx.args().parse(0)?;
//!             world.resource_mut::<Gravity>().0 = value;
//!             ctx.log(format!("Gravity set to {}", value));
//!             Ok(())
//!         })
//!         .manual(["Set world gravity", "usage: gravity <value>"]),
//!     );
//! }
//! ```
//!
//! Input reaches the console as messages ([`ConsoleInputEvent`],
//! [`ConsoleKeyEvent`], [`ConsoleOutputEvent`], ...); a renderer reads
//! [`Console::snapshot`] each frame.

use std::fs::File;
use std::io::BufWriter;

use bevy::prelude::*;

pub mod config;
pub mod core;

// Log capture (feature-gated)
#[cfg(feature = "capture")]
pub mod logging;

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

// Persistence module (feature-gated)
#[cfg(feature = "persist")]
pub mod persist;

// Re-export core types at crate root for convenience
pub use config::ConsoleConfig;
pub use core::{
    ClipboardProvider, CommandArgs, CommandContext, CommandEntry, CommandError, CommandHandler,
    CommandResult, CommandTable, Completion, Console, ConsoleClearEvent, ConsoleClipboard,
    ConsoleCommand, ConsoleEventsPlugin, ConsoleExecutedEvent, ConsoleInputEvent,
    ConsoleKeyEvent, ConsoleOutputEvent, ConsoleRequest, ConsoleSnapshot, ConsoleToggleEvent,
    EditKey,
    ExecutionOutcome, History, LineEditor, LogBuffer, LogEntry, PanelState, Scrollback,
    SnapshotLine, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_INFO, LEVEL_WARN,
};

#[cfg(feature = "persist")]
pub use persist::{ConfigError, ConfigPath, ConsoleConfigFile};

#[cfg(feature = "terminal")]
pub use terminal::{TerminalConfig, TerminalPlugin};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::ConsoleConfig;
    pub use crate::core::{
        CommandArgs, CommandContext, CommandError, CommandResult, Console, ConsoleClipboard,
        ConsoleCommand, ConsoleExecutedEvent, ConsoleInputEvent, ConsoleKeyEvent,
        ConsoleOutputEvent, ConsoleRequest, ConsoleToggleEvent, EditKey, ExecutionOutcome,
        LEVEL_DEBUG, LEVEL_ERROR, LEVEL_INFO, LEVEL_WARN,
    };
    pub use crate::ConsolePlugin;
}

/// Main console plugin.
///
/// Builds the [`Console`] resource from the [`ConsoleConfig`] resource
/// (inserting a default one if absent) and registers the built-in commands.
///
/// # Configuration
///
/// ```ignore
/// App::new()
///     .insert_resource(ConsoleConfig { page_size: 40, ..default() })
///     .add_plugins(ConsolePlugin);
/// ```
#[derive(Default)]
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ConsoleConfig>();
        let console = Console::new(app.world().resource::<ConsoleConfig>());

        app.insert_resource(console)
            .init_resource::<PendingActions>()
            .add_plugins(core::ConsoleEventsPlugin);

        // Register built-in commands
        app.add_systems(Startup, register_builtin_commands);

        // Process console messages (three-stage pipeline)
        // 1. collect_console_input: Read messages, queue actions
        // 2. process_pending_actions: Apply actions with exclusive World access
        // 3. send_pending_outputs: Write outcome messages
        app.add_systems(
            Update,
            (
                apply_config_changes,
                collect_console_input,
                process_pending_actions,
                sync_config_from_console,
                send_pending_outputs,
            )
                .chain(),
        );

        // Persistence (feature-gated)
        #[cfg(feature = "persist")]
        {
            app.init_resource::<persist::ConfigPath>().add_systems(
                Startup,
                persist::load_config_on_startup.after(register_builtin_commands),
            );
        }

        // Terminal backend (feature-gated)
        #[cfg(feature = "terminal")]
        {
            app.add_plugins(terminal::TerminalPlugin);
        }
    }
}

/// Register built-in console commands.
fn register_builtin_commands(mut console: ResMut<Console>) {
    // help - List commands or show one command's manual
    console.register_cmd(
        ConsoleCommand::new("help", |ctx, _world| {
            let commands = ctx.commands();

            if let Some(name) = ctx.args().get(0) {
                let entry = commands
                    .get(name)
                    .ok_or_else(|| CommandError::failed(format!("Unknown command: '{}'", name)))?;

                ctx.log(format!("{} - {}", entry.name(), entry.summary()));
                for line in entry.manual().iter().skip(1) {
                    ctx.log(format!("  {}", line));
                }
            } else {
                ctx.log("Commands:");
                for entry in commands.iter() {
                    ctx.log(format!("  {} - {}", entry.name(), entry.summary()));
                }
                ctx.log("Use 'help <command>' for details");
            }
            Ok(())
        })
        .manual(["Show help for a command or list all commands", "usage: help [command]"]),
    );

    // clear - Clear the log
    console.register_cmd(
        ConsoleCommand::new("clear", |ctx, _world| {
            let removed = ctx.scrollback().clear();
            ctx.log(format!("Cleared {} log entries", removed));
            Ok(())
        })
        .manual(["Clear the console log"]),
    );

    // echo - Print text to the log
    console.register_cmd(
        ConsoleCommand::new("echo", |ctx, _world| {
            let text = ctx.args().join(" ");
            ctx.log(text);
            Ok(())
        })
        .manual(["Print text to the console", "usage: echo <text...>"]),
    );

    // history - List or clear command history
    console.register_cmd(
        ConsoleCommand::new("history", |ctx, _world| {
            match ctx.args().get(0) {
                None => {
                    let lines: Vec<String> = ctx
                        .history()
                        .iter()
                        .enumerate()
                        .map(|(i, entry)| format!("  {}: {}", i + 1, entry))
                        .collect();
                    let count = lines.len();
                    for line in lines {
                        ctx.log(line);
                    }
                    ctx.log(format!("{} history entries", count));
                }
                Some("clear") => {
                    ctx.history().clear();
                    ctx.log("History cleared");
                }
                Some(other) => {
                    return Err(CommandError::ArgumentFormat {
                        index: 0,
                        value: other.to_string(),
                        expected: "'clear'",
                    });
                }
            }
            Ok(())
        })
        .history_on_execute(false)
        .manual(["List or clear command history", "usage: history [clear]"]),
    );

    // log_filter - Show or hide a log level
    console.register_cmd(
        ConsoleCommand::new("log_filter", |ctx, _world| {
            let level: u8 = ctx.args().parse(0)?;
            let visible = ctx.args().parse_switch(1)?;
            ctx.scrollback().set_level_visible(level, visible);
            ctx.log(format!(
                "Level {} {}",
                level,
                if visible { "shown" } else { "hidden" }
            ));
            Ok(())
        })
        .manual(["Show or hide a log level", "usage: log_filter <level> <on|off>"]),
    );

    // debug_log - Toggle recording of debug-level entries
    console.register_cmd(
        ConsoleCommand::new("debug_log", |ctx, _world| {
            let enabled = ctx.args().parse_switch(0)?;
            ctx.scrollback().set_debug_logging(enabled);
            ctx.log(format!(
                "Debug logging {}",
                if enabled { "enabled" } else { "disabled" }
            ));
            Ok(())
        })
        .manual(["Record debug-level log entries", "usage: debug_log <on|off>"]),
    );

    // savelog - Write the log to a file
    console.register_cmd(
        ConsoleCommand::new("savelog", |ctx, _world| {
            let path = ctx.args().arg(0)?;
            let file = File::create(path)
                .map_err(|e| CommandError::failed(format!("Cannot create '{}': {}", path, e)))?;
            ctx.save_log(BufWriter::new(file))
                .map_err(|e| CommandError::failed(format!("Cannot write '{}': {}", path, e)))?;

            let count = ctx.scrollback().total_count();
            ctx.log(format!("Saved {} log entries to '{}'", count, path));
            Ok(())
        })
        .manual(["Write the console log to a file", "usage: savelog <path>"]),
    );

    // Persistence commands (only with persist feature)
    #[cfg(feature = "persist")]
    register_persist_commands(&mut console);
}

/// Register persistence-related commands.
#[cfg(feature = "persist")]
fn register_persist_commands(console: &mut Console) {
    // writeconfig - Save settings and history; runs once the dispatch batch is done
    console.register_cmd(
        ConsoleCommand::new("writeconfig", |ctx, world| {
            let path = match ctx.args().get(0) {
                Some(path) => path.to_string(),
                None => world.resource::<persist::ConfigPath>().0.clone(),
            };
            world.resource_mut::<PendingActions>().save_config = Some(path);
            Ok(())
        })
        .manual([
            "Save console settings and history",
            "usage: writeconfig [path]",
        ]),
    );
}

/// Resource that holds pending console actions and their results.
#[derive(Resource, Default)]
struct PendingActions {
    queue: Vec<ConsoleRequest>,
    executed: Vec<ConsoleExecutedEvent>,
    #[cfg(feature = "persist")]
    save_config: Option<String>,
}

/// Re-applies the [`ConsoleConfig`] resource when the host changes it.
fn apply_config_changes(config: Res<ConsoleConfig>, mut console: ResMut<Console>) {
    if config.is_changed() && !config.is_added() {
        console.apply_config(&config);
    }
}

/// Mirrors console state changed by commands (`log_filter`, `debug_log`)
/// back into [`ConsoleConfig`] without flagging it as changed.
///
/// A config the host touched since the last run is left alone; it belongs
/// to [`apply_config_changes`].
fn sync_config_from_console(console: Res<Console>, mut config: ResMut<ConsoleConfig>) {
    if config.is_changed() {
        return;
    }
    let current = console.config();
    if *config != current {
        *config.bypass_change_detection() = current;
    }
}

/// System that reads console messages and queues them for processing.
///
/// [`ConsoleRequest`]s keep their write order and go first; the typed
/// messages follow, drained kind by kind.
fn collect_console_input(
    mut requests: MessageReader<ConsoleRequest>,
    mut outputs: MessageReader<ConsoleOutputEvent>,
    mut toggles: MessageReader<ConsoleToggleEvent>,
    mut keys: MessageReader<ConsoleKeyEvent>,
    mut inputs: MessageReader<ConsoleInputEvent>,
    mut clears: MessageReader<ConsoleClearEvent>,
    mut pending: ResMut<PendingActions>,
) {
    pending.queue.extend(requests.read().cloned());
    pending
        .queue
        .extend(outputs.read().cloned().map(ConsoleRequest::from));
    pending
        .queue
        .extend(toggles.read().copied().map(ConsoleRequest::from));
    pending
        .queue
        .extend(keys.read().cloned().map(ConsoleRequest::from));
    pending
        .queue
        .extend(inputs.read().cloned().map(ConsoleRequest::from));
    pending
        .queue
        .extend(clears.read().map(|_| ConsoleRequest::Clear));
}

/// Exclusive system that applies queued actions with full World access.
fn process_pending_actions(world: &mut World) {
    let queue = std::mem::take(&mut world.resource_mut::<PendingActions>().queue);
    if queue.is_empty() {
        return;
    }

    // The console leaves the world while handlers run; they reach it
    // through their CommandContext.
    let executed = world.resource_scope(|world, mut console: Mut<Console>| {
        let mut executed = Vec::new();

        for request in queue {
            match request {
                ConsoleRequest::Input(ConsoleInputEvent {
                    command,
                    add_to_log,
                }) => {
                    let outcome = console.submit(&command, add_to_log, world);
                    executed.push(ConsoleExecutedEvent {
                        line: command.trim().to_string(),
                        outcome,
                    });
                }
                ConsoleRequest::Key(ConsoleKeyEvent::Char(c)) => console.insert_char(c),
                ConsoleRequest::Key(ConsoleKeyEvent::Paste(text)) => console.insert_text(&text),
                ConsoleRequest::Key(ConsoleKeyEvent::Key(key)) => {
                    let line = console.editor().text().trim().to_string();
                    if let Some(outcome) = console.handle_key(key, world) {
                        executed.push(ConsoleExecutedEvent { line, outcome });
                    }
                }
                ConsoleRequest::Output(event) => {
                    console.log_level(event.message, event.level);
                }
                ConsoleRequest::Toggle(ConsoleToggleEvent { open }) => {
                    let changed = if open { console.open() } else { console.close() };
                    if changed {
                        debug!("Console: Panel {:?}", console.state());
                    }
                }
                ConsoleRequest::Clear => {
                    console.clear();
                }
            }
        }

        executed
    });

    #[cfg(feature = "persist")]
    write_requested_config(world);

    world
        .resource_mut::<PendingActions>()
        .executed
        .extend(executed);
}

/// Performs a save requested by `writeconfig` during the last batch.
#[cfg(feature = "persist")]
fn write_requested_config(world: &mut World) {
    let Some(path) = world.resource_mut::<PendingActions>().save_config.take() else {
        return;
    };

    let mut console = world.resource_mut::<Console>();
    match persist::save_config(&console, &path) {
        Ok(()) => {
            console.log(format!("Saved config to '{}'", path));
        }
        Err(e) => {
            error!("Failed to save config: {}", e);
            console.log_level(format!("Failed to save config: {}", e), LEVEL_ERROR);
        }
    }
}

/// System that sends queued outcome messages.
fn send_pending_outputs(
    mut pending: ResMut<PendingActions>,
    mut executed_events: MessageWriter<ConsoleExecutedEvent>,
) {
    for executed in pending.executed.drain(..) {
        executed_events.write(executed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test resource to track command execution.
    #[derive(Resource, Default)]
    struct TestCommandExecuted {
        count: usize,
        last_args: Vec<String>,
    }

    /// Outcomes seen through [`ConsoleExecutedEvent`].
    #[derive(Resource, Default)]
    struct SeenOutcomes(Vec<(String, ExecutionOutcome)>);

    fn record_outcomes(
        mut events: MessageReader<ConsoleExecutedEvent>,
        mut seen: ResMut<SeenOutcomes>,
    ) {
        for event in events.read() {
            seen.0.push((event.line.clone(), event.outcome.clone()));
        }
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(ConsoleConfig {
            show_timestamps: false,
            ..default()
        });
        app.add_plugins(ConsolePlugin);
        app.init_resource::<SeenOutcomes>();
        app.add_systems(PostUpdate, record_outcomes);

        // Run startup (registers built-in commands)
        app.update();
        app
    }

    fn submit(app: &mut App, line: &str) {
        app.world_mut().write_message(ConsoleInputEvent::new(line));
        app.update();
    }

    fn log_lines(app: &App) -> Vec<String> {
        app.world()
            .resource::<Console>()
            .scrollback()
            .buffer()
            .iter()
            .map(|entry| entry.message().to_string())
            .collect()
    }

    #[test]
    fn test_command_execution() {
        let mut app = test_app();
        app.init_resource::<TestCommandExecuted>();
        app.world_mut().resource_mut::<Console>().register_cmd(
            ConsoleCommand::new("test_cmd", |ctx, world| {
                let mut tracker = world.resource_mut::<TestCommandExecuted>();
                tracker.count += 1;
                tracker.last_args = ctx.args().iter().map(|s| s.to_string()).collect();
                Ok(())
            })
            .manual(["Test command"]),
        );

        submit(&mut app, "test_cmd arg1 arg2");

        let tracker = app.world().resource::<TestCommandExecuted>();
        assert_eq!(tracker.count, 1, "Command should have been executed once");
        assert_eq!(tracker.last_args, vec!["arg1", "arg2"]);

        let seen = &app.world().resource::<SeenOutcomes>().0;
        assert_eq!(
            seen,
            &vec![("test_cmd arg1 arg2".to_string(), ExecutionOutcome::Success)]
        );
    }

    #[test]
    fn test_builtin_echo_command() {
        let mut app = test_app();
        submit(&mut app, "echo hello   world");
        assert_eq!(log_lines(&app), vec!["$ echo hello   world", "hello world"]);
    }

    #[test]
    fn test_builtin_help_command() {
        let mut app = test_app();
        submit(&mut app, "help echo");
        let lines = log_lines(&app);
        assert_eq!(lines[1], "echo - Print text to the console");
        assert_eq!(lines[2], "  usage: echo <text...>");

        submit(&mut app, "help nope");
        let seen = &app.world().resource::<SeenOutcomes>().0;
        assert_eq!(
            seen[1].1,
            ExecutionOutcome::HandlerFault("Unknown command: 'nope'".into())
        );
    }

    #[test]
    fn test_builtin_help_lists_all() {
        let mut app = test_app();
        submit(&mut app, "help");
        let lines = log_lines(&app);
        assert_eq!(lines[1], "Commands:");
        assert!(lines.iter().any(|l| l.starts_with("  clear - ")));
        assert!(lines.iter().any(|l| l.starts_with("  savelog - ")));
    }

    #[test]
    fn test_builtin_clear_command() {
        let mut app = test_app();
        submit(&mut app, "echo one");
        submit(&mut app, "clear");
        // Two echo lines plus the echoed "clear" itself.
        assert_eq!(log_lines(&app), vec!["Cleared 3 log entries"]);
    }

    #[test]
    fn test_builtin_history_command() {
        let mut app = test_app();
        submit(&mut app, "echo a");
        submit(&mut app, "unknown");
        submit(&mut app, "history");

        let console = app.world().resource::<Console>();
        // `history` does not record itself.
        assert_eq!(console.history().entries(), &["echo a", "unknown"]);
        let lines = log_lines(&app);
        assert!(lines.contains(&"  1: echo a".to_string()));
        assert!(lines.contains(&"2 history entries".to_string()));

        submit(&mut app, "history clear");
        assert!(app.world().resource::<Console>().history().is_empty());
    }

    #[test]
    fn test_builtin_log_filter_faults() {
        let mut app = test_app();
        submit(&mut app, "log_filter 2");
        submit(&mut app, "log_filter x on");
        submit(&mut app, "log_filter 2 off");

        let seen: Vec<_> = app
            .world()
            .resource::<SeenOutcomes>()
            .0
            .iter()
            .map(|(_, outcome)| outcome.clone())
            .collect();
        assert_eq!(
            seen,
            vec![
                ExecutionOutcome::ArgumentCountFault,
                ExecutionOutcome::ArgumentFormatFault,
                ExecutionOutcome::Success,
            ]
        );
        assert!(!app.world().resource::<Console>().level_visible(LEVEL_WARN));
    }

    #[test]
    fn test_builtin_debug_log() {
        let mut app = test_app();
        app.world_mut()
            .write_message(ConsoleOutputEvent::debug("hidden"));
        app.update();
        assert!(!log_lines(&app).contains(&"hidden".to_string()));

        submit(&mut app, "debug_log on");
        app.world_mut()
            .write_message(ConsoleOutputEvent::debug("shown"));
        app.update();
        assert!(log_lines(&app).contains(&"shown".to_string()));
    }

    #[test]
    fn test_builtin_savelog() {
        let mut app = test_app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.log");

        submit(&mut app, "echo saved");
        submit(&mut app, &format!("savelog {}", path.display()));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("[$ echo saved] [0]\n[saved] [0]\n"));
        assert!(log_lines(&app).last().unwrap().starts_with("Saved "));
    }

    #[test]
    fn test_key_events_edit_and_submit() {
        let mut app = test_app();
        for c in "echo hi".chars() {
            app.world_mut().write_message(ConsoleKeyEvent::Char(c));
        }
        app.world_mut()
            .write_message(ConsoleKeyEvent::Key(EditKey::Submit));
        app.update();

        let console = app.world().resource::<Console>();
        assert!(console.editor().is_empty());
        assert_eq!(console.history().entries(), &["echo hi"]);
        assert_eq!(
            app.world().resource::<SeenOutcomes>().0,
            vec![("echo hi".to_string(), ExecutionOutcome::Success)]
        );
    }

    #[test]
    fn test_tab_key_completes() {
        let mut app = test_app();
        app.world_mut()
            .write_message(ConsoleKeyEvent::Paste("ech".into()));
        app.world_mut()
            .write_message(ConsoleKeyEvent::Key(EditKey::Tab));
        app.update();

        assert_eq!(app.world().resource::<Console>().editor().text(), "echo");
    }

    #[test]
    fn test_output_and_clear_events() {
        let mut app = test_app();
        app.world_mut()
            .write_message(ConsoleOutputEvent::warn("careful"));
        app.update();
        assert_eq!(log_lines(&app), vec!["careful"]);

        app.world_mut().write_message(ConsoleClearEvent);
        app.update();
        assert!(log_lines(&app).is_empty());
    }

    #[test]
    fn test_toggle_event() {
        let mut app = test_app();
        app.world_mut().write_message(ConsoleToggleEvent::opened());
        app.update();
        assert!(app.world().resource::<Console>().is_opening());

        app.world_mut().resource_mut::<Console>().finish_transition();
        app.world_mut().write_message(ConsoleToggleEvent::closed());
        app.update();
        assert!(app.world().resource::<Console>().is_closing());
    }

    #[test]
    fn test_handler_panic_is_contained() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<Console>()
            .register("explode", |_, _| panic!("kaboom"));

        submit(&mut app, "explode");
        submit(&mut app, "echo still alive");

        let lines = log_lines(&app);
        assert!(lines.contains(&"Command 'explode' failed: kaboom".to_string()));
        assert_eq!(lines.last().unwrap(), "still alive");
    }

    #[test]
    fn test_command_settings_survive_config_change() {
        let mut app = test_app();
        submit(&mut app, "log_filter 2 off");
        submit(&mut app, "debug_log on");

        {
            let config = app.world().resource::<ConsoleConfig>();
            assert_eq!(config.hidden_levels, vec![LEVEL_WARN]);
            assert!(config.debug_logging);
        }

        app.world_mut().resource_mut::<ConsoleConfig>().page_size = 7;
        app.update();

        let console = app.world().resource::<Console>();
        assert_eq!(console.scrollback().view().page_size(), 7);
        assert!(!console.level_visible(LEVEL_WARN));
        assert!(console.debug_logging());
    }

    #[test]
    fn test_requests_apply_in_write_order() {
        let mut app = test_app();
        let requests: [ConsoleRequest; 5] = [
            ConsoleOutputEvent::info("before").into(),
            ConsoleClearEvent.into(),
            ConsoleKeyEvent::Paste("echo one".into()).into(),
            ConsoleKeyEvent::Key(EditKey::Submit).into(),
            ConsoleOutputEvent::info("after").into(),
        ];
        for request in requests {
            app.world_mut().write_message(request);
        }
        app.update();

        assert_eq!(log_lines(&app), vec!["$ echo one", "one", "after"]);
    }

    #[test]
    fn test_config_change_is_applied() {
        let mut app = test_app();
        app.world_mut().resource_mut::<ConsoleConfig>().page_size = 3;
        app.update();

        let console = app.world().resource::<Console>();
        assert_eq!(console.scrollback().view().page_size(), 3);
    }

    #[cfg(feature = "persist")]
    #[test]
    fn test_writeconfig_command() {
        let mut app = test_app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.ron");

        submit(&mut app, "echo hi");
        submit(&mut app, &format!("writeconfig {}", path.display()));

        let file = persist::ConsoleConfigFile::load(&path).unwrap();
        assert_eq!(file.history[0], "echo hi");
        assert!(!file.config.show_timestamps);
        assert!(log_lines(&app).last().unwrap().starts_with("Saved config to"));
    }
}
