//! Terminal backend for headless/dedicated server console.
//!
//! Lines read from stdin are submitted to the console; every entry appended
//! to the console log is echoed to stdout.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use bevy::prelude::*;

use crate::core::{Console, ConsoleInputEvent, LogBuffer, LogEntry, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_WARN};

/// Plugin that adds terminal (stdin/stdout) console support.
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = mpsc::channel();
        let _handle = spawn_stdin_reader(sender);

        app.insert_resource(StdinReceiver(Mutex::new(receiver)))
            .init_resource::<TerminalConfig>()
            .add_systems(PreUpdate, read_stdin)
            .add_systems(Last, write_stdout);
    }
}

/// Configuration for terminal behavior.
#[derive(Resource)]
pub struct TerminalConfig {
    /// Whether to use colored output (ANSI escape codes).
    pub colored: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self { colored: false }  // Disabled by default - causes issues on some terminals
    }
}

#[derive(Resource)]
struct StdinReceiver(Mutex<Receiver<String>>);

fn spawn_stdin_reader(sender: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        let handle = stdin.lock();

        for line in handle.lines().map_while(Result::ok) {
            let text = line.trim().to_string();
            if !text.is_empty() && sender.send(text).is_err() {
                break;
            }
        }
    })
}

fn read_stdin(receiver: Res<StdinReceiver>, mut events: MessageWriter<ConsoleInputEvent>) {
    let Ok(rx) = receiver.0.lock() else {
        return;
    };
    while let Ok(line) = rx.try_recv() {
        events.write(ConsoleInputEvent::new(line));
    }
}

/// Entries appended since `printed` entries had been seen, oldest first.
///
/// Entries evicted or cleared before they could be printed are skipped.
fn unprinted(buffer: &LogBuffer, printed: u64) -> impl Iterator<Item = &LogEntry> {
    let fresh = buffer.total_appended().saturating_sub(printed);
    let fresh = usize::try_from(fresh).unwrap_or(usize::MAX).min(buffer.len());
    buffer.iter().skip(buffer.len() - fresh)
}

fn write_stdout(console: Res<Console>, config: Res<TerminalConfig>, mut printed: Local<u64>) {
    let buffer = console.scrollback().buffer();
    if buffer.total_appended() == *printed {
        return;
    }

    let mut stdout = io::stdout().lock();
    for entry in unprinted(buffer, *printed) {
        let text = entry.format(console.show_timestamps());
        let _ = if config.colored {
            writeln!(stdout, "{}{}\x1b[0m", ansi_color(entry.level()), text)
        } else {
            writeln!(stdout, "{}", text)
        };
    }
    let _ = stdout.flush();
    *printed = buffer.total_appended();
}

fn ansi_color(level: u8) -> &'static str {
    match level {
        LEVEL_ERROR => "\x1b[31m",
        LEVEL_WARN => "\x1b[33m",
        LEVEL_DEBUG => "\x1b[90m",
        _ => "\x1b[0m",
    }
}
