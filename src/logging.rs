//! Forward `tracing` events into the console log via
//! [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer).
//!
//! ```ignore
//! App::new()
//!     .add_plugins(DefaultPlugins.set(LogPlugin {
//!         custom_layer: bevy_scrollback_console::logging::custom_log_layer,
//!         ..default()
//!     }))
//!     .add_plugins(ConsolePlugin);
//! ```

use bevy::log::{BoxedLayer, Level};
use bevy::prelude::*;
use std::sync::mpsc;
use std::time::SystemTime;
use tracing::Subscriber;
use tracing_subscriber::field::Visit;
use tracing_subscriber::Layer;

use crate::core::{Console, LogEntry, LEVEL_DEBUG, LEVEL_ERROR, LEVEL_INFO, LEVEL_WARN};

/// Layer factory for [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer).
pub fn custom_log_layer(app: &mut App) -> Option<BoxedLayer> {
    Some(Box::new(create_custom_log_layer(app)))
}

fn create_custom_log_layer(app: &mut App) -> LogCaptureLayer {
    let (sender, receiver) = mpsc::channel();
    app.insert_non_send_resource(CapturedLogEvents(receiver));
    app.add_systems(PostUpdate, transfer_log_events);

    LogCaptureLayer { sender }
}

/// Console log level for a `tracing` level.
///
/// Debug and trace events map to the debug level and are only kept while
/// debug logging is on.
pub fn console_level(level: Level) -> u8 {
    match level {
        Level::ERROR => LEVEL_ERROR,
        Level::WARN => LEVEL_WARN,
        Level::INFO => LEVEL_INFO,
        _ => LEVEL_DEBUG,
    }
}

/// A captured `tracing` event.
#[derive(Debug, Clone)]
struct CapturedLog {
    message: String,
    level: Level,
    time: SystemTime,
}

/// Moves captured events into the [`Console`] log.
fn transfer_log_events(receiver: NonSend<CapturedLogEvents>, console: Option<ResMut<Console>>) {
    let Some(mut console) = console else {
        // Nothing to forward to; drop what was captured.
        receiver.0.try_iter().for_each(drop);
        return;
    };

    for captured in receiver.0.try_iter() {
        let entry = LogEntry::with_timestamp(
            captured.message,
            console_level(captured.level),
            captured.time,
        );
        console.scrollback_mut().append(entry);
    }
}

/// Holds captured events until [`transfer_log_events`] runs.
struct CapturedLogEvents(mpsc::Receiver<CapturedLog>);

/// A [`Layer`] that captures log events and sends them to [`CapturedLogEvents`].
struct LogCaptureLayer {
    sender: mpsc::Sender<CapturedLog>,
}

impl<S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>> Layer<S>
    for LogCaptureLayer
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut message = None;
        event.record(&mut LogEventVisitor(&mut message));
        if let Some(message) = message {
            let _ = self.sender.send(CapturedLog {
                message,
                level: *event.metadata().level(),
                time: SystemTime::now(),
            });
        }
    }
}

/// A [`Visit`]or that records the `message` field of an event.
struct LogEventVisitor<'a>(&'a mut Option<String>);

impl Visit for LogEventVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(console_level(Level::ERROR), LEVEL_ERROR);
        assert_eq!(console_level(Level::WARN), LEVEL_WARN);
        assert_eq!(console_level(Level::INFO), LEVEL_INFO);
        assert_eq!(console_level(Level::DEBUG), LEVEL_DEBUG);
        assert_eq!(console_level(Level::TRACE), LEVEL_DEBUG);
    }

    #[test]
    fn test_transfer_into_console() {
        let mut app = App::new();
        let layer = create_custom_log_layer(&mut app);
        app.insert_resource(Console::default());

        for (message, level) in [("loaded", Level::INFO), ("careful", Level::WARN), ("noise", Level::DEBUG)] {
            layer
                .sender
                .send(CapturedLog {
                    message: message.to_string(),
                    level,
                    time: SystemTime::now(),
                })
                .unwrap();
        }
        app.update();

        let console = app.world().resource::<Console>();
        let levels: Vec<_> = console
            .scrollback()
            .buffer()
            .iter()
            .map(|entry| (entry.message().to_string(), entry.level()))
            .collect();
        assert_eq!(
            levels,
            vec![("loaded".to_string(), LEVEL_INFO), ("careful".to_string(), LEVEL_WARN)]
        );
    }
}
