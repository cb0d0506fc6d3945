//! Clipboard access for paste.

use bevy::prelude::*;

/// Source of pasted text.
///
/// Fetching may block; the console waits for it before inserting.
pub trait ClipboardProvider: Send + Sync {
    /// Current clipboard text, if any.
    fn get_text(&self) -> Option<String>;
}

impl<F> ClipboardProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn get_text(&self) -> Option<String> {
        self()
    }
}

/// The clipboard the console pastes from on [`EditKey::PasteClipboard`](super::EditKey::PasteClipboard).
///
/// Absent by default; hosts insert one backed by their platform clipboard.
///
/// ```ignore
/// app.insert_resource(ConsoleClipboard::new(|| arboard_get_text()));
/// ```
#[derive(Resource)]
pub struct ConsoleClipboard(Box<dyn ClipboardProvider>);

impl ConsoleClipboard {
    pub fn new(provider: impl ClipboardProvider + 'static) -> Self {
        Self(Box::new(provider))
    }

    pub fn provider(&self) -> &dyn ClipboardProvider {
        self.0.as_ref()
    }

    pub fn get_text(&self) -> Option<String> {
        self.0.get_text()
    }
}
