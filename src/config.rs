//! Per-instance console configuration.

use bevy::prelude::*;

/// Default log capacity.
pub const DEFAULT_CAPACITY: usize = 1024;
/// Default number of log lines in one page of the view.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Default prefix echoed in front of submitted lines.
pub const DEFAULT_PROMPT: &str = "$ ";

/// Configuration for a [`Console`](crate::core::Console).
///
/// Insert this resource before adding [`ConsolePlugin`](crate::ConsolePlugin)
/// to override the defaults. Every console owns its own copy; nothing here is
/// shared between instances.
///
/// # Examples
///
/// ```ignore
/// App::new()
///     .insert_resource(ConsoleConfig {
///         capacity: 0, // unbounded
///         page_size: 40,
///         ..default()
///     })
///     .add_plugins(ConsolePlugin);
/// ```
#[derive(Resource, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "persist", serde(default))]
pub struct ConsoleConfig {
    /// Maximum number of log entries kept. `0` means unbounded.
    pub capacity: usize,
    /// Number of entries in one page of the view (at least 1).
    pub page_size: usize,
    /// Whether level 255 (debug) entries are recorded.
    pub debug_logging: bool,
    /// Whether failed submissions produce a diagnostic log line.
    pub error_reporting: bool,
    /// Whether formatted entries carry a timestamp.
    pub show_timestamps: bool,
    /// Prefix echoed in front of submitted lines.
    pub prompt: String,
    /// Levels hidden from the view at startup.
    pub hidden_levels: Vec<u8>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
            debug_logging: false,
            error_reporting: true,
            show_timestamps: true,
            prompt: DEFAULT_PROMPT.to_string(),
            hidden_levels: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.error_reporting);
        assert!(!config.debug_logging);
        assert_eq!(config.prompt, "$ ");
        assert!(config.hidden_levels.is_empty());
    }
}
