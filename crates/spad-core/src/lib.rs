// ABOUTME: Shared types and configuration for splitpad.
// ABOUTME: Defines pane/file identifiers, split direction, and config file handling.

pub mod config;
pub mod types;

pub use config::{Config, ConfigError, LayoutSettings, LoggingSettings};
pub use types::{Direction, FileId, PaneId, ParseDirectionError};
