//! Configuration management for TileDock
//!
//! This module provides the `ConfigManager` for loading and saving
//! `config.toml`.

mod error;
mod manager;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use manager::{ConfigManager, SETTINGS_FILE};
pub use settings::{LayoutSettings, LoggingSettings, StorageSettings, TileDockSettings};
