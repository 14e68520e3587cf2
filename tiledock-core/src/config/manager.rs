//! Loading and saving `config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ConfigResult};
use super::settings::TileDockSettings;
use crate::tracing::span_names;

/// Name of the settings file inside the config directory
pub const SETTINGS_FILE: &str = "config.toml";

/// Name of the directory under the platform config dir
const APP_DIR: &str = "tiledock";

/// Reads and writes settings under one config directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the platform config directory
    /// (`$XDG_CONFIG_HOME/tiledock` on Linux).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` when the platform has none.
    pub fn new() -> ConfigResult<Self> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_config_dir(base.join(APP_DIR)))
    }

    /// Creates a manager for an explicit directory.
    #[must_use]
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// The directory this manager reads from.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path of the settings file.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Default directory for persisted layouts.
    #[must_use]
    pub fn layouts_dir(&self) -> PathBuf {
        self.config_dir.join("layouts")
    }

    /// Loads settings, returning defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` if it is not valid settings TOML.
    pub fn load_settings(&self) -> ConfigResult<TileDockSettings> {
        let _span = crate::trace_operation_debug!(span_names::CONFIG_LOAD).entered();
        let path = self.settings_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(TileDockSettings::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path,
            message: e.to_string(),
        })
    }

    /// Writes settings, creating the config directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` or `ConfigError::Io`.
    pub fn save_settings(&self, settings: &TileDockSettings) -> ConfigResult<()> {
        let _span = crate::trace_operation_debug!(span_names::CONFIG_SAVE).entered();
        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::Io {
            path: self.config_dir.clone(),
            source,
        })?;
        let path = self.settings_path();
        fs::write(&path, content).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Settings saved");
        Ok(())
    }
}
