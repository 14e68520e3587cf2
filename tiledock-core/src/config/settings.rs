//! Application settings stored in `config.toml`

use serde::{Deserialize, Serialize};

use crate::geometry::DROP_REGION_LENGTH_PX;
use crate::tracing::{TracingConfig, TracingLevel};

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileDockSettings {
    /// Layout behaviour
    #[serde(default)]
    pub layout: LayoutSettings,
    /// Where layouts are persisted
    #[serde(default)]
    pub storage: StorageSettings,
    /// Log output
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Layout behaviour (`[layout]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    /// Width of the edge bands that classify a drop as a split (default: 100)
    #[serde(default = "default_drop_region_band")]
    pub drop_region_band_px: f64,
}

const fn default_drop_region_band() -> f64 {
    DROP_REGION_LENGTH_PX
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            drop_region_band_px: default_drop_region_band(),
        }
    }
}

impl LayoutSettings {
    /// Band width with non-positive or non-finite values replaced by the default
    #[must_use]
    pub fn effective_band(&self) -> f64 {
        if self.drop_region_band_px.is_finite() && self.drop_region_band_px > 0.0 {
            self.drop_region_band_px
        } else {
            DROP_REGION_LENGTH_PX
        }
    }
}

/// Storage keys (`[storage]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Key of the persisted layout document
    #[serde(default = "default_layout_key")]
    pub layout_key: String,
    /// Key of the persisted active tab table
    #[serde(default = "default_active_tabs_key")]
    pub active_tabs_key: String,
}

fn default_layout_key() -> String {
    "layout".to_string()
}

fn default_active_tabs_key() -> String {
    "active-tabs".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            layout_key: default_layout_key(),
            active_tabs_key: default_active_tabs_key(),
        }
    }
}

/// Log output (`[logging]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level name (default: "info")
    #[serde(default = "default_level")]
    pub level: String,
    /// Optional `EnvFilter` directive overriding `level`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            filter: None,
        }
    }
}

impl LoggingSettings {
    /// Builds a tracing configuration, falling back to info for unknown levels
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        let level = self.level.parse().unwrap_or(TracingLevel::Info);
        let config = TracingConfig::production().with_level(level);
        match &self.filter {
            Some(filter) => config.with_filter(filter.clone()),
            None => config,
        }
    }
}
