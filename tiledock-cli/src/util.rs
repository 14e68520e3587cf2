//! Shared utility functions used across command modules.

use std::path::{Path, PathBuf};

use tiledock_core::layout::tab_groups;
use tiledock_core::persistence::{DocumentFormat, read_document, write_document};
use tiledock_core::{
    ActiveTabState, ConfigManager, ItemId, LayoutDocument, NodeRef, Point, Rect, TileDockSettings,
};

use crate::error::CliError;

/// Global options shared by every command.
pub struct CliContext {
    /// Custom configuration directory
    pub config_dir: Option<PathBuf>,
    /// Explicit layout document path
    pub layout_path: Option<PathBuf>,
    /// Suppress informational output
    pub quiet: bool,
}

impl CliContext {
    /// Creates a `ConfigManager` using the optional custom config directory.
    pub fn config_manager(&self) -> Result<ConfigManager, CliError> {
        match &self.config_dir {
            Some(path) => Ok(ConfigManager::with_config_dir(path.clone())),
            None => ConfigManager::new()
                .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
        }
    }

    /// Loads settings, falling back to defaults when no file exists.
    pub fn settings(&self) -> Result<TileDockSettings, CliError> {
        Ok(self.config_manager()?.load_settings()?)
    }

    /// Resolves the layout document path.
    pub fn layout_path(&self) -> Result<PathBuf, CliError> {
        if let Some(path) = &self.layout_path {
            return Ok(path.clone());
        }
        let manager = self.config_manager()?;
        let settings = manager.load_settings()?;
        Ok(manager.layouts_dir().join(format!(
            "{}.{}",
            settings.storage.layout_key,
            DocumentFormat::Json.extension()
        )))
    }

    /// Prints an informational line unless `--quiet` was given.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

/// Reads the layout document at `path`.
pub fn load_document(path: &Path) -> Result<LayoutDocument, CliError> {
    if !path.exists() {
        return Err(CliError::NotFound(format!(
            "layout document {} (run `tiledock init` first)",
            path.display()
        )));
    }
    Ok(read_document(path)?)
}

/// Writes `document` to `path`, stamping the save time.
pub fn save_document(path: &Path, document: LayoutDocument) -> Result<(), CliError> {
    let document = LayoutDocument::new(document.layout, document.active_tabs);
    write_document(path, &document)?;
    tracing::debug!(path = %path.display(), "Layout document written");
    Ok(())
}

/// Rebuilds the active tab table for `tree`: known groups keep their index
/// (clamped to the last tab), new groups start at the first tab.
pub fn carry_active_tabs(tree: Option<&NodeRef>, previous: &ActiveTabState) -> ActiveTabState {
    let mut active = previous.clone();
    active.reconcile(tree);
    active
}

/// Makes `tab` the active tab of whichever group holds it.
pub fn activate_tab(tree: Option<&NodeRef>, active: &mut ActiveTabState, tab: &ItemId) {
    let Some(tree) = tree else {
        return;
    };
    for group in tab_groups(tree) {
        if let Some(index) = group.tabs.iter().position(|candidate| &candidate.id == tab) {
            active.set(group.id.clone(), index);
            return;
        }
    }
}

fn parse_numbers<const N: usize>(s: &str, what: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("invalid {what} `{s}`: expected {N} comma-separated numbers"));
    }
    let mut numbers = [0.0; N];
    for (slot, part) in numbers.iter_mut().zip(parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("invalid {what} `{s}`: {e}"))?;
    }
    Ok(numbers)
}

/// Parse `x,y,width,height` into a `Rect`
pub fn parse_rect(s: &str) -> Result<Rect, String> {
    let [x, y, width, height] = parse_numbers::<4>(s, "bounds")?;
    if width < 0.0 || height < 0.0 {
        return Err(format!("invalid bounds `{s}`: negative size"));
    }
    Ok(Rect::new(x, y, width, height))
}

/// Parse `x,y` into a `Point`
pub fn parse_point(s: &str) -> Result<Point, String> {
    let [x, y] = parse_numbers::<2>(s, "point")?;
    Ok(Point::new(x, y))
}
