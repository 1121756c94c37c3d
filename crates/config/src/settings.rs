// Application settings
// Loaded from ~/.config/dollhouse/settings.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Preferred canvas dimensions, in canvas units (terminal cells). The
/// TUI shrinks the canvas to fit the terminal when it has to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 72.0,
            height: 18.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Palette tokens. Empty = built-in default set.
    pub palette: Vec<String>,

    /// Override for the saved-scene directory. None = platform data dir.
    pub store_dir: Option<PathBuf>,

    pub canvas: CanvasSettings,
}

impl Settings {
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dollhouse")
            .join("settings.toml")
    }

    /// Load settings, falling back to defaults on a missing or
    /// unparseable file. Startup never fails on configuration.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let text = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, text).map_err(|e| e.to_string())
    }
}
