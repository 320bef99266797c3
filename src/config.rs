//! Application configuration.
//!
//! The configuration is an optional JSON file, by default
//! `$XDG_CONFIG_HOME/hyprland-helper/config.json`.  Every section and every
//! field is optional; a missing file means compiled-in defaults.
//!
//! # Example
//!
//! ```json
//! {
//!   "dropdown": {
//!     "terminal": "kitty",
//!     "class": "dropdown-term",
//!     "session": "hypr"
//!   },
//!   "menu": { "program": "rofi", "prompt": "Restore" },
//!   "gaps": { "exclude": [9] },
//!   "minimize": { "workspace": "minimized" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// A minimal `{}` file is valid; unknown keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dropdown terminal settings.
    #[serde(default)]
    pub dropdown: DropdownConfig,

    /// Menu picker used by `unminimize`.
    #[serde(default)]
    pub menu: MenuConfig,

    /// `gaps` settings.
    #[serde(default)]
    pub gaps: GapsConfig,

    /// `minimize` / `unminimize` settings.
    #[serde(default)]
    pub minimize: MinimizeConfig,

    /// Override for the session state file location.
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

/// Dropdown terminal settings.
///
/// The terminal is started as
/// `<terminal> <class_flag> <class> <exec_flag> sh -c "<attach-or-create>"`.
/// Window rules keyed on `class` are expected to make it float, pin and
/// slide in from the top.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownConfig {
    pub terminal: String,
    /// Window class reserved for the dropdown terminal.
    pub class: String,
    /// tmux session name.
    pub session: String,
    pub class_flag: String,
    pub exec_flag: String,
    pub multiplexer: String,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            terminal: "alacritty".into(),
            class: "dropdown-term".into(),
            session: "hypr".into(),
            class_flag: "--class".into(),
            exec_flag: "-e".into(),
            multiplexer: "tmux".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub program: String,
    pub prompt: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            program: "rofi".into(),
            prompt: "Restore".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GapsConfig {
    /// Workspace ids whose gaps are never touched.
    pub exclude: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimizeConfig {
    /// Special workspace used as the parking area, without `special:`.
    pub workspace: String,
}

impl Default for MinimizeConfig {
    fn default() -> Self {
        Self {
            workspace: "minimized".into(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Default config file location (`$XDG_CONFIG_HOME/hyprland-helper/config.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("hyprland-helper").join("config.json"))
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
