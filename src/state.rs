//! Cross-invocation session state.
//!
//! Every action runs in a fresh process, so the little state that must
//! survive between invocations lives in a JSON file:
//!
//! ```json
//! {
//!   "focus": { "previous": "0x55d1c0a3e2f0", "current": "0x55d1c0b41a80" },
//!   "minimized": {
//!     "0x55d1c0c00010": { "workspace": 3, "title": "web", "class": "firefox" }
//!   },
//!   "dropdown_open": false
//! }
//! ```
//!
//! The file is read, modified and written back without locking.  Writes go
//! to a sibling `*.tmp` file that is renamed into place, so a concurrent
//! reader sees either the old or the new document, never a torn one; two
//! overlapping writers may still lose one update.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The two most recently focused windows, as seen by `last-focused`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    pub previous: Option<String>,
    pub current: Option<String>,
}

impl ToggleState {
    /// Record that focus moved from `from` to `to`.
    pub fn record(&mut self, from: Option<String>, to: String) {
        self.previous = from;
        self.current = Some(to);
    }
}

/// Where a minimized window came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimizedEntry {
    /// Workspace id to restore the window to.
    pub workspace: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub class: String,
}

/// Everything persisted between invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub focus: ToggleState,
    /// Minimized windows keyed by address.
    #[serde(default)]
    pub minimized: BTreeMap<String, MinimizedEntry>,
    /// Whether the last `dropdown-term` invocation opened the terminal.
    #[serde(default)]
    pub dropdown_open: bool,
}

impl SessionState {
    /// Drop minimized entries whose window no longer exists.
    ///
    /// Returns the number of entries removed.
    pub fn prune_minimized<'a, I>(&mut self, live_addresses: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let live: std::collections::HashSet<&str> = live_addresses.into_iter().collect();
        let before = self.minimized.len();
        self.minimized.retain(|address, _| live.contains(address.as_str()));
        before - self.minimized.len()
    }
}

/// Errors from reading or writing the state file.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed store for [`SessionState`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `$XDG_RUNTIME_DIR/hyprland-helper/state.json`.
    ///
    /// Window addresses only mean something for the lifetime of one
    /// compositor session, so the session-scoped runtime directory is
    /// preferred; the user cache directory is the fallback.
    pub fn default_path() -> PathBuf {
        dirs::runtime_dir()
            .or_else(dirs::cache_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join("hyprland-helper")
            .join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state.  A missing file yields the default state; an
    /// unreadable document is discarded with a warning.
    pub fn load(&self) -> Result<SessionState, StateError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no state file at {}, starting fresh", self.path.display());
                return Ok(SessionState::default());
            }
            Err(source) => {
                return Err(StateError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        match serde_json::from_str(&contents) {
            Ok(state) => Ok(state),
            Err(e) => {
                warn!("discarding corrupt state file {}: {}", self.path.display(), e);
                Ok(SessionState::default())
            }
        }
    }

    /// Write the state atomically.
    pub fn save(&self, state: &SessionState) -> Result<(), StateError> {
        let io_err = |source| StateError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let temp_file = self.path.with_extension("json.tmp");

        if let Err(e) = fs::write(&temp_file, json) {
            let _ = fs::remove_file(&temp_file);
            return Err(io_err(e));
        }
        if let Err(e) = fs::rename(&temp_file, &self.path) {
            let _ = fs::remove_file(&temp_file);
            return Err(io_err(e));
        }
        debug!("saved state to {}", self.path.display());
        Ok(())
    }
}
