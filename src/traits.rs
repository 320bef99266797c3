//! Collaborator traits that decouple the actions from Hyprland, tmux, rofi
//! and process spawning.
//!
//! Every concrete backend (Hyprland IPC, the tmux CLI, a test harness, …)
//! implements one of these traits.  The handlers in
//! [`actions`](crate::actions) only depend on these abstractions.

use crate::model::{
    GapRule, Gaps, MonitorInfo, TagEdit, WindowInfo, WorkspaceGaps, WorkspaceInfo,
    WorkspaceTarget,
};

/// Abstraction over a window manager's query/command surface.
///
/// An implementation might talk to Hyprland via IPC, or it might be a
/// recording stub used in tests.  Every method is a single blocking
/// round-trip.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    //  Queries

    /// All mapped client windows.
    fn clients(&self) -> Result<Vec<WindowInfo>, Self::Error>;

    /// The focused window, or `None` if nothing is focused.
    fn active_window(&self) -> Result<Option<WindowInfo>, Self::Error>;

    /// The workspace that currently has focus.
    fn active_workspace(&self) -> Result<WorkspaceInfo, Self::Error>;

    /// Monitors in the order the window manager lists them.
    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error>;

    /// Gaps set by workspace rules for `workspace_id`.  Fields no rule
    /// sets are `None`.
    fn workspace_gaps(&self, workspace_id: i32) -> Result<GapRule, Self::Error>;

    /// Globally configured gaps.
    fn default_gaps(&self) -> Result<Gaps, Self::Error>;

    //  Commands

    /// Give keyboard focus to the window at `address`.
    fn focus_window(&self, address: &str) -> Result<(), Self::Error>;

    /// Close the window at `address`.
    fn close_window(&self, address: &str) -> Result<(), Self::Error>;

    /// Focus the monitor called `name`.
    fn focus_monitor(&self, name: &str) -> Result<(), Self::Error>;

    /// Warp the pointer to layout coordinates `(x, y)`.
    fn move_cursor(&self, x: i32, y: i32) -> Result<(), Self::Error>;

    /// Move the focused window to the monitor called `name`.
    fn move_window_to_monitor(&self, name: &str) -> Result<(), Self::Error>;

    /// Apply `tags` to the window at `address`, then move it to
    /// `workspace`, all in one request.
    ///
    /// With `silent` the focus stays where it is; otherwise the user
    /// follows the window.
    ///
    /// An error means none of the changes were confirmed.
    fn retag_and_move(
        &self,
        address: &str,
        tags: &[TagEdit],
        workspace: &WorkspaceTarget,
        silent: bool,
    ) -> Result<(), Self::Error>;

    /// Apply a transient gap/rounding override to `workspace_id`.
    ///
    /// The override is not persisted: reloading the window manager
    /// restores the configured values.
    fn set_workspace_gaps(
        &self,
        workspace_id: i32,
        gaps: &WorkspaceGaps,
    ) -> Result<(), Self::Error>;
}

/// A terminal multiplexer that keeps sessions alive across terminals.
pub trait Multiplexer {
    type Error: std::error::Error + Send + 'static;

    /// Detach every client from `session`.
    ///
    /// Returns `Ok(false)` when the multiplexer ran but had nothing to
    /// detach (e.g. the session does not exist).
    fn detach(&self, session: &str) -> Result<bool, Self::Error>;

    /// Shell snippet that attaches to `session`, creating it if needed.
    fn attach_or_create(&self, session: &str) -> String;
}

/// One line in a [`MenuPicker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// Icon name (usually the application class).
    pub icon: String,
}

/// An interactive menu that lets the user pick one entry.
pub trait MenuPicker {
    type Error: std::error::Error + Send + 'static;

    /// Show `items` under `prompt` and return the index of the chosen one,
    /// or `None` if the user dismissed the menu.
    fn pick(&self, prompt: &str, items: &[MenuItem]) -> Result<Option<usize>, Self::Error>;
}

/// Starts programs detached from the helper process.
pub trait Launcher {
    type Error: std::error::Error + Send + 'static;

    /// Spawn `program` with `args` without waiting for it.
    fn spawn(&self, program: &str, args: &[String]) -> Result<(), Self::Error>;
}
