//! Types shared by every component.
//!
//! Snapshots returned by the window manager ([`WindowInfo`],
//! [`MonitorInfo`], [`WorkspaceInfo`]) are read-only views: the helper
//! never owns or mutates them, it only issues commands that make the
//! compositor change its own state.

use std::fmt;

/// Step direction through the ordered monitor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Next,
    Previous,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Previous => write!(f, "previous"),
        }
    }
}

impl Direction {
    /// Index reached by stepping once from `current` in a list of `len`
    /// entries, wrapping at both ends.
    ///
    /// `len` must be non-zero.
    pub fn step(self, current: usize, len: usize) -> usize {
        match self {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        }
    }
}

/// Which gap a `gaps` invocation adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GapKind {
    /// Gaps between windows (`gapsin`).
    Inner,
    /// Gaps between windows and the monitor edge (`gapsout`).
    Outer,
}

impl fmt::Display for GapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapKind::Inner => write!(f, "inner"),
            GapKind::Outer => write!(f, "outer"),
        }
    }
}

/// Requested change to a gap value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapChange {
    Increase(u32),
    Decrease(u32),
}

impl GapChange {
    /// Apply the change to `value`, never going below zero.
    pub fn apply(self, value: u32) -> u32 {
        match self {
            GapChange::Increase(n) => value.saturating_add(n),
            GapChange::Decrease(n) => value.saturating_sub(n),
        }
    }
}

/// Inner/outer gap pair of a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gaps {
    pub inner: u32,
    pub outer: u32,
}

/// Gap values set by a workspace rule.  A `None` field falls back to the
/// global default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GapRule {
    pub inner: Option<u32>,
    pub outer: Option<u32>,
}

impl GapRule {
    /// Effective gaps once unset fields fall back to `defaults`.
    pub fn resolve(self, defaults: Gaps) -> Gaps {
        Gaps {
            inner: self.inner.unwrap_or(defaults.inner),
            outer: self.outer.unwrap_or(defaults.outer),
        }
    }
}

/// Transient per-workspace layout override sent with `keyword workspace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceGaps {
    pub gaps: Gaps,
    pub rounding: bool,
}

/// Target of a move-to-workspace dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceTarget {
    /// A regular workspace by numeric id.
    Id(i32),
    /// A special (hidden) workspace by name, without the `special:` prefix.
    Special(String),
}

impl fmt::Display for WorkspaceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceTarget::Id(id) => write!(f, "{}", id),
            WorkspaceTarget::Special(name) => write!(f, "special:{}", name),
        }
    }
}

/// One change to a window's tag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEdit {
    Add(String),
    Remove(String),
}

impl fmt::Display for TagEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagEdit::Add(tag) => write!(f, "+{}", tag),
            TagEdit::Remove(tag) => write!(f, "-{}", tag),
        }
    }
}

/// Workspace reference embedded in window and monitor snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkspaceRef {
    pub id: i32,
    pub name: String,
}

/// Snapshot of a client window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Window manager address (e.g. `"0x55d1c0a3e2f0"`).
    pub address: String,
    /// Human-readable title.
    pub title: String,
    /// Application class.
    pub class: String,
    /// Workspace the window currently lives on.
    pub workspace: WorkspaceRef,
    /// Numeric id of the monitor the window is on.
    pub monitor: i64,
    pub floating: bool,
    /// Position in the focus history: 0 is the most recently focused
    /// window, 1 the one before it, and so on.
    pub focus_history_id: i32,
    /// Free-form window tags.
    pub tags: Vec<String>,
}

impl WindowInfo {
    /// Workspace id stored in a `workspace:<id>` tag, if present.
    ///
    /// Hyprland appends `*` to dynamically added tags, which is ignored.
    pub fn workspace_tag(&self) -> Option<i32> {
        self.tags.iter().find_map(|t| {
            t.strip_prefix(WORKSPACE_TAG_PREFIX)
                .and_then(|id| id.trim_end_matches('*').parse().ok())
        })
    }

    /// Every `workspace:*` tag on the window, without Hyprland's `*` marker.
    pub fn workspace_tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .filter(|t| t.starts_with(WORKSPACE_TAG_PREFIX))
            .map(|t| t.trim_end_matches('*').to_string())
            .collect()
    }

    /// Whether the window sits on a special (hidden) workspace.
    pub fn on_special_workspace(&self) -> bool {
        self.workspace.id < 0 || self.workspace.name.starts_with("special:")
    }
}

/// Prefix of the tag recording a minimized window's home workspace.
pub const WORKSPACE_TAG_PREFIX: &str = "workspace:";

/// Snapshot of a monitor.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorInfo {
    pub id: i64,
    /// Name Hyprland uses for this output (e.g. `"DP-1"`).
    pub name: String,
    /// Horizontal resolution in pixels.
    pub width: u32,
    /// Vertical resolution in pixels.
    pub height: u32,
    /// X position on the virtual desktop (layout coordinates).
    pub x: i32,
    /// Y position on the virtual desktop (layout coordinates).
    pub y: i32,
    pub scale: f64,
    /// wl_output transform (0-7).
    pub transform: u8,
    pub focused: bool,
    pub active_workspace: WorkspaceRef,
}

impl MonitorInfo {
    /// Centre of the monitor in layout coordinates.
    ///
    /// The pixel size is divided by the scale, and transforms 1, 3, 5 and 7
    /// (rotated by 90° or 270°) swap width and height.
    pub fn center(&self) -> (i32, i32) {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        let (w, h) = match self.transform {
            1 | 3 | 5 | 7 => (self.height, self.width),
            _ => (self.width, self.height),
        };
        let cx = self.x as f64 + w as f64 / scale / 2.0;
        let cy = self.y as f64 + h as f64 / scale / 2.0;
        (cx as i32, cy as i32)
    }
}

/// The active workspace as reported by `j/activeworkspace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceInfo {
    pub id: i32,
    pub name: String,
    /// Name of the monitor showing the workspace.
    pub monitor: String,
}
