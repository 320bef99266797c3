//! Command-line definitions and dispatch.

use crate::actions::{dropdown, focus, gaps, minimize, monitor, ActionError};
use crate::config::{Config, GapsConfig};
use crate::external::launcher::SpawnLauncher;
use crate::external::rofi::Rofi;
use crate::external::tmux::Tmux;
use crate::hyprland::wm::HyprlandWm;
use crate::model::{Direction, GapChange, GapKind};
use crate::state::StateStore;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Helper actions for Hyprland.
#[derive(Parser, Debug)]
#[command(name = "hyprland-helper", version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the JSON config file.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Toggle between the last two focused windows.
    #[command(name = "last-focused", alias = "last_focused")]
    LastFocused,

    /// Show or hide a dropdown terminal attached to a tmux session.
    #[command(name = "dropdown-term")]
    DropdownTerm {
        /// Terminal emulator to launch.
        #[arg(short, long)]
        terminal: Option<String>,

        /// tmux session name.
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Focus the next or previous monitor and centre the cursor on it.
    #[command(name = "focus-monitor")]
    FocusMonitor(DirectionArgs),

    /// Move the active window to the next or previous monitor.
    #[command(name = "move-to-monitor")]
    MoveToMonitor(DirectionArgs),

    /// Change the active workspace's gaps until the next reload.
    Gaps {
        /// Which gap to change.
        #[arg(value_enum)]
        kind: GapKind,

        #[command(flatten)]
        change: GapChangeArgs,

        /// Comma-separated workspace ids to leave untouched.
        #[arg(short, long, value_delimiter = ',', value_name = "IDS")]
        exclude: Vec<i32>,
    },

    /// Minimize the active window.
    Minimize,

    /// Pick a minimized window from a menu and restore it.
    Unminimize,
}

#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct DirectionArgs {
    /// Next monitor.
    #[arg(short, long)]
    pub next: bool,

    /// Previous monitor.
    #[arg(short, long)]
    pub previous: bool,
}

impl DirectionArgs {
    pub fn direction(self) -> Direction {
        if self.previous {
            Direction::Previous
        } else {
            Direction::Next
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct GapChangeArgs {
    /// Grow the gap by N pixels.
    #[arg(short, long, value_name = "N")]
    pub increase: Option<u32>,

    /// Shrink the gap by N pixels (never below zero).
    #[arg(short, long, value_name = "N")]
    pub decrease: Option<u32>,
}

impl GapChangeArgs {
    pub fn change(self) -> Result<GapChange, ActionError> {
        match (self.increase, self.decrease) {
            (Some(n), None) => Ok(GapChange::Increase(n)),
            (None, Some(n)) => Ok(GapChange::Decrease(n)),
            _ => Err(ActionError::InvalidArgument(
                "exactly one of --increase or --decrease is required".into(),
            )),
        }
    }
}

/// Workspaces `gaps` must leave alone: the configured list plus those
/// given on the command line, each id once.
pub fn excluded_workspaces(config: &GapsConfig, extra: Vec<i32>) -> Vec<i32> {
    let mut excluded = config.exclude.clone();
    for id in extra {
        if !excluded.contains(&id) {
            excluded.push(id);
        }
    }
    excluded
}

impl Cli {
    /// Run the selected action against the live Hyprland session.
    pub fn execute(self, mut config: Config) -> Result<(), ActionError> {
        let wm = HyprlandWm::new();
        let store = StateStore::new(
            config
                .state_file
                .clone()
                .unwrap_or_else(StateStore::default_path),
        );

        match self.command {
            Commands::LastFocused => focus::last_focused(&wm, &store),
            Commands::DropdownTerm { terminal, session } => {
                if let Some(terminal) = terminal {
                    config.dropdown.terminal = terminal;
                }
                if let Some(session) = session {
                    config.dropdown.session = session;
                }
                let tmux = Tmux::new(config.dropdown.multiplexer.clone());
                dropdown::dropdown_term(&wm, &tmux, &SpawnLauncher, &store, &config.dropdown)
            }
            Commands::FocusMonitor(args) => monitor::focus_monitor(&wm, args.direction()),
            Commands::MoveToMonitor(args) => monitor::move_to_monitor(&wm, args.direction()),
            Commands::Gaps {
                kind,
                change,
                exclude,
            } => {
                let excluded = excluded_workspaces(&config.gaps, exclude);
                gaps::adjust_gaps(&wm, kind, change.change()?, &excluded)
            }
            Commands::Minimize => minimize::minimize(&wm, &store, &config.minimize.workspace),
            Commands::Unminimize => {
                let rofi = Rofi::new(config.menu.program.clone());
                minimize::unminimize(
                    &wm,
                    &rofi,
                    &store,
                    &config.minimize.workspace,
                    &config.menu.prompt,
                )
            }
        }
    }
}
