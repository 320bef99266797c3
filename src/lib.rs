//! **hyprland-helper** — small convenience actions for Hyprland.
//!
//! Each action is a short, synchronous sequence of queries and commands
//! against Hyprland's control socket, occasionally involving tmux, a menu
//! picker or a detached child process.
//!
//! # Architecture
//!
//! The crate is organised around the collaborator traits in [`traits`]:
//!
//! * [`traits::WindowManager`] — queries and dispatches against the
//!   compositor.
//! * [`traits::Multiplexer`], [`traits::MenuPicker`] and
//!   [`traits::Launcher`] — the external programs some actions drive.
//!
//! The handlers in [`actions`] are generic over those traits.  Concrete
//! backends live in [`hyprland`] (Hyprland IPC) and [`external`] (tmux,
//! rofi, process spawning).  Cross-invocation state is kept by
//! [`state::StateStore`].

pub mod actions;
pub mod cli;
pub mod config;
pub mod external;
pub mod hyprland;
pub mod model;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
