//! Hyprland-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`WindowManager`](crate::traits::WindowManager) trait, powered by
//! Hyprland's command socket.
//!
//! Nothing outside this module should reference Hyprland's wire format
//! directly.

pub mod wm;
