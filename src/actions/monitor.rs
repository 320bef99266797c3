//! `focus-monitor` and `move-to-monitor`.
//!
//! Monitors are cycled in the order Hyprland lists them, wrapping around at
//! both ends.  After every switch the cursor is warped to the centre of the
//! target monitor so pointer focus agrees with keyboard focus.

use super::ActionError;
use crate::model::{Direction, MonitorInfo};
use crate::traits::WindowManager;
use log::{debug, info, warn};

/// Focus `target` and centre the cursor on it.
fn focus_and_center<W: WindowManager>(wm: &W, target: &MonitorInfo) -> Result<(), ActionError> {
    wm.focus_monitor(&target.name).map_err(ActionError::wm)?;
    let (x, y) = target.center();
    debug!("  → cursor to ({}, {})", x, y);
    wm.move_cursor(x, y).map_err(ActionError::wm)
}

fn query_monitors<W: WindowManager>(wm: &W) -> Result<Vec<MonitorInfo>, ActionError> {
    let monitors = wm.monitors().map_err(ActionError::wm)?;
    if monitors.is_empty() {
        return Err(ActionError::WindowManager("no monitors reported".into()));
    }
    Ok(monitors)
}

/// Focus the next or previous monitor.
///
/// With a single monitor the target is the current one and nothing is
/// dispatched.
pub fn focus_monitor<W: WindowManager>(wm: &W, dir: Direction) -> Result<(), ActionError> {
    let monitors = query_monitors(wm)?;
    let current = monitors.iter().position(|m| m.focused).unwrap_or_else(|| {
        warn!("no focused monitor reported, counting from {}", monitors[0].name);
        0
    });
    let target = dir.step(current, monitors.len());
    if target == current {
        debug!("only one monitor, nothing to do");
        return Ok(());
    }

    let target = &monitors[target];
    info!("focus monitor {} ({})", target.name, dir);
    focus_and_center(wm, target)
}

/// Move the active window to the next or previous monitor and follow it.
pub fn move_to_monitor<W: WindowManager>(wm: &W, dir: Direction) -> Result<(), ActionError> {
    let window = wm
        .active_window()
        .map_err(ActionError::wm)?
        .ok_or_else(|| ActionError::Stale("no active window to move".into()))?;
    let monitors = query_monitors(wm)?;
    let current = monitors
        .iter()
        .position(|m| m.id == window.monitor)
        .ok_or_else(|| {
            ActionError::Stale(format!(
                "monitor {} of window {} no longer exists",
                window.monitor, window.address
            ))
        })?;
    let target = dir.step(current, monitors.len());
    if target == current {
        debug!("only one monitor, nothing to do");
        return Ok(());
    }

    let target = &monitors[target];
    info!("move window {} to monitor {} ({})", window.address, target.name, dir);
    wm.move_window_to_monitor(&target.name)
        .map_err(ActionError::wm)?;
    focus_and_center(wm, target)
}
