//! `gaps`: nudge the active workspace's inner or outer gaps.
//!
//! The change is applied with `keyword workspace ...`, so it only lasts
//! until Hyprland reloads its configuration.

use super::ActionError;
use crate::model::{GapChange, GapKind, Gaps, WorkspaceGaps};
use crate::traits::WindowManager;
use log::{debug, info};

/// Compute the override for a workspace whose gaps are `current`.
///
/// The adjusted value never drops below zero.  Two couplings keep the
/// layout coherent: with no outer gap there is no inner gap either, and
/// reopening the outer gap from zero brings the inner gap back to its
/// configured default.  Rounding is only enabled while windows are
/// separated.
pub fn plan(current: Gaps, defaults: Gaps, kind: GapKind, change: GapChange) -> WorkspaceGaps {
    let mut gaps = current;
    match kind {
        GapKind::Inner => gaps.inner = change.apply(gaps.inner),
        GapKind::Outer => gaps.outer = change.apply(gaps.outer),
    }

    if gaps.outer == 0 {
        gaps.inner = 0;
    } else if kind == GapKind::Outer && gaps.inner == 0 {
        gaps.inner = defaults.inner;
    }

    WorkspaceGaps {
        gaps,
        rounding: gaps.inner > 0,
    }
}

/// Adjust the active workspace's gaps unless it is listed in `exclude`.
pub fn adjust_gaps<W: WindowManager>(
    wm: &W,
    kind: GapKind,
    change: GapChange,
    exclude: &[i32],
) -> Result<(), ActionError> {
    let workspace = wm.active_workspace().map_err(ActionError::wm)?;
    if exclude.contains(&workspace.id) {
        info!("workspace {} is excluded from gap changes", workspace.id);
        return Ok(());
    }

    let defaults = wm.default_gaps().map_err(ActionError::wm)?;
    let current = wm
        .workspace_gaps(workspace.id)
        .map_err(ActionError::wm)?
        .resolve(defaults);
    debug!("workspace {} gaps: {:?} (defaults {:?})", workspace.id, current, defaults);

    let planned = plan(current, defaults, kind, change);
    info!(
        "workspace {}: gapsin {} → {}, gapsout {} → {}",
        workspace.id, current.inner, planned.gaps.inner, current.outer, planned.gaps.outer
    );
    wm.set_workspace_gaps(workspace.id, &planned)
        .map_err(ActionError::wm)
}
