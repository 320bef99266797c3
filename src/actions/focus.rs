//! `last-focused`: toggle between the two most recently focused windows.

use super::ActionError;
use crate::model::WindowInfo;
use crate::state::{StateStore, ToggleState};
use crate::traits::WindowManager;
use log::{debug, info};

/// Address of the window `last-focused` should switch to.
///
/// The compositor's focus history on the active workspace decides first:
/// the window ranked second is the target.  When the workspace holds fewer
/// than two windows, the persisted toggle pair is consulted; its entry that
/// is not the active window wins if that window still exists and is not
/// parked on a special workspace.
pub fn toggle_target(
    clients: &[WindowInfo],
    workspace_id: i32,
    toggle: &ToggleState,
) -> Option<String> {
    let mut on_workspace: Vec<&WindowInfo> = clients
        .iter()
        .filter(|c| c.workspace.id == workspace_id && c.focus_history_id >= 0)
        .collect();
    on_workspace.sort_by_key(|c| c.focus_history_id);
    if let Some(second) = on_workspace.get(1) {
        return Some(second.address.clone());
    }

    let active = clients
        .iter()
        .find(|c| c.focus_history_id == 0)
        .map(|c| c.address.as_str());
    [toggle.previous.as_deref(), toggle.current.as_deref()]
        .into_iter()
        .flatten()
        .find(|addr| {
            Some(*addr) != active
                && clients
                    .iter()
                    .any(|c| c.address == *addr && !c.on_special_workspace())
        })
        .map(str::to_string)
}

/// Focus the previously focused window and remember the pair.
///
/// Silently does nothing when there is no second window to go to.
pub fn last_focused<W: WindowManager>(wm: &W, store: &StateStore) -> Result<(), ActionError> {
    let clients = wm.clients().map_err(ActionError::wm)?;
    let workspace = wm.active_workspace().map_err(ActionError::wm)?;
    let mut state = store.load()?;

    let Some(target) = toggle_target(&clients, workspace.id, &state.focus) else {
        debug!("fewer than two windows to toggle between");
        return Ok(());
    };

    let active = clients
        .iter()
        .find(|c| c.focus_history_id == 0)
        .map(|c| c.address.clone());

    info!("focus {}", target);
    wm.focus_window(&target).map_err(ActionError::wm)?;

    state.focus.record(active, target);
    store.save(&state)?;
    Ok(())
}
