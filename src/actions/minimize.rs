//! `minimize` / `unminimize`: park windows on a special workspace.
//!
//! A minimized window is moved silently to `special:<name>`.  Its home
//! workspace is remembered twice: in the state file, and as a
//! `workspace:<id>` tag on the window itself so windows parked by an
//! earlier session (or by hand) can still find their way back.

use super::ActionError;
use crate::model::{TagEdit, WindowInfo, WorkspaceTarget, WORKSPACE_TAG_PREFIX};
use crate::state::{MinimizedEntry, StateStore};
use crate::traits::{MenuItem, MenuPicker, WindowManager};
use log::{debug, info};

fn special_name(parking: &str) -> String {
    format!("special:{}", parking)
}

fn workspace_tag(id: i32) -> String {
    format!("{}{}", WORKSPACE_TAG_PREFIX, id)
}

/// Park the active window on `special:<parking>`.
pub fn minimize<W: WindowManager>(
    wm: &W,
    store: &StateStore,
    parking: &str,
) -> Result<(), ActionError> {
    let window = wm
        .active_window()
        .map_err(ActionError::wm)?
        .ok_or_else(|| ActionError::Stale("no active window to minimize".into()))?;

    if window.workspace.name == special_name(parking) {
        info!("window {} is already minimized", window.address);
        return Ok(());
    }

    let home = window.workspace.id;
    info!("minimize {} from workspace {}", window.address, home);
    wm.retag_and_move(
        &window.address,
        &[TagEdit::Add(workspace_tag(home))],
        &WorkspaceTarget::Special(parking.to_string()),
        true,
    )
    .map_err(ActionError::wm)?;

    let mut state = store.load()?;
    state.minimized.insert(
        window.address.clone(),
        MinimizedEntry {
            workspace: home,
            title: window.title,
            class: window.class,
        },
    );
    store.save(&state)?;
    Ok(())
}

fn menu_item(window: &WindowInfo) -> MenuItem {
    let label = if window.title.is_empty() {
        window.class.clone()
    } else {
        window.title.clone()
    };
    MenuItem {
        label,
        icon: window.class.clone(),
    }
}

/// Let the user pick a parked window and send it home.
///
/// The home workspace is the recorded entry, else the window's
/// `workspace:<id>` tag, else the active workspace.  Special workspaces
/// (negative ids) are never used as a destination.
pub fn unminimize<W, P>(
    wm: &W,
    picker: &P,
    store: &StateStore,
    parking: &str,
    prompt: &str,
) -> Result<(), ActionError>
where
    W: WindowManager,
    P: MenuPicker,
{
    let special = special_name(parking);
    let clients = wm.clients().map_err(ActionError::wm)?;

    let mut state = store.load()?;
    let pruned = state.prune_minimized(clients.iter().map(|c| c.address.as_str()));
    if pruned > 0 {
        debug!("dropped {} entries for closed windows", pruned);
        store.save(&state)?;
    }

    let parked: Vec<&WindowInfo> = clients
        .iter()
        .filter(|c| c.workspace.name == special)
        .collect();
    if parked.is_empty() {
        info!("no minimized windows");
        return Ok(());
    }

    let items: Vec<MenuItem> = parked.iter().map(|w| menu_item(w)).collect();
    let Some(index) = picker.pick(prompt, &items).map_err(ActionError::external)? else {
        debug!("menu dismissed");
        return Ok(());
    };
    let chosen = parked.get(index).ok_or_else(|| {
        ActionError::External(format!(
            "menu returned index {} for {} entries",
            index,
            parked.len()
        ))
    })?;
    let address = chosen.address.clone();

    // The window may have closed while the menu was open.
    let window = wm
        .clients()
        .map_err(ActionError::wm)?
        .into_iter()
        .find(|c| c.address == address);
    let Some(window) = window else {
        if state.minimized.remove(&address).is_some() {
            store.save(&state)?;
        }
        return Err(ActionError::Stale(format!("window {} is gone", address)));
    };

    let recorded = state.minimized.get(&address).map(|e| e.workspace);
    let tagged = window.workspace_tag();
    let home = match recorded.into_iter().chain(tagged).find(|id| *id > 0) {
        Some(id) => id,
        None => wm.active_workspace().map_err(ActionError::wm)?.id,
    };

    info!("restore {} to workspace {}", address, home);
    let untag: Vec<TagEdit> = window
        .workspace_tags()
        .into_iter()
        .map(TagEdit::Remove)
        .collect();
    wm.retag_and_move(&address, &untag, &WorkspaceTarget::Id(home), false)
        .map_err(ActionError::wm)?;

    if state.minimized.remove(&address).is_some() {
        store.save(&state)?;
    }
    Ok(())
}
