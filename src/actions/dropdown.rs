//! `dropdown-term`: show or hide a terminal bound to a tmux session.
//!
//! The terminal is identified by a reserved window class.  Hiding detaches
//! the tmux session, which ends the terminal process while the session
//! keeps running; showing starts a fresh terminal that reattaches.  Window
//! rules like the following are expected in the Hyprland config:
//!
//! ```text
//! windowrulev2 = float,class:^(dropdown-term)$
//! windowrulev2 = pin,class:^(dropdown-term)$
//! windowrulev2 = size 50% 35%,class:^(dropdown-term)$
//! windowrulev2 = move 25% 1%,class:^(dropdown-term)$
//! windowrulev2 = animation slide top,class:^(dropdown-term)$
//! ```

use super::ActionError;
use crate::config::DropdownConfig;
use crate::state::StateStore;
use crate::traits::{Launcher, Multiplexer, WindowManager};
use log::{info, warn};

/// Command-line arguments for the terminal, e.g.
/// `--class dropdown-term -e sh -c "tmux attach -t hypr || ..."`.
pub fn terminal_args(config: &DropdownConfig, attach: &str) -> Vec<String> {
    vec![
        config.class_flag.clone(),
        config.class.clone(),
        config.exec_flag.clone(),
        "sh".into(),
        "-c".into(),
        attach.to_string(),
    ]
}

/// Toggle the dropdown terminal.
pub fn dropdown_term<W, M, L>(
    wm: &W,
    mux: &M,
    launcher: &L,
    store: &StateStore,
    config: &DropdownConfig,
) -> Result<(), ActionError>
where
    W: WindowManager,
    M: Multiplexer,
    L: Launcher,
{
    let clients = wm.clients().map_err(ActionError::wm)?;
    let existing = clients.iter().find(|c| c.class == config.class);
    let mut state = store.load()?;

    match existing {
        Some(terminal) => {
            if !state.dropdown_open {
                info!("dropdown terminal {} was opened outside the helper", terminal.address);
            }
            info!("hide dropdown terminal (detach session {})", config.session);
            let detached = mux.detach(&config.session).map_err(ActionError::external)?;
            if !detached {
                warn!(
                    "session {} had no client, closing window {}",
                    config.session, terminal.address
                );
                wm.close_window(&terminal.address).map_err(ActionError::wm)?;
            }
            state.dropdown_open = false;
        }
        None => {
            if state.dropdown_open {
                info!("dropdown terminal was closed outside the helper");
            }
            info!("show dropdown terminal ({})", config.terminal);
            let args = terminal_args(config, &mux.attach_or_create(&config.session));
            launcher
                .spawn(&config.terminal, &args)
                .map_err(ActionError::external)?;
            state.dropdown_open = true;
        }
    }

    store.save(&state)?;
    Ok(())
}
