//! Backends for the external programs some actions drive.
//!
//! * [`tmux::Tmux`] — [`Multiplexer`](crate::traits::Multiplexer) over the
//!   `tmux` CLI.
//! * [`rofi::Rofi`] — [`MenuPicker`](crate::traits::MenuPicker) running a
//!   dmenu-compatible picker.
//! * [`launcher::SpawnLauncher`] — [`Launcher`](crate::traits::Launcher)
//!   that starts detached children.

pub mod launcher;
pub mod rofi;
pub mod tmux;

/// Errors from running an external program.
#[derive(Debug, thiserror::Error)]
pub enum ExternalError {
    /// The program could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The program's output could not be understood.
    #[error("unexpected output from {program}: {output:?}")]
    Output { program: String, output: String },
}
