//! One handler per subcommand.
//!
//! Handlers are plain functions generic over the collaborator traits in
//! [`traits`](crate::traits).  Each performs a short, fixed sequence of
//! blocking queries and commands and never retries: the first failure is
//! returned to the caller.

pub mod dropdown;
pub mod focus;
pub mod gaps;
pub mod minimize;
pub mod monitor;

use crate::state::StateError;

/// Broad classification used to choose an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed subcommand or flags.
    InvalidArgument,
    /// The window manager or another external program failed.
    CollaboratorUnavailable,
    /// The window or monitor the action referred to no longer exists.
    StaleReference,
}

/// Errors returned by the action handlers.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The window manager returned an error.
    #[error("window manager error: {0}")]
    WindowManager(String),

    /// tmux, the menu picker or the launcher failed.
    #[error("{0}")]
    External(String),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("nothing to do: {0}")]
    Stale(String),
}

impl ActionError {
    pub(crate) fn wm<E: std::error::Error>(e: E) -> Self {
        ActionError::WindowManager(e.to_string())
    }

    pub(crate) fn external<E: std::error::Error>(e: E) -> Self {
        ActionError::External(e.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            ActionError::WindowManager(_) | ActionError::External(_) | ActionError::State(_) => {
                ErrorKind::CollaboratorUnavailable
            }
            ActionError::Stale(_) => ErrorKind::StaleReference,
        }
    }

    /// Process exit code for this error.  Stale references are no-ops and
    /// exit successfully; 2 matches clap's code for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::StaleReference => 0,
            ErrorKind::CollaboratorUnavailable => 1,
            ErrorKind::InvalidArgument => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(ActionError::Stale("gone".into()).exit_code(), 0);
        assert_eq!(ActionError::WindowManager("x".into()).exit_code(), 1);
        assert_eq!(ActionError::External("x".into()).exit_code(), 1);
        assert_eq!(ActionError::InvalidArgument("x".into()).exit_code(), 2);
    }

    #[test]
    fn state_errors_are_collaborator_failures() {
        let err: ActionError = StateError::Io {
            path: "/x".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::CollaboratorUnavailable);
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn wm_errors_keep_message() {
        let err = ActionError::wm(crate::testing::MockError("socket gone".into()));
        assert!(err.to_string().contains("socket gone"));
    }
}
