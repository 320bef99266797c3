//! [`Multiplexer`] implementation over the `tmux` command line.

use super::ExternalError;
use crate::traits::Multiplexer;
use log::debug;
use std::process::Command;

/// Drives tmux through its CLI.
#[derive(Debug, Clone)]
pub struct Tmux {
    program: String,
}

impl Default for Tmux {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl Tmux {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Multiplexer for Tmux {
    type Error = ExternalError;

    fn detach(&self, session: &str) -> Result<bool, Self::Error> {
        let output = Command::new(&self.program)
            .args(["detach-client", "-s", session])
            .output()
            .map_err(|source| ExternalError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(true)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("{} detach -s {}: {}", self.program, session, stderr.trim());
            Ok(false)
        }
    }

    fn attach_or_create(&self, session: &str) -> String {
        let program = shell_quote(&self.program);
        let session = shell_quote(session);
        format!(
            "{p} attach -t {s} || {p} new-session -s {s}",
            p = program,
            s = session
        )
    }
}

/// Quote `s` for `sh -c`.  Plain words pass through unchanged.
pub fn shell_quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':'));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}
