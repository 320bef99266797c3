//! [`Launcher`] that starts detached child processes.

use super::ExternalError;
use crate::traits::Launcher;
use log::debug;
use std::process::{Command, Stdio};

/// Spawns programs with their standard streams detached and never waits
/// for them, so the helper can exit while the child keeps running.
#[derive(Debug, Default, Clone)]
pub struct SpawnLauncher;

impl Launcher for SpawnLauncher {
    type Error = ExternalError;

    fn spawn(&self, program: &str, args: &[String]) -> Result<(), Self::Error> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ExternalError::Spawn {
                program: program.to_string(),
                source,
            })?;
        debug!("spawned {} (pid {})", program, child.id());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_existing_program() {
        SpawnLauncher.spawn("true", &[]).unwrap();
    }

    #[test]
    fn spawn_missing_program_fails() {
        let err = SpawnLauncher
            .spawn("/nonexistent/terminal", &["--class".into()])
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/terminal"));
    }
}
