//! [`MenuPicker`] backed by rofi in dmenu mode.
//!
//! Items are written to the picker's stdin, one per line, in rofi's
//! extended format `label\0icon\x1f<icon>` so every entry shows its
//! application icon.  `-format i` makes rofi print the chosen line's
//! zero-based index instead of its text; `-no-custom` keeps it from
//! accepting text that matches no entry.

use super::ExternalError;
use crate::traits::{MenuItem, MenuPicker};
use log::debug;
use std::io::Write;
use std::process::{Command, Stdio};

/// rofi (or any picker accepting the same flags).
#[derive(Debug, Clone)]
pub struct Rofi {
    program: String,
}

impl Default for Rofi {
    fn default() -> Self {
        Self::new("rofi")
    }
}

impl Rofi {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// Render `items` as rofi dmenu input.
fn menu_input(items: &[MenuItem]) -> String {
    items
        .iter()
        .map(|item| {
            // Newlines would split one entry into two and break the index.
            let label = item.label.replace('\n', " ");
            format!("{}\0icon\x1f{}", label, item.icon)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Interpret the picker's stdout.  Empty output means the menu was
/// dismissed; `-1` means the typed text matched no entry.
fn parse_selection(program: &str, stdout: &str, len: usize) -> Result<Option<usize>, ExternalError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() || trimmed == "-1" {
        return Ok(None);
    }
    match trimmed.parse::<usize>() {
        Ok(i) if i < len => Ok(Some(i)),
        _ => Err(ExternalError::Output {
            program: program.to_string(),
            output: trimmed.to_string(),
        }),
    }
}

impl MenuPicker for Rofi {
    type Error = ExternalError;

    fn pick(&self, prompt: &str, items: &[MenuItem]) -> Result<Option<usize>, Self::Error> {
        let spawn_err = |source| ExternalError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(["-dmenu", "-i", "-no-custom", "-format", "i", "-p", prompt])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(menu_input(items).as_bytes())
                .map_err(spawn_err)?;
        }

        let output = child.wait_with_output().map_err(spawn_err)?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        // rofi exits 1 when the user presses Escape.
        if !output.status.success() && stdout.trim().is_empty() {
            debug!("{} dismissed ({})", self.program, output.status);
            return Ok(None);
        }

        parse_selection(&self.program, &stdout, items.len())
    }
}
