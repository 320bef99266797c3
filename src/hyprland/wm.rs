//! [`WindowManager`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any `hyprctl` invocation.

use crate::model::{
    GapRule, Gaps, MonitorInfo, TagEdit, WindowInfo, WorkspaceGaps, WorkspaceInfo,
    WorkspaceRef, WorkspaceTarget,
};
use crate::traits::WindowManager;
use log::debug;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed window manager.
///
/// All communication happens over Hyprland's command socket.  Each method
/// call opens a short-lived connection, writes one request and reads the
/// reply until Hyprland closes the stream.
pub struct HyprlandWm {
    socket: Option<PathBuf>,
}

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandWmError(String);

impl Default for HyprlandWm {
    fn default() -> Self {
        Self::new()
    }
}

impl HyprlandWm {
    /// Create a handle that resolves the socket from the environment on
    /// every request.
    pub fn new() -> Self {
        Self { socket: None }
    }

    /// Create a handle that talks to an explicit socket path.
    pub fn with_socket(path: impl Into<PathBuf>) -> Self {
        Self {
            socket: Some(path.into()),
        }
    }

    fn socket_path(&self) -> Result<PathBuf, HyprlandWmError> {
        match &self.socket {
            Some(path) => Ok(path.clone()),
            None => socket_path(),
        }
    }

    /// Send a raw request and return the reply as a string.
    fn request(&self, command: &str) -> Result<String, HyprlandWmError> {
        let path = self.socket_path()?;
        debug!("ipc request: {}", command);
        let mut stream = UnixStream::connect(&path)
            .map_err(|e| HyprlandWmError(format!("connect to {}: {}", path.display(), e)))?;

        stream
            .write_all(command.as_bytes())
            .map_err(|e| HyprlandWmError(format!("write: {}", e)))?;

        let mut response = Vec::new();
        stream
            .read_to_end(&mut response)
            .map_err(|e| HyprlandWmError(format!("read: {}", e)))?;

        String::from_utf8(response).map_err(|e| HyprlandWmError(format!("utf-8: {}", e)))
    }

    /// Send a JSON data query (`j/<command>`) and deserialize the reply.
    fn query<T: serde::de::DeserializeOwned>(&self, data_command: &str) -> Result<T, HyprlandWmError> {
        let json = self.request(&format!("j/{}", data_command))?;
        parse(&json)
    }

    /// Send a dispatch command and check for `"ok"`.
    fn dispatch(&self, args: &str) -> Result<(), HyprlandWmError> {
        let response = self.request(&format!("/dispatch {}", args))?;
        expect_ok("dispatch", &response)
    }

    /// Send several dispatches as one `[[BATCH]]` request.  Hyprland
    /// answers with one reply per command; all of them must be `"ok"`.
    fn batch(&self, dispatches: &[String]) -> Result<(), HyprlandWmError> {
        let joined = dispatches
            .iter()
            .map(|d| format!("dispatch {}", d))
            .collect::<Vec<_>>()
            .join(";");
        let response = self.request(&format!("[[BATCH]]{}", joined))?;
        expect_batch_ok(dispatches.len(), &response)
    }

    /// Set a config keyword at runtime and check for `"ok"`.
    fn keyword(&self, args: &str) -> Result<(), HyprlandWmError> {
        let response = self.request(&format!("/keyword {}", args))?;
        expect_ok("keyword", &response)
    }

    /// Read an integer option such as `general:gaps_in`.
    fn option_int(&self, name: &str) -> Result<u32, HyprlandWmError> {
        let option: OptionJson = self.query(&format!("getoption {}", name))?;
        option
            .first_value()
            .ok_or_else(|| HyprlandWmError(format!("option {} has no integer value", name)))
    }
}

//  Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandWmError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandWmError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandWmError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, HyprlandWmError> {
    serde_json::from_str(json).map_err(|e| HyprlandWmError(format!("parse: {}", e)))
}

fn expect_ok(what: &str, response: &str) -> Result<(), HyprlandWmError> {
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandWmError(format!("{} error: {}", what, response.trim())))
    }
}

fn expect_batch_ok(count: usize, response: &str) -> Result<(), HyprlandWmError> {
    let replies: String = response.split_whitespace().collect();
    if replies == "ok".repeat(count) {
        Ok(())
    } else {
        Err(HyprlandWmError(format!("batch error: {}", response.trim())))
    }
}

fn move_to_workspace_dispatch(address: &str, workspace: &WorkspaceTarget, silent: bool) -> String {
    let dispatcher = if silent {
        "movetoworkspacesilent"
    } else {
        "movetoworkspace"
    };
    format!("{} {},address:{}", dispatcher, workspace, address)
}

/// Argument string for `keyword workspace ...`.
fn workspace_gaps_keyword(workspace_id: i32, gaps: &WorkspaceGaps) -> String {
    format!(
        "workspace {}, gapsin:{}, gapsout:{}, rounding:{}",
        workspace_id, gaps.gaps.inner, gaps.gaps.outer, gaps.rounding
    )
}

//  Minimal serde structs for the JSON we care about

#[derive(Deserialize, Default)]
struct WorkspaceRefJson {
    id: i32,
    #[serde(default)]
    name: String,
}

impl From<WorkspaceRefJson> for WorkspaceRef {
    fn from(w: WorkspaceRefJson) -> Self {
        WorkspaceRef { id: w.id, name: w.name }
    }
}

/// Subset of an entry in `j/clients` (also the shape of `j/activewindow`).
#[derive(Deserialize)]
struct ClientJson {
    address: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    class: String,
    workspace: WorkspaceRefJson,
    #[serde(default)]
    monitor: i64,
    #[serde(default)]
    floating: bool,
    #[serde(rename = "focusHistoryID", default)]
    focus_history_id: i32,
    #[serde(default)]
    tags: Vec<String>,
}

impl From<ClientJson> for WindowInfo {
    fn from(c: ClientJson) -> Self {
        WindowInfo {
            address: c.address,
            title: c.title,
            class: c.class,
            workspace: c.workspace.into(),
            monitor: c.monitor,
            floating: c.floating,
            focus_history_id: c.focus_history_id,
            tags: c.tags,
        }
    }
}

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonitorJson {
    id: i64,
    name: String,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    #[serde(default = "unit_scale")]
    scale: f64,
    #[serde(default)]
    transform: u8,
    #[serde(default)]
    focused: bool,
    #[serde(default)]
    active_workspace: WorkspaceRefJson,
}

fn unit_scale() -> f64 {
    1.0
}

impl From<MonitorJson> for MonitorInfo {
    fn from(m: MonitorJson) -> Self {
        MonitorInfo {
            id: m.id,
            name: m.name,
            width: m.width,
            height: m.height,
            x: m.x,
            y: m.y,
            scale: m.scale,
            transform: m.transform,
            focused: m.focused,
            active_workspace: m.active_workspace.into(),
        }
    }
}

/// Subset of the JSON object returned by `j/activeworkspace`.
#[derive(Deserialize)]
struct ActiveWorkspaceJson {
    id: i32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    monitor: String,
}

/// Subset of an entry in `j/workspacerules`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceRuleJson {
    workspace_string: String,
    #[serde(default)]
    gaps_in: Option<Vec<u32>>,
    #[serde(default)]
    gaps_out: Option<Vec<u32>>,
}

/// Reply of `j/getoption`.
///
/// CSS-style gap options report `"custom": "5 5 5 5"`; plain integer
/// options (and older Hyprland releases) report `"int": 5`.
#[derive(Deserialize)]
struct OptionJson {
    #[serde(default)]
    int: Option<i64>,
    #[serde(default)]
    custom: Option<String>,
}

impl OptionJson {
    fn first_value(&self) -> Option<u32> {
        if let Some(custom) = &self.custom {
            if let Some(v) = custom.split_whitespace().next().and_then(|s| s.parse().ok()) {
                return Some(v);
            }
        }
        self.int.and_then(|i| u32::try_from(i).ok())
    }
}

/// Merge the gap fields of every rule that applies to `workspace_id`.
/// Later rules win, as in Hyprland's own rule evaluation.
fn gap_rule_for(rules: Vec<WorkspaceRuleJson>, workspace_id: i32) -> GapRule {
    let id = workspace_id.to_string();
    rules
        .into_iter()
        .filter(|r| r.workspace_string == id)
        .fold(GapRule::default(), |mut acc, r| {
            if let Some(v) = r.gaps_in.and_then(|g| g.first().copied()) {
                acc.inner = Some(v);
            }
            if let Some(v) = r.gaps_out.and_then(|g| g.first().copied()) {
                acc.outer = Some(v);
            }
            acc
        })
}

//  WindowManager implementation

impl WindowManager for HyprlandWm {
    type Error = HyprlandWmError;

    fn clients(&self) -> Result<Vec<WindowInfo>, Self::Error> {
        let clients: Vec<ClientJson> = self.query("clients")?;
        Ok(clients.into_iter().map(WindowInfo::from).collect())
    }

    fn active_window(&self) -> Result<Option<WindowInfo>, Self::Error> {
        let json = self.request("j/activewindow")?;
        // Hyprland returns an empty object `{}` when no window is focused.
        if json.trim() == "{}" {
            return Ok(None);
        }
        let w: ClientJson = parse(&json)?;
        Ok(Some(w.into()))
    }

    fn active_workspace(&self) -> Result<WorkspaceInfo, Self::Error> {
        let w: ActiveWorkspaceJson = self.query("activeworkspace")?;
        Ok(WorkspaceInfo {
            id: w.id,
            name: w.name,
            monitor: w.monitor,
        })
    }

    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error> {
        let monitors: Vec<MonitorJson> = self.query("monitors")?;
        Ok(monitors.into_iter().map(MonitorInfo::from).collect())
    }

    fn workspace_gaps(&self, workspace_id: i32) -> Result<GapRule, Self::Error> {
        let rules: Vec<WorkspaceRuleJson> = self.query("workspacerules")?;
        Ok(gap_rule_for(rules, workspace_id))
    }

    fn default_gaps(&self) -> Result<Gaps, Self::Error> {
        Ok(Gaps {
            inner: self.option_int("general:gaps_in")?,
            outer: self.option_int("general:gaps_out")?,
        })
    }

    fn focus_window(&self, address: &str) -> Result<(), Self::Error> {
        self.dispatch(&format!("focuswindow address:{}", address))
    }

    fn close_window(&self, address: &str) -> Result<(), Self::Error> {
        self.dispatch(&format!("closewindow address:{}", address))
    }

    fn focus_monitor(&self, name: &str) -> Result<(), Self::Error> {
        self.dispatch(&format!("focusmonitor {}", name))
    }

    fn move_cursor(&self, x: i32, y: i32) -> Result<(), Self::Error> {
        self.dispatch(&format!("movecursor {} {}", x, y))
    }

    fn move_window_to_monitor(&self, name: &str) -> Result<(), Self::Error> {
        self.dispatch(&format!("movewindow mon:{}", name))
    }

    fn retag_and_move(
        &self,
        address: &str,
        tags: &[TagEdit],
        workspace: &WorkspaceTarget,
        silent: bool,
    ) -> Result<(), Self::Error> {
        let mut dispatches: Vec<String> = tags
            .iter()
            .map(|edit| format!("tagwindow {} address:{}", edit, address))
            .collect();
        dispatches.push(move_to_workspace_dispatch(address, workspace, silent));
        self.batch(&dispatches)
    }

    fn set_workspace_gaps(
        &self,
        workspace_id: i32,
        gaps: &WorkspaceGaps,
    ) -> Result<(), Self::Error> {
        self.keyword(&workspace_gaps_keyword(workspace_id, gaps))
    }
}
