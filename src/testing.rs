//! Recording test doubles shared by the action tests.
//!
//! [`MockWm`] keeps a tiny model of the compositor (clients with a focus
//! history, monitors, workspace rules) and updates it the way Hyprland
//! would in response to each command, so multi-step properties can be
//! checked end to end.

use crate::model::{
    GapRule, Gaps, MonitorInfo, TagEdit, WindowInfo, WorkspaceGaps, WorkspaceInfo,
    WorkspaceRef, WorkspaceTarget,
};
use crate::traits::{Launcher, MenuItem, MenuPicker, Multiplexer, WindowManager};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
#[error("mock error: {0}")]
pub struct MockError(pub String);

/// Build a client snapshot.
pub fn window(address: &str, workspace: i32, class: &str, focus_history_id: i32) -> WindowInfo {
    WindowInfo {
        address: address.into(),
        title: format!("{} window", class),
        class: class.into(),
        workspace: WorkspaceRef {
            id: workspace,
            name: workspace.to_string(),
        },
        monitor: 0,
        floating: false,
        focus_history_id,
        tags: Vec::new(),
    }
}

/// Build a 1920×1080 monitor placed at `x`.
pub fn monitor(id: i64, name: &str, x: i32, focused: bool, workspace: i32) -> MonitorInfo {
    MonitorInfo {
        id,
        name: name.into(),
        width: 1920,
        height: 1080,
        x,
        y: 0,
        scale: 1.0,
        transform: 0,
        focused,
        active_workspace: WorkspaceRef {
            id: workspace,
            name: workspace.to_string(),
        },
    }
}

/// Record-keeping mock window manager.
#[derive(Debug, Default)]
pub struct MockWm {
    pub clients: RefCell<Vec<WindowInfo>>,
    pub monitors: RefCell<Vec<MonitorInfo>>,
    pub workspace: RefCell<i32>,
    pub rules: RefCell<HashMap<i32, GapRule>>,
    pub defaults: Cell<Gaps>,
    /// Every command, in Hyprland dispatcher syntax.
    pub log: RefCell<Vec<String>>,
    pub cursor: Cell<Option<(i32, i32)>>,
    /// Fail every call when set.
    pub broken: Cell<bool>,
    /// Fail commands only; queries still answer.
    pub rejecting: Cell<bool>,
}

impl MockWm {
    pub fn new(clients: Vec<WindowInfo>, monitors: Vec<MonitorInfo>, workspace: i32) -> Self {
        Self {
            clients: RefCell::new(clients),
            monitors: RefCell::new(monitors),
            workspace: RefCell::new(workspace),
            defaults: Cell::new(Gaps { inner: 5, outer: 20 }),
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), MockError> {
        if self.broken.get() {
            Err(MockError("socket unavailable".into()))
        } else {
            Ok(())
        }
    }

    fn check_command(&self) -> Result<(), MockError> {
        self.check()?;
        if self.rejecting.get() {
            Err(MockError("command rejected".into()))
        } else {
            Ok(())
        }
    }

    fn record(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }

    pub fn client(&self, address: &str) -> Option<WindowInfo> {
        self.clients
            .borrow()
            .iter()
            .find(|c| c.address == address)
            .cloned()
    }

    pub fn focused_address(&self) -> Option<String> {
        self.clients
            .borrow()
            .iter()
            .find(|c| c.focus_history_id == 0)
            .map(|c| c.address.clone())
    }

    pub fn focused_monitor(&self) -> Option<String> {
        self.monitors
            .borrow()
            .iter()
            .find(|m| m.focused)
            .map(|m| m.name.clone())
    }

    /// Map a new window and give it focus.
    pub fn open_window(&self, address: &str, class: &str) {
        let ws = *self.workspace.borrow();
        for c in self.clients.borrow_mut().iter_mut() {
            c.focus_history_id += 1;
        }
        self.clients.borrow_mut().push(window(address, ws, class, 0));
    }

    /// Unmap a window and close the gap it leaves in the focus history.
    pub fn remove_window(&self, address: &str) {
        let mut clients = self.clients.borrow_mut();
        if let Some(pos) = clients.iter().position(|c| c.address == address) {
            let removed = clients.remove(pos);
            for c in clients.iter_mut() {
                if c.focus_history_id > removed.focus_history_id {
                    c.focus_history_id -= 1;
                }
            }
        }
    }

    /// Move `address` to the front of the focus history.
    fn raise(&self, address: &str) -> Result<(), MockError> {
        let mut clients = self.clients.borrow_mut();
        let old = clients
            .iter()
            .find(|c| c.address == address)
            .map(|c| c.focus_history_id)
            .ok_or_else(|| MockError(format!("no window {}", address)))?;
        for c in clients.iter_mut() {
            if c.address == address {
                c.focus_history_id = 0;
            } else if c.focus_history_id < old {
                c.focus_history_id += 1;
            }
        }
        Ok(())
    }

    /// Move `address` to the back of the focus history.
    fn lower(&self, address: &str) {
        let mut clients = self.clients.borrow_mut();
        let last = clients.len() as i32 - 1;
        let old = match clients.iter().find(|c| c.address == address) {
            Some(c) => c.focus_history_id,
            None => return,
        };
        for c in clients.iter_mut() {
            if c.address == address {
                c.focus_history_id = last;
            } else if c.focus_history_id > old {
                c.focus_history_id -= 1;
            }
        }
    }

    /// Move `address` the way `movetoworkspace[silent]` would.
    fn move_to_workspace(
        &self,
        address: &str,
        workspace: &WorkspaceTarget,
        silent: bool,
    ) -> Result<(), MockError> {
        let target = match workspace {
            WorkspaceTarget::Id(id) => WorkspaceRef {
                id: *id,
                name: id.to_string(),
            },
            WorkspaceTarget::Special(name) => WorkspaceRef {
                id: -99,
                name: format!("special:{}", name),
            },
        };
        {
            let mut clients = self.clients.borrow_mut();
            let c = clients
                .iter_mut()
                .find(|c| c.address == address)
                .ok_or_else(|| MockError(format!("no window {}", address)))?;
            c.workspace = target.clone();
        }
        if silent {
            self.lower(address);
        } else {
            self.raise(address)?;
            *self.workspace.borrow_mut() = target.id;
        }
        let dispatcher = if silent {
            "movetoworkspacesilent"
        } else {
            "movetoworkspace"
        };
        self.record(format!("{} {},address:{}", dispatcher, workspace, address));
        Ok(())
    }
}

impl WindowManager for MockWm {
    type Error = MockError;

    fn clients(&self) -> Result<Vec<WindowInfo>, MockError> {
        self.check()?;
        Ok(self.clients.borrow().clone())
    }

    fn active_window(&self) -> Result<Option<WindowInfo>, MockError> {
        self.check()?;
        Ok(self.focused_address().and_then(|a| self.client(&a)))
    }

    fn active_workspace(&self) -> Result<WorkspaceInfo, MockError> {
        self.check()?;
        let id = *self.workspace.borrow();
        Ok(WorkspaceInfo {
            id,
            name: id.to_string(),
            monitor: self.focused_monitor().unwrap_or_default(),
        })
    }

    fn monitors(&self) -> Result<Vec<MonitorInfo>, MockError> {
        self.check()?;
        Ok(self.monitors.borrow().clone())
    }

    fn workspace_gaps(&self, workspace_id: i32) -> Result<GapRule, MockError> {
        self.check()?;
        Ok(self
            .rules
            .borrow()
            .get(&workspace_id)
            .copied()
            .unwrap_or_default())
    }

    fn default_gaps(&self) -> Result<Gaps, MockError> {
        self.check()?;
        Ok(self.defaults.get())
    }

    fn focus_window(&self, address: &str) -> Result<(), MockError> {
        self.check_command()?;
        self.raise(address)?;
        if let Some(c) = self.client(address) {
            if c.workspace.id > 0 {
                *self.workspace.borrow_mut() = c.workspace.id;
            }
        }
        self.record(format!("focuswindow address:{}", address));
        Ok(())
    }

    fn close_window(&self, address: &str) -> Result<(), MockError> {
        self.check_command()?;
        self.remove_window(address);
        self.record(format!("closewindow address:{}", address));
        Ok(())
    }

    fn focus_monitor(&self, name: &str) -> Result<(), MockError> {
        self.check_command()?;
        let mut monitors = self.monitors.borrow_mut();
        let target = monitors
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.active_workspace.id)
            .ok_or_else(|| MockError(format!("no monitor {}", name)))?;
        for m in monitors.iter_mut() {
            m.focused = m.name == name;
        }
        *self.workspace.borrow_mut() = target;
        self.record(format!("focusmonitor {}", name));
        Ok(())
    }

    fn move_cursor(&self, x: i32, y: i32) -> Result<(), MockError> {
        self.check_command()?;
        self.cursor.set(Some((x, y)));
        self.record(format!("movecursor {} {}", x, y));
        Ok(())
    }

    fn move_window_to_monitor(&self, name: &str) -> Result<(), MockError> {
        self.check_command()?;
        let (id, ws) = self
            .monitors
            .borrow()
            .iter()
            .find(|m| m.name == name)
            .map(|m| (m.id, m.active_workspace.clone()))
            .ok_or_else(|| MockError(format!("no monitor {}", name)))?;
        let active = self
            .focused_address()
            .ok_or_else(|| MockError("no active window".into()))?;
        for c in self.clients.borrow_mut().iter_mut() {
            if c.address == active {
                c.monitor = id;
                c.workspace = ws.clone();
            }
        }
        self.record(format!("movewindow mon:{}", name));
        Ok(())
    }

    fn retag_and_move(
        &self,
        address: &str,
        tags: &[TagEdit],
        workspace: &WorkspaceTarget,
        silent: bool,
    ) -> Result<(), MockError> {
        self.check_command()?;
        if self.client(address).is_none() {
            return Err(MockError(format!("no window {}", address)));
        }
        for edit in tags {
            if let Some(c) = self
                .clients
                .borrow_mut()
                .iter_mut()
                .find(|c| c.address == address)
            {
                match edit {
                    // Hyprland marks dynamically added tags with a trailing `*`.
                    TagEdit::Add(tag) => c.tags.push(format!("{}*", tag)),
                    TagEdit::Remove(tag) => {
                        c.tags.retain(|t| t.trim_end_matches('*') != tag.as_str())
                    }
                }
            }
            self.record(format!("tagwindow {} address:{}", edit, address));
        }
        self.move_to_workspace(address, workspace, silent)
    }

    fn set_workspace_gaps(
        &self,
        workspace_id: i32,
        gaps: &WorkspaceGaps,
    ) -> Result<(), MockError> {
        self.check_command()?;
        self.rules.borrow_mut().insert(
            workspace_id,
            GapRule {
                inner: Some(gaps.gaps.inner),
                outer: Some(gaps.gaps.outer),
            },
        );
        self.record(format!(
            "workspace {}, gapsin:{}, gapsout:{}, rounding:{}",
            workspace_id, gaps.gaps.inner, gaps.gaps.outer, gaps.rounding
        ));
        Ok(())
    }
}

/// tmux stand-in: detaching makes the dropdown terminal exit.
pub struct FakeTmux<'a> {
    pub wm: &'a MockWm,
    pub class: String,
    pub detaches: RefCell<Vec<String>>,
    /// When false, `detach` reports that nothing was attached.
    pub attached: Cell<bool>,
}

impl<'a> FakeTmux<'a> {
    pub fn new(wm: &'a MockWm, class: &str) -> Self {
        Self {
            wm,
            class: class.into(),
            detaches: RefCell::new(Vec::new()),
            attached: Cell::new(true),
        }
    }
}

impl Multiplexer for FakeTmux<'_> {
    type Error = MockError;

    fn detach(&self, session: &str) -> Result<bool, MockError> {
        self.detaches.borrow_mut().push(session.to_string());
        if !self.attached.get() {
            return Ok(false);
        }
        let terminal = self
            .wm
            .clients
            .borrow()
            .iter()
            .find(|c| c.class == self.class)
            .map(|c| c.address.clone());
        match terminal {
            Some(address) => {
                self.wm.remove_window(&address);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn attach_or_create(&self, session: &str) -> String {
        format!("attach {}", session)
    }
}

/// Launcher stand-in: spawning a terminal maps a window whose class is the
/// argument following `--class`.
pub struct FakeLauncher<'a> {
    pub wm: &'a MockWm,
    pub spawned: RefCell<Vec<(String, Vec<String>)>>,
}

impl<'a> FakeLauncher<'a> {
    pub fn new(wm: &'a MockWm) -> Self {
        Self {
            wm,
            spawned: RefCell::new(Vec::new()),
        }
    }
}

impl Launcher for FakeLauncher<'_> {
    type Error = MockError;

    fn spawn(&self, program: &str, args: &[String]) -> Result<(), MockError> {
        self.spawned
            .borrow_mut()
            .push((program.to_string(), args.to_vec()));
        if let Some(pos) = args.iter().position(|a| a == "--class") {
            if let Some(class) = args.get(pos + 1) {
                let address = format!("0xterm{}", self.spawned.borrow().len());
                self.wm.open_window(&address, class);
            }
        }
        Ok(())
    }
}

/// Menu stand-in returning a fixed choice.
pub struct FakePicker<'a> {
    pub choice: Option<usize>,
    pub shown: RefCell<Vec<Vec<MenuItem>>>,
    /// Window closed while the menu is open.
    pub vanish: Option<(&'a MockWm, String)>,
}

impl<'a> FakePicker<'a> {
    pub fn choosing(choice: Option<usize>) -> Self {
        Self {
            choice,
            shown: RefCell::new(Vec::new()),
            vanish: None,
        }
    }
}

impl MenuPicker for FakePicker<'_> {
    type Error = MockError;

    fn pick(&self, _prompt: &str, items: &[MenuItem]) -> Result<Option<usize>, MockError> {
        self.shown.borrow_mut().push(items.to_vec());
        if let Some((wm, address)) = &self.vanish {
            wm.remove_window(address);
        }
        Ok(self.choice)
    }
}
