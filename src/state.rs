use std::time::{Duration, Instant};

use crate::constants::{DOUBLE_CLICK_MS, WELCOME_DURATION_MS};
use crate::content_key::ContentKey;

/// Which full-screen surface is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Login,
    Welcome { until: Instant },
    Desktop,
}

/// Things that react to a double click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Icon(ContentKey),
    TitleBar(ContentKey),
}

/// Shell UI state that lives outside the window manager: screens, menus,
/// icon selection and the terminal mouse-capture toggle.
#[derive(Debug, Clone)]
pub struct ShellState {
    phase: Phase,
    start_menu_open: bool,
    start_selected: usize,
    context_menu: Option<(u16, u16)>,
    context_selected: usize,
    calendar_open: bool,
    selected_icon: Option<usize>,
    last_click: Option<(ClickTarget, Instant)>,
    mouse_capture_enabled: bool,
    mouse_capture_dirty: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Login,
            start_menu_open: false,
            start_selected: 0,
            context_menu: None,
            context_selected: 0,
            calendar_open: false,
            selected_icon: None,
            last_click: None,
            mouse_capture_enabled: true,
            mouse_capture_dirty: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn on_desktop(&self) -> bool {
        self.phase == Phase::Desktop
    }

    pub fn enter_desktop(&mut self) {
        self.phase = Phase::Desktop;
    }

    pub fn begin_welcome(&mut self, now: Instant) {
        self.phase = Phase::Welcome {
            until: now + Duration::from_millis(WELCOME_DURATION_MS),
        };
    }

    /// Move from the welcome screen to the desktop once its time is up.
    /// Returns `true` on the transition.
    pub fn advance(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Welcome { until } if now >= until => {
                self.phase = Phase::Desktop;
                true
            }
            _ => false,
        }
    }

    /// Back to the login screen with every popup closed.
    pub fn log_off(&mut self) {
        self.phase = Phase::Login;
        self.close_popups();
        self.selected_icon = None;
        self.last_click = None;
    }

    pub fn close_popups(&mut self) {
        self.start_menu_open = false;
        self.context_menu = None;
        self.calendar_open = false;
    }

    pub fn any_popup_open(&self) -> bool {
        self.start_menu_open || self.context_menu.is_some() || self.calendar_open
    }

    pub fn start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    pub fn toggle_start_menu(&mut self) {
        let open = !self.start_menu_open;
        self.close_popups();
        self.start_menu_open = open;
        self.start_selected = 0;
    }

    pub fn close_start_menu(&mut self) {
        self.start_menu_open = false;
    }

    pub fn start_selected(&self) -> usize {
        self.start_selected
    }

    /// Move the start-menu highlight, wrapping within `len` items.
    pub fn move_start_selection(&mut self, delta: isize, len: usize) {
        self.start_selected = wrap_index(self.start_selected, delta, len);
    }

    pub fn context_menu(&self) -> Option<(u16, u16)> {
        self.context_menu
    }

    pub fn open_context_menu(&mut self, column: u16, row: u16) {
        self.close_popups();
        self.context_menu = Some((column, row));
        self.context_selected = 0;
    }

    pub fn context_selected(&self) -> usize {
        self.context_selected
    }

    pub fn move_context_selection(&mut self, delta: isize, len: usize) {
        self.context_selected = wrap_index(self.context_selected, delta, len);
    }

    pub fn calendar_open(&self) -> bool {
        self.calendar_open
    }

    pub fn toggle_calendar(&mut self) {
        let open = !self.calendar_open;
        self.close_popups();
        self.calendar_open = open;
    }

    pub fn selected_icon(&self) -> Option<usize> {
        self.selected_icon
    }

    pub fn select_icon(&mut self, index: Option<usize>) {
        self.selected_icon = index;
    }

    /// Record a press on `target`. Returns `true` when it completes a double
    /// click; the pair is then consumed.
    pub fn register_click(&mut self, target: ClickTarget, now: Instant) -> bool {
        let window = Duration::from_millis(DOUBLE_CLICK_MS);
        let double = self.last_click.is_some_and(|(previous, at)| {
            previous == target && now.saturating_duration_since(at) <= window
        });
        self.last_click = if double { None } else { Some((target, now)) };
        double
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.mouse_capture_enabled
    }

    pub fn set_mouse_capture_enabled(&mut self, enabled: bool) {
        if self.mouse_capture_enabled == enabled {
            return;
        }
        self.mouse_capture_enabled = enabled;
        self.mouse_capture_dirty = true;
    }

    pub fn toggle_mouse_capture(&mut self) {
        let enabled = !self.mouse_capture_enabled;
        self.set_mouse_capture_enabled(enabled);
    }

    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        if self.mouse_capture_dirty {
            self.mouse_capture_dirty = false;
            Some(self.mouse_capture_enabled)
        } else {
            None
        }
    }
}

fn wrap_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (current as isize + delta).rem_euclid(len) as usize
}
