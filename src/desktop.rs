//! The desktop session: shell chrome around a [`WindowManager`].
//!
//! `Desktop` routes terminal input to the start menu, taskbar, icons and
//! windows, and paints everything into a [`UiFrame`]. It holds no terminal
//! handle, so tests drive it with synthetic events and an in-memory buffer.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::NaiveDateTime;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use resume_markup::ContentNode;

use crate::clock;
use crate::components::{Component, ComponentContext, WindowContent};
use crate::config::DesktopConfig;
use crate::content_key::ContentKey;
use crate::error::Result;
use crate::event_loop::ControlFlow;
use crate::keybindings::{Action, KeyBindings};
use crate::layout::floating::PointerPos;
use crate::layout::{RegionMap, Viewport, rect_contains};
use crate::screens::{self, ContextItem, StartItem};
use crate::state::{ClickTarget, Phase, ShellState};
use crate::taskbar::{TaskbarHit, TaskbarView};
use crate::ui::UiFrame;
use crate::window::decorator::{ChromeHit, DesktopDecorator, WindowDecorator};
use crate::window::{PointerId, WindowManager};

const CARET_BLINK: Duration = Duration::from_millis(500);

/// Opens an external URL. Swappable so tests never launch a browser.
pub type LinkOpener = fn(&str) -> io::Result<()>;

fn open_in_browser(url: &str) -> io::Result<()> {
    webbrowser::open(url)
}

pub struct Desktop {
    wm: WindowManager<WindowContent>,
    document_path: Option<PathBuf>,
    shell: ShellState,
    keys: KeyBindings,
    icons: Vec<ContentKey>,
    start_items: Vec<StartItem>,
    decorator: DesktopDecorator,
    taskbar_view: TaskbarView,
    link_opener: LinkOpener,
    wall_clock: NaiveDateTime,
    clock_pinned: bool,
    caret_visible: bool,
    last_blink: Option<Instant>,
    pressed_in: Option<ContentKey>,
    login_button: Option<Rect>,
    icon_hits: Vec<(ContentKey, Rect)>,
    start_menu_rect: Option<Rect>,
    start_hits: RegionMap<usize>,
    context_hits: RegionMap<ContextItem>,
    calendar_rect: Option<Rect>,
}

impl Desktop {
    /// Desktop in terminal cells, starting on the login screen.
    pub fn new(document: ContentNode, viewport: Viewport) -> Self {
        Self::with_config(document, DesktopConfig::cells(), viewport)
    }

    pub fn with_config(document: ContentNode, config: DesktopConfig, viewport: Viewport) -> Self {
        let icons = screens::desktop_icons(&document);
        let start_items = screens::start_items(&document, &icons);
        Self {
            wm: WindowManager::new(document, config, viewport),
            document_path: None,
            shell: ShellState::new(),
            keys: KeyBindings::default(),
            icons,
            start_items,
            decorator: DesktopDecorator,
            taskbar_view: TaskbarView::new(),
            link_opener: open_in_browser,
            wall_clock: chrono::Local::now().naive_local(),
            clock_pinned: false,
            caret_visible: true,
            last_blink: None,
            pressed_in: None,
            login_button: None,
            icon_hits: Vec::new(),
            start_menu_rect: None,
            start_hits: RegionMap::default(),
            context_hits: RegionMap::default(),
            calendar_rect: None,
        }
    }

    /// Remember where the document came from so "Refresh" can re-read it.
    pub fn with_document_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = Some(path.into());
        self
    }

    pub fn with_link_opener(mut self, opener: LinkOpener) -> Self {
        self.link_opener = opener;
        self
    }

    pub fn window_manager(&self) -> &WindowManager<WindowContent> {
        &self.wm
    }

    pub fn shell(&self) -> &ShellState {
        &self.shell
    }

    pub fn document(&self) -> &ContentNode {
        self.wm.content()
    }

    pub fn document_path(&self) -> Option<&Path> {
        self.document_path.as_deref()
    }

    pub fn icons(&self) -> &[ContentKey] {
        &self.icons
    }

    pub fn start_items(&self) -> &[StartItem] {
        &self.start_items
    }

    /// Pin the tray clock to `now`; later ticks leave it alone.
    pub fn set_wall_clock(&mut self, now: NaiveDateTime) {
        self.wall_clock = now;
        self.clock_pinned = true;
    }

    pub fn set_mouse_capture_enabled(&mut self, enabled: bool) {
        self.shell.set_mouse_capture_enabled(enabled);
    }

    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        self.shell.take_mouse_capture_change()
    }

    // Session-level operations.

    pub fn open_window(&mut self, key: ContentKey) -> bool {
        self.shell.close_start_menu();
        self.wm.open_window(key, WindowContent::build)
    }

    /// Open by document name. Unknown names do nothing.
    pub fn open_window_named(&mut self, name: &str) -> bool {
        match name.parse::<ContentKey>() {
            Ok(key) => self.open_window(key),
            Err(err) => {
                tracing::debug!(%err, "ignored open request");
                false
            }
        }
    }

    pub fn close_window(&mut self, key: ContentKey) -> bool {
        if self.pressed_in == Some(key) {
            self.pressed_in = None;
        }
        self.wm.close(key)
    }

    pub fn minimize_window(&mut self, key: ContentKey) -> bool {
        self.wm.minimize(key)
    }

    pub fn focus_window(&mut self, key: ContentKey) -> bool {
        self.wm.focus(key)
    }

    pub fn toggle_maximize(&mut self, key: ContentKey) -> bool {
        self.wm.toggle_maximize(key)
    }

    /// Close every window, reset placement and go back to the login screen.
    pub fn handle_log_off(&mut self) {
        self.pressed_in = None;
        self.wm.log_off();
        self.shell.log_off();
    }

    pub fn handle_login(&mut self, now: Instant) {
        if self.shell.phase() != Phase::Login {
            return;
        }
        tracing::info!(name = %screens::display_name(self.document()), "logged in");
        self.shell.begin_welcome(now);
    }

    /// Go straight to the desktop, skipping login and welcome.
    pub fn skip_login(&mut self) {
        self.shell.enter_desktop();
    }

    /// Swap in a new document. Icons and menu entries follow it; open windows
    /// keep what they were built with.
    pub fn reload_document(&mut self, document: ContentNode) {
        self.icons = screens::desktop_icons(&document);
        self.start_items = screens::start_items(&document, &self.icons);
        if self
            .shell
            .selected_icon()
            .is_some_and(|index| index >= self.icons.len())
        {
            self.shell.select_icon(None);
        }
        self.wm.replace_content(document);
        tracing::debug!(icons = self.icons.len(), "document reloaded");
    }

    /// Re-read the document from disk. Without a path this does nothing.
    pub fn refresh(&mut self) -> Result<()> {
        let Some(path) = self.document_path.clone() else {
            return Ok(());
        };
        let document = resume_markup::load_path(&path)?;
        self.reload_document(document);
        Ok(())
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.wm.set_viewport(Viewport::new(width, height));
    }

    /// Periodic timer: welcome screen, clock and caret blink. Never touches
    /// window state.
    pub fn tick(&mut self, now: Instant) {
        if self.shell.advance(now) {
            tracing::debug!("welcome finished");
        }
        if !self.clock_pinned {
            self.wall_clock = chrono::Local::now().naive_local();
        }
        match self.last_blink {
            None => self.last_blink = Some(now),
            Some(last) if now.saturating_duration_since(last) >= CARET_BLINK => {
                self.caret_visible = !self.caret_visible;
                self.last_blink = Some(now);
            }
            Some(_) => {}
        }
    }

    // Input.

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        self.handle_event_at(event, Instant::now())
    }

    /// Route one terminal event. `now` is used for double clicks and the
    /// welcome timer.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> ControlFlow {
        match event {
            Event::Key(key) => return self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(width, height) => self.set_viewport(*width, *height),
            Event::FocusLost => self.wm.cancel_all_gestures(),
            _ => {}
        }
        ControlFlow::Continue
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> ControlFlow {
        if key.kind == KeyEventKind::Release {
            return ControlFlow::Continue;
        }
        let action = self.keys.action_for_key(key);
        match action {
            Some(Action::Quit) => return ControlFlow::Quit,
            Some(Action::ToggleMouseCapture) => {
                self.wm.cancel_all_gestures();
                self.shell.toggle_mouse_capture();
                return ControlFlow::Continue;
            }
            _ => {}
        }
        match self.shell.phase() {
            Phase::Login => {
                if key.code == KeyCode::Enter {
                    self.handle_login(now);
                }
            }
            Phase::Welcome { .. } => {}
            Phase::Desktop => self.handle_desktop_key(key, action),
        }
        ControlFlow::Continue
    }

    fn handle_desktop_key(&mut self, key: &KeyEvent, action: Option<Action>) {
        if action == Some(Action::Dismiss) {
            if self.wm.has_gesture(PointerId::MOUSE) {
                self.wm.pointer_cancel(PointerId::MOUSE);
                return;
            }
            if self.shell.any_popup_open() {
                self.shell.close_popups();
                return;
            }
        }
        if action == Some(Action::ToggleStartMenu) {
            self.shell.toggle_start_menu();
            return;
        }
        if self.shell.start_menu_open() {
            let len = self.start_items.len();
            match key.code {
                KeyCode::Up => self.shell.move_start_selection(-1, len),
                KeyCode::Down => self.shell.move_start_selection(1, len),
                KeyCode::Enter => self.activate_start_item(self.shell.start_selected()),
                _ => {}
            }
            return;
        }
        if self.shell.context_menu().is_some() {
            let len = ContextItem::ALL.len();
            match key.code {
                KeyCode::Up => self.shell.move_context_selection(-1, len),
                KeyCode::Down => self.shell.move_context_selection(1, len),
                KeyCode::Enter => {
                    if let Some(item) = ContextItem::ALL.get(self.shell.context_selected()) {
                        self.activate_context_item(*item);
                    }
                }
                _ => {}
            }
            return;
        }

        let active = self.wm.active();
        match (action, active) {
            (Some(Action::CycleWindows), _) => {
                self.wm.cycle_focus();
            }
            (Some(Action::CloseWindow), Some(window)) => {
                self.close_window(window);
            }
            (Some(Action::ToggleMaximize), Some(window)) => {
                self.wm.toggle_maximize(window);
            }
            (Some(Action::MinimizeWindow), Some(window)) => {
                self.wm.minimize(window);
            }
            (_, Some(window)) => {
                self.forward(window, &Event::Key(*key));
            }
            (_, None) => self.handle_icon_key(key),
        }
    }

    fn handle_icon_key(&mut self, key: &KeyEvent) {
        let count = self.icons.len();
        if count == 0 {
            return;
        }
        let per_column = screens::icons_per_column(self.desktop_area()) as isize;
        let delta = match key.code {
            KeyCode::Up => -1,
            KeyCode::Down => 1,
            KeyCode::Left => -per_column,
            KeyCode::Right => per_column,
            KeyCode::Enter => {
                if let Some(icon) = self
                    .shell
                    .selected_icon()
                    .and_then(|index| self.icons.get(index).copied())
                {
                    self.open_window(icon);
                }
                return;
            }
            _ => return,
        };
        let next = match self.shell.selected_icon() {
            None => 0,
            Some(index) => (index as isize + delta).clamp(0, count as isize - 1) as usize,
        };
        self.shell.select_icon(Some(next));
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        match self.shell.phase() {
            Phase::Login => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && self
                        .login_button
                        .is_some_and(|rect| rect_contains(rect, mouse.column, mouse.row))
                {
                    self.handle_login(now);
                }
            }
            Phase::Welcome { .. } => {}
            Phase::Desktop => self.handle_desktop_mouse(mouse, now),
        }
    }

    fn handle_desktop_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        let at = PointerPos::new(column as i32, row as i32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.left_press(mouse, now),
            MouseEventKind::Down(MouseButton::Right) => {
                if self.taskbar_view.hit(column, row).is_some() {
                    return;
                }
                self.shell.close_popups();
                match self.wm.window_at(column as i32, row as i32) {
                    Some(key) => self.forward_local(key, mouse),
                    None => self.shell.open_context_menu(column, row),
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.wm.has_gesture(PointerId::MOUSE) {
                    self.wm.pointer_move(PointerId::MOUSE, at);
                } else if let Some(key) = self.pressed_in {
                    self.forward_local(key, mouse);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.wm.has_gesture(PointerId::MOUSE) {
                    self.wm.pointer_up(PointerId::MOUSE);
                }
                if let Some(key) = self.pressed_in.take() {
                    self.forward_local(key, mouse);
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if let Some(key) = self.wm.window_at(column as i32, row as i32) {
                    self.forward_local(key, mouse);
                }
            }
            _ => {}
        }
    }

    fn left_press(&mut self, mouse: &MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        if let Some(hit) = self.taskbar_view.hit(column, row) {
            match hit {
                TaskbarHit::Start => self.shell.toggle_start_menu(),
                TaskbarHit::Clock => self.shell.toggle_calendar(),
                TaskbarHit::Entry(key) => {
                    self.shell.close_popups();
                    self.wm.taskbar_click(key);
                }
            }
            return;
        }
        if self.shell.start_menu_open() {
            if let Some(index) = self.start_hits.hit(column, row) {
                self.activate_start_item(index);
                return;
            }
            if self
                .start_menu_rect
                .is_some_and(|rect| rect_contains(rect, column, row))
            {
                return;
            }
            self.shell.close_start_menu();
        }
        if self.shell.context_menu().is_some() {
            if let Some(item) = self.context_hits.hit(column, row) {
                self.activate_context_item(item);
                return;
            }
            self.shell.close_popups();
        }
        if self.shell.calendar_open() {
            if self
                .calendar_rect
                .is_some_and(|rect| rect_contains(rect, column, row))
            {
                return;
            }
            self.shell.close_popups();
        }

        let Some(key) = self.wm.window_at(column as i32, row as i32) else {
            self.press_desktop(column, row, now);
            return;
        };
        let Some(rect) = self.wm.window(key).map(|window| window.rect()) else {
            return;
        };
        let local = Rect::new(0, 0, rect.width, rect.height);
        let local_x = (column as i32 - rect.left) as u16;
        let local_y = (row as i32 - rect.top) as u16;
        let at = PointerPos::new(column as i32, row as i32);
        match self.decorator.hit_test(local, local_x, local_y) {
            Some(ChromeHit::Close) => {
                self.close_window(key);
            }
            Some(ChromeHit::Maximize) => {
                self.wm.toggle_maximize(key);
            }
            Some(ChromeHit::Minimize) => {
                self.wm.minimize(key);
            }
            Some(ChromeHit::TitleBar) => {
                if self.shell.register_click(ClickTarget::TitleBar(key), now) {
                    self.wm.toggle_maximize(key);
                } else if !self.wm.begin_drag(key, PointerId::MOUSE, at) {
                    self.wm.focus(key);
                }
            }
            Some(ChromeHit::ResizeGrip) => {
                if !self.wm.begin_resize(key, PointerId::MOUSE, at) {
                    self.wm.focus(key);
                }
            }
            Some(ChromeHit::Body) | None => {
                self.wm.focus(key);
                self.pressed_in = Some(key);
                self.forward_local(key, mouse);
            }
        }
    }

    fn press_desktop(&mut self, column: u16, row: u16, now: Instant) {
        let hit = self
            .icon_hits
            .iter()
            .position(|(_, rect)| rect_contains(*rect, column, row));
        self.shell.select_icon(hit);
        if let Some(index) = hit
            && let Some(key) = self.icons.get(index).copied()
            && self.shell.register_click(ClickTarget::Icon(key), now)
        {
            self.open_window(key);
        }
    }

    fn activate_start_item(&mut self, index: usize) {
        let Some(item) = self.start_items.get(index).cloned() else {
            return;
        };
        match item {
            StartItem::Program(key) => {
                self.open_window(key);
            }
            StartItem::Link { url, .. } => {
                self.shell.close_start_menu();
                self.open_link(&url);
            }
            StartItem::LogOff => self.handle_log_off(),
        }
    }

    fn activate_context_item(&mut self, item: ContextItem) {
        self.shell.close_popups();
        match item {
            ContextItem::Refresh => {
                if let Err(err) = self.refresh() {
                    tracing::warn!(%err, "refresh failed");
                }
            }
            ContextItem::Properties => {
                self.open_window(ContentKey::PersonalInfo);
            }
            ContextItem::Personalize => {
                self.open_window(ContentKey::Photography);
            }
        }
    }

    fn open_link(&self, url: &str) {
        tracing::info!(%url, "opening link");
        if let Err(err) = (self.link_opener)(url) {
            tracing::warn!(%url, %err, "failed to open link");
        }
    }

    /// Hand `mouse` to a window's content in window-local coordinates.
    fn forward_local(&mut self, key: ContentKey, mouse: &MouseEvent) {
        let Some(rect) = self.wm.window(key).map(|window| window.rect()) else {
            return;
        };
        let (Ok(column), Ok(row)) = (
            u16::try_from(mouse.column as i32 - rect.left),
            u16::try_from(mouse.row as i32 - rect.top),
        ) else {
            return;
        };
        let local = MouseEvent {
            column,
            row,
            ..*mouse
        };
        self.forward(key, &Event::Mouse(local));
    }

    fn forward(&mut self, key: ContentKey, event: &Event) -> bool {
        let ctx = ComponentContext::new(self.wm.active() == Some(key));
        self.wm
            .content_mut(key)
            .is_some_and(|content| content.handle_event(event, &ctx))
    }

    // Rendering.

    fn taskbar_height(&self) -> u16 {
        self.wm.config().taskbar_height
    }

    fn screen_area(&self) -> Rect {
        let viewport = self.wm.viewport();
        Rect::new(0, 0, viewport.width, viewport.height)
    }

    fn desktop_area(&self) -> Rect {
        let area = self.screen_area();
        Rect {
            height: area.height.saturating_sub(self.taskbar_height()),
            ..area
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        self.login_button = None;
        self.icon_hits.clear();
        self.start_menu_rect = None;
        self.start_hits.clear();
        self.context_hits.clear();
        self.calendar_rect = None;
        self.taskbar_view.begin_frame();

        let area = frame.area();
        let name = screens::display_name(self.document());
        match self.shell.phase() {
            Phase::Login => {
                self.login_button = Some(screens::render_login(frame, area, &name));
            }
            Phase::Welcome { .. } => screens::render_welcome(frame, area, &name),
            Phase::Desktop => self.render_desktop(frame, area, &name),
        }
    }

    fn render_desktop(&mut self, frame: &mut UiFrame<'_>, area: Rect, name: &str) {
        let taskbar_height = self.taskbar_height().min(area.height);
        let desktop = Rect {
            height: area.height - taskbar_height,
            ..area
        };
        let strip = Rect {
            y: area.y + desktop.height,
            height: taskbar_height,
            ..area
        };

        self.icon_hits =
            screens::render_desktop(frame, desktop, &self.icons, self.shell.selected_icon());
        self.render_windows(frame);

        let wm = &self.wm;
        self.taskbar_view.render(
            frame,
            strip,
            wm.session().taskbar(),
            self.shell.start_menu_open(),
            &clock::tray_label(self.wall_clock),
            |key| wm.window(key).is_some_and(|window| window.is_minimized()),
        );

        if self.shell.start_menu_open() {
            let hint = format!(
                "{} menu · {} quit",
                self.keys.hint(Action::ToggleStartMenu).unwrap_or_default(),
                self.keys.hint(Action::Quit).unwrap_or_default(),
            );
            let (rect, hits) = screens::render_start_menu(
                frame,
                area.x,
                strip.y,
                name,
                &self.start_items,
                self.shell.start_selected(),
                &hint,
            );
            self.start_menu_rect = Some(rect);
            self.start_hits = hits.into_iter().collect();
        }
        if let Some(at) = self.shell.context_menu() {
            self.context_hits =
                screens::render_context_menu(frame, at, desktop, self.shell.context_selected())
                    .into_iter()
                    .collect();
        }
        if self.shell.calendar_open() {
            let right = self
                .taskbar_view
                .clock_rect()
                .map_or(area.x + area.width, |rect| rect.x + rect.width);
            self.calendar_rect = Some(screens::render_calendar(
                frame,
                right,
                strip.y,
                self.wall_clock,
            ));
        }
    }

    /// Paint each visible window into its own surface and composite it.
    fn render_windows(&mut self, frame: &mut UiFrame<'_>) {
        let active = self.wm.active();
        let caret_visible = self.caret_visible;
        for key in self.wm.draw_order() {
            let Some((rect, maximized)) = self
                .wm
                .window(key)
                .map(|window| (window.rect(), window.is_maximized()))
            else {
                continue;
            };
            if rect.width == 0 || rect.height == 0 {
                continue;
            }
            let local = Rect::new(0, 0, rect.width, rect.height);
            let mut surface = Buffer::empty(local);
            {
                let mut window_frame = UiFrame::from_parts(local, &mut surface);
                let focused = active == Some(key);
                self.decorator
                    .render_window(&mut window_frame, local, key.title(), focused, maximized);
                let inner = self.decorator.inner(local);
                let ctx = ComponentContext::new(focused).with_caret_visible(caret_visible);
                if let Some(content) = self.wm.content_mut(key) {
                    content.render(&mut window_frame, inner, &ctx);
                }
            }
            frame.blit_from_signed(&surface, rect);
        }
    }
}
