//! Taskbar model and its bottom-strip view.
//!
//! The model is owned by the session and only ever changes together with the
//! window map. The view is rebuilt every frame and remembers where it drew
//! things so clicks can be mapped back.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::content_key::ContentKey;
use crate::layout::{RegionMap, rect_contains};
use crate::ui::{UiFrame, safe_set_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskbarEntry {
    key: ContentKey,
    active: bool,
}

impl TaskbarEntry {
    pub fn key(&self) -> ContentKey {
        self.key
    }

    pub fn active(&self) -> bool {
        self.active
    }
}

/// One entry per open window, in the order the windows were opened.
#[derive(Debug, Default, Clone)]
pub struct Taskbar {
    entries: Vec<TaskbarEntry>,
}

impl Taskbar {
    pub(crate) fn add(&mut self, key: ContentKey) {
        if !self.contains(key) {
            self.entries.push(TaskbarEntry { key, active: false });
        }
    }

    pub(crate) fn remove(&mut self, key: ContentKey) {
        self.entries.retain(|entry| entry.key != key);
    }

    /// Highlight exactly `key`, or nothing.
    pub(crate) fn set_active(&mut self, key: Option<ContentKey>) {
        for entry in &mut self.entries {
            entry.active = Some(entry.key) == key;
        }
    }

    pub fn entries(&self) -> &[TaskbarEntry] {
        &self.entries
    }

    pub fn keys(&self) -> Vec<ContentKey> {
        self.entries.iter().map(TaskbarEntry::key).collect()
    }

    pub fn contains(&self, key: ContentKey) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    pub fn active(&self) -> Option<ContentKey> {
        self.entries
            .iter()
            .find(|entry| entry.active)
            .map(TaskbarEntry::key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarHit {
    Start,
    Entry(ContentKey),
    Clock,
}

const START_LABEL: &str = " ⊞ Start ";

#[derive(Debug, Default)]
pub struct TaskbarView {
    area: Rect,
    start_rect: Option<Rect>,
    entry_hits: RegionMap<ContentKey>,
    clock_rect: Option<Rect>,
}

impl TaskbarView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.area = Rect::default();
        self.start_rect = None;
        self.entry_hits.clear();
        self.clock_rect = None;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Draw the strip into `area`: Start button, one entry per window, and the
    /// tray clock on the right.
    pub fn render<F>(
        &mut self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        taskbar: &Taskbar,
        start_open: bool,
        clock: &str,
        is_minimized: F,
    ) where
        F: Fn(ContentKey) -> bool,
    {
        self.begin_frame();
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.area = area;
        let base = Style::default()
            .bg(crate::theme::panel_bg())
            .fg(crate::theme::panel_fg());
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        for y in bounds.y..bounds.y.saturating_add(bounds.height) {
            for x in bounds.x..bounds.x.saturating_add(bounds.width) {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(base);
                }
            }
        }

        let start_style = if start_open {
            base.bg(crate::theme::menu_selected_bg())
                .fg(crate::theme::menu_selected_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            base.bg(crate::theme::start_button_bg())
                .fg(crate::theme::panel_active_fg())
                .add_modifier(Modifier::BOLD)
        };
        let start_width = (START_LABEL.chars().count() as u16).min(area.width);
        safe_set_string(buffer, bounds, area.x, area.y, START_LABEL, start_style);
        self.start_rect = Some(Rect {
            x: area.x,
            y: area.y,
            width: start_width,
            height: area.height,
        });

        let clock_label = format!(" {clock} ");
        let clock_width = clock_label.chars().count() as u16;
        let right = area.x.saturating_add(area.width);
        let clock_x = right.saturating_sub(clock_width);
        let entries_end = if clock_x > area.x.saturating_add(start_width) {
            safe_set_string(buffer, bounds, clock_x, area.y, &clock_label, base);
            self.clock_rect = Some(Rect {
                x: clock_x,
                y: area.y,
                width: clock_width,
                height: area.height,
            });
            clock_x
        } else {
            right
        };

        let mut x = area.x.saturating_add(start_width).saturating_add(1);
        for entry in taskbar.entries() {
            if x >= entries_end {
                break;
            }
            let label = format!(" {} {} ", entry.key().glyph(), entry.key().title());
            let available = entries_end.saturating_sub(x);
            let width = (label.chars().count() as u16).min(available);
            let style = if entry.active() {
                base.bg(crate::theme::panel_active_bg())
                    .fg(crate::theme::panel_active_fg())
                    .add_modifier(Modifier::BOLD)
            } else if is_minimized(entry.key()) {
                base.fg(crate::theme::panel_inactive_fg())
                    .add_modifier(Modifier::DIM)
            } else {
                base
            };
            let clipped = Rect {
                x,
                y: area.y,
                width,
                height: 1,
            };
            safe_set_string(buffer, clipped, x, area.y, &label, style);
            self.entry_hits.set(
                entry.key(),
                Rect {
                    x,
                    y: area.y,
                    width,
                    height: area.height,
                },
            );
            x = x.saturating_add(width).saturating_add(1);
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<TaskbarHit> {
        if self
            .start_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            return Some(TaskbarHit::Start);
        }
        if self
            .clock_rect
            .is_some_and(|rect| rect_contains(rect, column, row))
        {
            return Some(TaskbarHit::Clock);
        }
        self.entry_hits.hit(column, row).map(TaskbarHit::Entry)
    }

    /// Screen rectangle of the tray clock, used to anchor the calendar popup.
    pub fn clock_rect(&self) -> Option<Rect> {
        self.clock_rect
    }

    pub fn start_rect(&self) -> Option<Rect> {
        self.start_rect
    }
}
