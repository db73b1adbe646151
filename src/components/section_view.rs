use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

/// Scroll offset with pending deltas that are applied once the view height
/// is known.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollState {
    pub offset: usize,
    pending: isize,
}

impl ScrollState {
    pub fn reset(&mut self) {
        self.offset = 0;
        self.pending = 0;
    }

    pub fn bump(&mut self, delta: isize) {
        self.pending = self.pending.saturating_add(delta);
    }

    pub fn apply(&mut self, total: usize, view: usize) {
        let max_offset = total.saturating_sub(view);
        if self.pending != 0 {
            let delta = self.pending;
            self.pending = 0;
            let next = if delta.is_negative() {
                self.offset.saturating_sub(delta.unsigned_abs())
            } else {
                self.offset.saturating_add(delta as usize)
            };
            self.offset = next.min(max_offset);
        } else if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

const WHEEL_STEP: isize = 3;

/// Read-only, scrollable block of pre-styled lines.
#[derive(Debug)]
pub struct SectionView {
    lines: Vec<Line<'static>>,
    scroll: ScrollState,
    view_height: usize,
    wrapped_total: usize,
}

impl SectionView {
    pub fn new(lines: Vec<Line<'static>>) -> Self {
        Self {
            lines,
            scroll: ScrollState::default(),
            view_height: 0,
            wrapped_total: 0,
        }
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn offset(&self) -> usize {
        self.scroll.offset
    }

    /// Plain text of every line, for tests and logging.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn page(&self) -> isize {
        self.view_height.max(1) as isize
    }
}

/// Number of rows `lines` take when wrapped at `width` columns.
fn wrapped_rows(lines: &[Line<'_>], width: u16) -> usize {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum()
}

impl Component for SectionView {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        // Leave the last column for the scrollbar.
        self.view_height = area.height as usize;
        self.wrapped_total = wrapped_rows(&self.lines, area.width.saturating_sub(1));
        self.scroll.apply(self.wrapped_total, self.view_height);
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.resize(area, ctx);
        let text_area = Rect {
            width: area.width.saturating_sub(1),
            ..area
        };
        let paragraph = Paragraph::new(Text::from(self.lines.clone()))
            .style(
                Style::default()
                    .fg(crate::theme::window_fg())
                    .bg(crate::theme::window_bg()),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.offset.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, text_area);

        if self.wrapped_total > self.view_height {
            let mut state = ScrollbarState::new(self.wrapped_total.saturating_sub(self.view_height))
                .position(self.scroll.offset);
            let bar = Rect {
                x: area.x + area.width - 1,
                width: 1,
                ..area
            };
            let buffer = frame.buffer_mut();
            let bounds = bar.intersection(buffer.area);
            ratatui::widgets::StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                bounds,
                buffer,
                &mut state,
            );
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let delta = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Up => -1,
                KeyCode::Down => 1,
                KeyCode::PageUp => -self.page(),
                KeyCode::PageDown => self.page(),
                KeyCode::Home => {
                    self.scroll.reset();
                    return true;
                }
                KeyCode::End => isize::MAX / 2,
                _ => return false,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => -WHEEL_STEP,
                MouseEventKind::ScrollDown => WHEEL_STEP,
                _ => return false,
            },
            _ => return false,
        };
        self.scroll.bump(delta);
        self.scroll.apply(self.wrapped_total, self.view_height);
        true
    }
}
