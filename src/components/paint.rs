use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::components::{Component, ComponentContext};
use crate::layout::rect_contains;
use crate::theme::PAINT_COLORS;
use crate::ui::UiFrame;

const BRUSH: &str = "█";

/// Cell canvas painted with the mouse. Row 0 of the area is the palette.
#[derive(Debug, Default)]
pub struct Paint {
    width: usize,
    height: usize,
    cells: Vec<Option<Color>>,
    color: usize,
    canvas: Rect,
    swatches: Vec<(usize, Rect)>,
}

impl Paint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_index(&self) -> usize {
        self.color
    }

    pub fn select_color(&mut self, index: usize) -> bool {
        if index >= PAINT_COLORS.len() {
            return false;
        }
        self.color = index;
        true
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Resize the canvas, keeping whatever overlaps.
    fn resize_canvas(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        let mut cells = vec![None; width * height];
        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                cells[y * width + x] = self.cells[y * self.width + x];
            }
        }
        self.width = width;
        self.height = height;
        self.cells = cells;
    }

    fn paint_at(&mut self, column: u16, row: u16) -> bool {
        if !rect_contains(self.canvas, column, row) {
            return false;
        }
        let x = (column - self.canvas.x) as usize;
        let y = (row - self.canvas.y) as usize;
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Some(PAINT_COLORS[self.color]);
        }
        true
    }
}

impl Component for Paint {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.canvas = Rect {
            y: area.y.saturating_add(1),
            height: area.height.saturating_sub(1),
            ..area
        };
        self.resize_canvas(self.canvas.width as usize, self.canvas.height as usize);
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.resize(area, ctx);
        self.swatches.clear();
        if area.height == 0 {
            return;
        }
        let bar = Style::default()
            .bg(crate::theme::panel_bg())
            .fg(crate::theme::panel_fg());
        frame.fill(Rect { height: 1, ..area }, bar);
        let mut x = area.x;
        for (index, color) in PAINT_COLORS.iter().enumerate() {
            let label = if index == self.color {
                format!("[{}{BRUSH}]", index + 1)
            } else {
                format!(" {}{BRUSH} ", index + 1)
            };
            frame.set_string(x, area.y, &label, bar.fg(*color));
            self.swatches.push((
                index,
                Rect {
                    x,
                    y: area.y,
                    width: 4,
                    height: 1,
                },
            ));
            x = x.saturating_add(4);
        }
        frame.set_string(x.saturating_add(1), area.y, "c: clear", bar);

        frame.fill(self.canvas, Style::default().bg(crate::theme::window_bg()));
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(color) = self.cells[y * self.width + x] {
                    frame.set_string(
                        self.canvas.x + x as u16,
                        self.canvas.y + y as u16,
                        BRUSH,
                        Style::default().fg(color),
                    );
                }
            }
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    self.clear();
                    true
                }
                KeyCode::Char(ch @ '1'..='6') => self.select_color(ch as usize - '1' as usize),
                _ => false,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(index) = self
                        .swatches
                        .iter()
                        .find(|(_, rect)| rect_contains(*rect, mouse.column, mouse.row))
                        .map(|(index, _)| *index)
                    {
                        return self.select_color(index);
                    }
                    self.paint_at(mouse.column, mouse.row)
                }
                MouseEventKind::Drag(MouseButton::Left) => self.paint_at(mouse.column, mouse.row),
                _ => false,
            },
            _ => false,
        }
    }
}
