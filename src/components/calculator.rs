use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::layout::rect_contains;
use crate::ui::UiFrame;

pub const ERROR_TEXT: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn from_char(ch: char) -> Option<Op> {
        match ch {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' | 'x' => Some(Op::Mul),
            '/' => Some(Op::Div),
            _ => None,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Option<f64> {
        let value = match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div if rhs == 0.0 => return None,
            Op::Div => lhs / rhs,
        };
        value.is_finite().then_some(value)
    }
}

const BUTTONS: [[char; 4]; 5] = [
    ['c', '<', '%', '/'],
    ['7', '8', '9', '*'],
    ['4', '5', '6', '-'],
    ['1', '2', '3', '+'],
    ['0', '.', '±', '='],
];

fn button_label(ch: char) -> &'static str {
    match ch {
        'c' => "C",
        '<' => "⌫",
        '%' => "%",
        '/' => "÷",
        '*' => "×",
        '-' => "−",
        '+' => "+",
        '.' => ".",
        '±' => "±",
        '=' => "=",
        '0' => "0",
        '1' => "1",
        '2' => "2",
        '3' => "3",
        '4' => "4",
        '5' => "5",
        '6' => "6",
        '7' => "7",
        '8' => "8",
        _ => "9",
    }
}

/// Four-function calculator. Errors stay local: the display shows "Error"
/// until the next digit or clear.
#[derive(Debug)]
pub struct Calculator {
    display: String,
    accumulator: Option<f64>,
    pending: Option<Op>,
    fresh: bool,
    error: bool,
    button_hits: Vec<(char, Rect)>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            accumulator: None,
            pending: None,
            fresh: true,
            error: false,
            button_hits: Vec::new(),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    fn current(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    fn set_value(&mut self, value: f64) {
        self.display = format_number(value);
    }

    fn fail(&mut self) {
        tracing::debug!("calculator error");
        self.display = ERROR_TEXT.to_string();
        self.accumulator = None;
        self.pending = None;
        self.fresh = true;
        self.error = true;
    }

    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.accumulator = None;
        self.pending = None;
        self.fresh = true;
        self.error = false;
    }

    /// Feed one button press. Returns `false` for characters the calculator
    /// does not know.
    pub fn press(&mut self, ch: char) -> bool {
        match ch {
            '0'..='9' => {
                if self.error {
                    self.clear();
                }
                if self.fresh || self.display == "0" {
                    self.display = ch.to_string();
                    self.fresh = false;
                } else {
                    self.display.push(ch);
                }
            }
            '.' => {
                if self.error {
                    self.clear();
                }
                if self.fresh {
                    self.display = "0.".to_string();
                    self.fresh = false;
                } else if !self.display.contains('.') {
                    self.display.push('.');
                }
            }
            'c' | 'C' => self.clear(),
            '<' => {
                if self.error || self.fresh {
                    return true;
                }
                self.display.pop();
                if self.display.is_empty() || self.display == "-" {
                    self.display = "0".to_string();
                }
            }
            '±' => {
                if !self.error {
                    let value = -self.current();
                    self.set_value(value);
                }
            }
            '%' => {
                if !self.error {
                    let value = self.current() / 100.0;
                    self.set_value(value);
                }
            }
            '=' => {
                if !self.error {
                    self.evaluate();
                    self.pending = None;
                    self.accumulator = None;
                }
            }
            other => {
                let Some(op) = Op::from_char(other) else {
                    return false;
                };
                if self.error {
                    return true;
                }
                if self.pending.is_some() && !self.fresh {
                    self.evaluate();
                    if self.error {
                        return true;
                    }
                }
                self.accumulator = Some(self.current());
                self.pending = Some(op);
                self.fresh = true;
            }
        }
        true
    }

    fn evaluate(&mut self) {
        let (Some(lhs), Some(op)) = (self.accumulator, self.pending) else {
            return;
        };
        match op.apply(lhs, self.current()) {
            Some(value) => {
                self.set_value(value);
                self.accumulator = Some(value);
                self.fresh = true;
            }
            None => self.fail(),
        }
    }
}

/// Integers print without a fraction; everything else uses the shortest
/// exact form.
pub fn format_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl Component for Calculator {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        self.button_hits.clear();
        if area.width < 4 || area.height < 2 {
            return;
        }
        let display_style = Style::default()
            .bg(crate::theme::window_fg())
            .fg(crate::theme::window_bg())
            .add_modifier(Modifier::BOLD);
        let display_rect = Rect { height: 1, ..area };
        frame.fill(display_rect, display_style);
        let text = crate::ui::truncate_to_width(&self.display, area.width as usize - 1);
        let x = area.x + area.width - 1 - text.chars().count() as u16;
        frame.set_string(x, area.y, &text, display_style);

        let grid_top = area.y + 2;
        let rows_available = area.y + area.height - grid_top.min(area.y + area.height);
        let row_step = if rows_available as usize >= BUTTONS.len() * 2 { 2 } else { 1 };
        let cell_width = area.width / 4;
        let button_style = Style::default()
            .bg(crate::theme::panel_bg())
            .fg(crate::theme::panel_fg());
        let op_style = button_style.bg(crate::theme::accent());
        for (row_idx, row) in BUTTONS.iter().enumerate() {
            let y = grid_top + row_idx as u16 * row_step;
            if y >= area.y + area.height {
                break;
            }
            for (col_idx, ch) in row.iter().enumerate() {
                let rect = Rect {
                    x: area.x + col_idx as u16 * cell_width,
                    y,
                    width: cell_width.saturating_sub(1).max(1),
                    height: 1,
                };
                let style = if Op::from_char(*ch).is_some() || *ch == '=' {
                    op_style
                } else {
                    button_style
                };
                frame.fill(rect, style);
                let label = button_label(*ch);
                let label_x = rect.x + rect.width.saturating_sub(1) / 2;
                frame.set_string(label_x, y, label, style);
                self.button_hits.push((*ch, rect));
            }
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char(ch) => self.press(ch),
                KeyCode::Enter => self.press('='),
                KeyCode::Esc | KeyCode::Delete => self.press('c'),
                KeyCode::Backspace => self.press('<'),
                _ => false,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .button_hits
                    .iter()
                    .find(|(_, rect)| rect_contains(*rect, mouse.column, mouse.row))
                    .map(|(ch, _)| *ch);
                match hit {
                    Some(ch) => self.press(ch),
                    None => false,
                }
            }
            _ => false,
        }
    }
}
