use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::components::{Component, ComponentContext};
use crate::ui::UiFrame;

const TAB: &str = "    ";

/// Plain multi-line text editor with a single caret.
#[derive(Debug)]
pub struct Notepad {
    lines: Vec<String>,
    row: usize,
    col: usize,
    top: usize,
    left: usize,
}

impl Default for Notepad {
    fn default() -> Self {
        Self::new()
    }
}

impl Notepad {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            top: 0,
            left: 0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Caret as (row, column), both in characters.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |line| line.chars().count())
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map_or(line.len(), |(idx, _)| idx)
    }

    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.newline();
            } else {
                self.insert_char(ch);
            }
        }
    }

    fn insert_char(&mut self, ch: char) {
        let col = self.col;
        if let Some(line) = self.lines.get_mut(self.row) {
            let idx = Self::byte_index(line, col);
            line.insert(idx, ch);
            self.col += 1;
        }
    }

    fn newline(&mut self) {
        let col = self.col;
        let Some(line) = self.lines.get_mut(self.row) else {
            return;
        };
        let idx = Self::byte_index(line, col);
        let rest = line.split_off(idx);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    fn backspace(&mut self) {
        if self.col > 0 {
            let col = self.col;
            if let Some(line) = self.lines.get_mut(self.row) {
                let idx = Self::byte_index(line, col - 1);
                line.remove(idx);
                self.col -= 1;
            }
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            if let Some(previous) = self.lines.get_mut(self.row) {
                previous.push_str(&current);
            }
        }
    }

    fn delete(&mut self) {
        let len = self.line_len(self.row);
        if self.col < len {
            let col = self.col;
            if let Some(line) = self.lines.get_mut(self.row) {
                let idx = Self::byte_index(line, col);
                line.remove(idx);
            }
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            if let Some(line) = self.lines.get_mut(self.row) {
                line.push_str(&next);
            }
        }
    }

    fn move_to(&mut self, row: usize, col: usize) {
        self.row = row.min(self.lines.len().saturating_sub(1));
        self.col = col.min(self.line_len(self.row));
    }

    fn scroll_to_caret(&mut self, width: usize, height: usize) {
        if self.row < self.top {
            self.top = self.row;
        } else if height > 0 && self.row >= self.top + height {
            self.top = self.row + 1 - height;
        }
        if self.col < self.left {
            self.left = self.col;
        } else if width > 0 && self.col >= self.left + width {
            self.left = self.col + 1 - width;
        }
    }
}

impl Component for Notepad {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.scroll_to_caret(area.width as usize, area.height as usize);
        let style = Style::default()
            .fg(crate::theme::window_fg())
            .bg(crate::theme::window_bg());
        frame.fill(area, style);
        for (offset, line) in self
            .lines
            .iter()
            .skip(self.top)
            .take(area.height as usize)
            .enumerate()
        {
            let visible: String = line
                .chars()
                .skip(self.left)
                .take(area.width as usize)
                .collect();
            frame.set_string(area.x, area.y + offset as u16, &visible, style);
        }
        if ctx.show_caret() {
            let x = area.x + (self.col - self.left) as u16;
            let y = area.y + (self.row - self.top) as u16;
            if let Some(cell) = frame.buffer_mut().cell_mut((x, y)) {
                cell.set_style(style.add_modifier(Modifier::REVERSED));
            }
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) => self.insert_char(ch),
            KeyCode::Enter => self.newline(),
            KeyCode::Tab => self.insert_str(TAB),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left if self.col > 0 => self.col -= 1,
            KeyCode::Left if self.row > 0 => {
                let row = self.row - 1;
                self.move_to(row, usize::MAX);
            }
            KeyCode::Right if self.col < self.line_len(self.row) => self.col += 1,
            KeyCode::Right if self.row + 1 < self.lines.len() => self.move_to(self.row + 1, 0),
            KeyCode::Up if self.row > 0 => self.move_to(self.row - 1, self.col),
            KeyCode::Down => self.move_to(self.row + 1, self.col),
            KeyCode::Home => self.col = 0,
            KeyCode::End => self.col = self.line_len(self.row),
            KeyCode::Left | KeyCode::Right | KeyCode::Up => {}
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use ratatui::buffer::Buffer;

    fn press(pad: &mut Notepad, code: KeyCode) -> bool {
        pad.handle_event(
            &Event::Key(KeyEvent::new(code, KeyModifiers::NONE)),
            &ComponentContext::new(true),
        )
    }

    fn type_text(pad: &mut Notepad, text: &str) {
        for ch in text.chars() {
            press(pad, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_enter_and_backspace() {
        let mut pad = Notepad::new();
        type_text(&mut pad, "hello");
        press(&mut pad, KeyCode::Enter);
        type_text(&mut pad, "world");
        assert_eq!(pad.text(), "hello\nworld");
        for _ in 0..6 {
            press(&mut pad, KeyCode::Backspace);
        }
        assert_eq!(pad.text(), "hello");
        assert_eq!(pad.cursor(), (0, 5));
    }

    #[test]
    fn tab_and_mid_line_edits() {
        let mut pad = Notepad::new();
        type_text(&mut pad, "ac");
        press(&mut pad, KeyCode::Left);
        type_text(&mut pad, "b");
        press(&mut pad, KeyCode::Home);
        press(&mut pad, KeyCode::Tab);
        assert_eq!(pad.text(), "    abc");
        press(&mut pad, KeyCode::End);
        press(&mut pad, KeyCode::Enter);
        press(&mut pad, KeyCode::Up);
        press(&mut pad, KeyCode::End);
        press(&mut pad, KeyCode::Delete);
        assert_eq!(pad.text(), "    abc");
    }

    #[test]
    fn multibyte_characters_edit_cleanly() {
        let mut pad = Notepad::new();
        pad.insert_str("héllo");
        press(&mut pad, KeyCode::Left);
        press(&mut pad, KeyCode::Backspace);
        assert_eq!(pad.text(), "hélo");
    }

    #[test]
    fn control_chords_are_left_for_the_desktop() {
        let mut pad = Notepad::new();
        let chord = Event::Key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        assert!(!pad.handle_event(&chord, &ComponentContext::new(true)));
        assert_eq!(pad.text(), "");
    }

    #[test]
    fn renders_text_and_caret() {
        let mut pad = Notepad::new();
        pad.insert_str("hi");
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        pad.render(&mut frame, area, &ComponentContext::new(true));
        assert_eq!(buffer.cell((0, 0)).unwrap().symbol(), "h");
        assert!(
            buffer
                .cell((2, 0))
                .unwrap()
                .modifier
                .contains(Modifier::REVERSED)
        );
    }
}
