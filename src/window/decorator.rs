use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use crate::ui::UiFrame;

/// Part of a window's chrome under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeHit {
    Close,
    Maximize,
    Minimize,
    TitleBar,
    ResizeGrip,
    Body,
}

/// Draws window chrome onto a window's own surface and maps points on that
/// surface back to chrome parts. All coordinates are local to the window.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        title: &str,
        focused: bool,
        maximized: bool,
    );

    /// Area left for content inside the chrome.
    fn inner(&self, area: Rect) -> Rect;

    fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<ChromeHit>;
}

const BUTTON_WIDTH: u16 = 3;

/// Single title row with buttons on the right, thin side and bottom borders,
/// and a grip in the bottom-right corner.
#[derive(Debug, Default)]
pub struct DesktopDecorator;

impl DesktopDecorator {
    fn button_x(area: Rect, index: u16) -> Option<u16> {
        let from_right = BUTTON_WIDTH.saturating_mul(index + 1);
        (area.width > from_right).then(|| area.x + area.width - from_right)
    }
}

impl WindowDecorator for DesktopDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        title: &str,
        focused: bool,
        maximized: bool,
    ) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let header_style = if focused {
            Style::default()
                .bg(crate::theme::decorator_header_bg())
                .fg(crate::theme::decorator_header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(crate::theme::decorator_header_inactive_bg())
                .fg(crate::theme::decorator_header_fg())
        };
        let border_style = Style::default()
            .fg(crate::theme::decorator_border())
            .bg(crate::theme::window_bg());
        let body_style = Style::default()
            .fg(crate::theme::window_fg())
            .bg(crate::theme::window_bg());

        frame.fill(area, body_style);

        // Title bar
        frame.fill(Rect { height: 1, ..area }, header_style);
        let buttons_x = Self::button_x(area, 2).unwrap_or(area.x + area.width);
        let title_room = buttons_x.saturating_sub(area.x + 1) as usize;
        let label = crate::ui::truncate_to_width(title, title_room.saturating_sub(1));
        frame.set_string(area.x + 1, area.y, &label, header_style);
        let max_glyph = if maximized { " ❐ " } else { " □ " };
        for (index, glyph) in [" × ", max_glyph, " _ "].into_iter().enumerate() {
            if let Some(x) = Self::button_x(area, index as u16) {
                frame.set_string(x, area.y, glyph, header_style);
            }
        }

        // Borders
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;
        for y in area.y + 1..bottom {
            frame.set_string(area.x, y, "│", border_style);
            frame.set_string(right, y, "│", border_style);
        }
        if bottom > area.y {
            frame.set_string(area.x, bottom, "└", border_style);
            for x in area.x + 1..right {
                frame.set_string(x, bottom, "─", border_style);
            }
            let grip = if maximized { "┘" } else { "◢" };
            frame.set_string(right, bottom, grip, border_style);
        }
    }

    fn inner(&self, area: Rect) -> Rect {
        Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    }

    fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<ChromeHit> {
        if !crate::layout::rect_contains(area, column, row) {
            return None;
        }
        if row == area.y {
            let buttons = [ChromeHit::Close, ChromeHit::Maximize, ChromeHit::Minimize];
            for (index, hit) in buttons.into_iter().enumerate() {
                if let Some(x) = Self::button_x(area, index as u16)
                    && column >= x
                    && column < x + BUTTON_WIDTH
                {
                    return Some(hit);
                }
            }
            return Some(ChromeHit::TitleBar);
        }
        let bottom = area.y + area.height - 1;
        let right = area.x + area.width - 1;
        if row == bottom && column + 1 >= right {
            return Some(ChromeHit::ResizeGrip);
        }
        Some(ChromeHit::Body)
    }
}
