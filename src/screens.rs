//! Shell surfaces drawn around the windows: login and welcome screens, the
//! desktop icon grid, the start and context menus, and the calendar popup.
//!
//! Every `render_*` function returns the hit regions it drew so the desktop
//! can route the next click without re-running layout.

use chrono::{Datelike, NaiveDateTime};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use resume_markup::ContentNode;

use crate::clock;
use crate::components::sections::contact_link;
use crate::content_key::{ContentKey, format_title};
use crate::ui::{UiFrame, centered_rect, truncate_to_width};

pub const ICON_WIDTH: u16 = 14;
pub const ICON_HEIGHT: u16 = 3;
const MENU_WIDTH: u16 = 30;
const CALENDAR_WIDTH: u16 = 30;
const CALENDAR_HEIGHT: u16 = 12;
const LOGIN_BUTTON: &str = " Log in ";
const FALLBACK_NAME: &str = "Guest";

/// Name shown on the login and welcome screens.
pub fn display_name(doc: &ContentNode) -> String {
    doc.path(&["personal_info", "name"])
        .and_then(ContentNode::text)
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// Section keys present at the top level of the document, in document order,
/// followed by the utility apps.
pub fn desktop_icons(doc: &ContentNode) -> Vec<ContentKey> {
    let mut icons: Vec<ContentKey> = doc
        .as_mapping()
        .map(|mapping| {
            mapping
                .keys()
                .filter_map(|name| name.parse::<ContentKey>().ok())
                .filter(|key| key.is_section())
                .collect()
        })
        .unwrap_or_default();
    icons.extend(ContentKey::APPS);
    icons
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartItem {
    Program(ContentKey),
    Link { label: String, url: String },
    LogOff,
}

impl StartItem {
    fn label(&self) -> String {
        match self {
            StartItem::Program(key) => format!("{} {}", key.glyph(), key.title()),
            StartItem::Link { label, .. } => format!("↗ {label}"),
            StartItem::LogOff => "⏻ Log off".to_string(),
        }
    }

    fn group(&self) -> u8 {
        match self {
            StartItem::Program(_) => 0,
            StartItem::Link { .. } => 1,
            StartItem::LogOff => 2,
        }
    }
}

/// Programs, then one link per contact entry, then "Log off".
pub fn start_items(doc: &ContentNode, icons: &[ContentKey]) -> Vec<StartItem> {
    let mut items: Vec<StartItem> = icons.iter().copied().map(StartItem::Program).collect();
    if let Some(contact) = doc.get("contact").and_then(ContentNode::as_mapping) {
        for (label, value) in contact.iter() {
            if let Some(value) = value.text() {
                items.push(StartItem::Link {
                    label: format_title(label),
                    url: contact_link(label, &value),
                });
            }
        }
    }
    items.push(StartItem::LogOff);
    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContextItem {
    Refresh,
    Properties,
    Personalize,
}

impl ContextItem {
    pub const ALL: [ContextItem; 3] = [
        ContextItem::Refresh,
        ContextItem::Properties,
        ContextItem::Personalize,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContextItem::Refresh => "Refresh",
            ContextItem::Properties => "Properties",
            ContextItem::Personalize => "Personalize",
        }
    }
}

fn menu_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .bg(crate::theme::menu_selected_bg())
            .fg(crate::theme::menu_selected_fg())
    } else {
        Style::default()
            .bg(crate::theme::menu_bg())
            .fg(crate::theme::menu_fg())
    }
}

/// Returns the rectangle of the "Log in" button.
pub fn render_login(frame: &mut UiFrame<'_>, area: Rect, name: &str) -> Rect {
    let bg = Style::default()
        .bg(crate::theme::login_bg())
        .fg(crate::theme::desktop_fg());
    frame.fill(area, bg);
    let card = centered_rect(area, 36, 7);
    let name_line = truncate_to_width(name, card.width as usize);
    let name_x = card.x + card.width.saturating_sub(name_line.chars().count() as u16) / 2;
    frame.set_string(name_x, card.y + 1, &name_line, bg.add_modifier(Modifier::BOLD));
    let hint = "Press Enter to log in";
    let hint_x = card.x + card.width.saturating_sub(hint.chars().count() as u16) / 2;
    frame.set_string(hint_x, card.y + 5, hint, bg.fg(crate::theme::muted_fg()));

    let width = LOGIN_BUTTON.chars().count() as u16;
    let button = Rect {
        x: card.x + card.width.saturating_sub(width) / 2,
        y: card.y + 3,
        width: width.min(card.width),
        height: 1,
    };
    let style = Style::default()
        .bg(crate::theme::accent())
        .fg(crate::theme::panel_active_fg())
        .add_modifier(Modifier::BOLD);
    frame.set_string(button.x, button.y, LOGIN_BUTTON, style);
    button
}

pub fn render_welcome(frame: &mut UiFrame<'_>, area: Rect, name: &str) {
    let bg = Style::default()
        .bg(crate::theme::login_bg())
        .fg(crate::theme::desktop_fg())
        .add_modifier(Modifier::BOLD);
    frame.fill(area, bg);
    let text = format!("Welcome, {name}");
    let line = centered_rect(area, text.chars().count() as u16, 1);
    frame.set_string(line.x, line.y, &text, bg);
}

/// Icon slots laid out in columns, top to bottom, then left to right.
pub fn icon_layout(area: Rect, count: usize) -> Vec<Rect> {
    let per_column = icons_per_column(area) as usize;
    (0..count)
        .map(|index| {
            let column = (index / per_column) as u16;
            let row = (index % per_column) as u16;
            Rect {
                x: area.x.saturating_add(1 + column.saturating_mul(ICON_WIDTH)),
                y: area.y.saturating_add(1 + row.saturating_mul(ICON_HEIGHT)),
                width: ICON_WIDTH - 2,
                height: ICON_HEIGHT - 1,
            }
        })
        .collect()
}

pub fn icons_per_column(area: Rect) -> u16 {
    (area.height.saturating_sub(1) / ICON_HEIGHT).max(1)
}

pub fn render_desktop(
    frame: &mut UiFrame<'_>,
    area: Rect,
    icons: &[ContentKey],
    selected: Option<usize>,
) -> Vec<(ContentKey, Rect)> {
    let bg = Style::default()
        .bg(crate::theme::desktop_bg())
        .fg(crate::theme::desktop_fg());
    frame.fill(area, bg);
    let slots = icon_layout(area, icons.len());
    let mut hits = Vec::with_capacity(icons.len());
    for (index, (key, slot)) in icons.iter().zip(slots).enumerate() {
        let style = if selected == Some(index) {
            bg.bg(crate::theme::icon_selected_bg())
        } else {
            bg
        };
        frame.fill(slot, style);
        let glyph_x = slot.x + slot.width.saturating_sub(1) / 2;
        frame.set_string(glyph_x, slot.y, key.glyph(), style.add_modifier(Modifier::BOLD));
        let title = truncate_to_width(key.title(), slot.width as usize);
        let title_x = slot.x + slot.width.saturating_sub(title.chars().count() as u16) / 2;
        frame.set_string(title_x, slot.y + 1, &title, style);
        hits.push((*key, slot));
    }
    hits
}

/// Draws the start menu above `taskbar_top`, anchored at `left`. Returns the
/// menu frame and one region per item index.
pub fn render_start_menu(
    frame: &mut UiFrame<'_>,
    left: u16,
    taskbar_top: u16,
    title: &str,
    items: &[StartItem],
    selected: usize,
    hint: &str,
) -> (Rect, Vec<(usize, Rect)>) {
    let separators = items
        .windows(2)
        .filter(|pair| pair[0].group() != pair[1].group())
        .count() as u16;
    // Title, items, separators and the hint line.
    let wanted = 1 + items.len() as u16 + separators + 1;
    let height = wanted.min(taskbar_top);
    let menu = Rect {
        x: left,
        y: taskbar_top.saturating_sub(height),
        width: MENU_WIDTH.min(frame.area().width),
        height,
    };
    frame.fill(menu, menu_style(false));
    let inner_width = menu.width.saturating_sub(2) as usize;
    frame.set_string(
        menu.x + 1,
        menu.y,
        &truncate_to_width(title, inner_width),
        menu_style(false).add_modifier(Modifier::BOLD),
    );

    let mut hits = Vec::with_capacity(items.len());
    let mut y = menu.y + 1;
    let bottom = menu.y + menu.height.saturating_sub(1);
    for (index, item) in items.iter().enumerate() {
        if index > 0 && items[index - 1].group() != item.group() {
            if y >= bottom {
                break;
            }
            let rule = "─".repeat(menu.width as usize);
            frame.set_string(
                menu.x,
                y,
                &rule,
                menu_style(false).fg(crate::theme::menu_separator()),
            );
            y += 1;
        }
        if y >= bottom {
            break;
        }
        let row = Rect {
            x: menu.x,
            y,
            width: menu.width,
            height: 1,
        };
        let style = menu_style(index == selected);
        frame.fill(row, style);
        frame.set_string(
            row.x + 1,
            y,
            &truncate_to_width(&item.label(), inner_width),
            style,
        );
        hits.push((index, row));
        y += 1;
    }
    frame.set_string(
        menu.x + 1,
        bottom,
        &truncate_to_width(hint, inner_width),
        menu_style(false).fg(crate::theme::muted_fg()),
    );
    (menu, hits)
}

/// Context menu opened at a right click, shifted to stay on screen.
pub fn render_context_menu(
    frame: &mut UiFrame<'_>,
    at: (u16, u16),
    bounds: Rect,
    selected: usize,
) -> Vec<(ContextItem, Rect)> {
    let width = ContextItem::ALL
        .iter()
        .map(|item| item.label().chars().count() as u16)
        .max()
        .unwrap_or(0)
        + 4;
    let height = ContextItem::ALL.len() as u16;
    let right = bounds.x + bounds.width;
    let bottom = bounds.y + bounds.height;
    let x = at.0.min(right.saturating_sub(width)).max(bounds.x);
    let y = at.1.min(bottom.saturating_sub(height)).max(bounds.y);
    ContextItem::ALL
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let row = Rect {
                x,
                y: y + index as u16,
                width,
                height: 1,
            };
            let style = menu_style(index == selected);
            frame.fill(row, style);
            frame.set_string(row.x + 2, row.y, item.label(), style);
            (*item, row)
        })
        .collect()
}

/// Calendar popup above the tray clock. Returns the popup frame.
pub fn render_calendar(
    frame: &mut UiFrame<'_>,
    right: u16,
    taskbar_top: u16,
    now: NaiveDateTime,
) -> Rect {
    let width = CALENDAR_WIDTH.min(frame.area().width);
    let height = CALENDAR_HEIGHT.min(taskbar_top);
    let popup = Rect {
        x: right.saturating_sub(width),
        y: taskbar_top.saturating_sub(height),
        width,
        height,
    };
    let base = menu_style(false);
    frame.fill(popup, base);
    let inner = popup.width.saturating_sub(2) as usize;
    let x = popup.x + 1;
    frame.set_string(
        x,
        popup.y,
        &truncate_to_width(&clock::long_time(now), inner),
        base.add_modifier(Modifier::BOLD),
    );
    frame.set_string(
        x,
        popup.y + 1,
        &truncate_to_width(&clock::long_date(now), inner),
        base,
    );
    let date = now.date();
    frame.set_string(
        x,
        popup.y + 3,
        &clock::month_title(date),
        base.add_modifier(Modifier::BOLD),
    );
    let header = clock::WEEKDAY_HEADER.join(" ");
    frame.set_string(x, popup.y + 4, &header, base.fg(crate::theme::muted_fg()));
    for (row, week) in clock::month_grid(date).iter().enumerate() {
        let y = popup.y + 5 + row as u16;
        for (col, day) in week.iter().enumerate() {
            let Some(day) = day else {
                continue;
            };
            let style = if *day == date.day() {
                base.bg(crate::theme::accent())
                    .fg(crate::theme::panel_active_fg())
            } else {
                base
            };
            frame.set_string(x + col as u16 * 3, y, &format!("{day:>2}"), style);
        }
    }
    popup
}
