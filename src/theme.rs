use ratatui::style::Color;

// Centralized desktop colors. Kept as small helpers so every surface pulls
// from the same palette.

pub const ACCENT_RGB: (u8, u8, u8) = (0, 120, 215);
pub const DESKTOP_RGB: (u8, u8, u8) = (0, 94, 120);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

// Desktop / icons
pub fn desktop_bg() -> Color {
    rgb_to_color(DESKTOP_RGB)
}
pub fn desktop_fg() -> Color {
    Color::White
}
pub fn icon_selected_bg() -> Color {
    accent()
}

// Taskbar
pub fn panel_bg() -> Color {
    Color::DarkGray
}
pub fn panel_fg() -> Color {
    Color::White
}
pub fn panel_inactive_fg() -> Color {
    Color::Gray
}
pub fn panel_active_bg() -> Color {
    Color::Gray
}
pub fn panel_active_fg() -> Color {
    Color::Black
}
pub fn start_button_bg() -> Color {
    Color::Green
}

// Menus and popups
pub fn menu_bg() -> Color {
    Color::Black
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    accent()
}
pub fn menu_selected_fg() -> Color {
    Color::White
}
pub fn menu_separator() -> Color {
    Color::DarkGray
}

// Window chrome
pub fn decorator_header_bg() -> Color {
    accent()
}
pub fn decorator_header_inactive_bg() -> Color {
    Color::DarkGray
}
pub fn decorator_header_fg() -> Color {
    Color::White
}
pub fn decorator_border() -> Color {
    Color::Gray
}
pub fn window_bg() -> Color {
    Color::Black
}
pub fn window_fg() -> Color {
    Color::White
}

// Content
pub fn heading_fg() -> Color {
    Color::Cyan
}
pub fn muted_fg() -> Color {
    Color::DarkGray
}
pub fn link_fg() -> Color {
    Color::LightBlue
}
pub fn star_fg() -> Color {
    Color::Yellow
}

// Login / welcome screens
pub fn login_bg() -> Color {
    Color::Rgb(16, 40, 80)
}

/// Paint palette, selected with keys 1 through 6.
pub const PAINT_COLORS: [Color; 6] = [
    Color::White,
    Color::Red,
    Color::Green,
    Color::Blue,
    Color::Yellow,
    Color::Magenta,
];
