//! Shared crate-wide constants.

/// Number of cascade slots before newly opened windows wrap back to the
/// base position.
pub const CASCADE_SLOTS: u32 = 6;

/// Two presses on the same target within this many milliseconds count as a
/// double click (desktop icons and title bars).
pub const DOUBLE_CLICK_MS: u64 = 500;

/// How long the welcome screen stays up after logging in.
pub const WELCOME_DURATION_MS: u64 = 1600;

/// Poll interval for the event loop. The tray clock is refreshed at least this
/// often even without input.
pub const POLL_INTERVAL_MS: u64 = 250;

/// Pixel preset: distance kept between windows and the viewport edges.
pub const PIXEL_MARGIN: u16 = 12;
/// Pixel preset: height of the taskbar strip.
pub const PIXEL_TASKBAR_HEIGHT: u16 = 48;
/// Pixel preset: diagonal offset between cascaded windows.
pub const PIXEL_CASCADE_STEP: u16 = 32;
pub const PIXEL_MIN_WIDTH: u16 = 320;
pub const PIXEL_MIN_HEIGHT: u16 = 240;

/// Terminal preset: values in character cells.
pub const CELL_MARGIN: u16 = 1;
pub const CELL_TASKBAR_HEIGHT: u16 = 1;
pub const CELL_CASCADE_STEP: u16 = 2;
pub const CELL_MIN_WIDTH: u16 = 24;
pub const CELL_MIN_HEIGHT: u16 = 6;
