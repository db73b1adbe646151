//! Placement engine for floating windows.
//!
//! Everything here is a pure function of the engine configuration, the
//! viewport and the inputs. Callers own all state.

use super::{Size, Viewport, WindowRect};
use crate::config::DesktopConfig;

/// Pointer position in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerPos {
    pub x: i32,
    pub y: i32,
}

impl PointerPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Title-bar drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    pub start_pointer: PointerPos,
    pub start_rect: WindowRect,
}

/// Bottom-right grip drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    pub start_pointer: PointerPos,
    pub start_rect: WindowRect,
}

/// Largest size a normal window may take in `viewport`.
pub fn max_size(config: &DesktopConfig, viewport: Viewport) -> Size {
    let margins = config.margin.saturating_mul(2);
    Size::new(
        viewport.width.saturating_sub(margins),
        viewport
            .height
            .saturating_sub(config.taskbar_height)
            .saturating_sub(margins),
    )
}

/// Preferred size shrunk to what the viewport can hold.
pub fn default_size(config: &DesktopConfig, viewport: Viewport, preferred: Size) -> Size {
    preferred.min(max_size(config, viewport))
}

/// Initial position for the `counter`-th opened window: centered in the area
/// above the taskbar, stepped diagonally per cascade slot, then clamped.
pub fn cascade_rect(
    config: &DesktopConfig,
    viewport: Viewport,
    size: Size,
    counter: u32,
) -> WindowRect {
    let usable_height = viewport.height.saturating_sub(config.taskbar_height) as i32;
    let base_left = (viewport.width as i32 - size.width as i32) / 2;
    let base_top = (usable_height - size.height as i32) / 2;
    let slot = counter % config.cascade_slots.max(1);
    let offset = slot as i32 * config.cascade_step as i32;
    clamp_rect(
        config,
        viewport,
        WindowRect::new(base_left + offset, base_top + offset, size.width, size.height),
    )
}

/// Move `rect` so it lies inside the viewport minus margins and the taskbar
/// strip. When the window is larger than the space the top-left margin wins.
pub fn clamp_rect(config: &DesktopConfig, viewport: Viewport, rect: WindowRect) -> WindowRect {
    let margin = config.margin as i32;
    let max_left = viewport.width as i32 - margin - rect.width as i32;
    let max_top = viewport.height as i32
        - config.taskbar_height as i32
        - margin
        - rect.height as i32;
    WindowRect {
        left: rect.left.min(max_left).max(margin),
        top: rect.top.min(max_top).max(margin),
        ..rect
    }
}

/// Whether `rect` already satisfies the containment rule.
pub fn is_contained(config: &DesktopConfig, viewport: Viewport, rect: WindowRect) -> bool {
    clamp_rect(config, viewport, rect) == rect
}

/// Geometry of a maximized window: the whole viewport above the taskbar.
pub fn maximized_rect(config: &DesktopConfig, viewport: Viewport) -> WindowRect {
    WindowRect::new(
        0,
        0,
        viewport.width,
        viewport.height.saturating_sub(config.taskbar_height),
    )
}

/// New geometry while dragging. No clamping: the gesture end clamps once.
pub fn apply_header_drag(drag: &HeaderDrag, pointer: PointerPos) -> WindowRect {
    WindowRect {
        left: drag.start_rect.left + (pointer.x - drag.start_pointer.x),
        top: drag.start_rect.top + (pointer.y - drag.start_pointer.y),
        ..drag.start_rect
    }
}

/// New geometry while resizing from the bottom-right grip. The size is kept
/// between the configured minimum and the viewport maximum; the viewport
/// bound wins when the two conflict.
pub fn apply_resize_drag(
    config: &DesktopConfig,
    viewport: Viewport,
    drag: &ResizeDrag,
    pointer: PointerPos,
) -> WindowRect {
    let max = max_size(config, viewport);
    let dx = pointer.x - drag.start_pointer.x;
    let dy = pointer.y - drag.start_pointer.y;
    let bound = |start: u16, delta: i32, min: u16, max: u16| -> u16 {
        let wanted = (start as i32 + delta).max(min as i32).min(max as i32);
        wanted.clamp(0, u16::MAX as i32) as u16
    };
    WindowRect {
        width: bound(drag.start_rect.width, dx, config.min_size.width, max.width),
        height: bound(drag.start_rect.height, dy, config.min_size.height, max.height),
        ..drag.start_rect
    }
}

/// Shrink `rect` to the viewport maximum if needed, then clamp its position.
pub fn fit_rect(config: &DesktopConfig, viewport: Viewport, rect: WindowRect) -> WindowRect {
    let size = rect.size().min(max_size(config, viewport));
    clamp_rect(
        config,
        viewport,
        WindowRect {
            width: size.width,
            height: size.height,
            ..rect
        },
    )
}
