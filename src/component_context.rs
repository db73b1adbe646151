//! Shared component rendering context
//!
//! `ComponentContext` carries the bits of desktop state a window's content may
//! need while rendering or handling input, so the `Component` trait stays
//! stable as that state grows.

/// Context passed to `Component` trait methods.
///
/// - `focused`: the window holding the component is the active window.
/// - `caret_visible`: blink phase for text carets, flipped by the clock tick.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    caret_visible: bool,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self {
            focused,
            caret_visible: true,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    /// A caret is drawn only when focused and in the visible blink phase.
    pub const fn show_caret(&self) -> bool {
        self.focused && self.caret_visible
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn with_caret_visible(mut self, visible: bool) -> Self {
        self.caret_visible = visible;
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false)
    }
}
