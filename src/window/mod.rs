pub mod decorator;
pub mod session;

mod window_manager;

pub use session::SessionContext;
pub use window_manager::{GestureKind, PointerId, WindowManager};

use crate::content_key::ContentKey;
use crate::layout::WindowRect;

/// Visible lifecycle state of an open window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
}

/// One open window. Minimizing is an overlay bit on top of the normal or
/// maximized geometry, so restoring brings back whichever state was showing.
#[derive(Debug)]
pub struct WindowInstance<C> {
    key: ContentKey,
    rect: WindowRect,
    minimized: bool,
    /// Geometry to return to; present exactly while maximized.
    restore_rect: Option<WindowRect>,
    z: u64,
    content: C,
}

impl<C> WindowInstance<C> {
    pub(crate) fn new(key: ContentKey, rect: WindowRect, content: C) -> Self {
        Self {
            key,
            rect,
            minimized: false,
            restore_rect: None,
            z: 0,
            content,
        }
    }

    pub fn key(&self) -> ContentKey {
        self.key
    }

    pub fn rect(&self) -> WindowRect {
        self.rect
    }

    pub fn state(&self) -> WindowState {
        if self.minimized {
            WindowState::Minimized
        } else if self.restore_rect.is_some() {
            WindowState::Maximized
        } else {
            WindowState::Normal
        }
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.restore_rect.is_some()
    }

    /// Pre-maximize geometry snapshot.
    pub fn restore_rect(&self) -> Option<WindowRect> {
        self.restore_rect
    }

    pub fn z(&self) -> u64 {
        self.z
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub(crate) fn set_rect(&mut self, rect: WindowRect) {
        self.rect = rect;
    }

    pub(crate) fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }

    pub(crate) fn set_z(&mut self, z: u64) {
        self.z = z;
    }

    /// Enter maximized state, snapshotting the current geometry.
    pub(crate) fn maximize_to(&mut self, full: WindowRect) {
        if self.restore_rect.is_none() {
            self.restore_rect = Some(self.rect);
        }
        self.rect = full;
    }

    /// Leave maximized state, returning the snapshot.
    pub(crate) fn take_restore_rect(&mut self) -> Option<WindowRect> {
        self.restore_rect.take()
    }
}
