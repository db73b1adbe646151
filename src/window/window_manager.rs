use std::collections::BTreeMap;

use resume_markup::ContentNode;

use super::session::SessionContext;
use super::{WindowInstance, WindowState};
use crate::config::DesktopConfig;
use crate::content_key::ContentKey;
use crate::layout::floating::*;
use crate::layout::{Viewport, WindowRect};

/// Input device that owns a gesture. Capture is per device: once a gesture
/// starts, further moves from the same device go to that window only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerId(pub u32);

impl PointerId {
    pub const MOUSE: PointerId = PointerId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
}

#[derive(Debug, Clone, Copy)]
enum Gesture {
    Drag { key: ContentKey, drag: HeaderDrag },
    Resize { key: ContentKey, drag: ResizeDrag },
}

impl Gesture {
    fn key(&self) -> ContentKey {
        match self {
            Gesture::Drag { key, .. } | Gesture::Resize { key, .. } => *key,
        }
    }

    fn kind(&self) -> GestureKind {
        match self {
            Gesture::Drag { .. } => GestureKind::Drag,
            Gesture::Resize { .. } => GestureKind::Resize,
        }
    }
}

/// Window lifecycle state machine and taskbar/focus coordinator.
///
/// `C` is the content fragment attached to each window at creation time; the
/// manager stores it but never looks inside. Every operation is a no-op on
/// input that does not apply (unknown window, repeated transition), so callers
/// never handle errors.
#[derive(Debug)]
pub struct WindowManager<C> {
    session: SessionContext<C>,
    config: DesktopConfig,
    viewport: Viewport,
    gestures: BTreeMap<PointerId, Gesture>,
}

impl<C> WindowManager<C> {
    pub fn new(content: ContentNode, config: DesktopConfig, viewport: Viewport) -> Self {
        Self {
            session: SessionContext::new(content),
            config,
            viewport,
            gestures: BTreeMap::new(),
        }
    }

    pub fn session(&self) -> &SessionContext<C> {
        &self.session
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn content(&self) -> &ContentNode {
        self.session.content()
    }

    /// Swap in a freshly loaded document. Open windows keep the fragments
    /// they were built with.
    pub fn replace_content(&mut self, content: ContentNode) {
        self.session.set_content(content);
    }

    pub fn window(&self, key: ContentKey) -> Option<&WindowInstance<C>> {
        self.session.window(key)
    }

    pub fn window_state(&self, key: ContentKey) -> Option<WindowState> {
        self.session.window(key).map(WindowInstance::state)
    }

    pub fn content_mut(&mut self, key: ContentKey) -> Option<&mut C> {
        self.session.window_mut(key).map(WindowInstance::content_mut)
    }

    pub fn active(&self) -> Option<ContentKey> {
        self.session.active()
    }

    pub fn is_open(&self, key: ContentKey) -> bool {
        self.session.is_open(key)
    }

    /// Visible windows from bottom to top.
    pub fn draw_order(&self) -> Vec<ContentKey> {
        let mut visible: Vec<&WindowInstance<C>> = self
            .session
            .windows()
            .filter(|window| !window.is_minimized())
            .collect();
        visible.sort_by_key(|window| window.z());
        visible.into_iter().map(WindowInstance::key).collect()
    }

    /// Topmost visible window under the point.
    pub fn window_at(&self, x: i32, y: i32) -> Option<ContentKey> {
        self.draw_order().into_iter().rev().find(|key| {
            self.session
                .window(*key)
                .is_some_and(|window| window.rect().contains(x, y))
        })
    }

    /// Open `key`, or bring back the existing window for it.
    ///
    /// Returns `true` when a new window was created. `build` runs only in
    /// that case and receives the session's document.
    pub fn open_window<F>(&mut self, key: ContentKey, build: F) -> bool
    where
        F: FnOnce(&ContentNode, ContentKey) -> C,
    {
        if self.session.is_open(key) {
            self.restore(key);
            self.focus(key);
            return false;
        }
        let preferred = self.config.preferred_size(key);
        let size = default_size(&self.config, self.viewport, preferred);
        let slot = self.session.take_cascade_slot();
        let rect = cascade_rect(&self.config, self.viewport, size, slot);
        let content = build(self.session.content(), key);
        self.session.insert(WindowInstance::new(key, rect, content));
        tracing::debug!(window = %key, slot, ?rect, "opened window");
        self.focus(key);
        true
    }

    /// Raise `key` above every other window and make it the active one.
    pub fn focus(&mut self, key: ContentKey) -> bool {
        let top = self.session.top_z();
        let active = self.session.active();
        let Some(window) = self.session.window(key) else {
            return false;
        };
        if window.is_minimized() {
            return false;
        }
        if active == Some(key) && window.z() == top {
            return false;
        }
        let z = self.session.next_z();
        if let Some(window) = self.session.window_mut(key) {
            window.set_z(z);
        }
        self.session.set_active(Some(key));
        tracing::debug!(window = %key, z, "focused window");
        true
    }

    pub fn minimize(&mut self, key: ContentKey) -> bool {
        if !self
            .session
            .window(key)
            .is_some_and(|window| !window.is_minimized())
        {
            return false;
        }
        self.finish_gestures_for(key);
        if let Some(window) = self.session.window_mut(key) {
            window.set_minimized(true);
        }
        if self.session.active() == Some(key) {
            self.session.set_active(None);
        }
        tracing::debug!(window = %key, "minimized window");
        true
    }

    /// Bring a minimized window back in whichever state it was minimized
    /// from, and focus it.
    pub fn restore(&mut self, key: ContentKey) -> bool {
        let viewport = self.viewport;
        let full = maximized_rect(&self.config, viewport);
        let Some(window) = self.session.window_mut(key) else {
            return false;
        };
        if !window.is_minimized() {
            return false;
        }
        window.set_minimized(false);
        if window.is_maximized() {
            window.set_rect(full);
        }
        let state = window.state();
        tracing::debug!(window = %key, ?state, "restored window");
        self.focus(key);
        true
    }

    pub fn maximize(&mut self, key: ContentKey) -> bool {
        if self.window_state(key) != Some(WindowState::Normal) {
            return false;
        }
        self.finish_gestures_for(key);
        let full = maximized_rect(&self.config, self.viewport);
        if let Some(window) = self.session.window_mut(key) {
            window.maximize_to(full);
            tracing::debug!(window = %key, restore = ?window.restore_rect(), "maximized window");
        }
        self.focus(key);
        true
    }

    pub fn unmaximize(&mut self, key: ContentKey) -> bool {
        if self.window_state(key) != Some(WindowState::Maximized) {
            return false;
        }
        let config = &self.config;
        let viewport = self.viewport;
        if let Some(window) = self.session.window_mut(key)
            && let Some(snapshot) = window.take_restore_rect()
        {
            let rect = fit_rect(config, viewport, snapshot);
            window.set_rect(rect);
            tracing::debug!(window = %key, ?rect, "unmaximized window");
        }
        self.focus(key);
        true
    }

    pub fn toggle_maximize(&mut self, key: ContentKey) -> bool {
        match self.window_state(key) {
            Some(WindowState::Normal) => self.maximize(key),
            Some(WindowState::Maximized) => self.unmaximize(key),
            _ => false,
        }
    }

    /// Destroy the window and its taskbar entry. Focus is not handed to
    /// another window.
    pub fn close(&mut self, key: ContentKey) -> bool {
        self.gestures.retain(|_, gesture| gesture.key() != key);
        match self.session.remove(key) {
            Some(_) => {
                tracing::debug!(window = %key, "closed window");
                true
            }
            None => false,
        }
    }

    /// Close every window and reset placement. The document stays loaded.
    pub fn log_off(&mut self) {
        self.gestures.clear();
        for key in self.session.open_keys() {
            self.close(key);
        }
        self.session.reset_cascade();
        tracing::info!("session logged off");
    }

    /// Taskbar entry click: restore a minimized window, minimize the active
    /// one, otherwise focus.
    pub fn taskbar_click(&mut self, key: ContentKey) -> bool {
        match self.window_state(key) {
            None => false,
            Some(WindowState::Minimized) => self.restore(key),
            Some(_) if self.session.active() == Some(key) => self.minimize(key),
            Some(_) => self.focus(key),
        }
    }

    /// Raise the bottom-most visible window, cycling through all of them on
    /// repeated calls.
    pub fn cycle_focus(&mut self) -> Option<ContentKey> {
        let order = self.draw_order();
        let next = match order.as_slice() {
            [] => return None,
            [only] => *only,
            [bottom, ..] => *bottom,
        };
        self.focus(next);
        Some(next)
    }

    /// Apply a new host viewport. Maximized windows track it; others shrink
    /// to fit and are pulled back inside. Windows mid-gesture are left alone
    /// until the gesture ends.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        let busy: Vec<ContentKey> = self.gestures.values().map(Gesture::key).collect();
        let config = &self.config;
        let full = maximized_rect(config, viewport);
        for window in self.session.windows_mut() {
            if busy.contains(&window.key()) {
                continue;
            }
            let rect = if window.is_maximized() {
                full
            } else {
                fit_rect(config, viewport, window.rect())
            };
            window.set_rect(rect);
        }
        tracing::debug!(width = viewport.width, height = viewport.height, "reflowed windows");
    }

    pub fn begin_drag(&mut self, key: ContentKey, pointer: PointerId, at: PointerPos) -> bool {
        let Some(start_rect) = self.gesture_start(key, pointer) else {
            return false;
        };
        self.focus(key);
        self.gestures.insert(
            pointer,
            Gesture::Drag {
                key,
                drag: HeaderDrag {
                    start_pointer: at,
                    start_rect,
                },
            },
        );
        true
    }

    pub fn begin_resize(&mut self, key: ContentKey, pointer: PointerId, at: PointerPos) -> bool {
        let Some(start_rect) = self.gesture_start(key, pointer) else {
            return false;
        };
        self.focus(key);
        self.gestures.insert(
            pointer,
            Gesture::Resize {
                key,
                drag: ResizeDrag {
                    start_pointer: at,
                    start_rect,
                },
            },
        );
        true
    }

    /// Starting geometry for a new gesture, if one may start: the window is
    /// open in normal state, the device is free, and the window has no other
    /// gesture in progress.
    fn gesture_start(&self, key: ContentKey, pointer: PointerId) -> Option<WindowRect> {
        let window = self.session.window(key)?;
        if window.state() != WindowState::Normal
            || self.gestures.contains_key(&pointer)
            || self.gesture_for(key).is_some()
        {
            return None;
        }
        Some(window.rect())
    }

    pub fn gesture_for(&self, key: ContentKey) -> Option<GestureKind> {
        self.gestures
            .values()
            .find(|gesture| gesture.key() == key)
            .map(Gesture::kind)
    }

    pub fn has_gesture(&self, pointer: PointerId) -> bool {
        self.gestures.contains_key(&pointer)
    }

    /// Feed a pointer move to the gesture captured by `pointer`.
    pub fn pointer_move(&mut self, pointer: PointerId, at: PointerPos) -> bool {
        let Some(gesture) = self.gestures.get(&pointer).copied() else {
            return false;
        };
        let rect = match &gesture {
            Gesture::Drag { drag, .. } => apply_header_drag(drag, at),
            Gesture::Resize { drag, .. } => {
                apply_resize_drag(&self.config, self.viewport, drag, at)
            }
        };
        match self.session.window_mut(gesture.key()) {
            Some(window) => {
                window.set_rect(rect);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self, pointer: PointerId) -> bool {
        self.end_gesture(pointer, false)
    }

    /// Ends the gesture exactly like pointer-up, clamp included.
    pub fn pointer_cancel(&mut self, pointer: PointerId) -> bool {
        self.end_gesture(pointer, true)
    }

    pub fn cancel_all_gestures(&mut self) {
        let pointers: Vec<PointerId> = self.gestures.keys().copied().collect();
        for pointer in pointers {
            self.pointer_cancel(pointer);
        }
    }

    fn end_gesture(&mut self, pointer: PointerId, cancelled: bool) -> bool {
        let Some(gesture) = self.gestures.remove(&pointer) else {
            return false;
        };
        let key = gesture.key();
        let rect = self.settle(key);
        tracing::debug!(
            window = %key,
            kind = ?gesture.kind(),
            cancelled,
            ?rect,
            "gesture ended"
        );
        true
    }

    fn finish_gestures_for(&mut self, key: ContentKey) {
        let before = self.gestures.len();
        self.gestures.retain(|_, gesture| gesture.key() != key);
        if self.gestures.len() != before {
            self.settle(key);
        }
    }

    /// End-of-gesture step: fit the window back inside the viewport.
    fn settle(&mut self, key: ContentKey) -> Option<WindowRect> {
        let config = &self.config;
        let viewport = self.viewport;
        let window = self.session.window_mut(key)?;
        if window.is_maximized() {
            return Some(window.rect());
        }
        let rect = fit_rect(config, viewport, window.rect());
        window.set_rect(rect);
        Some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Size;
    use resume_markup::Mapping;

    const VIEW: Viewport = Viewport::new(940, 748);

    fn wm() -> WindowManager<String> {
        WindowManager::new(
            ContentNode::Mapping(Mapping::new()),
            DesktopConfig::pixels(),
            VIEW,
        )
    }

    fn open(wm: &mut WindowManager<String>, key: ContentKey) -> bool {
        wm.open_window(key, |_, key| key.title().to_string())
    }

    fn rect(wm: &WindowManager<String>, key: ContentKey) -> WindowRect {
        wm.window(key).map(WindowInstance::rect).expect("window open")
    }

    fn z(wm: &WindowManager<String>, key: ContentKey) -> u64 {
        wm.window(key).map(WindowInstance::z).expect("window open")
    }

    fn assert_consistent(wm: &WindowManager<String>) {
        let errors = wm.session().consistency_errors();
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn open_creates_window_and_taskbar_entry() {
        let mut wm = wm();
        assert!(open(&mut wm, ContentKey::Projects));
        assert_eq!(wm.active(), Some(ContentKey::Projects));
        assert_eq!(rect(&wm, ContentKey::Projects), WindowRect::new(160, 120, 620, 460));
        assert_eq!(wm.session().taskbar().keys(), vec![ContentKey::Projects]);
        assert_eq!(
            wm.window(ContentKey::Projects).map(|w| w.content().as_str()),
            Some("Projects")
        );
        assert_consistent(&wm);
    }

    #[test]
    fn reopening_is_idempotent() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Skills);
        let mut built = false;
        let created = wm.open_window(ContentKey::Skills, |_, _| {
            built = true;
            String::new()
        });
        assert!(!created);
        assert!(!built);
        assert_eq!(wm.session().window_count(), 1);
        assert_eq!(wm.active(), Some(ContentKey::Skills));
        assert_eq!(wm.session().cascade_counter(), 1);
        assert_consistent(&wm);
    }

    #[test]
    fn reopening_minimized_window_restores_and_focuses() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Skills);
        wm.minimize(ContentKey::Skills);
        open(&mut wm, ContentKey::Skills);
        assert_eq!(wm.window_state(ContentKey::Skills), Some(WindowState::Normal));
        assert_eq!(wm.active(), Some(ContentKey::Skills));
    }

    #[test]
    fn focus_assigns_strictly_increasing_z() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Experience);
        open(&mut wm, ContentKey::Skills);
        assert!(z(&wm, ContentKey::Skills) > z(&wm, ContentKey::Experience));
        assert!(wm.focus(ContentKey::Experience));
        assert!(z(&wm, ContentKey::Experience) > z(&wm, ContentKey::Skills));
        assert_eq!(wm.draw_order(), vec![ContentKey::Skills, ContentKey::Experience]);
        // Already active and on top.
        assert!(!wm.focus(ContentKey::Experience));
        assert!(!wm.focus(ContentKey::Paint));
        assert_consistent(&wm);
    }

    #[test]
    fn minimize_clears_active_and_keeps_geometry() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        let before = rect(&wm, ContentKey::Summary);
        assert!(wm.minimize(ContentKey::Summary));
        assert!(!wm.minimize(ContentKey::Summary));
        assert_eq!(wm.active(), None);
        assert_eq!(rect(&wm, ContentKey::Summary), before);
        assert!(!wm.focus(ContentKey::Summary));
        assert!(wm.draw_order().is_empty());
        assert!(wm.session().taskbar().contains(ContentKey::Summary));
        assert_consistent(&wm);
    }

    #[test]
    fn minimizing_inactive_window_keeps_other_active() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        open(&mut wm, ContentKey::Skills);
        wm.minimize(ContentKey::Summary);
        assert_eq!(wm.active(), Some(ContentKey::Skills));
        assert_consistent(&wm);
    }

    #[test]
    fn restore_returns_to_maximized_when_minimized_from_maximized() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Projects);
        let g1 = rect(&wm, ContentKey::Projects);
        wm.maximize(ContentKey::Projects);
        wm.minimize(ContentKey::Projects);
        assert_eq!(wm.window_state(ContentKey::Projects), Some(WindowState::Minimized));
        assert!(wm.restore(ContentKey::Projects));
        assert_eq!(wm.window_state(ContentKey::Projects), Some(WindowState::Maximized));
        assert_eq!(wm.active(), Some(ContentKey::Projects));
        assert!(wm.unmaximize(ContentKey::Projects));
        assert_eq!(rect(&wm, ContentKey::Projects), g1);
        assert!(!wm.restore(ContentKey::Projects));
        assert_consistent(&wm);
    }

    #[test]
    fn maximize_round_trip_restores_exact_geometry() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Projects);
        let g1 = rect(&wm, ContentKey::Projects);
        assert_eq!(g1, WindowRect::new(160, 120, 620, 460));
        assert!(wm.toggle_maximize(ContentKey::Projects));
        assert_eq!(rect(&wm, ContentKey::Projects), WindowRect::new(0, 0, 940, 700));
        assert_eq!(
            wm.window(ContentKey::Projects).and_then(WindowInstance::restore_rect),
            Some(g1)
        );
        assert!(!wm.maximize(ContentKey::Projects));
        assert!(wm.toggle_maximize(ContentKey::Projects));
        assert_eq!(rect(&wm, ContentKey::Projects), g1);
        assert!(!wm.unmaximize(ContentKey::Projects));
        assert_consistent(&wm);
    }

    #[test]
    fn maximize_ignores_minimized_window() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Projects);
        wm.minimize(ContentKey::Projects);
        assert!(!wm.toggle_maximize(ContentKey::Projects));
        assert_eq!(wm.window_state(ContentKey::Projects), Some(WindowState::Minimized));
    }

    #[test]
    fn unmaximize_reclamps_after_viewport_shrinks() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Projects);
        wm.maximize(ContentKey::Projects);
        let small = Viewport::new(600, 500);
        wm.set_viewport(small);
        assert_eq!(rect(&wm, ContentKey::Projects), WindowRect::new(0, 0, 600, 452));
        wm.unmaximize(ContentKey::Projects);
        let restored = rect(&wm, ContentKey::Projects);
        assert_eq!(restored, WindowRect::new(12, 12, 576, 428));
        assert!(is_contained(wm.config(), small, restored));
    }

    #[test]
    fn close_removes_entry_and_leaves_no_active_window() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Experience);
        open(&mut wm, ContentKey::Skills);
        let skills_z = z(&wm, ContentKey::Skills);
        wm.focus(ContentKey::Experience);
        assert!(wm.close(ContentKey::Experience));
        assert!(!wm.close(ContentKey::Experience));
        assert_eq!(wm.active(), None);
        assert_eq!(z(&wm, ContentKey::Skills), skills_z);
        assert_eq!(wm.session().taskbar().keys(), vec![ContentKey::Skills]);
        assert_consistent(&wm);
    }

    #[test]
    fn drag_clamps_on_release() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        let start = rect(&wm, ContentKey::Summary);
        assert!(wm.begin_drag(ContentKey::Summary, PointerId::MOUSE, PointerPos::new(200, 130)));
        wm.pointer_move(PointerId::MOUSE, PointerPos::new(200 - 660, 130));
        assert_eq!(rect(&wm, ContentKey::Summary).left, -500);
        assert!(wm.pointer_up(PointerId::MOUSE));
        let end = rect(&wm, ContentKey::Summary);
        assert_eq!(end.left, 12);
        assert_eq!(end.top, start.top);
        assert!(!wm.pointer_up(PointerId::MOUSE));
    }

    #[test]
    fn cancelled_drag_still_clamps() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        wm.begin_drag(ContentKey::Summary, PointerId::MOUSE, PointerPos::new(0, 0));
        wm.pointer_move(PointerId::MOUSE, PointerPos::new(5000, 5000));
        assert!(wm.pointer_cancel(PointerId::MOUSE));
        let end = rect(&wm, ContentKey::Summary);
        assert!(is_contained(wm.config(), VIEW, end));
        assert_eq!(end.left, 940 - 12 - 620);
    }

    #[test]
    fn resize_clamps_to_floor() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Notepad);
        let start = rect(&wm, ContentKey::Notepad);
        let grip = PointerPos::new(start.right(), start.bottom());
        assert!(wm.begin_resize(ContentKey::Notepad, PointerId::MOUSE, grip));
        assert_eq!(wm.gesture_for(ContentKey::Notepad), Some(GestureKind::Resize));
        wm.pointer_move(PointerId::MOUSE, PointerPos::new(0, 0));
        assert_eq!(rect(&wm, ContentKey::Notepad).size(), Size::new(320, 240));
        wm.pointer_up(PointerId::MOUSE);
        let end = rect(&wm, ContentKey::Notepad);
        assert_eq!(end.size(), Size::new(320, 240));
        assert_eq!((end.left, end.top), (start.left, start.top));
    }

    #[test]
    fn one_gesture_per_window_and_per_device() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        open(&mut wm, ContentKey::Skills);
        let touch = PointerId(7);
        assert!(wm.begin_drag(ContentKey::Summary, PointerId::MOUSE, PointerPos::new(0, 0)));
        assert!(!wm.begin_resize(ContentKey::Summary, touch, PointerPos::new(0, 0)));
        assert!(!wm.begin_drag(ContentKey::Skills, PointerId::MOUSE, PointerPos::new(0, 0)));
        assert!(wm.begin_drag(ContentKey::Skills, touch, PointerPos::new(0, 0)));
        let skills_before = rect(&wm, ContentKey::Skills);
        wm.pointer_move(PointerId::MOUSE, PointerPos::new(10, 10));
        assert_eq!(rect(&wm, ContentKey::Skills), skills_before);
        wm.pointer_up(PointerId::MOUSE);
        assert!(wm.has_gesture(touch));
        assert!(!wm.has_gesture(PointerId::MOUSE));
    }

    #[test]
    fn no_gestures_on_maximized_or_minimized_windows() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        wm.maximize(ContentKey::Summary);
        assert!(!wm.begin_drag(ContentKey::Summary, PointerId::MOUSE, PointerPos::new(0, 0)));
        assert!(!wm.begin_resize(ContentKey::Summary, PointerId::MOUSE, PointerPos::new(0, 0)));
        wm.unmaximize(ContentKey::Summary);
        wm.minimize(ContentKey::Summary);
        assert!(!wm.begin_drag(ContentKey::Summary, PointerId::MOUSE, PointerPos::new(0, 0)));
    }

    #[test]
    fn minimizing_mid_drag_settles_geometry() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        wm.begin_drag(ContentKey::Summary, PointerId::MOUSE, PointerPos::new(0, 0));
        wm.pointer_move(PointerId::MOUSE, PointerPos::new(-900, -900));
        wm.minimize(ContentKey::Summary);
        assert!(!wm.has_gesture(PointerId::MOUSE));
        assert!(is_contained(wm.config(), VIEW, rect(&wm, ContentKey::Summary)));
    }

    #[test]
    fn closing_mid_gesture_drops_capture() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        wm.begin_drag(ContentKey::Summary, PointerId::MOUSE, PointerPos::new(0, 0));
        wm.close(ContentKey::Summary);
        assert!(!wm.has_gesture(PointerId::MOUSE));
        assert!(!wm.pointer_move(PointerId::MOUSE, PointerPos::new(1, 1)));
    }

    #[test]
    fn viewport_reflow_shrinks_clamps_and_tracks_maximized() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        open(&mut wm, ContentKey::Projects);
        wm.maximize(ContentKey::Projects);
        open(&mut wm, ContentKey::Notepad);
        wm.minimize(ContentKey::Notepad);
        let small = Viewport::new(500, 400);
        wm.set_viewport(small);
        let summary = rect(&wm, ContentKey::Summary);
        assert_eq!(summary.size(), Size::new(476, 328));
        assert!(is_contained(wm.config(), small, summary));
        assert!(is_contained(wm.config(), small, rect(&wm, ContentKey::Notepad)));
        assert_eq!(rect(&wm, ContentKey::Projects), WindowRect::new(0, 0, 500, 352));
        assert_consistent(&wm);
    }

    #[test]
    fn reflow_skips_window_mid_gesture_until_release() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        wm.begin_drag(ContentKey::Summary, PointerId::MOUSE, PointerPos::new(0, 0));
        let during = rect(&wm, ContentKey::Summary);
        let small = Viewport::new(500, 400);
        wm.set_viewport(small);
        assert_eq!(rect(&wm, ContentKey::Summary), during);
        wm.pointer_up(PointerId::MOUSE);
        let end = rect(&wm, ContentKey::Summary);
        assert!(is_contained(wm.config(), small, end));
        assert_eq!(end.size(), Size::new(476, 328));
    }

    #[test]
    fn opening_in_small_viewport_shrinks_to_fit() {
        let mut wm = WindowManager::<String>::new(
            ContentNode::default(),
            DesktopConfig::pixels(),
            Viewport::new(400, 300),
        );
        open(&mut wm, ContentKey::Experience);
        let r = rect(&wm, ContentKey::Experience);
        assert_eq!(r.size(), Size::new(376, 228));
        assert!(is_contained(wm.config(), wm.viewport(), r));
    }

    #[test]
    fn taskbar_click_restores_minimizes_and_focuses() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        open(&mut wm, ContentKey::Skills);
        // Inactive: focus.
        assert!(wm.taskbar_click(ContentKey::Summary));
        assert_eq!(wm.active(), Some(ContentKey::Summary));
        // Active: minimize.
        assert!(wm.taskbar_click(ContentKey::Summary));
        assert_eq!(wm.window_state(ContentKey::Summary), Some(WindowState::Minimized));
        assert_eq!(wm.active(), None);
        // Minimized: restore and focus.
        assert!(wm.taskbar_click(ContentKey::Summary));
        assert_eq!(wm.window_state(ContentKey::Summary), Some(WindowState::Normal));
        assert_eq!(wm.active(), Some(ContentKey::Summary));
        assert!(!wm.taskbar_click(ContentKey::Paint));
        assert_consistent(&wm);
    }

    #[test]
    fn log_off_closes_everything_and_resets_cascade() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        open(&mut wm, ContentKey::Skills);
        open(&mut wm, ContentKey::Paint);
        wm.begin_drag(ContentKey::Paint, PointerId::MOUSE, PointerPos::new(0, 0));
        let top = wm.session().top_z();
        wm.log_off();
        assert_eq!(wm.session().window_count(), 0);
        assert!(wm.session().taskbar().is_empty());
        assert_eq!(wm.session().cascade_counter(), 0);
        assert_eq!(wm.active(), None);
        assert!(!wm.has_gesture(PointerId::MOUSE));
        // z values are never reused.
        open(&mut wm, ContentKey::Summary);
        assert!(z(&wm, ContentKey::Summary) > top);
        assert_eq!(rect(&wm, ContentKey::Summary), WindowRect::new(160, 120, 620, 460));
    }

    #[test]
    fn cycle_focus_raises_bottom_window() {
        let mut wm = wm();
        assert_eq!(wm.cycle_focus(), None);
        open(&mut wm, ContentKey::Summary);
        open(&mut wm, ContentKey::Skills);
        open(&mut wm, ContentKey::Paint);
        assert_eq!(wm.cycle_focus(), Some(ContentKey::Summary));
        assert_eq!(wm.cycle_focus(), Some(ContentKey::Skills));
        assert_eq!(wm.cycle_focus(), Some(ContentKey::Paint));
        assert_eq!(wm.active(), Some(ContentKey::Paint));
    }

    #[test]
    fn window_at_returns_topmost() {
        let mut wm = wm();
        open(&mut wm, ContentKey::Summary);
        open(&mut wm, ContentKey::Skills);
        let summary = rect(&wm, ContentKey::Summary);
        let skills = rect(&wm, ContentKey::Skills);
        assert_eq!(wm.window_at(skills.left + 1, skills.top + 1), Some(ContentKey::Skills));
        assert_eq!(wm.window_at(summary.left, summary.top), Some(ContentKey::Summary));
        wm.focus(ContentKey::Summary);
        assert_eq!(wm.window_at(skills.left + 1, skills.top + 1), Some(ContentKey::Summary));
        assert_eq!(wm.window_at(0, 0), None);
    }
}
