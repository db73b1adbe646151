//! Session-wide registry shared by the window manager and the taskbar.

use std::collections::BTreeMap;

use resume_markup::ContentNode;

use super::WindowInstance;
use crate::content_key::ContentKey;
use crate::taskbar::Taskbar;

/// Everything that lives for one login session: the loaded document, open
/// windows, the taskbar mirror, and the z-order and cascade counters.
///
/// Owned by [`WindowManager`](super::WindowManager); only the manager mutates
/// it, so the window map and the taskbar always move together.
#[derive(Debug)]
pub struct SessionContext<C> {
    content: ContentNode,
    windows: BTreeMap<ContentKey, WindowInstance<C>>,
    taskbar: Taskbar,
    top_z: u64,
    active: Option<ContentKey>,
    cascade_counter: u32,
}

impl<C> SessionContext<C> {
    pub fn new(content: ContentNode) -> Self {
        Self {
            content,
            windows: BTreeMap::new(),
            taskbar: Taskbar::default(),
            top_z: 0,
            active: None,
            cascade_counter: 0,
        }
    }

    pub fn content(&self) -> &ContentNode {
        &self.content
    }

    pub(crate) fn set_content(&mut self, content: ContentNode) {
        self.content = content;
    }

    pub fn window(&self, key: ContentKey) -> Option<&WindowInstance<C>> {
        self.windows.get(&key)
    }

    pub(crate) fn window_mut(&mut self, key: ContentKey) -> Option<&mut WindowInstance<C>> {
        self.windows.get_mut(&key)
    }

    pub fn windows(&self) -> impl Iterator<Item = &WindowInstance<C>> {
        self.windows.values()
    }

    pub(crate) fn windows_mut(&mut self) -> impl Iterator<Item = &mut WindowInstance<C>> {
        self.windows.values_mut()
    }

    pub fn open_keys(&self) -> Vec<ContentKey> {
        self.windows.keys().copied().collect()
    }

    pub fn is_open(&self, key: ContentKey) -> bool {
        self.windows.contains_key(&key)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn active(&self) -> Option<ContentKey> {
        self.active
    }

    pub fn top_z(&self) -> u64 {
        self.top_z
    }

    pub fn cascade_counter(&self) -> u32 {
        self.cascade_counter
    }

    /// Register a new window and its taskbar entry together.
    pub(crate) fn insert(&mut self, window: WindowInstance<C>) {
        let key = window.key();
        self.windows.insert(key, window);
        self.taskbar.add(key);
    }

    /// Remove a window and its taskbar entry together.
    pub(crate) fn remove(&mut self, key: ContentKey) -> Option<WindowInstance<C>> {
        let window = self.windows.remove(&key)?;
        self.taskbar.remove(key);
        if self.active == Some(key) {
            self.set_active(None);
        }
        Some(window)
    }

    pub(crate) fn set_active(&mut self, key: Option<ContentKey>) {
        self.active = key;
        self.taskbar.set_active(key);
    }

    pub(crate) fn next_z(&mut self) -> u64 {
        self.top_z += 1;
        self.top_z
    }

    /// Current cascade slot, advancing the counter.
    pub(crate) fn take_cascade_slot(&mut self) -> u32 {
        let slot = self.cascade_counter;
        self.cascade_counter = self.cascade_counter.wrapping_add(1);
        slot
    }

    pub(crate) fn reset_cascade(&mut self) {
        self.cascade_counter = 0;
    }

    /// Describe every broken registry rule. Empty when the session is
    /// consistent.
    pub fn consistency_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for key in self.windows.keys() {
            if !self.taskbar.contains(*key) {
                errors.push(format!("{key} is open without a taskbar entry"));
            }
        }
        for entry in self.taskbar.entries() {
            if !self.windows.contains_key(&entry.key()) {
                errors.push(format!("taskbar entry {} has no window", entry.key()));
            }
        }
        if self.taskbar.entries().iter().filter(|e| e.active()).count() > 1 {
            errors.push("more than one taskbar entry is active".to_string());
        }
        if let Some(active) = self.active {
            match self.windows.get(&active) {
                None => errors.push(format!("active window {active} is not open")),
                Some(window) if window.is_minimized() => {
                    errors.push(format!("active window {active} is minimized"))
                }
                Some(_) => {}
            }
        }
        if self.taskbar.active() != self.active {
            errors.push("taskbar highlight disagrees with the active window".to_string());
        }
        let mut zs: Vec<u64> = self.windows.values().map(WindowInstance::z).collect();
        zs.sort_unstable();
        if zs.windows(2).any(|pair| pair[0] == pair[1]) {
            errors.push("two open windows share a z-order value".to_string());
        }
        if zs.iter().any(|z| *z > self.top_z) {
            errors.push("a window z-order exceeds the session counter".to_string());
        }
        errors
    }
}
