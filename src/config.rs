//! Engine configuration: the constants the placement engine reads.

use crate::constants::*;
use crate::content_key::ContentKey;
use crate::layout::Size;

/// Geometry constants for one unit system.
///
/// `pixels()` mirrors a browser desktop and is what the engine's documented
/// examples use; `cells()` is the terminal build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    /// Gap kept between a normal window and every viewport edge.
    pub margin: u16,
    /// Height reserved for the taskbar at the bottom of the viewport.
    pub taskbar_height: u16,
    /// Diagonal offset between successively opened windows.
    pub cascade_step: u16,
    pub cascade_slots: u32,
    pub min_size: Size,
    pub default_size: Size,
    preferred: Vec<(ContentKey, Size)>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self::pixels()
    }
}

impl DesktopConfig {
    pub fn pixels() -> Self {
        Self {
            margin: PIXEL_MARGIN,
            taskbar_height: PIXEL_TASKBAR_HEIGHT,
            cascade_step: PIXEL_CASCADE_STEP,
            cascade_slots: CASCADE_SLOTS,
            min_size: Size::new(PIXEL_MIN_WIDTH, PIXEL_MIN_HEIGHT),
            default_size: Size::new(620, 460),
            preferred: vec![
                (ContentKey::Experience, Size::new(720, 540)),
                (ContentKey::Skills, Size::new(640, 500)),
                (ContentKey::Photography, Size::new(760, 540)),
                (ContentKey::Contact, Size::new(480, 320)),
                (ContentKey::Notepad, Size::new(560, 420)),
                (ContentKey::Calculator, Size::new(320, 420)),
                (ContentKey::Paint, Size::new(640, 480)),
            ],
        }
    }

    pub fn cells() -> Self {
        Self {
            margin: CELL_MARGIN,
            taskbar_height: CELL_TASKBAR_HEIGHT,
            cascade_step: CELL_CASCADE_STEP,
            cascade_slots: CASCADE_SLOTS,
            min_size: Size::new(CELL_MIN_WIDTH, CELL_MIN_HEIGHT),
            default_size: Size::new(64, 20),
            preferred: vec![
                (ContentKey::Experience, Size::new(76, 24)),
                (ContentKey::Projects, Size::new(72, 22)),
                (ContentKey::Contact, Size::new(48, 12)),
                (ContentKey::Notepad, Size::new(56, 18)),
                (ContentKey::Calculator, Size::new(28, 14)),
                (ContentKey::Paint, Size::new(60, 20)),
            ],
        }
    }

    /// Preferred size before any viewport bound is applied.
    pub fn preferred_size(&self, key: ContentKey) -> Size {
        self.preferred
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, size)| *size)
            .unwrap_or(self.default_size)
    }

    pub fn set_preferred_size(&mut self, key: ContentKey, size: Size) {
        if let Some(slot) = self.preferred.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = size;
        } else {
            self.preferred.push((key, size));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_keys_use_default_size() {
        let config = DesktopConfig::pixels();
        assert_eq!(config.preferred_size(ContentKey::Projects), Size::new(620, 460));
        assert_eq!(config.preferred_size(ContentKey::Calculator), Size::new(320, 420));
    }

    #[test]
    fn preferred_size_can_be_overridden() {
        let mut config = DesktopConfig::cells();
        config.set_preferred_size(ContentKey::Summary, Size::new(40, 10));
        assert_eq!(config.preferred_size(ContentKey::Summary), Size::new(40, 10));
    }
}
