use crossterm::event::Event;
use ratatui::layout::Rect;
use resume_markup::ContentNode;

use crate::content_key::ContentKey;
use crate::ui::UiFrame;

pub mod calculator;
pub mod markdown;
pub mod notepad;
pub mod paint;
pub mod section_view;
pub mod sections;

pub use calculator::Calculator;
pub use notepad::Notepad;
pub use paint::Paint;
pub use section_view::{ScrollState, SectionView};

pub use crate::component_context::ComponentContext;

pub trait Component {
    fn resize(&mut self, _area: Rect, _ctx: &ComponentContext) {}

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    /// Returns `true` when the event was consumed.
    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}

/// Content fragment attached to a window when it is created.
#[derive(Debug)]
pub enum WindowContent {
    Section(SectionView),
    Notepad(Notepad),
    Calculator(Calculator),
    Paint(Paint),
}

impl WindowContent {
    /// Build the fragment for `key` from the current document.
    pub fn build(doc: &ContentNode, key: ContentKey) -> Self {
        match key {
            ContentKey::Notepad => WindowContent::Notepad(Notepad::new()),
            ContentKey::Calculator => WindowContent::Calculator(Calculator::new()),
            ContentKey::Paint => WindowContent::Paint(Paint::new()),
            section => WindowContent::Section(SectionView::new(sections::render_section(
                section, doc,
            ))),
        }
    }

    fn component(&mut self) -> &mut dyn Component {
        match self {
            WindowContent::Section(view) => view,
            WindowContent::Notepad(pad) => pad,
            WindowContent::Calculator(calc) => calc,
            WindowContent::Paint(paint) => paint,
        }
    }

    pub fn as_section(&self) -> Option<&SectionView> {
        match self {
            WindowContent::Section(view) => Some(view),
            _ => None,
        }
    }
}

impl Component for WindowContent {
    fn resize(&mut self, area: Rect, ctx: &ComponentContext) {
        self.component().resize(area, ctx);
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.component().render(frame, area, ctx);
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        self.component().handle_event(event, ctx)
    }
}
