//! Inline markdown (`**bold**`, `_emphasis_`, `` `code` ``) to styled spans.

use pulldown_cmark::{Event as MdEvent, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

/// Render one paragraph of inline markdown. Block structure is ignored: list
/// markers, headings and breaks collapse into a single run of text.
pub fn inline_spans(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let style_for = |bold: usize, italic: usize| {
        let mut style = base;
        if bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    };
    for event in Parser::new(text) {
        match event {
            MdEvent::Start(Tag::Strong) => bold += 1,
            MdEvent::End(TagEnd::Strong) => bold = bold.saturating_sub(1),
            MdEvent::Start(Tag::Emphasis) => italic += 1,
            MdEvent::End(TagEnd::Emphasis) => italic = italic.saturating_sub(1),
            MdEvent::Text(value) => {
                spans.push(Span::styled(value.into_string(), style_for(bold, italic)));
            }
            MdEvent::Code(value) => {
                let style = style_for(bold, italic).add_modifier(Modifier::REVERSED);
                spans.push(Span::styled(value.into_string(), style));
            }
            MdEvent::SoftBreak | MdEvent::HardBreak => {
                spans.push(Span::styled(" ", base));
            }
            _ => {}
        }
    }
    spans
}
