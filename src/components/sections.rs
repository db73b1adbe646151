//! One renderer per resume section, turning the document into styled lines.
//!
//! Renderers never fail: anything missing becomes a placeholder.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use resume_markup::ContentNode;

use crate::components::markdown::inline_spans;
use crate::content_key::{ContentKey, format_title};

pub const MISSING: &str = "—";
pub const NO_ENTRIES: &str = "(no entries)";
pub const NOT_IMPLEMENTED: &str = "This section is not yet implemented.";
pub const GALLERY_DISABLED: &str = "Photography gallery disabled.";
const MAX_LEVEL: usize = 5;

type Lines = Vec<Line<'static>>;

pub fn render_section(key: ContentKey, doc: &ContentNode) -> Lines {
    let node = doc.get(key.name());
    match key {
        ContentKey::PersonalInfo => personal_info(node, doc),
        ContentKey::Contact => contact(node),
        ContentKey::Summary => summary(node),
        ContentKey::Highlights | ContentKey::Interests => bullets(node),
        ContentKey::Experience => experience(node),
        ContentKey::Projects => projects(node),
        ContentKey::Skills => skills(node),
        ContentKey::Education => education(node),
        ContentKey::Publications => publications(node),
        ContentKey::Photography => photography(node),
        ContentKey::Notepad | ContentKey::Calculator | ContentKey::Paint => {
            vec![Line::from(NOT_IMPLEMENTED)]
        }
    }
}

/// `mailto:` for email, `tel:` without whitespace for phone, the raw value
/// otherwise.
pub fn contact_link(label: &str, value: &str) -> String {
    match label {
        "email" => format!("mailto:{value}"),
        "phone" => {
            let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
            format!("tel:{digits}")
        }
        _ => value.to_string(),
    }
}

/// `level` filled stars followed by empty ones, out of five.
pub fn proficiency(level: usize) -> String {
    let level = level.min(MAX_LEVEL);
    format!("{}{}", "★".repeat(level), "☆".repeat(MAX_LEVEL - level))
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default()
            .fg(crate::theme::heading_fg())
            .add_modifier(Modifier::BOLD),
    ))
}

fn muted(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(crate::theme::muted_fg()),
    ))
}

fn link(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default()
            .fg(crate::theme::link_fg())
            .add_modifier(Modifier::UNDERLINED),
    ))
}

fn labeled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn bullet(text: impl Into<String>) -> Line<'static> {
    Line::from(format!("  • {}", text.into()))
}

fn scalar(node: Option<&ContentNode>, key: &str) -> String {
    node.and_then(|n| n.get(key))
        .and_then(ContentNode::text)
        .unwrap_or_else(|| MISSING.to_string())
}

fn optional(node: Option<&ContentNode>, key: &str) -> Option<String> {
    node.and_then(|n| n.get(key)).and_then(ContentNode::text)
}

fn items(node: Option<&ContentNode>) -> &[ContentNode] {
    node.and_then(ContentNode::as_sequence).unwrap_or(&[])
}

fn list_of(node: Option<&ContentNode>, key: &str) -> Vec<String> {
    node.and_then(|n| n.get(key))
        .map(ContentNode::string_items)
        .unwrap_or_default()
}

fn bullets(node: Option<&ContentNode>) -> Lines {
    let entries = node.map(ContentNode::string_items).unwrap_or_default();
    if entries.is_empty() {
        return vec![muted(NO_ENTRIES)];
    }
    entries.into_iter().map(bullet).collect()
}

fn contact_lines(node: Option<&ContentNode>) -> Lines {
    let Some(mapping) = node.and_then(ContentNode::as_mapping) else {
        return vec![muted(NO_ENTRIES)];
    };
    if mapping.is_empty() {
        return vec![muted(NO_ENTRIES)];
    }
    mapping
        .iter()
        .map(|(label, value)| {
            let value = value.text().unwrap_or_else(|| MISSING.to_string());
            Line::from(vec![
                Span::raw("  • "),
                Span::styled(
                    format!("{}: ", format_title(label)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(value, Style::default().fg(crate::theme::link_fg())),
            ])
        })
        .collect()
}

fn personal_info(node: Option<&ContentNode>, doc: &ContentNode) -> Lines {
    let mut lines = Vec::new();
    match optional(node, "avatar") {
        Some(avatar) => lines.push(muted(format!("[avatar: {avatar}]"))),
        None => lines.push(muted("[ ☺ no avatar ]")),
    }
    lines.push(Line::from(Span::styled(
        scalar(node, "name"),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(scalar(node, "title")));
    lines.push(muted(scalar(node, "location")));

    if let Some(highlights) = doc.get("highlights").and_then(ContentNode::as_sequence) {
        lines.push(Line::default());
        lines.push(heading("Highlights"));
        lines.extend(highlights.iter().filter_map(ContentNode::text).map(bullet));
    }
    if doc.get("contact").is_some() {
        lines.push(Line::default());
        lines.push(heading("Contact"));
        lines.extend(contact_lines(doc.get("contact")));
    }
    lines
}

fn contact(node: Option<&ContentNode>) -> Lines {
    contact_lines(node)
}

fn summary(node: Option<&ContentNode>) -> Lines {
    let paragraphs = node.map(ContentNode::string_items).unwrap_or_default();
    if paragraphs.is_empty() {
        return vec![muted(NO_ENTRIES)];
    }
    let mut lines = Vec::new();
    for (idx, paragraph) in paragraphs.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(inline_spans(paragraph, Style::default())));
    }
    lines
}

fn experience(node: Option<&ContentNode>) -> Lines {
    let roles = items(node);
    if roles.is_empty() {
        return vec![muted(NO_ENTRIES)];
    }
    let mut lines = Vec::new();
    for (idx, role) in roles.iter().enumerate() {
        let role = Some(role);
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.push(heading(format!(
            "{} · {}",
            scalar(role, "company"),
            scalar(role, "role")
        )));
        let dates = format!(
            "{} – {}",
            optional(role, "start").unwrap_or_default(),
            optional(role, "end").unwrap_or_default()
        );
        let location = optional(role, "location").unwrap_or_default();
        lines.push(muted(format!("{location} · {}", dates.trim())));
        if let Some(url) = optional(role, "url") {
            lines.push(link(url));
        }
        if let Some(text) = optional(role, "summary") {
            lines.push(Line::from(text));
        }
        lines.extend(list_of(role, "achievements").into_iter().map(bullet));
        let stack = list_of(role, "stack");
        if !stack.is_empty() {
            lines.push(labeled("Stack", stack.join(", ")));
        }
    }
    lines
}

fn projects(node: Option<&ContentNode>) -> Lines {
    let entries = items(node);
    if entries.is_empty() {
        return vec![muted(NO_ENTRIES)];
    }
    let mut lines = Vec::new();
    for (idx, project) in entries.iter().enumerate() {
        let project = Some(project);
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.push(heading(scalar(project, "name")));
        lines.push(Line::from(scalar(project, "description")));
        lines.push(labeled("Tags", list_of(project, "tags").join(", ")));
        for entry in items(project.and_then(|p| p.get("links"))) {
            let entry = Some(entry);
            lines.push(Line::from(vec![
                Span::raw("  ↗ "),
                Span::styled(
                    scalar(entry, "label"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    scalar(entry, "url"),
                    Style::default().fg(crate::theme::link_fg()),
                ),
            ]));
        }
    }
    lines
}

fn skills(node: Option<&ContentNode>) -> Lines {
    let Some(groups) = node.and_then(ContentNode::as_mapping) else {
        return vec![muted(NO_ENTRIES)];
    };
    if groups.is_empty() {
        return vec![muted(NO_ENTRIES)];
    }
    let mut lines = Vec::new();
    for (idx, (group, entries)) in groups.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.push(heading(format_title(group)));
        for skill in entries.as_sequence().unwrap_or(&[]) {
            let skill = Some(skill);
            let level = skill
                .and_then(|s| s.get("level"))
                .and_then(ContentNode::as_f64)
                .map(|level| level.max(0.0) as usize)
                .unwrap_or(0);
            lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::styled(
                    scalar(skill, "name"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    " – {} (",
                    optional(skill, "proficiency").unwrap_or_default()
                )),
                Span::styled(
                    proficiency(level),
                    Style::default().fg(crate::theme::star_fg()),
                ),
                Span::raw(")"),
            ]));
        }
    }
    lines
}

fn education(node: Option<&ContentNode>) -> Lines {
    let entries = items(node);
    if entries.is_empty() {
        return vec![muted(NO_ENTRIES)];
    }
    let mut lines = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        let entry = Some(entry);
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.push(heading(format!(
            "{} · {}",
            scalar(entry, "degree"),
            scalar(entry, "institution")
        )));
        lines.push(muted(format!(
            "{} · {} – {}",
            optional(entry, "location").unwrap_or_default(),
            optional(entry, "start").unwrap_or_default(),
            optional(entry, "end").unwrap_or_default()
        )));
        if let Some(url) = optional(entry, "url") {
            lines.push(link(url));
        }
        lines.extend(list_of(entry, "details").into_iter().map(bullet));
        let honors = list_of(entry, "honors");
        if !honors.is_empty() {
            lines.push(labeled("Honors", honors.join(", ")));
        }
    }
    lines
}

fn publications(node: Option<&ContentNode>) -> Lines {
    let entries = items(node);
    if entries.is_empty() {
        return vec![muted(NO_ENTRIES)];
    }
    let mut lines = Vec::new();
    for (idx, publication) in entries.iter().enumerate() {
        let publication = Some(publication);
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.push(heading(format!(
            "{} ({})",
            scalar(publication, "title"),
            scalar(publication, "year")
        )));
        lines.push(Line::from(vec![
            Span::styled(
                scalar(publication, "venue"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " – {}",
                optional(publication, "status").unwrap_or_default()
            )),
        ]));
        lines.push(Line::from(format!(
            "Authors: {}",
            list_of(publication, "authors").join(", ")
        )));
        if let Some(url) = optional(publication, "link") {
            lines.push(link(format!("View publication: {url}")));
        }
        if let Some(note) = optional(publication, "note") {
            lines.push(Line::from(Span::styled(
                note,
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
    }
    lines
}

fn photography(node: Option<&ContentNode>) -> Lines {
    let enabled = node
        .and_then(|n| n.get("enabled"))
        .and_then(ContentNode::as_bool)
        .unwrap_or(false);
    if !enabled {
        return vec![muted(GALLERY_DISABLED)];
    }
    let mut lines = vec![Line::from(
        optional(node, "description").unwrap_or_default(),
    )];
    let gallery = items(node.and_then(|n| n.get("gallery")));
    if gallery.is_empty() {
        lines.push(muted(NO_ENTRIES));
    }
    for item in gallery {
        let item = Some(item);
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            optional(item, "caption").unwrap_or_default(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            optional(item, "location").unwrap_or_default(),
            Style::default().fg(crate::theme::link_fg()),
        )));
        lines.push(muted(format!(
            "◉ {}",
            optional(item, "alt").unwrap_or_else(|| scalar(item, "src"))
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(key: ContentKey, doc: &str) -> String {
        text(&render_section(key, &resume_markup::parse(doc)))
    }

    #[test]
    fn personal_info_with_only_a_name_uses_placeholders() {
        let out = render(
            ContentKey::PersonalInfo,
            indoc! {"
                personal_info:
                  name: Alice
            "},
        );
        assert!(out.contains("no avatar"));
        assert!(out.contains("Alice"));
        assert_eq!(out.matches(MISSING).count(), 2);
        assert!(!out.contains("Highlights"));
    }

    #[test]
    fn personal_info_pulls_highlights_and_contact() {
        let out = render(
            ContentKey::PersonalInfo,
            indoc! {"
                personal_info:
                  name: Alice
                  avatar: images/alice.jpg
                highlights:
                  - Shipped things
                contact:
                  email: alice@example.com
            "},
        );
        assert!(out.contains("[avatar: images/alice.jpg]"));
        assert!(out.contains("• Shipped things"));
        assert!(out.contains("Email: alice@example.com"));
    }

    #[test]
    fn missing_lists_render_no_entries() {
        for key in [
            ContentKey::Experience,
            ContentKey::Projects,
            ContentKey::Education,
            ContentKey::Publications,
            ContentKey::Interests,
            ContentKey::Highlights,
            ContentKey::Skills,
            ContentKey::Contact,
            ContentKey::Summary,
        ] {
            assert_eq!(render(key, "other: 1"), NO_ENTRIES, "{key}");
        }
    }

    #[test]
    fn experience_lists_roles() {
        let out = render(
            ContentKey::Experience,
            indoc! {"
                experience:
                  - company: Acme
                    role: Engineer
                    start: 2020
                    end: Present
                    location: Remote
                    achievements:
                      - Built the thing
                    stack:
                      - Rust
                      - SQL
            "},
        );
        assert!(out.contains("Acme · Engineer"));
        assert!(out.contains("Remote · 2020 – Present"));
        assert!(out.contains("• Built the thing"));
        assert!(out.contains("Stack: Rust, SQL"));
    }

    #[test]
    fn skills_show_stars() {
        let out = render(
            ContentKey::Skills,
            indoc! {"
                skills:
                  programming_languages:
                    - name: Rust
                      proficiency: Expert
                      level: 4
            "},
        );
        assert!(out.contains("Programming Languages"));
        assert!(out.contains("Rust – Expert (★★★★☆)"));
    }

    #[test]
    fn photography_is_disabled_unless_enabled() {
        assert_eq!(
            render(ContentKey::Photography, "photography:\n  enabled: false"),
            GALLERY_DISABLED
        );
        assert_eq!(render(ContentKey::Photography, "x: 1"), GALLERY_DISABLED);
        let out = render(
            ContentKey::Photography,
            indoc! {"
                photography:
                  enabled: true
                  description: Street shots
                  gallery:
                    - src: a.jpg
                      caption: Dusk
            "},
        );
        assert!(out.starts_with("Street shots"));
        assert!(out.contains("Dusk"));
        assert!(out.contains("◉ a.jpg"));
    }

    #[test]
    fn summary_strips_markup() {
        let out = render(
            ContentKey::Summary,
            "summary:\n  - I build **reliable** systems\n  - Second",
        );
        assert_eq!(out, "I build reliable systems\n\nSecond");
    }

    #[test]
    fn apps_fall_back_to_not_implemented() {
        assert_eq!(render(ContentKey::Paint, ""), NOT_IMPLEMENTED);
    }

    #[test]
    fn contact_links_and_stars() {
        assert_eq!(contact_link("email", "a@b.c"), "mailto:a@b.c");
        assert_eq!(contact_link("phone", "+1 555 0100"), "tel:+15550100");
        assert_eq!(
            contact_link("github", "https://github.com/a"),
            "https://github.com/a"
        );
        assert_eq!(proficiency(0), "☆☆☆☆☆");
        assert_eq!(proficiency(9), "★★★★★");
    }
}
