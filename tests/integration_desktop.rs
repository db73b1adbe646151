use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use resume_desk::layout::{Viewport, WindowRect};
use resume_desk::screens;
use resume_desk::state::Phase;
use resume_desk::ui::UiFrame;
use resume_desk::window::PointerId;
use resume_desk::{ContentKey, Desktop};

const DOC: &str = "personal_info:\n  name: Alice\ncontact:\n  email: a@b.c\nskills:\n  - name: Rust\n    level: 4\n";
const WIDTH: u16 = 100;
const HEIGHT: u16 = 30;

static OPENED_LINKS: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn record_link(url: &str) -> std::io::Result<()> {
    OPENED_LINKS.lock().unwrap().push(url.to_string());
    Ok(())
}

fn desktop() -> Desktop {
    let mut desktop = Desktop::new(resume_markup::parse(DOC), Viewport::new(WIDTH, HEIGHT))
        .with_link_opener(|_| Ok(()));
    desktop.skip_login();
    desktop
}

fn draw(desktop: &mut Desktop) -> Buffer {
    let area = Rect::new(0, 0, WIDTH, HEIGHT);
    let mut buffer = Buffer::empty(area);
    {
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        desktop.render(&mut frame);
    }
    buffer
}

/// Position of the lowest occurrence of `needle` on screen.
fn find(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
    let chars: Vec<char> = needle.chars().collect();
    let area = buffer.area;
    (0..area.height).rev().find_map(|y| {
        (0..area.width).find_map(|x| {
            let hit = chars.iter().enumerate().all(|(i, ch)| {
                buffer
                    .cell((x + i as u16, y))
                    .is_some_and(|cell| cell.symbol() == ch.to_string())
            });
            hit.then_some((x, y))
        })
    })
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn click_at(desktop: &mut Desktop, column: u16, row: u16, now: Instant) {
    desktop.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), column, row), now);
    desktop.handle_event_at(&mouse(MouseEventKind::Up(MouseButton::Left), column, row), now);
}

fn rect(desktop: &Desktop, key: ContentKey) -> WindowRect {
    desktop
        .window_manager()
        .window(key)
        .map(|w| w.rect())
        .expect("window open")
}

fn icon_slot(desktop: &Desktop, key: ContentKey) -> Rect {
    let index = desktop
        .icons()
        .iter()
        .position(|icon| *icon == key)
        .expect("icon present");
    screens::icon_layout(Rect::new(0, 0, WIDTH, HEIGHT - 1), desktop.icons().len())[index]
}

#[test]
fn login_button_click_leads_to_desktop() {
    let mut d = Desktop::new(resume_markup::parse(DOC), Viewport::new(WIDTH, HEIGHT));
    let buffer = draw(&mut d);
    assert!(find(&buffer, "Alice").is_some());
    let (x, y) = find(&buffer, "Log in").expect("login button");
    let t0 = Instant::now();
    click_at(&mut d, x, y, t0);
    assert!(matches!(d.shell().phase(), Phase::Welcome { .. }));
    d.tick(t0 + Duration::from_secs(2));
    assert_eq!(d.shell().phase(), Phase::Desktop);
}

#[test]
fn double_click_on_icon_opens_its_window() {
    let mut d = desktop();
    draw(&mut d);
    let slot = icon_slot(&d, ContentKey::Skills);
    let t0 = Instant::now();

    click_at(&mut d, slot.x + 2, slot.y, t0);
    assert!(!d.window_manager().is_open(ContentKey::Skills));
    assert_eq!(d.shell().selected_icon(), Some(2));

    click_at(&mut d, slot.x + 2, slot.y, t0 + Duration::from_millis(200));
    assert_eq!(d.window_manager().active(), Some(ContentKey::Skills));
}

#[test]
fn slow_clicks_only_select() {
    let mut d = desktop();
    draw(&mut d);
    let slot = icon_slot(&d, ContentKey::Contact);
    let t0 = Instant::now();
    click_at(&mut d, slot.x, slot.y, t0);
    click_at(&mut d, slot.x, slot.y, t0 + Duration::from_millis(900));
    assert!(!d.window_manager().is_open(ContentKey::Contact));
    assert_eq!(d.shell().selected_icon(), Some(1));

    // Clicking bare desktop clears the selection.
    click_at(&mut d, 60, 25, t0 + Duration::from_secs(2));
    assert_eq!(d.shell().selected_icon(), None);
}

#[test]
fn title_bar_drag_moves_window() {
    let mut d = desktop();
    d.open_window(ContentKey::Skills);
    let start = rect(&d, ContentKey::Skills);
    let (x, y) = ((start.left + 4) as u16, start.top as u16);
    let now = Instant::now();

    d.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), x, y), now);
    assert!(d.window_manager().has_gesture(PointerId::MOUSE));
    d.handle_event_at(&mouse(MouseEventKind::Drag(MouseButton::Left), x + 5, y + 2), now);
    d.handle_event_at(&mouse(MouseEventKind::Up(MouseButton::Left), x + 5, y + 2), now);

    let moved = rect(&d, ContentKey::Skills);
    assert_eq!((moved.left, moved.top), (start.left + 5, start.top + 2));
    assert_eq!((moved.width, moved.height), (start.width, start.height));
    assert!(!d.window_manager().has_gesture(PointerId::MOUSE));
}

#[test]
fn double_click_on_title_bar_maximizes() {
    let mut d = desktop();
    d.open_window(ContentKey::Skills);
    let start = rect(&d, ContentKey::Skills);
    let (x, y) = ((start.left + 4) as u16, start.top as u16);
    let t0 = Instant::now();
    click_at(&mut d, x, y, t0);
    click_at(&mut d, x, y, t0 + Duration::from_millis(150));
    assert!(
        d.window_manager()
            .window(ContentKey::Skills)
            .is_some_and(|w| w.is_maximized())
    );
    assert_eq!(
        rect(&d, ContentKey::Skills),
        WindowRect::new(0, 0, WIDTH, HEIGHT - 1)
    );
}

#[test]
fn close_button_closes_window() {
    let mut d = desktop();
    d.open_window(ContentKey::Skills);
    let r = rect(&d, ContentKey::Skills);
    let close_x = (r.right() - 2) as u16;
    click_at(&mut d, close_x, r.top as u16, Instant::now());
    assert!(!d.window_manager().is_open(ContentKey::Skills));
    assert!(d.window_manager().session().taskbar().is_empty());
}

#[test]
fn focus_lost_cancels_drag() {
    let mut d = desktop();
    d.open_window(ContentKey::Skills);
    let start = rect(&d, ContentKey::Skills);
    let (x, y) = ((start.left + 4) as u16, start.top as u16);
    let now = Instant::now();
    d.handle_event_at(&mouse(MouseEventKind::Down(MouseButton::Left), x, y), now);
    d.handle_event_at(&mouse(MouseEventKind::Drag(MouseButton::Left), x + 3, y), now);
    d.handle_event_at(&Event::FocusLost, now);
    assert!(!d.window_manager().has_gesture(PointerId::MOUSE));
}

#[test]
fn taskbar_entry_minimizes_then_restores() {
    let mut d = desktop();
    d.open_window(ContentKey::Skills);
    let buffer = draw(&mut d);
    let (x, y) = find(&buffer, "Skills").expect("taskbar entry");
    assert_eq!(y, HEIGHT - 1);

    let now = Instant::now();
    click_at(&mut d, x, y, now);
    assert!(
        d.window_manager()
            .window(ContentKey::Skills)
            .is_some_and(|w| w.is_minimized())
    );
    assert_eq!(d.window_manager().active(), None);

    draw(&mut d);
    click_at(&mut d, x, y, now);
    assert_eq!(d.window_manager().active(), Some(ContentKey::Skills));
}

#[test]
fn start_menu_opens_programs_and_links() {
    let mut d = desktop().with_link_opener(record_link);
    draw(&mut d);
    let now = Instant::now();
    click_at(&mut d, 0, HEIGHT - 1, now);
    assert!(d.shell().start_menu_open());

    let buffer = draw(&mut d);
    let (x, y) = find(&buffer, "Email").expect("link entry");
    click_at(&mut d, x, y, now);
    assert!(!d.shell().start_menu_open());
    assert!(
        OPENED_LINKS
            .lock()
            .unwrap()
            .iter()
            .any(|url| url == "mailto:a@b.c")
    );

    click_at(&mut d, 0, HEIGHT - 1, now);
    let buffer = draw(&mut d);
    let (x, y) = find(&buffer, "Contact").expect("program entry");
    click_at(&mut d, x, y, now);
    assert_eq!(d.window_manager().active(), Some(ContentKey::Contact));
    assert!(!d.shell().start_menu_open());
}

#[test]
fn start_menu_log_off_returns_to_login() {
    let mut d = desktop();
    d.open_window(ContentKey::Notepad);
    draw(&mut d);
    let now = Instant::now();
    click_at(&mut d, 0, HEIGHT - 1, now);
    let buffer = draw(&mut d);
    let (x, y) = find(&buffer, "Log off").expect("log off entry");
    click_at(&mut d, x, y, now);
    assert_eq!(d.shell().phase(), Phase::Login);
    assert_eq!(d.window_manager().session().window_count(), 0);
}

#[test]
fn clicking_outside_the_start_menu_closes_it() {
    let mut d = desktop();
    draw(&mut d);
    let now = Instant::now();
    click_at(&mut d, 0, HEIGHT - 1, now);
    draw(&mut d);
    click_at(&mut d, 80, 5, now);
    assert!(!d.shell().start_menu_open());
}

#[test]
fn context_menu_refresh_rereads_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.yaml");
    std::fs::write(&path, DOC).unwrap();
    let doc = resume_markup::load_path(&path).unwrap();
    let mut d = Desktop::new(doc, Viewport::new(WIDTH, HEIGHT)).with_document_path(&path);
    d.skip_login();
    assert!(!d.icons().contains(&ContentKey::Projects));

    std::fs::write(&path, format!("{DOC}projects:\n  - name: Desk\n")).unwrap();
    draw(&mut d);
    d.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 60, 20));
    assert_eq!(d.shell().context_menu(), Some((60, 20)));

    let buffer = draw(&mut d);
    let (x, y) = find(&buffer, "Refresh").expect("context menu");
    click_at(&mut d, x, y, Instant::now());
    assert_eq!(d.shell().context_menu(), None);
    assert!(d.icons().contains(&ContentKey::Projects));
    assert!(d.document().get("projects").is_some());
}

#[test]
fn context_menu_properties_opens_personal_info() {
    let mut d = desktop();
    draw(&mut d);
    d.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 60, 20));
    let buffer = draw(&mut d);
    let (x, y) = find(&buffer, "Properties").expect("context menu");
    click_at(&mut d, x, y, Instant::now());
    assert_eq!(d.window_manager().active(), Some(ContentKey::PersonalInfo));
}

#[test]
fn terminal_resize_refits_windows() {
    let mut d = desktop();
    d.open_window(ContentKey::Skills);
    d.handle_event(&Event::Resize(50, 20));
    assert_eq!(d.window_manager().viewport(), Viewport::new(50, 20));
    let r = rect(&d, ContentKey::Skills);
    assert!(r.left >= 1 && r.top >= 1);
    assert!(r.right() <= 49);
    assert!(r.bottom() <= 18);
}

#[test]
fn rendered_window_shows_title_and_content() {
    let mut d = desktop();
    d.open_window(ContentKey::PersonalInfo);
    let buffer = draw(&mut d);
    assert!(find(&buffer, "About Me").is_some());
    assert!(find(&buffer, "Alice").is_some());
}
