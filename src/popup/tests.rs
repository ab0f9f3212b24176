//! Tests for the suggestion popup.

use super::*;
use crate::capture::CaptureSlot;
use crate::field::{InputField, TextField};
use crate::observer::{EventKind, PopupEvent};
use crate::provider::{ProviderError, RequestTicket, SuggestionProvider, SuggestionsMsg};
use crate::suggestion::Suggestion;
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use lipgloss_extras::prelude::Style;
use std::sync::{Arc, Mutex};

/// Provider that records requests and lets the test answer them.
#[derive(Debug, Default)]
struct Scripted {
    requests: Vec<(String, RequestTicket)>,
    cancelled: Vec<RequestTicket>,
}

impl SuggestionProvider for Scripted {
    fn request(&mut self, query: &str, ticket: RequestTicket) -> Option<Cmd> {
        self.requests.push((query.to_string(), ticket));
        None
    }

    fn cancel(&mut self, ticket: RequestTicket) {
        self.cancelled.push(ticket);
    }
}

type Popup = Model<Scripted, TextField>;

fn popup() -> Popup {
    let mut p = Model::new(Scripted::default(), TextField::new());
    let _ = p.focus();
    p
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn type_str(p: &mut Popup, text: &str) {
    for c in text.chars() {
        let _ = p.update(key(KeyCode::Char(c)));
    }
}

fn last_ticket(p: &Popup) -> RequestTicket {
    p.provider().requests.last().expect("a request").1
}

fn respond(p: &mut Popup, titles: &[&str]) {
    let ticket = last_ticket(p);
    let items = titles.iter().map(|t| Suggestion::new(*t)).collect();
    let _ = p.update(Box::new(SuggestionsMsg::ready(ticket, items)));
}

fn record(p: &mut Popup, kinds: &[EventKind]) -> Arc<Mutex<Vec<PopupEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    for kind in kinds {
        let sink = Arc::clone(&log);
        p.subscribe(*kind, move |event| sink.lock().unwrap().push(event.clone()));
    }
    log
}

fn cities(p: &mut Popup) {
    type_str(p, "par");
    respond(p, &["Paris", "Park City"]);
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Msg {
    Box::new(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn test_new_is_hidden() {
    let p = Model::new(Scripted::default(), TextField::new());
    assert_eq!(p.phase(), Phase::Hidden);
    assert!(!p.is_visible());
    assert!(p.list().is_empty());
    assert!(p.in_flight().is_none());
    assert_eq!(p.max_rows, DEFAULT_MAX_ROWS);
}

#[test]
fn test_options_apply() {
    let p = new(
        Scripted::default(),
        TextField::new(),
        &[with_max_rows(3), with_min_width(40)],
    );
    assert_eq!(p.max_rows, 3);
    assert_eq!(p.min_width, 40);
}

#[test]
fn test_typing_starts_loading_and_shows_once() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Show]);

    type_str(&mut p, "pa");
    assert_eq!(p.phase(), Phase::Loading);
    assert_eq!(p.query(), "pa");
    assert_eq!(p.provider().requests.len(), 2);
    assert_eq!(p.in_flight(), Some(last_ticket(&p)));

    respond(&mut p, &["Paris"]);
    assert_eq!(p.phase(), Phase::Shown);
    assert_eq!(p.list().len(), 1);
    assert!(p.in_flight().is_none());
    assert_eq!(events.lock().unwrap().as_slice(), &[PopupEvent::Show]);
}

#[test]
fn test_requery_while_shown_does_not_show_again() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Show, EventKind::Hide]);
    cities(&mut p);

    type_str(&mut p, "k");
    assert_eq!(p.phase(), Phase::Loading);
    respond(&mut p, &["Park City"]);
    assert_eq!(p.phase(), Phase::Shown);

    assert_eq!(events.lock().unwrap().as_slice(), &[PopupEvent::Show]);
}

#[test]
fn test_new_query_cancels_previous_request() {
    let mut p = popup();
    type_str(&mut p, "a");
    let first = last_ticket(&p);
    type_str(&mut p, "b");
    let second = last_ticket(&p);

    assert_ne!(first, second);
    assert_eq!(p.provider().cancelled, vec![first]);
    assert_eq!(p.provider().requests[1].0, "ab");
}

#[test]
fn test_stale_response_is_discarded() {
    let mut p = popup();
    type_str(&mut p, "a");
    let stale = last_ticket(&p);
    type_str(&mut p, "b");

    let _ = p.update(Box::new(SuggestionsMsg::ready(
        stale,
        vec![Suggestion::new("Amsterdam")],
    )));
    assert_eq!(p.phase(), Phase::Loading);
    assert!(p.list().is_empty());

    respond(&mut p, &["Abu Dhabi"]);
    assert_eq!(p.phase(), Phase::Shown);
    assert_eq!(p.list().items()[0].title, "Abu Dhabi");

    // a late answer for the first query still changes nothing
    let _ = p.update(Box::new(SuggestionsMsg::ready(
        stale,
        vec![Suggestion::new("Amsterdam")],
    )));
    assert_eq!(p.list().items()[0].title, "Abu Dhabi");
}

#[test]
fn test_results_for_other_popup_ignored() {
    let mut p = popup();
    type_str(&mut p, "a");
    let mut foreign = last_ticket(&p);
    foreign.popup_id += 1000;
    let _ = p.update(Box::new(SuggestionsMsg::ready(
        foreign,
        vec![Suggestion::new("Accra")],
    )));
    assert_eq!(p.phase(), Phase::Loading);
    assert!(p.in_flight().is_some());
}

#[test]
fn test_empty_results_hide() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Show, EventKind::Hide]);
    type_str(&mut p, "zz");
    respond(&mut p, &[]);
    assert_eq!(p.phase(), Phase::Hidden);
    assert_eq!(
        events.lock().unwrap().as_slice(),
        &[PopupEvent::Show, PopupEvent::Hide]
    );
}

#[test]
fn test_provider_failure_hides() {
    let mut p = popup();
    type_str(&mut p, "x");
    let ticket = last_ticket(&p);
    let _ = p.update(Box::new(SuggestionsMsg::failed(
        ticket,
        ProviderError::Failed("offline".into()),
    )));
    assert_eq!(p.phase(), Phase::Hidden);
    assert_eq!(p.field().value(), "x");
}

#[test]
fn test_empty_query_hides_from_any_phase() {
    let mut p = popup();
    type_str(&mut p, "p");
    assert_eq!(p.phase(), Phase::Loading);
    let loading = last_ticket(&p);
    let _ = p.update(key(KeyCode::Backspace));
    assert_eq!(p.phase(), Phase::Hidden);
    assert!(p.provider().cancelled.contains(&loading));

    type_str(&mut p, "p");
    respond(&mut p, &["Prague"]);
    assert_eq!(p.phase(), Phase::Shown);
    let _ = p.update(key(KeyCode::Backspace));
    assert_eq!(p.phase(), Phase::Hidden);
    assert!(p.list().is_empty());
}

#[test]
fn test_highlight_without_prefix_selects_whole_title() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Highlight]);
    cities(&mut p);

    let _ = p.update(key(KeyCode::Down));
    let _ = p.update(key(KeyCode::Down));

    assert_eq!(p.highlighted().map(|s| s.title.as_str()), Some("Park City"));
    assert_eq!(p.field().value(), "Park City");
    assert_eq!(p.field().selection(), Some(0..9));
    // programmatic text never becomes a query
    assert_eq!(p.query(), "par");
    assert_eq!(p.provider().requests.len(), 3);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[1],
        PopupEvent::Highlight {
            query: "par".into(),
            suggestion: Some(Suggestion::new("Park City")),
        }
    );
}

#[test]
fn test_highlight_with_prefix_selects_remainder() {
    let mut p = popup();
    type_str(&mut p, "Par");
    respond(&mut p, &["Paris"]);
    let _ = p.update(key(KeyCode::Down));
    assert_eq!(p.field().value(), "Paris");
    assert_eq!(p.field().selection(), Some(3..5));
    assert_eq!(p.field().selected_text(), "is");
}

#[test]
fn test_typing_over_selection_refines_query() {
    let mut p = popup();
    type_str(&mut p, "Par");
    respond(&mut p, &["Paris", "Park City"]);
    let _ = p.update(key(KeyCode::Down));
    type_str(&mut p, "k");
    assert_eq!(p.field().value(), "Park");
    assert_eq!(p.query(), "Park");
    assert_eq!(p.phase(), Phase::Loading);
}

#[test]
fn test_previous_from_first_row_restores_query() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Highlight]);
    cities(&mut p);

    let _ = p.update(key(KeyCode::Down));
    let _ = p.update(key(KeyCode::Up));

    assert!(p.highlighted().is_none());
    assert_eq!(p.field().value(), "par");
    assert_eq!(p.field().position(), 3);
    assert!(p.field().selection().is_none());
    assert_eq!(
        events.lock().unwrap().last(),
        Some(&PopupEvent::Highlight {
            query: "par".into(),
            suggestion: None,
        })
    );

    // already deselected: nothing more happens
    let _ = p.update(key(KeyCode::Up));
    assert_eq!(events.lock().unwrap().len(), 2);
}

#[test]
fn test_next_at_last_row_is_idempotent() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Highlight]);
    cities(&mut p);
    for _ in 0..5 {
        let _ = p.update(key(KeyCode::Down));
    }
    assert_eq!(p.list().highlighted_index(), Some(1));
    assert_eq!(events.lock().unwrap().len(), 2);
}

#[test]
fn test_enter_without_highlight_hides_without_select() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Select, EventKind::Hide]);
    cities(&mut p);

    assert!(p.would_consume(&key(KeyCode::Enter)));
    let _ = p.update(key(KeyCode::Enter));

    assert_eq!(p.phase(), Phase::Hidden);
    assert_eq!(events.lock().unwrap().as_slice(), &[PopupEvent::Hide]);
    assert_eq!(p.field().value(), "par");
}

#[test]
fn test_enter_with_highlight_selects_once_then_hides() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Select, EventKind::Hide]);
    cities(&mut p);

    let _ = p.update(key(KeyCode::Down));
    let _ = p.update(key(KeyCode::Enter));
    let _ = p.update(key(KeyCode::Enter));

    assert_eq!(p.phase(), Phase::Hidden);
    assert_eq!(
        events.lock().unwrap().as_slice(),
        &[
            PopupEvent::Select {
                query: "par".into(),
                suggestion: Suggestion::new("Paris"),
            },
            PopupEvent::Hide,
        ]
    );
    assert_eq!(p.field().value(), "Paris");
    assert_eq!(p.field().position(), 5);
    // committing writes the title without issuing a new query
    assert_eq!(p.provider().requests.len(), 3);
}

#[test]
fn test_tab_hides_without_consuming() {
    let mut p = popup();
    cities(&mut p);
    assert!(!p.would_consume(&key(KeyCode::Tab)));
    let _ = p.update(key(KeyCode::Tab));
    assert_eq!(p.phase(), Phase::Hidden);
}

#[test]
fn test_keys_only_captured_while_shown() {
    let mut p = popup();
    assert!(!p.would_consume(&key(KeyCode::Down)));
    type_str(&mut p, "p");
    assert!(!p.would_consume(&key(KeyCode::Down)));
    let _ = p.update(key(KeyCode::Down));
    assert!(p.highlighted().is_none());

    respond(&mut p, &["Prague"]);
    assert!(p.would_consume(&key(KeyCode::Down)));
    assert!(!p.would_consume(&key(KeyCode::Char('x'))));
}

#[test]
fn test_key_release_does_not_step() {
    let mut p = popup();
    cities(&mut p);

    let press = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
    let release = KeyEvent::new_with_kind(KeyCode::Down, KeyModifiers::NONE, KeyEventKind::Release);
    let _ = p.update(Box::new(press));
    let _ = p.update(Box::new(release));
    assert_eq!(p.list().highlighted_index(), Some(0));
    let _ = p.update(Box::new(press));
    assert_eq!(p.list().highlighted_index(), Some(1));
}

#[test]
fn test_focus_lost_hides_and_cancels() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::FocusLost, EventKind::Hide]);
    type_str(&mut p, "pa");
    let pending = last_ticket(&p);

    p.blur();

    assert_eq!(p.phase(), Phase::Hidden);
    assert!(p.in_flight().is_none());
    assert!(p.provider().cancelled.contains(&pending));
    assert_eq!(
        events.lock().unwrap().as_slice(),
        &[PopupEvent::FocusLost, PopupEvent::Hide]
    );

    // repeated blur is absorbed
    p.blur();
    assert_eq!(events.lock().unwrap().len(), 2);
}

#[test]
fn test_focus_lost_clears_shown_list() {
    let mut p = popup();
    cities(&mut p);
    p.blur();
    assert_eq!(p.phase(), Phase::Hidden);
    assert!(p.list().is_empty());
    assert!(!p.has_capture());
}

#[test]
fn test_focus_gained_with_text_requests_again() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::FocusGained]);
    cities(&mut p);
    p.blur();

    let _ = p.focus();
    assert_eq!(p.phase(), Phase::Loading);
    assert_eq!(p.provider().requests.last().map(|r| r.0.as_str()), Some("par"));
    assert_eq!(events.lock().unwrap().as_slice(), &[PopupEvent::FocusGained]);

    // a second focus call does not issue another request
    let requests = p.provider().requests.len();
    let _ = p.focus();
    assert_eq!(p.provider().requests.len(), requests);
}

#[test]
fn test_focus_gained_with_empty_text_stays_hidden() {
    let mut p = Model::new(Scripted::default(), TextField::new());
    let _ = p.focus();
    assert_eq!(p.phase(), Phase::Hidden);
    assert!(p.provider().requests.is_empty());
}

#[test]
fn test_show_and_hide_are_reentrant() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Show, EventKind::Hide]);

    assert!(!p.hide());
    assert!(!p.show());

    p.set_suggestions(vec![Suggestion::new("Oslo")]);
    assert_eq!(p.phase(), Phase::Hidden);
    assert!(p.show());
    assert!(!p.show());
    assert!(p.hide());
    assert!(!p.hide());

    assert_eq!(
        events.lock().unwrap().as_slice(),
        &[PopupEvent::Show, PopupEvent::Hide]
    );
}

#[test]
fn test_set_suggestions_ends_loading() {
    let mut p = popup();
    type_str(&mut p, "o");
    p.set_suggestions(vec![Suggestion::new("Oslo")]);
    assert_eq!(p.phase(), Phase::Shown);
    assert!(p.in_flight().is_none());

    p.set_suggestions(Vec::new());
    assert_eq!(p.phase(), Phase::Hidden);
}

#[test]
fn test_popup_area_below_anchor() {
    let mut p = popup();
    p.min_width = 30;
    p.set_anchor(Rect::new(4, 2, 20, 1));
    assert!(p.popup_area().is_none());

    type_str(&mut p, "par");
    assert_eq!(p.popup_area(), Some(Rect::new(4, 3, 30, 1)));
    respond(&mut p, &["Paris", "Park City"]);
    assert_eq!(p.popup_area(), Some(Rect::new(4, 3, 30, 2)));
}

#[test]
fn test_pointer_hover_and_click() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Select]);
    p.set_anchor(Rect::new(0, 0, 20, 1));
    cities(&mut p);

    let _ = p.update(mouse(MouseEventKind::Moved, 3, 2));
    assert_eq!(p.highlighted().map(|s| s.title.as_str()), Some("Park City"));
    assert_eq!(p.field().value(), "Park City");

    let _ = p.update(mouse(MouseEventKind::Down(MouseButton::Left), 3, 1));
    assert_eq!(p.phase(), Phase::Hidden);
    assert_eq!(
        events.lock().unwrap().as_slice(),
        &[PopupEvent::Select {
            query: "par".into(),
            suggestion: Suggestion::new("Paris"),
        }]
    );
    assert_eq!(p.field().value(), "Paris");
}

#[test]
fn test_pointer_leaving_rows_restores_query() {
    let mut p = popup();
    let events = record(&mut p, &[EventKind::Highlight]);
    p.set_anchor(Rect::new(0, 0, 20, 1));
    cities(&mut p);

    let _ = p.update(mouse(MouseEventKind::Moved, 3, 2));
    assert_eq!(p.field().value(), "Park City");

    let _ = p.update(mouse(MouseEventKind::Moved, 50, 10));
    assert!(p.highlighted().is_none());
    assert_eq!(p.phase(), Phase::Shown);
    assert_eq!(p.field().value(), "par");
    assert_eq!(p.field().position(), 3);
    assert!(p.field().selection().is_none());
    assert_eq!(
        events.lock().unwrap().last(),
        Some(&PopupEvent::Highlight {
            query: "par".into(),
            suggestion: None,
        })
    );

    // further motion off the rows stays quiet
    let _ = p.update(mouse(MouseEventKind::Moved, 0, 0));
    assert_eq!(events.lock().unwrap().len(), 2);
    assert_eq!(p.provider().requests.len(), 3);
}

#[test]
fn test_pointer_press_outside_dismisses() {
    let mut p = popup();
    p.set_anchor(Rect::new(0, 0, 20, 1));
    cities(&mut p);

    let _ = p.update(mouse(MouseEventKind::Down(MouseButton::Left), 5, 0));
    assert_eq!(p.phase(), Phase::Shown);

    let _ = p.update(mouse(MouseEventKind::Down(MouseButton::Right), 50, 10));
    assert_eq!(p.phase(), Phase::Hidden);
}

#[test]
fn test_capture_is_exclusive_between_popups() {
    let slot = CaptureSlot::new();
    let mut first = popup().with_capture_slot(slot.clone());
    let mut second = popup().with_capture_slot(slot.clone());

    cities(&mut first);
    assert!(first.has_capture());
    assert!(slot.is_held());

    cities(&mut second);
    assert_eq!(second.phase(), Phase::Shown);
    assert!(!second.has_capture());
    assert!(!second.would_consume(&key(KeyCode::Down)));

    first.hide();
    assert!(!slot.is_held());
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let mut p = popup();
    let log = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&log);
    let id = p.subscribe(EventKind::Show, move |_| *sink.lock().unwrap() += 1);

    type_str(&mut p, "a");
    assert!(p.unsubscribe(id));
    p.hide();
    type_str(&mut p, "b");
    assert_eq!(*log.lock().unwrap(), 1);
}

#[test]
fn test_scrolls_with_highlight() {
    let mut p = popup().with_max_rows(2);
    type_str(&mut p, "a");
    respond(&mut p, &["Aa", "Ab", "Ac", "Ad"]);
    for _ in 0..3 {
        let _ = p.update(key(KeyCode::Down));
    }
    assert_eq!(p.list().offset(), 1);
    let rows = strip_ansi_escapes::strip_str(p.popup_view());
    assert_eq!(rows, "Ab\nAc");
}

#[test]
fn test_view_phases() {
    let mut p = popup();
    assert_eq!(p.popup_view(), "");

    type_str(&mut p, "par");
    let loading = strip_ansi_escapes::strip_str(p.popup_view());
    assert!(loading.ends_with("Searching…"));

    respond(&mut p, &["Paris", "Park City"]);
    let shown = strip_ansi_escapes::strip_str(p.view());
    let lines: Vec<&str> = shown.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "Paris");
    assert_eq!(lines[2], "Park City");
}

#[test]
fn test_loading_frame_styled_once() {
    let mut p = popup();
    p.styles.busy = Style::new().bold(true);
    p.busy.style = Style::new().italic(true);
    type_str(&mut p, "par");

    let expected = format!(
        "{} {}",
        p.styles.busy.render(p.busy.frame()),
        p.styles.loading_text
    );
    assert_eq!(p.busy.frame(), "⠋");
    assert_eq!(p.popup_view(), expected);
}
