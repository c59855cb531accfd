// Pointer-driven tests for the weekly calendar widget
// Clicks go through a headless egui context, so hit testing, expansion and
// dispatch run exactly as they do in a window.

mod fixtures;

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use egui::{Modifiers, PointerButton, Pos2, RawInput, Rect, Vec2};
use fixtures::{at, events::event};
use pretty_assertions::assert_eq;
use weekly_calendar::models::event::Event;
use weekly_calendar::models::settings::CalendarSettings;
use weekly_calendar::models::week::DayOfWeek;
use weekly_calendar::ui_egui::{BoxKey, CalendarState, WeeklyCalendar};

const FRAME_STEP: f64 = 0.05;
const ROW_HEIGHT: f32 = 48.0;

/// What the host saw when a click was dispatched.
#[derive(Debug, Clone, PartialEq)]
struct Dispatched {
    id: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    original: Option<(NaiveDateTime, NaiveDateTime)>,
}

struct CalendarHarness {
    ctx: egui::Context,
    state: CalendarState,
    events: Vec<Event>,
    allow: HashSet<String>,
    time: f64,
    calendar_id: Option<egui::Id>,
}

impl CalendarHarness {
    fn new(events: Vec<Event>) -> Self {
        let mut harness = Self {
            ctx: egui::Context::default(),
            state: CalendarState::new(),
            events,
            allow: HashSet::new(),
            time: 1.0,
            calendar_id: None,
        };
        harness.frame(Vec::new());
        harness
    }

    /// Run one frame; returns the click that reached the host, if any.
    fn frame(&mut self, input: Vec<egui::Event>) -> Option<Dispatched> {
        let raw = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(1400.0, 2400.0))),
            time: Some(self.time),
            events: input,
            ..Default::default()
        };
        self.time += FRAME_STEP;

        let events = &self.events;
        let allow = &self.allow;
        let state = &mut self.state;
        let calendar_id = &mut self.calendar_id;
        let mut dispatched = None;

        let _ = self.ctx.run(raw, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                *calendar_id = Some(ui.make_persistent_id("weekly_calendar"));
                let response = WeeklyCalendar::new(events)
                    .usa_calendar(true)
                    .current_date(NaiveDate::from_ymd_opt(2023, 1, 4).unwrap())
                    .filtered_event_ids(allow)
                    .show(ui, state);
                dispatched = response.clicked.map(|click| Dispatched {
                    id: click.event.id.clone(),
                    start: click.start,
                    end: click.end,
                    original: click.original,
                });
            });
        });

        dispatched
    }

    fn box_rect(&self, event_id: &str, day: DayOfWeek, row: usize) -> Option<Rect> {
        let id = self
            .calendar_id
            .expect("calendar has been shown")
            .with(&BoxKey::new(event_id, day, row));
        self.ctx.read_response(id).map(|response| response.rect)
    }

    fn press(&mut self, pos: Pos2) -> Option<Dispatched> {
        self.frame(vec![egui::Event::PointerMoved(pos), button(pos, true)])
    }

    fn click(&mut self, pos: Pos2) -> Option<Dispatched> {
        let on_press = self.press(pos);
        self.frame(vec![button(pos, false)]).or(on_press)
    }

    fn advance(&mut self, seconds: f64) {
        self.time += seconds;
        self.frame(Vec::new());
    }

    fn is_expanded(&self, event_id: &str, day: DayOfWeek, row: usize) -> bool {
        self.state
            .expansion()
            .is_expanded(&BoxKey::new(event_id, day, row))
    }
}

fn button(pos: Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::default(),
    }
}

/// Two bookings in the Monday 10:00 cell: "a" underneath, "b" stacked on top.
fn overlapping_pair() -> CalendarHarness {
    CalendarHarness::new(vec![
        event("a", at(2023, 1, 2, 10, 0), at(2023, 1, 2, 11, 0)),
        event("b", at(2023, 1, 2, 10, 15), at(2023, 1, 2, 10, 45)),
    ])
}

/// A point on the uncovered left strip of "a".
fn point_on_a(harness: &CalendarHarness) -> Pos2 {
    let rect = harness
        .box_rect("a", DayOfWeek::Monday, 10)
        .expect("box a is drawn");
    Pos2::new(rect.left() + 3.0, rect.center().y)
}

#[test]
fn test_first_click_expands_second_click_dispatches() {
    let mut harness = overlapping_pair();
    let on_a = point_on_a(&harness);

    assert_eq!(harness.click(on_a), None);
    assert!(harness.is_expanded("a", DayOfWeek::Monday, 10));

    let dispatched = harness.click(on_a).expect("second click reaches the host");
    assert_eq!(dispatched.id, "a");
    assert_eq!(dispatched.start, at(2023, 1, 2, 10, 0));
    assert_eq!(dispatched.original, None);
    assert!(harness.is_expanded("a", DayOfWeek::Monday, 10));
}

#[test]
fn test_expanded_box_spans_the_full_stack_width() {
    let mut harness = overlapping_pair();
    let collapsed_b = harness.box_rect("b", DayOfWeek::Monday, 10).unwrap();
    let on_a = point_on_a(&harness);

    harness.click(on_a);
    let expanded_a = harness.box_rect("a", DayOfWeek::Monday, 10).unwrap();
    assert!(expanded_a.contains(collapsed_b.center()));
}

#[test]
fn test_press_outside_collapses() {
    let mut harness = overlapping_pair();
    let on_a = point_on_a(&harness);
    harness.click(on_a);
    assert!(harness.state.expansion().is_active());

    let empty_cell = on_a + Vec2::new(0.0, 5.0 * ROW_HEIGHT);
    assert_eq!(harness.press(empty_cell), None);
    assert!(!harness.state.expansion().is_active());
}

#[test]
fn test_expansion_times_out() {
    let mut harness = overlapping_pair();
    let on_a = point_on_a(&harness);
    harness.click(on_a);

    harness.advance(1.0);
    assert!(harness.is_expanded("a", DayOfWeek::Monday, 10));

    harness.advance(CalendarSettings::default().collapse_after_secs as f64);
    assert!(!harness.state.expansion().is_active());
}

#[test]
fn test_hidden_expanded_box_collapses() {
    let mut harness = overlapping_pair();
    let on_a = point_on_a(&harness);
    harness.click(on_a);

    harness.allow = ["b".to_string()].into_iter().collect();
    harness.frame(Vec::new());

    assert!(harness.box_rect("a", DayOfWeek::Monday, 10).is_none());
    assert!(!harness.state.expansion().is_active());
}

#[test]
fn test_last_sibling_dispatches_immediately() {
    let mut harness = overlapping_pair();
    let on_b = harness
        .box_rect("b", DayOfWeek::Monday, 10)
        .expect("box b is drawn")
        .center();

    let dispatched = harness.click(on_b).expect("last sibling dispatches");
    assert_eq!(dispatched.id, "b");
    assert!(!harness.state.expansion().is_active());
}

#[test]
fn test_single_box_dispatches_immediately() {
    let mut harness = CalendarHarness::new(vec![event(
        "solo",
        at(2023, 1, 5, 14, 0),
        at(2023, 1, 5, 15, 30),
    )]);
    let on_solo = harness
        .box_rect("solo", DayOfWeek::Thursday, 14)
        .expect("box is drawn")
        .center();

    let dispatched = harness.click(on_solo).expect("single box dispatches");
    assert_eq!(dispatched.id, "solo");
    assert_eq!(dispatched.end, at(2023, 1, 5, 15, 30));
}

#[test]
fn test_midnight_tail_does_not_count_as_sibling() {
    let mut harness = CalendarHarness::new(vec![
        event("late", at(2023, 1, 2, 22, 0), at(2023, 1, 3, 0, 0)),
        event("early", at(2023, 1, 3, 0, 0), at(2023, 1, 3, 1, 0)),
    ]);
    assert!(harness.box_rect("late", DayOfWeek::Tuesday, 0).is_none());

    let on_early = harness
        .box_rect("early", DayOfWeek::Tuesday, 0)
        .expect("box is drawn")
        .center();
    let dispatched = harness.click(on_early).expect("only drawn box dispatches");
    assert_eq!(dispatched.id, "early");
    assert!(!harness.state.expansion().is_active());
}

#[test]
fn test_fragment_click_carries_original_span() {
    let mut harness = CalendarHarness::new(vec![event(
        "late",
        at(2023, 1, 2, 22, 0),
        at(2023, 1, 3, 0, 0),
    )]);
    let on_late = harness
        .box_rect("late", DayOfWeek::Monday, 22)
        .expect("monday fragment is drawn")
        .center();

    let dispatched = harness.click(on_late).expect("fragment dispatches");
    assert_eq!(dispatched.start, at(2023, 1, 2, 22, 0));
    assert_eq!(dispatched.end, at(2023, 1, 2, 23, 59) + Duration::seconds(59));
    assert_eq!(
        dispatched.original,
        Some((at(2023, 1, 2, 22, 0), at(2023, 1, 3, 0, 0)))
    );
}
