//! The embeddable weekly calendar widget.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime};

use super::expansion::ExpansionState;
use super::views::header::{FilterSlot, HeaderView};
use super::views::palette::{EventColors, GridPalette};
use super::views::week_grid::{GridConfig, WeekGridView};
use crate::models::event::CalendarEvent;
use crate::models::settings::CalendarSettings;
use crate::services::bucketing::bucket_events_for_week;
use crate::services::feed::filter_by_ids;
use crate::services::grid::{build_rows, day_columns, SCROLL_TO_ROW};
use crate::services::layout::StackingRule;
use crate::services::locale::LocaleConfig;
use crate::services::navigation::WeekNavigator;

/// Widget state kept by the host between frames.
pub struct CalendarState {
    navigator: Option<WeekNavigator>,
    expansion: ExpansionState,
    scrolled: bool,
}

impl Default for CalendarState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarState {
    pub fn new() -> Self {
        Self {
            navigator: None,
            expansion: ExpansionState::default(),
            scrolled: false,
        }
    }

    /// The displayed week's first day, once the widget has been shown.
    pub fn start_week(&self) -> Option<NaiveDate> {
        self.navigator.as_ref().map(WeekNavigator::start_week)
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    fn navigator(&mut self, current_date: Option<NaiveDate>, week_start_day: u8) -> &mut WeekNavigator {
        let navigator = self.navigator.get_or_insert_with(|| {
            let initial = current_date.unwrap_or_else(|| Local::now().date_naive());
            WeekNavigator::new(initial, week_start_day)
        });
        navigator.set_week_start_day(week_start_day);
        navigator.sync(current_date);
        navigator
    }
}

/// A click that reached the host: the event plus the placement that was clicked.
#[derive(Debug)]
pub struct EventClick<'a, E> {
    pub event: &'a E,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Full span when the clicked box is one day of a multi-day event.
    pub original: Option<(NaiveDateTime, NaiveDateTime)>,
}

#[derive(Debug)]
pub struct CalendarResponse<'a, E> {
    pub clicked: Option<EventClick<'a, E>>,
    /// Start of the newly displayed week, reported on first show and on every change.
    pub selected_week: Option<NaiveDate>,
}

pub struct WeeklyCalendar<'a, E> {
    events: &'a [E],
    current_date: Option<NaiveDate>,
    weekends: bool,
    usa_calendar: bool,
    header_sticky: bool,
    filtered_event_ids: Option<&'a HashSet<String>>,
    stacking: StackingRule,
    scroll_to_hour: usize,
    collapse_after: Duration,
    event_text_color: Option<&'a str>,
    event_background_color: Option<&'a str>,
    filter_slot: Option<FilterSlot<'a>>,
    id_source: &'a str,
}

impl<'a, E: CalendarEvent> WeeklyCalendar<'a, E> {
    pub fn new(events: &'a [E]) -> Self {
        let defaults = CalendarSettings::default();
        Self {
            events,
            current_date: None,
            weekends: defaults.weekends,
            usa_calendar: defaults.usa_calendar,
            header_sticky: defaults.header_sticky,
            filtered_event_ids: None,
            stacking: defaults.stacking,
            scroll_to_hour: SCROLL_TO_ROW,
            collapse_after: Duration::from_secs(defaults.collapse_after_secs),
            event_text_color: None,
            event_background_color: None,
            filter_slot: None,
            id_source: "weekly_calendar",
        }
    }

    /// Apply persisted display settings.
    pub fn from_settings(mut self, settings: &CalendarSettings) -> Self {
        self.weekends = settings.weekends;
        self.usa_calendar = settings.usa_calendar;
        self.header_sticky = settings.header_sticky;
        self.stacking = settings.stacking;
        self.scroll_to_hour = (settings.scroll_to_hour as usize).min(23);
        self.collapse_after = Duration::from_secs(settings.collapse_after_secs);
        self
    }

    /// Externally controlled date; the grid follows it whenever it changes.
    pub fn current_date(mut self, date: NaiveDate) -> Self {
        self.current_date = Some(date);
        self
    }

    #[deprecated(note = "use `current_date` instead")]
    pub fn value(self, date: NaiveDate) -> Self {
        self.current_date(date)
    }

    pub fn weekends(mut self, weekends: bool) -> Self {
        self.weekends = weekends;
        self
    }

    pub fn usa_calendar(mut self, usa_calendar: bool) -> Self {
        self.usa_calendar = usa_calendar;
        self
    }

    pub fn header_sticky(mut self, header_sticky: bool) -> Self {
        self.header_sticky = header_sticky;
        self
    }

    /// Only show events whose id is listed. An empty set shows everything.
    pub fn filtered_event_ids(mut self, ids: &'a HashSet<String>) -> Self {
        self.filtered_event_ids = Some(ids);
        self
    }

    pub fn stacking(mut self, stacking: StackingRule) -> Self {
        self.stacking = stacking;
        self
    }

    /// Default text colour for events without their own.
    pub fn event_text_color(mut self, color: &'a str) -> Self {
        self.event_text_color = Some(color);
        self
    }

    /// Default box colour for events without their own.
    pub fn event_background_color(mut self, color: &'a str) -> Self {
        self.event_background_color = Some(color);
        self
    }

    pub fn filter_slot(mut self, slot: impl FnOnce(&mut egui::Ui) + 'a) -> Self {
        self.filter_slot = Some(Box::new(slot));
        self
    }

    /// Needed when several calendars share one window.
    pub fn id_source(mut self, id_source: &'a str) -> Self {
        self.id_source = id_source;
        self
    }

    pub fn show(self, ui: &mut egui::Ui, state: &mut CalendarState) -> CalendarResponse<'a, E> {
        let locale = LocaleConfig::configure(self.usa_calendar);
        let palette = GridPalette::from_ui(ui);
        let id = ui.make_persistent_id(self.id_source);

        let previous_week = state.start_week();
        let navigator = state.navigator(self.current_date, locale.week_start_day());
        HeaderView::show(
            ui,
            navigator,
            &locale,
            &palette,
            &format!("{}_date_picker", self.id_source),
            self.filter_slot,
        );
        let range = navigator.week_range();
        let selected_week = navigator.take_selection();

        if previous_week != Some(range.start_date) {
            state.expansion.clear();
        }

        let visible = filter_by_ids(self.events, self.filtered_event_ids);
        let bucket = bucket_events_for_week(&visible, range.start_date, locale.week_start_day());
        let rows = build_rows(&range, &bucket, &locale, self.weekends);
        let columns = day_columns(&range, &locale, self.weekends);

        let config = GridConfig {
            id,
            locale: &locale,
            stacking: self.stacking,
            header_sticky: self.header_sticky,
            scroll_to_row: (!state.scrolled).then_some(self.scroll_to_hour),
            collapse_after: self.collapse_after,
            event_colors: EventColors::with_defaults(
                self.event_background_color,
                self.event_text_color,
            ),
            columns: &columns,
        };
        state.scrolled = true;

        let clicked = WeekGridView::show(ui, &rows, &mut state.expansion, &config, &palette).map(
            |item| EventClick {
                event: *item.event,
                start: item.start,
                end: item.end,
                original: item.original,
            },
        );

        if let Some(click) = &clicked {
            log::debug!("Event {} clicked", click.event.id());
        }

        CalendarResponse {
            clicked,
            selected_week,
        }
    }
}
