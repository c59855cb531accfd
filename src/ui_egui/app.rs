use std::collections::HashSet;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::event::{CalendarEvent, Event};
use crate::models::settings::CalendarSettings;
use crate::services::feed::{filter_options_from, ids_for_values, FilterOption};
use crate::services::layout::StackingRule;
use crate::services::settings::SettingsService;
use crate::ui_egui::filter::FilterSelect;
use crate::ui_egui::widget::{CalendarState, WeeklyCalendar};
use crate::utils::date::get_week_start;

const FILTER_EMOJI: &str = "🏟";

/// Demo host: one weekly calendar, a settings toolbar and a status bar.
pub struct CalendarApp {
    events: Vec<Event>,
    settings: CalendarSettings,
    settings_service: SettingsService,
    calendar_state: CalendarState,
    filter_options: Vec<FilterOption>,
    selected_filters: HashSet<String>,
    filtered_ids: HashSet<String>,
    selected_week: Option<NaiveDate>,
    last_clicked: Option<String>,
}

impl CalendarApp {
    pub fn new(events: Vec<Event>, settings_service: SettingsService) -> Self {
        let settings = settings_service.load_or_default();
        let events = if events.is_empty() {
            log::info!("No events supplied, showing demo events");
            demo_events(Local::now().date_naive())
        } else {
            events
        };

        let filter_options = filter_options_from(&events, |event: &Event| {
            event.location.as_ref().map(|location| {
                FilterOption::new(location.clone(), location.clone())
                    .with_emoji(FILTER_EMOJI)
                    .with_desc(format!("Location: {location}"))
            })
        });

        Self {
            events,
            settings,
            settings_service,
            calendar_state: CalendarState::new(),
            filter_options,
            selected_filters: HashSet::new(),
            filtered_ids: HashSet::new(),
            selected_week: None,
            last_clicked: None,
        }
    }

    fn refresh_filter(&mut self) {
        self.filtered_ids = ids_for_values(&self.events, &self.selected_filters, |event| {
            event.location.as_deref()
        });
        log::debug!(
            "Filter now allows {} of {} events",
            self.filtered_ids.len(),
            self.events.len()
        );
    }

    fn persist_settings(&self) {
        if let Err(e) = self.settings_service.save(&self.settings) {
            log::error!("Failed to save settings: {:#}", e);
        }
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        let mut changed = false;
        ui.horizontal(|ui| {
            changed |= ui
                .checkbox(&mut self.settings.usa_calendar, "US calendar")
                .changed();
            changed |= ui.checkbox(&mut self.settings.weekends, "Weekends").changed();
            changed |= ui
                .checkbox(&mut self.settings.header_sticky, "Sticky header")
                .changed();
            ui.separator();
            changed |= ui
                .radio_value(&mut self.settings.stacking, StackingRule::Cascade, "Cascade")
                .changed();
            changed |= ui
                .radio_value(
                    &mut self.settings.stacking,
                    StackingRule::SideBySide,
                    "Side by side",
                )
                .changed();
        });

        if changed {
            self.persist_settings();
        }
    }

    fn render_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if let Some(week) = self.selected_week {
                ui.label(format!("Week of {}", week.format("%Y-%m-%d")));
            }
            if let Some(clicked) = &self.last_clicked {
                ui.separator();
                ui.label(format!("Last clicked: {clicked}"));
            }
        });
    }
}

impl eframe::App for CalendarApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.render_toolbar(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        let mut filter_changed = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            let options = &self.filter_options;
            let selected = &mut self.selected_filters;
            let changed = &mut filter_changed;

            let response = WeeklyCalendar::new(&self.events)
                .from_settings(&self.settings)
                .filtered_event_ids(&self.filtered_ids)
                .filter_slot(move |ui| {
                    *changed = FilterSelect::new("location_filter", options, selected)
                        .placeholder("All locations")
                        .show(ui);
                })
                .show(ui, &mut self.calendar_state);

            if let Some(week) = response.selected_week {
                log::info!("Showing week starting {}", week);
                self.selected_week = Some(week);
            }
            if let Some(click) = response.clicked {
                let label = click.event.title().unwrap_or(click.event.id()).to_string();
                log::info!("Clicked event {}", click.event.id());
                self.last_clicked = Some(label);
            }
        });

        if filter_changed {
            self.refresh_filter();
        }
    }
}

/// A week of sample bookings around `today`, including a crowded hour and an
/// overnight event.
pub fn demo_events(today: NaiveDate) -> Vec<Event> {
    let monday = get_week_start(today, 1);
    let at = |day: i64, hour: u32, minute: u32| -> NaiveDateTime {
        (monday + Duration::days(day)).and_time(
            NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
        )
    };

    let specs: [(&str, &str, &str, NaiveDateTime, NaiveDateTime, Option<&str>); 8] = [
        ("1", "Five-a-side", "North pitch", at(0, 10, 0), at(0, 11, 0), None),
        ("2", "Training", "North pitch", at(1, 9, 0), at(1, 10, 30), Some("#597EF7")),
        ("3", "League match", "South pitch", at(1, 9, 15), at(1, 11, 0), Some("#F759AB")),
        ("4", "Walking football", "South pitch", at(1, 9, 30), at(1, 9, 50), None),
        ("5", "Youth cup", "Indoor hall", at(1, 9, 45), at(1, 12, 0), Some("#FA8C16")),
        ("6", "Night tournament", "Indoor hall", at(2, 22, 0), at(4, 2, 0), Some("#722ED1")),
        ("7", "Referee course", "Clubhouse", at(3, 14, 0), at(3, 14, 0), None),
        ("8", "Open session", "North pitch", at(5, 8, 0), at(5, 12, 0), Some("#52C41A")),
    ];

    specs
        .into_iter()
        .filter_map(|(id, title, location, start, end, color)| {
            let mut builder = Event::builder()
                .id(id)
                .title(title)
                .location(location)
                .start(start)
                .end(end);
            if let Some(color) = color {
                builder = builder.background_color(color);
            }
            builder
                .build()
                .map_err(|e| log::warn!("Skipping demo event {}: {}", id, e))
                .ok()
        })
        .collect()
}
