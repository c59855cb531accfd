//! Pure helpers shared by the header and grid views.

use chrono::NaiveDateTime;
use egui::Color32;

use crate::models::event::CalendarEvent;
use crate::models::week::DayItem;
use crate::services::locale::LocaleConfig;

const SPAN_FORMAT: &str = "%H:%M";
const US_DAY_FORMAT: &str = "%A, %B %d";
const DAY_FORMAT: &str = "%A %d %B";
const MULTI_DAY_FORMAT: &str = "%a %d %b %H:%M";

/// Parse a hex color string to Color32.
///
/// Accepts `#RRGGBB` and the short `#RGB` form, with or without the `#`.
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color32::from_rgb(r, g, b))
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Color32::from_rgb(channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

/// `HH:MM - HH:MM`
pub fn format_span(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", start.format(SPAN_FORMAT), end.format(SPAN_FORMAT))
}

/// Title plus the event's full span; fragments also show the dates they run between.
pub fn format_event_tooltip<E: CalendarEvent>(
    item: &DayItem<'_, E>,
    locale: &LocaleConfig,
) -> String {
    let mut lines = Vec::new();

    if let Some(title) = item.event.title().filter(|t| !t.is_empty()) {
        lines.push(title.to_string());
    }

    let (start, end) = item.display_span();
    if start.date() == end.date() {
        let day_format = if locale.is_usa() { US_DAY_FORMAT } else { DAY_FORMAT };
        lines.push(format!(
            "{} ({})",
            format_span(start, end),
            locale.format_date(start, day_format)
        ));
    } else {
        lines.push(format!(
            "{} - {}",
            locale.format_date(start, MULTI_DAY_FORMAT),
            locale.format_date(end, MULTI_DAY_FORMAT)
        ));
    }

    lines.join("\n")
}
