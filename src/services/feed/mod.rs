//! Event feed: JSON loading, id allow-list filtering and filter options.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::event::{is_hex_color, CalendarEvent, DisplayColors, Event};

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// One entry of a host event document. Accepts both snake_case and the
/// camelCase keys web hosts tend to send.
#[derive(Debug, Clone, Deserialize)]
struct RawEvent {
    #[serde(alias = "eventId")]
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(alias = "startTime")]
    start: String,
    #[serde(alias = "endTime")]
    end: String,
    #[serde(default, alias = "textColor")]
    text_color: Option<String>,
    #[serde(default, alias = "backgroundColor")]
    background_color: Option<String>,
}

/// Parse a wall-clock timestamp. Offsets are converted to local time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Parse a JSON array of events, skipping entries that cannot be placed.
pub fn parse_events(json: &str) -> Result<Vec<Event>> {
    let raw: Vec<RawEvent> =
        serde_json::from_str(json).context("Event document is not a JSON array of events")?;

    let mut events = Vec::with_capacity(raw.len());
    for entry in raw {
        let (Some(start), Some(end)) = (parse_timestamp(&entry.start), parse_timestamp(&entry.end))
        else {
            log::warn!(
                "Skipping event {}: unreadable time {:?} - {:?}",
                entry.id,
                entry.start,
                entry.end
            );
            continue;
        };

        let event = Event {
            id: entry.id.clone(),
            title: entry.title,
            location: entry.location,
            start,
            end,
            colors: DisplayColors {
                text: readable_color(&entry.id, entry.text_color),
                background: readable_color(&entry.id, entry.background_color),
            },
        };

        match event.validate() {
            Ok(()) => events.push(event),
            Err(e) => log::warn!("Skipping event {}: {}", event.id, e),
        }
    }

    Ok(events)
}

/// Drop a colour the grid cannot paint; the box falls back to the default.
fn readable_color(event_id: &str, color: Option<String>) -> Option<String> {
    let color = color?;
    if is_hex_color(color.trim()) {
        Some(color.trim().to_string())
    } else {
        log::warn!("Ignoring colour {:?} of event {}", color, event_id);
        None
    }
}

pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file {}", path.display()))?;
    let events = parse_events(&json)
        .with_context(|| format!("Failed to parse event file {}", path.display()))?;
    log::info!("Loaded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Events allowed by `allow_list`. A missing or empty list allows everything.
pub fn filter_by_ids<'a, E: CalendarEvent>(
    events: &'a [E],
    allow_list: Option<&HashSet<String>>,
) -> Vec<&'a E> {
    match allow_list {
        Some(ids) if !ids.is_empty() => events
            .iter()
            .filter(|event| ids.contains(event.id()))
            .collect(),
        _ => events.iter().collect(),
    }
}

/// An entry of the filter select shown in the header slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            emoji: None,
            desc: None,
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }
}

/// One option per distinct value produced by `key`, in first-seen order.
pub fn filter_options_from<E, F>(events: &[E], key: F) -> Vec<FilterOption>
where
    F: Fn(&E) -> Option<FilterOption>,
{
    let mut seen = HashSet::new();
    events
        .iter()
        .filter_map(key)
        .filter(|option| seen.insert(option.value.clone()))
        .collect()
}

/// Ids of events whose `key` value is among `selected`.
///
/// Nothing selected yields an empty set, which shows every event.
pub fn ids_for_values<E, F>(events: &[E], selected: &HashSet<String>, key: F) -> HashSet<String>
where
    E: CalendarEvent,
    F: Fn(&E) -> Option<&str>,
{
    if selected.is_empty() {
        return HashSet::new();
    }
    events
        .iter()
        .filter(|event| key(*event).is_some_and(|value| selected.contains(value)))
        .map(|event| event.id().to_string())
        .collect()
}
