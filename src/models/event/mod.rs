// Event module
// Event capability trait plus the concrete event type used by hosts and tests

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures when constructing an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event id cannot be empty")]
    EmptyId,
    #[error("Event {0} is required")]
    MissingField(&'static str),
    #[error("Event end time {end} is before start time {start}")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("Color {0:?} must be in hex format (#RRGGBB or #RGB)")]
    InvalidColor(String),
}

/// Optional foreground/background colours for an event box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayColors {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}

/// Anything the weekly grid can place.
///
/// The grid only ever reads these fields; hosts keep their own event types and
/// implement this trait instead of converting into [`Event`].
pub trait CalendarEvent {
    /// Stable identifier, used for click correlation and widget ids.
    fn id(&self) -> &str;
    fn start_time(&self) -> NaiveDateTime;
    fn end_time(&self) -> NaiveDateTime;

    fn title(&self) -> Option<&str> {
        None
    }

    fn text_color(&self) -> Option<&str> {
        None
    }

    fn background_color(&self) -> Option<&str> {
        None
    }
}

impl<T: CalendarEvent + ?Sized> CalendarEvent for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn start_time(&self) -> NaiveDateTime {
        (**self).start_time()
    }

    fn end_time(&self) -> NaiveDateTime {
        (**self).end_time()
    }

    fn title(&self) -> Option<&str> {
        (**self).title()
    }

    fn text_color(&self) -> Option<&str> {
        (**self).text_color()
    }

    fn background_color(&self) -> Option<&str> {
        (**self).background_color()
    }
}

/// Calendar event as supplied by the host application
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub title: Option<String>,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub colors: DisplayColors,
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use weekly_calendar::models::event::Event;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap().and_hms_opt(10, 0, 0).unwrap();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new("1", start, end).unwrap();
    /// assert_eq!(event.duration(), chrono::Duration::hours(1));
    /// ```
    pub fn new(
        id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EventError> {
        let event = Self {
            id: id.into(),
            title: None,
            location: None,
            start,
            end,
            colors: DisplayColors::default(),
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    ///
    /// Zero-length events are allowed; an end before the start is not.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.id.trim().is_empty() {
            return Err(EventError::EmptyId);
        }

        if self.end < self.start {
            return Err(EventError::EndBeforeStart {
                start: self.start,
                end: self.end,
            });
        }

        for color in [&self.colors.text, &self.colors.background]
            .into_iter()
            .flatten()
        {
            if !is_hex_color(color) {
                return Err(EventError::InvalidColor(color.clone()));
            }
        }

        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// `#RRGGBB` or `#RGB`.
pub fn is_hex_color(color: &str) -> bool {
    color.starts_with('#')
        && (color.len() == 7 || color.len() == 4)
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl CalendarEvent for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn start_time(&self) -> NaiveDateTime {
        self.start
    }

    fn end_time(&self) -> NaiveDateTime {
        self.end
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn text_color(&self) -> Option<&str> {
        self.colors.text.as_deref()
    }

    fn background_color(&self) -> Option<&str> {
        self.colors.background.as_deref()
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    location: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    colors: DisplayColors,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the text colour (hex format)
    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.colors.text = Some(color.into());
        self
    }

    /// Set the box background colour (hex format)
    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.colors.background = Some(color.into());
        self
    }

    pub fn build(self) -> Result<Event, EventError> {
        let id = self.id.ok_or(EventError::MissingField("id"))?;
        let start = self.start.ok_or(EventError::MissingField("start time"))?;
        let end = self.end.ok_or(EventError::MissingField("end time"))?;

        let event = Event {
            id,
            title: self.title,
            location: self.location,
            start,
            end,
            colors: self.colors,
        };

        event.validate()?;
        Ok(event)
    }
}
