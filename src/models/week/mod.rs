// Week model
// Day keys, week ranges and the per-day / per-hour placement containers

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::models::event::CalendarEvent;

/// Day of week keyed Sunday = 0 .. Saturday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::from(date.weekday())
    }

    /// Capitalized English name, used as column key.
    pub fn data_key(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }

    /// Lowercase English name, used as bucket key.
    pub fn object_key(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "sunday",
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

/// Seven consecutive calendar days starting on the locale's week-start day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl WeekRange {
    pub fn starting(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: start_date + Duration::days(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start_date.iter_days().take(7)
    }
}

/// An event (or one day's fragment of it) placed on a single day.
///
/// `start`/`end` are the clipped bounds used for layout. `original` is only set
/// on fragments of multi-day events and keeps the true span for labels.
#[derive(Debug)]
pub struct DayItem<'a, E> {
    pub event: &'a E,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub original: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl<E> Clone for DayItem<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for DayItem<'_, E> {}

impl<'a, E: CalendarEvent> DayItem<'a, E> {
    /// Place an event that starts and ends on the same day.
    pub fn whole(event: &'a E) -> Self {
        Self {
            event,
            start: event.start_time(),
            end: event.end_time(),
            original: None,
        }
    }

    pub fn fragment(event: &'a E, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            event,
            start,
            end,
            original: Some((event.start_time(), event.end_time())),
        }
    }

    pub fn id(&self) -> &'a str {
        self.event.id()
    }

    pub fn is_fragment(&self) -> bool {
        self.original.is_some()
    }

    /// The span shown on the box label: the true span for fragments.
    pub fn display_span(&self) -> (NaiveDateTime, NaiveDateTime) {
        self.original.unwrap_or((self.start, self.end))
    }

    pub fn day(&self) -> DayOfWeek {
        DayOfWeek::of(self.start.date())
    }
}

/// Per-weekday placements for the displayed week only.
#[derive(Debug)]
pub struct WeekBucket<'a, E> {
    days: [Vec<DayItem<'a, E>>; 7],
}

impl<E> Default for WeekBucket<'_, E> {
    fn default() -> Self {
        Self {
            days: std::array::from_fn(|_| Vec::new()),
        }
    }
}

impl<'a, E> WeekBucket<'a, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, day: DayOfWeek, item: DayItem<'a, E>) {
        self.days[day as usize].push(item);
    }

    pub fn day(&self, day: DayOfWeek) -> &[DayItem<'a, E>] {
        &self.days[day as usize]
    }

    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayOfWeek, &DayItem<'a, E>)> {
        DayOfWeek::ALL
            .into_iter()
            .flat_map(move |day| self.day(day).iter().map(move |item| (day, item)))
    }
}

/// Items of one day column whose clipped start falls in the row's hour.
#[derive(Debug)]
pub struct HourCell<'a, E> {
    pub day: DayOfWeek,
    pub column_hour: NaiveDateTime,
    pub items: Vec<DayItem<'a, E>>,
}

#[derive(Debug)]
pub struct HourRow<'a, E> {
    pub index: usize,
    /// This row's hour on the week's first day.
    pub hour: NaiveDateTime,
    pub label: String,
    pub cells: Vec<HourCell<'a, E>>,
}

impl<'a, E> HourRow<'a, E> {
    pub fn cell(&self, day: DayOfWeek) -> Option<&HourCell<'a, E>> {
        self.cells.iter().find(|cell| cell.day == day)
    }
}
