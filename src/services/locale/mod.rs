//! Locale configuration for the weekly grid.
//!
//! Every calendar-convention decision (week start, column order, day offsets,
//! label formatting) derives from the single US/non-US flag here. Other modules
//! must go through [`LocaleConfig`] rather than re-deriving any of it.

use chrono::{Locale, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::week::DayOfWeek;

const US_WEEK: [DayOfWeek; 7] = [
    DayOfWeek::Sunday,
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
];

const EUROPEAN_WEEK: [DayOfWeek; 7] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
    DayOfWeek::Sunday,
];

const WORK_WEEK: [DayOfWeek; 5] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
];

const US_HOUR_FORMAT: &str = "%I %p";
const HOUR_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleConfig {
    usa_calendar: bool,
}

impl LocaleConfig {
    pub fn configure(usa_calendar: bool) -> Self {
        Self { usa_calendar }
    }

    pub fn is_usa(&self) -> bool {
        self.usa_calendar
    }

    /// 0 (Sunday) for US calendars, 1 (Monday) otherwise.
    pub fn week_start_day(&self) -> u8 {
        if self.usa_calendar {
            DayOfWeek::Sunday.index()
        } else {
            DayOfWeek::Monday.index()
        }
    }

    /// Display column order. Without weekends both conventions show Monday..Friday.
    pub fn visible_day_indices(&self, include_weekends: bool) -> &'static [DayOfWeek] {
        match (include_weekends, self.usa_calendar) {
            (false, _) => &WORK_WEEK,
            (true, true) => &US_WEEK,
            (true, false) => &EUROPEAN_WEEK,
        }
    }

    /// Days to add to the week's start date to reach `day`.
    pub fn day_offset_from_week_start(&self, day: DayOfWeek) -> u8 {
        let index = day.index();
        if self.usa_calendar {
            index
        } else if day == DayOfWeek::Sunday {
            6
        } else {
            index - 1
        }
    }

    pub fn day_data_key(&self, day: DayOfWeek) -> &'static str {
        day.data_key()
    }

    pub fn day_object_key(&self, day: DayOfWeek) -> &'static str {
        day.object_key()
    }

    /// Format with strftime `pattern`; non-US calendars use French names.
    pub fn format_date(&self, date: NaiveDateTime, pattern: &str) -> String {
        if self.usa_calendar {
            date.format(pattern).to_string()
        } else {
            date.and_utc()
                .format_localized(pattern, Locale::fr_FR)
                .to_string()
        }
    }

    pub fn format_day(&self, date: NaiveDate, pattern: &str) -> String {
        self.format_date(date.and_time(NaiveTime::MIN), pattern)
    }

    /// Hour row label: `10 AM` in US mode, `10:00` otherwise.
    pub fn format_hour(&self, date: NaiveDateTime) -> String {
        if self.usa_calendar {
            date.format(US_HOUR_FORMAT).to_string()
        } else {
            date.format(HOUR_FORMAT).to_string()
        }
    }
}
