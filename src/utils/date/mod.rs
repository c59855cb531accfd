// Date utility functions
// Day and week boundaries shared by bucketing, the hour grid and navigation

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub fn is_same_day(date1: NaiveDateTime, date2: NaiveDateTime) -> bool {
    date1.date() == date2.date()
}

/// True when both timestamps fall in the same clock hour of the same day.
pub fn is_same_hour(date1: NaiveDateTime, date2: NaiveDateTime) -> bool {
    is_same_day(date1, date2) && date1.hour() == date2.hour()
}

pub fn start_of_day(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Last whole second of the day (23:59:59).
pub fn end_of_day(date: NaiveDateTime) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::seconds(1)
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

pub fn is_same_week(date1: NaiveDate, date2: NaiveDate, first_day_of_week: u8) -> bool {
    get_week_start(date1, first_day_of_week) == get_week_start(date2, first_day_of_week)
}

/// ISO 8601 week number (Monday weeks, week 1 holds the first Thursday).
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// US week number: Sunday weeks, the week containing January 1 is week 1.
pub fn us_week_number(date: NaiveDate) -> u32 {
    let week_start = get_week_start(date, 0);
    let first_week_of =
        |year: i32| NaiveDate::from_ymd_opt(year, 1, 1).map(|jan1| get_week_start(jan1, 0));

    if let Some(next_first) = first_week_of(week_start.year() + 1) {
        if next_first <= week_start {
            return 1;
        }
    }

    first_week_of(week_start.year())
        .map(|first| ((week_start - first).num_days() / 7 + 1) as u32)
        .unwrap_or(1)
}
