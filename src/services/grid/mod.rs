//! Hour-grid builder: 24 rows × visible day columns.
//!
//! Each bucketed item is placed exactly once, in the row of its (clipped) start
//! hour. Duration is conveyed by the box height, not by repeating the item in
//! later rows.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::models::event::CalendarEvent;
use crate::models::week::{DayOfWeek, HourCell, HourRow, WeekBucket, WeekRange};
use crate::services::locale::LocaleConfig;
use crate::utils::date::{is_same_hour, is_same_week};

pub const ROW_AMOUNT: usize = 24;
/// Row scrolled into view when the grid is first shown (06:00).
pub const SCROLL_TO_ROW: usize = 6;
const COLUMN_TITLE_FORMAT: &str = "%a %d";

/// Header descriptor for one visible day column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub day: DayOfWeek,
    pub date: NaiveDate,
    pub key: &'static str,
    pub title: String,
}

pub fn build_rows<'a, E: CalendarEvent>(
    week_range: &WeekRange,
    bucket: &WeekBucket<'a, E>,
    locale: &LocaleConfig,
    include_weekends: bool,
) -> Vec<HourRow<'a, E>> {
    let week_start = week_range.start_date.and_time(NaiveTime::MIN);
    let days = locale.visible_day_indices(include_weekends);

    (0..ROW_AMOUNT)
        .map(|index| {
            let hour = week_start + Duration::hours(index as i64);
            let cells = days
                .iter()
                .map(|&day| {
                    let column_hour = column_hour(hour, day, locale);
                    let items = bucket
                        .day(day)
                        .iter()
                        .filter(|item| is_same_hour(item.start, column_hour))
                        .copied()
                        .collect();
                    HourCell {
                        day,
                        column_hour,
                        items,
                    }
                })
                .collect();

            HourRow {
                index,
                hour,
                label: locale.format_hour(hour),
                cells,
            }
        })
        .collect()
}

/// The row's hour moved onto `day`'s date within the displayed week.
pub fn column_hour(row_hour: NaiveDateTime, day: DayOfWeek, locale: &LocaleConfig) -> NaiveDateTime {
    row_hour + Duration::days(locale.day_offset_from_week_start(day) as i64)
}

pub fn day_columns(
    week_range: &WeekRange,
    locale: &LocaleConfig,
    include_weekends: bool,
) -> Vec<DayColumn> {
    locale
        .visible_day_indices(include_weekends)
        .iter()
        .map(|&day| {
            let date =
                week_range.start_date + Duration::days(locale.day_offset_from_week_start(day) as i64);
            DayColumn {
                day,
                date,
                key: locale.day_data_key(day),
                title: locale.format_day(date, COLUMN_TITLE_FORMAT),
            }
        })
        .collect()
}

/// True when `row_hour` is the current clock hour and lies in the current week.
pub fn is_current_hour(row_hour: NaiveDateTime, now: NaiveDateTime, week_start_day: u8) -> bool {
    row_hour.hour() == now.hour() && is_same_week(row_hour.date(), now.date(), week_start_day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::Event;
    use crate::services::bucketing::bucket_events_for_week;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn sunday_week() -> WeekRange {
        WeekRange::starting(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
    }

    #[test]
    fn test_builds_24_rows_with_labels() {
        let events: Vec<Event> = Vec::new();
        let locale = LocaleConfig::configure(true);
        let bucket = bucket_events_for_week(&events, sunday_week().start_date, 0);
        let rows = build_rows(&sunday_week(), &bucket, &locale, true);

        assert_eq!(rows.len(), 24);
        assert_eq!(rows[0].label, "12 AM");
        assert_eq!(rows[10].label, "10 AM");
        assert_eq!(rows[10].hour, at(2023, 1, 1, 10, 0));
        assert!(rows.iter().all(|row| row.cells.len() == 7));
    }

    #[test]
    fn test_event_lands_in_monday_column_row_ten() {
        let events = vec![Event::new("1", at(2023, 1, 2, 10, 0), at(2023, 1, 2, 11, 0)).unwrap()];
        let locale = LocaleConfig::configure(true);
        let bucket = bucket_events_for_week(&events, sunday_week().start_date, 0);
        let rows = build_rows(&sunday_week(), &bucket, &locale, false);

        let cell = rows[10].cell(DayOfWeek::Monday).unwrap();
        assert_eq!(cell.column_hour, at(2023, 1, 2, 10, 0));
        assert_eq!(cell.items.len(), 1);
        assert_eq!(cell.items[0].id(), "1");

        let placed: usize = rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .map(|cell| cell.items.len())
            .sum();
        assert_eq!(placed, 1);
    }

    #[test]
    fn test_european_sunday_column_is_last_day() {
        let week = WeekRange::starting(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        let events = vec![Event::new("s", at(2023, 1, 8, 9, 15), at(2023, 1, 8, 9, 45)).unwrap()];
        let locale = LocaleConfig::configure(false);
        let bucket = bucket_events_for_week(&events, week.start_date, 1);
        let rows = build_rows(&week, &bucket, &locale, true);

        let cell = rows[9].cell(DayOfWeek::Sunday).unwrap();
        assert_eq!(cell.column_hour, at(2023, 1, 8, 9, 0));
        assert_eq!(cell.items.len(), 1);
        assert_eq!(rows[9].label, "09:00");
    }

    #[test]
    fn test_weekend_items_hidden_without_weekend_columns() {
        let events = vec![Event::new("sat", at(2023, 1, 7, 12, 0), at(2023, 1, 7, 13, 0)).unwrap()];
        let locale = LocaleConfig::configure(true);
        let bucket = bucket_events_for_week(&events, sunday_week().start_date, 0);
        let rows = build_rows(&sunday_week(), &bucket, &locale, false);

        assert!(rows[12].cell(DayOfWeek::Saturday).is_none());
        assert_eq!(rows[12].cells.len(), 5);
    }

    #[test]
    fn test_us_column_titles() {
        let locale = LocaleConfig::configure(true);
        let titles: Vec<String> = day_columns(&sunday_week(), &locale, true)
            .into_iter()
            .map(|column| column.title)
            .collect();
        assert_eq!(
            titles,
            vec!["Sun 01", "Mon 02", "Tue 03", "Wed 04", "Thu 05", "Fri 06", "Sat 07"]
        );
    }

    #[test]
    fn test_column_keys_and_dates_without_weekends() {
        let locale = LocaleConfig::configure(false);
        let week = WeekRange::starting(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        let columns = day_columns(&week, &locale, false);
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[0].key, "Monday");
        assert_eq!(columns[4].date, NaiveDate::from_ymd_opt(2023, 1, 6).unwrap());
    }

    #[test]
    fn test_is_current_hour() {
        let now = at(2023, 1, 4, 14, 25);
        assert!(is_current_hour(at(2023, 1, 1, 14, 0), now, 0));
        assert!(!is_current_hour(at(2023, 1, 1, 15, 0), now, 0));
        // Same hour but the previous week
        assert!(!is_current_hour(at(2022, 12, 25, 14, 0), now, 0));
    }
}
