//! Multi-day splitting and per-weekday bucketing for one displayed week.

use chrono::{NaiveDate, NaiveTime};

use crate::models::event::CalendarEvent;
use crate::models::week::{DayItem, DayOfWeek, WeekBucket};
use crate::utils::date::{end_of_day, is_same_day, is_same_week};

/// Bucket `events` by weekday for the week containing `week_start`.
///
/// Events are selected by their start time. Events spanning several calendar
/// days are split into one fragment per day and only fragments that land
/// inside the target week are kept; the rest show up when their own week is
/// rendered. Events ending before they start are skipped.
pub fn bucket_events_for_week<'a, E: CalendarEvent>(
    events: &'a [E],
    week_start: NaiveDate,
    week_start_day: u8,
) -> WeekBucket<'a, E> {
    let mut bucket = WeekBucket::new();

    for event in events {
        let start = event.start_time();
        let end = event.end_time();

        if end < start {
            log::warn!(
                "Skipping event {}: end {} is before start {}",
                event.id(),
                end,
                start
            );
            continue;
        }

        if !is_same_week(start.date(), week_start, week_start_day) {
            continue;
        }

        if is_same_day(start, end) {
            bucket.push(DayOfWeek::of(start.date()), DayItem::whole(event));
            continue;
        }

        for fragment in split_by_day(event) {
            let day = fragment.start.date();
            if is_same_week(day, week_start, week_start_day) {
                bucket.push(DayOfWeek::of(day), fragment);
            }
        }
    }

    bucket
}

/// One fragment per calendar day from the event's start day to its end day.
///
/// The first fragment keeps the real start, the last keeps the real end, and
/// every fragment is clipped to its own day.
pub fn split_by_day<E: CalendarEvent>(event: &E) -> Vec<DayItem<'_, E>> {
    let start = event.start_time();
    let end = event.end_time();
    let last_day = end.date();

    let days: Vec<NaiveDate> = start
        .date()
        .iter_days()
        .take_while(|day| *day <= last_day)
        .collect();
    let last_index = days.len().saturating_sub(1);

    days.iter()
        .enumerate()
        .map(|(index, day)| {
            let day_start = day.and_time(NaiveTime::MIN);
            let day_end = end_of_day(day_start);
            let fragment_start = if index == 0 { start } else { day_start };
            let fragment_end = if index == last_index { end } else { day_end };
            DayItem::fragment(event, fragment_start, fragment_end)
        })
        .collect()
}
