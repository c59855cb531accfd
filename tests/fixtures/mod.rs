// Test fixtures - reusable test data
// Weeks and events shared by the integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use weekly_calendar::models::event::Event;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

/// Sample weeks for testing
pub mod weeks {
    use super::*;

    /// Sunday Jan 1, 2023: first day of a US week
    pub fn us_week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
    }

    /// Monday Jun 5, 2023: first day of a European week
    pub fn european_week_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 5).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn event(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::new(id, start, end).unwrap()
    }

    /// Monday 10:00-11:00 in the US sample week
    pub fn monday_meeting() -> Event {
        Event::builder()
            .id("1")
            .title("Team sync")
            .start(at(2023, 1, 2, 10, 0))
            .end(at(2023, 1, 2, 11, 0))
            .build()
            .unwrap()
    }

    /// Monday 22:00 to Wednesday 02:00 in the European sample week
    pub fn overnight_tournament() -> Event {
        Event::builder()
            .id("m")
            .title("Night tournament")
            .start(at(2023, 6, 5, 22, 0))
            .end(at(2023, 6, 7, 2, 0))
            .background_color("#722ED1")
            .build()
            .unwrap()
    }

    /// Four bookings starting in the Tuesday 09:00 hour of the European sample week
    pub fn crowded_hour() -> Vec<Event> {
        vec![
            event("a", at(2023, 6, 6, 9, 0), at(2023, 6, 6, 10, 0)),
            event("b", at(2023, 6, 6, 9, 10), at(2023, 6, 6, 9, 40)),
            event("c", at(2023, 6, 6, 9, 20), at(2023, 6, 6, 11, 0)),
            event("d", at(2023, 6, 6, 9, 50), at(2023, 6, 6, 10, 5)),
        ]
    }
}
