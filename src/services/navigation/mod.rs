// Week navigation
// Tracks the displayed week and queues "week selected" notifications for the host

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::models::week::WeekRange;
use crate::services::locale::LocaleConfig;
use crate::utils::date::{get_week_start, iso_week_number, us_week_number};

const MONTH_FORMAT: &str = "%b";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekNavigator {
    start_week: NaiveDate,
    week_start_day: u8,
    pending: Option<NaiveDate>,
    last_external: Option<NaiveDate>,
}

impl WeekNavigator {
    /// Start on the week containing `date`. The initial week is queued as a
    /// selection so the host hears about it on first show.
    pub fn new(date: NaiveDate, week_start_day: u8) -> Self {
        let start_week = get_week_start(date, week_start_day);
        Self {
            start_week,
            week_start_day,
            pending: Some(start_week),
            last_external: None,
        }
    }

    pub fn start_week(&self) -> NaiveDate {
        self.start_week
    }

    pub fn week_start_day(&self) -> u8 {
        self.week_start_day
    }

    pub fn next(&mut self) {
        self.set_start_week(self.start_week + Duration::days(7));
    }

    pub fn previous(&mut self) {
        self.set_start_week(self.start_week - Duration::days(7));
    }

    pub fn today(&mut self, today: NaiveDate) {
        self.jump_to_week(today);
    }

    pub fn go_to_today(&mut self) {
        self.today(Local::now().date_naive());
    }

    pub fn jump_to_week(&mut self, date: NaiveDate) {
        self.set_start_week(get_week_start(date, self.week_start_day));
    }

    /// Follow an externally supplied current date.
    ///
    /// Only a change of the external value moves the grid, so user navigation
    /// is not undone every frame while the host keeps passing the same date.
    pub fn sync(&mut self, external: Option<NaiveDate>) {
        let Some(date) = external else {
            return;
        };
        if self.last_external == Some(date) {
            return;
        }
        self.last_external = Some(date);
        self.jump_to_week(date);
    }

    /// Re-normalize after a locale switch, anchored on the external date or
    /// the middle of the displayed week.
    pub fn set_week_start_day(&mut self, week_start_day: u8) {
        if self.week_start_day == week_start_day {
            return;
        }
        self.week_start_day = week_start_day;
        let anchor = self
            .last_external
            .unwrap_or(self.start_week + Duration::days(3));
        self.jump_to_week(anchor);
    }

    /// The queued week selection, if any. Each change is reported once.
    pub fn take_selection(&mut self) -> Option<NaiveDate> {
        self.pending.take()
    }

    pub fn week_range(&self) -> WeekRange {
        WeekRange::starting(self.start_week)
    }

    /// `Jan`, or `Jan-Feb` when the week runs into the next month.
    pub fn month_label(&self, locale: &LocaleConfig) -> String {
        let range = self.week_range();
        let first = locale.format_day(range.start_date, MONTH_FORMAT);
        if range.start_date.month() == range.end_date.month() {
            first
        } else {
            format!("{}-{}", first, locale.format_day(range.end_date, MONTH_FORMAT))
        }
    }

    pub fn week_number(&self, locale: &LocaleConfig) -> u32 {
        if locale.is_usa() {
            us_week_number(self.start_week)
        } else {
            iso_week_number(self.start_week)
        }
    }

    fn set_start_week(&mut self, start_week: NaiveDate) {
        if start_week == self.start_week {
            return;
        }
        log::debug!("Week changed from {} to {}", self.start_week, start_week);
        self.start_week = start_week;
        self.pending = Some(start_week);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_normalizes_and_queues_initial_week() {
        let mut nav = WeekNavigator::new(date(2023, 1, 4), 0);
        assert_eq!(nav.start_week(), date(2023, 1, 1));
        assert_eq!(nav.take_selection(), Some(date(2023, 1, 1)));
        assert_eq!(nav.take_selection(), None);
    }

    #[test]
    fn test_next_and_previous() {
        let mut nav = WeekNavigator::new(date(2023, 1, 4), 1);
        nav.take_selection();

        nav.next();
        assert_eq!(nav.start_week(), date(2023, 1, 9));
        assert_eq!(nav.take_selection(), Some(date(2023, 1, 9)));

        nav.previous();
        nav.previous();
        assert_eq!(nav.start_week(), date(2022, 12, 26));
    }

    #[test]
    fn test_today_lands_on_week_start_day() {
        for offset in 0..14 {
            let today = date(2024, 2, 20) + Duration::days(offset);

            let mut us = WeekNavigator::new(date(2020, 6, 1), 0);
            us.today(today);
            assert_eq!(us.start_week().weekday(), Weekday::Sun);
            assert!(us.week_range().contains(today));

            let mut eu = WeekNavigator::new(date(2020, 6, 1), 1);
            eu.today(today);
            assert_eq!(eu.start_week().weekday(), Weekday::Mon);
            assert!(eu.week_range().contains(today));
        }
    }

    #[test]
    fn test_jump_within_same_week_queues_nothing() {
        let mut nav = WeekNavigator::new(date(2023, 1, 4), 0);
        nav.take_selection();
        nav.jump_to_week(date(2023, 1, 6));
        assert_eq!(nav.take_selection(), None);
    }

    #[test]
    fn test_sync_only_follows_changed_external_date() {
        let mut nav = WeekNavigator::new(date(2023, 1, 4), 0);
        nav.sync(Some(date(2023, 1, 4)));
        nav.next();
        // Same external value again: user navigation is kept
        nav.sync(Some(date(2023, 1, 4)));
        assert_eq!(nav.start_week(), date(2023, 1, 8));

        nav.sync(Some(date(2023, 3, 15)));
        assert_eq!(nav.start_week(), date(2023, 3, 12));

        nav.sync(None);
        assert_eq!(nav.start_week(), date(2023, 3, 12));
    }

    #[test]
    fn test_locale_switch_renormalizes() {
        let mut nav = WeekNavigator::new(date(2023, 1, 4), 0);
        nav.take_selection();
        nav.set_week_start_day(1);
        assert_eq!(nav.start_week(), date(2023, 1, 2));
        assert_eq!(nav.week_start_day(), 1);
        assert_eq!(nav.take_selection(), Some(date(2023, 1, 2)));
    }

    #[test]
    fn test_month_label() {
        let locale = LocaleConfig::configure(true);
        let nav = WeekNavigator::new(date(2023, 1, 4), 0);
        assert_eq!(nav.month_label(&locale), "Jan");

        let crossing = WeekNavigator::new(date(2023, 1, 30), 0);
        assert_eq!(crossing.month_label(&locale), "Jan-Feb");
    }

    #[test]
    fn test_week_number_by_locale() {
        let us = LocaleConfig::configure(true);
        let eu = LocaleConfig::configure(false);

        assert_eq!(WeekNavigator::new(date(2023, 1, 1), 0).week_number(&us), 1);
        assert_eq!(WeekNavigator::new(date(2023, 1, 9), 1).week_number(&eu), 2);
        // 2023-01-02 starts ISO week 1
        assert_eq!(WeekNavigator::new(date(2023, 1, 2), 1).week_number(&eu), 1);
    }
}
