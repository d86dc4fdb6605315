//! Week-aligned month grids.

use chrono::Weekday;
use siklus_core::types::{CalendarDate, CalendarMonth};

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEK_START: Weekday = Weekday::Mon;

/// The dates painted for one month: whole Monday-to-Sunday weeks covering
/// every day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthGrid {
    month: CalendarMonth,
    start: CalendarDate,
    end: CalendarDate,
}

impl MonthGrid {
    /// ## Summary
    /// Builds the grid running from the Monday on or before the first of
    /// `month` to the Sunday on or after its last day.
    ///
    /// Every [`CalendarMonth`] has a representable month on each side, so the
    /// padding days always exist.
    #[must_use]
    pub fn for_month(month: CalendarMonth) -> Self {
        let first = month.first_day();
        let last = month.last_day();

        let lead = i64::from(first.weekday().days_since(WEEK_START));
        let trail = i64::from(WEEK_START.pred().days_since(last.weekday()));

        Self {
            month,
            start: first.add_days(-lead).unwrap_or(first),
            end: last.add_days(trail).unwrap_or(last),
        }
    }

    #[must_use]
    pub const fn month(&self) -> CalendarMonth {
        self.month
    }

    /// First cell, always a Monday.
    #[must_use]
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Last cell, always a Sunday.
    #[must_use]
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Number of cells, a multiple of 7.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(self.start.days_until(self.end) + 1).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of rows: 4, 5 or 6.
    #[must_use]
    pub fn week_count(&self) -> usize {
        self.len() / DAYS_PER_WEEK
    }

    /// ## Summary
    /// Iterates over every cell in date order.
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |day| {
            day.succ().filter(|next| *next <= end)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn grid(year: i32, month: u32) -> MonthGrid {
        MonthGrid::for_month(CalendarMonth::new(year, month).expect("valid month"))
    }

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).expect("valid test date")
    }

    #[test]
    fn test_month_starting_on_monday() {
        let january = grid(2024, 1);
        assert_eq!(january.start(), date("2024-01-01"));
        assert_eq!(january.end(), date("2024-02-04"));
        assert_eq!(january.len(), 35);
        assert_eq!(january.week_count(), 5);
    }

    #[test]
    fn test_four_week_february() {
        // February 2021 starts on a Monday and has 28 days
        let february = grid(2021, 2);
        assert_eq!(february.start(), date("2021-02-01"));
        assert_eq!(february.end(), date("2021-02-28"));
        assert_eq!(february.week_count(), 4);
    }

    #[test]
    fn test_six_week_month() {
        // September 2024 starts on a Sunday and ends on a Monday
        let september = grid(2024, 9);
        assert_eq!(september.start(), date("2024-08-26"));
        assert_eq!(september.end(), date("2024-10-06"));
        assert_eq!(september.week_count(), 6);
    }

    #[test]
    fn test_edge_months_still_fill_whole_weeks() {
        let edges = [
            CalendarMonth::new(NaiveDate::MAX.year(), 11).expect("supported month"),
            CalendarMonth::new(NaiveDate::MIN.year(), 2).expect("supported month"),
        ];

        for month in edges {
            let grid = MonthGrid::for_month(month);
            assert_eq!(grid.len() % DAYS_PER_WEEK, 0, "{month}");
            assert_eq!(grid.start().weekday(), Weekday::Mon, "{month}");
            assert_eq!(grid.end().weekday(), Weekday::Sun, "{month}");
        }
    }

    #[test]
    fn test_days_iterates_every_cell_in_order() {
        let march = grid(2024, 3);
        let days: Vec<_> = march.days().collect();

        assert_eq!(days.len(), march.len());
        assert_eq!(days.first(), Some(&march.start()));
        assert_eq!(days.last(), Some(&march.end()));
        assert!(days.windows(2).all(|pair| pair[0].days_until(pair[1]) == 1));
        assert_eq!(days.first().map(|d| d.weekday()), Some(Weekday::Mon));
        assert_eq!(days.last().map(|d| d.weekday()), Some(Weekday::Sun));
    }
}
