//! Calendar value types shared by the estimator and the classifier.
//!
//! Every value here is a plain calendar date (or a run of them). There is no
//! time-of-day and no timezone, so equality and ordering are by calendar day.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, TimeDelta, Weekday};
use serde::Serialize;

use crate::constants::{DATE_FORMAT, MONTH_FORMAT};
use crate::error::{CoreError, CoreResult};

/// A day on the calendar, without a time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// ## Summary
    /// Builds a date from its year, month and day.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if the triple is not a real calendar day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                CoreError::InvalidInput(format!("{year:04}-{month:02}-{day:02} is not a date"))
            })
    }

    /// ## Summary
    /// Parses an ISO `YYYY-MM-DD` date. Surrounding whitespace is ignored.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if the string is empty or not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput("date is empty".to_string()));
        }

        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Self)
            .map_err(|e| CoreError::InvalidInput(format!("invalid date {trimmed:?}: {e}")))
    }

    /// ## Summary
    /// Returns the date `days` calendar days later (earlier when negative),
    /// rolling over month and year boundaries.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if the result falls outside the representable
    /// date range.
    pub fn add_days(self, days: i64) -> CoreResult<Self> {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
            .ok_or_else(|| {
                CoreError::InvalidInput(format!("{self} {days:+} days is out of range"))
            })
    }

    /// ## Summary
    /// Number of days from `self` to `other`; negative if `other` is earlier.
    #[must_use]
    pub fn days_until(self, other: Self) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    #[must_use]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month_number(self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// ## Summary
    /// The month this date falls in.
    ///
    /// ## Errors
    /// Returns `InvalidInput` for the first and last representable months,
    /// whose calendar grids would run off the supported date range.
    pub fn month(self) -> CoreResult<CalendarMonth> {
        CalendarMonth::try_from(self)
    }

    /// The following day, or `None` at the end of the representable range.
    #[must_use]
    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for CalendarDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// A year and month, used to pick the month shown on the calendar.
///
/// Internally this is the first day of the month. Only months with a
/// representable neighbour on both sides are accepted, so the Monday-to-Sunday
/// weeks around any month always exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarMonth(NaiveDate);

impl CalendarMonth {
    /// ## Summary
    /// Builds a month marker from a year and a 1-based month number.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if `month` is not in `1..=12`, or the month is
    /// the first or last one the date range can hold.
    pub fn new(year: i32, month: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(Self::supported)
            .ok_or_else(|| CoreError::InvalidInput(format!("{year:04}-{month:02} is not a month")))
    }

    fn supported(first_day: NaiveDate) -> Option<Self> {
        let one = Months::new(1);
        let has_prev = first_day.checked_sub_months(one).is_some();
        let has_next = first_day.checked_add_months(one).is_some();
        (has_prev && has_next).then_some(Self(first_day))
    }

    /// ## Summary
    /// Parses either `YYYY-MM` or a full `YYYY-MM-DD` date, in which case the
    /// day is ignored.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if the string matches neither form or names an
    /// unsupported month.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput("month is empty".to_string()));
        }

        if let Ok(date) = CalendarDate::parse(trimmed) {
            return date.month();
        }

        let first_day = NaiveDate::parse_from_str(&format!("{trimmed}-01"), DATE_FORMAT)
            .map_err(|e| CoreError::InvalidInput(format!("invalid month {trimmed:?}: {e}")))?;
        Self::supported(first_day)
            .ok_or_else(|| CoreError::InvalidInput(format!("month {trimmed:?} is out of range")))
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// 1-based month number.
    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub const fn first_day(self) -> CalendarDate {
        CalendarDate(self.0)
    }

    #[must_use]
    pub fn last_day(self) -> CalendarDate {
        // Day 28 exists in every month, so the search always succeeds.
        let last = (28..=31)
            .rev()
            .find_map(|day| self.0.with_day(day))
            .unwrap_or(self.0);
        CalendarDate(last)
    }

    /// ## Summary
    /// Returns `true` if `date` falls in this month of this year.
    #[must_use]
    pub fn contains(self, date: CalendarDate) -> bool {
        date.year() == self.year() && date.month_number() == self.month()
    }

    /// The following month. Stays put at the last supported month.
    #[must_use]
    pub fn next(self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(Self::supported)
            .unwrap_or(self)
    }

    /// The preceding month. Stays put at the first supported month.
    #[must_use]
    pub fn prev(self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .and_then(Self::supported)
            .unwrap_or(self)
    }
}

impl TryFrom<CalendarDate> for CalendarMonth {
    type Error = CoreError;

    fn try_from(date: CalendarDate) -> Result<Self, Self::Error> {
        date.0
            .with_day(1)
            .and_then(Self::supported)
            .ok_or_else(|| CoreError::InvalidInput(format!("month of {date} is out of range")))
    }
}

impl FromStr for CalendarMonth {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(MONTH_FORMAT))
    }
}

impl Serialize for CalendarMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An inclusive run of calendar days.
///
/// A range whose `start` is after its `end` is inverted: it is kept as-is and
/// simply contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: CalendarDate,
    pub end: CalendarDate,
}

impl DateRange {
    #[must_use]
    pub const fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    /// ## Summary
    /// Returns `true` if `date` lies between `start` and `end`, both inclusive.
    #[must_use]
    pub fn contains(self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// ## Summary
    /// Number of days covered, counting both ends. Zero or negative for an
    /// inverted range.
    #[must_use]
    pub fn len_days(self) -> i64 {
        self.start.days_until(self.end) + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// A validated, strictly positive cycle length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CycleLength(u32);

impl CycleLength {
    /// ## Summary
    /// Validates a cycle length reported by the user.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if `days` is zero, negative, or larger than
    /// `u32::MAX`.
    pub fn new(days: i64) -> CoreResult<Self> {
        if days <= 0 {
            return Err(CoreError::InvalidInput(format!(
                "cycle length must be positive, got {days}"
            )));
        }

        u32::try_from(days)
            .map(Self)
            .map_err(|e| CoreError::InvalidInput(format!("cycle length {days} is too large: {e}")))
    }

    #[must_use]
    pub fn days(self) -> i64 {
        i64::from(self.0)
    }
}

impl TryFrom<i64> for CycleLength {
    type Error = CoreError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl fmt::Display for CycleLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).expect("valid test date")
    }

    #[test]
    fn test_parse_trims_and_rejects_garbage() {
        assert_eq!(date(" 2024-03-09 ").to_string(), "2024-03-09");
        assert!(CalendarDate::parse("").is_err());
        assert!(CalendarDate::parse("2024-02-30").is_err());
        assert!(CalendarDate::parse("09/03/2024").is_err());
        assert_eq!(CalendarDate::from_ymd(2024, 3, 9).expect("valid"), date("2024-03-09"));
        assert!(CalendarDate::from_ymd(2023, 2, 29).is_err());
    }

    #[test]
    fn test_add_days_rolls_over_month_and_year() {
        // 20th of a 30-day month plus 28 days lands in the next month
        assert_eq!(date("2024-04-20").add_days(28).expect("in range"), date("2024-05-18"));
        assert_eq!(date("2023-12-20").add_days(14).expect("in range"), date("2024-01-03"));
        assert_eq!(date("2024-03-01").add_days(-1).expect("in range"), date("2024-02-29"));
    }

    #[test]
    fn test_add_days_out_of_range_is_invalid_input() {
        let err = date("2024-01-01").add_days(i64::MAX).expect_err("overflow");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_days_until_is_signed() {
        assert_eq!(date("2024-01-01").days_until(date("2024-01-29")), 28);
        assert_eq!(date("2024-01-29").days_until(date("2024-01-01")), -28);
    }

    #[test]
    fn test_month_parse_accepts_both_forms() {
        let from_month = CalendarMonth::parse("2024-02").expect("month");
        let from_date = CalendarMonth::parse("2024-02-17").expect("date");
        assert_eq!(from_month, from_date);
        assert_eq!(from_month.to_string(), "2024-02");
        assert!(CalendarMonth::parse("2024-13").is_err());
        assert!(CalendarMonth::parse("february").is_err());
    }

    #[test]
    fn test_month_bounds_and_navigation() {
        let feb = CalendarMonth::new(2024, 2).expect("month");
        assert_eq!(feb.first_day(), date("2024-02-01"));
        assert_eq!(feb.last_day(), date("2024-02-29"));
        assert_eq!(feb.next(), CalendarMonth::new(2024, 3).expect("month"));
        assert_eq!(
            CalendarMonth::new(2024, 1).expect("month").prev(),
            CalendarMonth::new(2023, 12).expect("month")
        );
        assert!(feb.contains(date("2024-02-29")));
        assert!(!feb.contains(date("2023-02-01")));
    }

    #[test]
    fn test_months_at_range_edges_are_rejected() {
        let last = CalendarDate::from(NaiveDate::MAX);
        let first = CalendarDate::from(NaiveDate::MIN);

        assert!(CalendarMonth::try_from(last).expect_err("last month").is_invalid_input());
        assert!(CalendarMonth::try_from(first).expect_err("first month").is_invalid_input());
        assert!(last.month().is_err());
        assert!(CalendarMonth::new(NaiveDate::MAX.year(), 12).is_err());
        assert!(CalendarMonth::new(NaiveDate::MIN.year(), 1).is_err());
        assert!(CalendarMonth::parse(&NaiveDate::MAX.to_string()).is_err());
    }

    #[test]
    fn test_navigation_stops_at_last_supported_month() {
        let near_end = CalendarMonth::new(NaiveDate::MAX.year(), 11).expect("supported month");
        assert_eq!(near_end.next(), near_end);

        let near_start = CalendarMonth::new(NaiveDate::MIN.year(), 2).expect("supported month");
        assert_eq!(near_start.prev(), near_start);
    }

    #[test]
    fn test_inverted_range_contains_nothing() {
        let range = DateRange::new(date("2024-01-10"), date("2024-01-05"));
        assert!(range.len_days() <= 0);
        assert!(!range.contains(date("2024-01-07")));
        assert!(!range.contains(date("2024-01-10")));
    }

    #[test]
    fn test_cycle_length_rejects_non_positive() {
        assert!(CycleLength::new(0).is_err());
        assert!(CycleLength::new(-3).is_err());
        assert_eq!(CycleLength::new(1).expect("positive").days(), 1);
        assert_eq!(CycleLength::try_from(28).expect("positive").days(), 28);
    }

    #[test]
    fn test_date_serializes_as_iso_string() {
        let json = serde_json::to_string(&date("2024-01-15")).expect("serialize");
        assert_eq!(json, "\"2024-01-15\"");
    }
}
