//! Cycle landmark estimation.
//!
//! Every landmark is a fixed day offset from the cycle start date:
//!
//! - next period: `start + length`
//! - ovulation: `start + (length - 14)`
//! - fertile window: ovulation `-5 ..= +1` (7 days)
//! - safe window: next period `-10 ..= -1` (10 days)
//!
//! Short cycles are computed the same way, even when the ovulation day lands
//! before the start date.

use serde::Serialize;
use siklus_core::error::CoreError;
use siklus_core::types::{CalendarDate, CycleLength, DateRange};

use crate::error::CycleResult;

/// Days between ovulation and the next period.
pub const LUTEAL_PHASE_DAYS: i64 = 14;
/// Fertile days before ovulation (sperm survival).
pub const FERTILE_DAYS_BEFORE_OVULATION: i64 = 5;
/// Fertile days after ovulation (egg survival).
pub const FERTILE_DAYS_AFTER_OVULATION: i64 = 1;
/// Length of the low-fertility run right before the next period.
pub const SAFE_WINDOW_DAYS: i64 = 10;

/// Landmarks derived from one start date and cycle length.
///
/// Built atomically by [`estimate`]; a set is either fully populated or not
/// produced at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkSet {
    pub start_date: CalendarDate,
    pub cycle_length: CycleLength,
    pub next_period_start: CalendarDate,
    pub ovulation_date: CalendarDate,
    pub fertile_window: DateRange,
    pub safe_window: DateRange,
}

impl LandmarkSet {
    /// ## Summary
    /// Returns `true` if the estimated ovulation day precedes the reported
    /// start date, which happens for cycles shorter than 14 days.
    #[must_use]
    pub fn ovulation_precedes_start(&self) -> bool {
        self.ovulation_date < self.start_date
    }
}

/// ## Summary
/// Estimates the landmarks of the cycle beginning on `start_date`.
///
/// ## Errors
/// Returns `InvalidInput` if any landmark falls outside the representable date
/// range.
pub fn estimate(start_date: CalendarDate, cycle_length: CycleLength) -> CycleResult<LandmarkSet> {
    let length = cycle_length.days();

    let next_period_start = start_date.add_days(length)?;
    let ovulation_date = start_date.add_days(length - LUTEAL_PHASE_DAYS)?;
    let fertile_window = DateRange::new(
        ovulation_date.add_days(-FERTILE_DAYS_BEFORE_OVULATION)?,
        ovulation_date.add_days(FERTILE_DAYS_AFTER_OVULATION)?,
    );
    let safe_window = DateRange::new(
        next_period_start.add_days(-SAFE_WINDOW_DAYS)?,
        next_period_start.add_days(-1)?,
    );

    let landmarks = LandmarkSet {
        start_date,
        cycle_length,
        next_period_start,
        ovulation_date,
        fertile_window,
        safe_window,
    };

    tracing::debug!(
        start = %start_date,
        length = length,
        next_period = %next_period_start,
        ovulation = %ovulation_date,
        fertile = %fertile_window,
        safe = %safe_window,
        "Estimated cycle landmarks"
    );
    if landmarks.ovulation_precedes_start() {
        tracing::debug!(length = length, "Ovulation estimate precedes the start date");
    }

    Ok(landmarks)
}

/// ## Summary
/// Estimates landmarks from raw form input: an optional `YYYY-MM-DD` start
/// date and a cycle length in days.
///
/// ## Errors
/// Returns `InvalidInput` if the start date is absent or unparseable, or the
/// cycle length is not positive.
pub fn estimate_from_input(start: Option<&str>, cycle_length_days: i64) -> CycleResult<LandmarkSet> {
    let start = start
        .ok_or_else(|| CoreError::InvalidInput("start date is required".to_string()))?;
    let start_date = CalendarDate::parse(start)?;
    let cycle_length = CycleLength::new(cycle_length_days)?;

    estimate(start_date, cycle_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).expect("valid test date")
    }

    fn length(days: i64) -> CycleLength {
        CycleLength::new(days).expect("positive length")
    }

    #[test]
    fn test_estimate_standard_cycle() {
        let landmarks = estimate(date("2024-01-01"), length(28)).expect("estimate");

        assert_eq!(landmarks.next_period_start, date("2024-01-29"));
        assert_eq!(landmarks.ovulation_date, date("2024-01-15"));
        assert_eq!(
            landmarks.fertile_window,
            DateRange::new(date("2024-01-10"), date("2024-01-16"))
        );
        assert_eq!(
            landmarks.safe_window,
            DateRange::new(date("2024-01-19"), date("2024-01-28"))
        );
        assert!(landmarks.fertile_window.end < landmarks.safe_window.start);
        assert!(!landmarks.ovulation_precedes_start());
    }

    #[test]
    fn test_estimate_rolls_over_year_end() {
        let landmarks = estimate(date("2023-12-20"), length(30)).expect("estimate");

        assert_eq!(landmarks.next_period_start, date("2024-01-19"));
        assert_eq!(landmarks.ovulation_date, date("2024-01-05"));
        assert_eq!(landmarks.fertile_window.start, date("2023-12-31"));
    }

    #[test]
    fn test_estimate_short_cycle_puts_ovulation_before_start() {
        let landmarks = estimate(date("2024-03-10"), length(10)).expect("estimate");

        assert_eq!(landmarks.ovulation_date, date("2024-03-06"));
        assert_eq!(landmarks.next_period_start, date("2024-03-20"));
        assert_eq!(landmarks.fertile_window.len_days(), 7);
        assert_eq!(landmarks.safe_window.len_days(), 10);
        assert!(landmarks.ovulation_precedes_start());
    }

    #[test]
    fn test_estimate_from_input_requires_start() {
        let err = estimate_from_input(None, 28).expect_err("missing start");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_estimate_from_input_rejects_bad_values() {
        assert!(estimate_from_input(Some("not a date"), 28).is_err());
        assert!(estimate_from_input(Some(""), 28).is_err());
        assert!(estimate_from_input(Some("2024-01-01"), 0).is_err());
        assert!(estimate_from_input(Some("2024-01-01"), -28).is_err());
    }

    #[test]
    fn test_estimate_from_input_accepts_unusual_positive_lengths() {
        let landmarks = estimate_from_input(Some("2024-01-01"), 90).expect("estimate");
        assert_eq!(landmarks.next_period_start, date("2024-03-31"));
    }

    #[test]
    fn test_estimate_fails_whole_call_on_overflow() {
        let near_end = CalendarDate::from(chrono::NaiveDate::MAX);
        let err = estimate(near_end, length(28)).expect_err("out of range");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_landmarks_serialize_camel_case() {
        let landmarks = estimate(date("2024-01-01"), length(28)).expect("estimate");
        let json = serde_json::to_value(landmarks).expect("serialize");

        assert_eq!(json["nextPeriodStart"], "2024-01-29");
        assert_eq!(json["ovulationDate"], "2024-01-15");
        assert_eq!(json["fertileWindow"]["start"], "2024-01-10");
        assert_eq!(json["safeWindow"]["end"], "2024-01-28");
        assert_eq!(json["cycleLength"], 28);
    }
}
