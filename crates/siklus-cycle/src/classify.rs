//! Calendar day classification.
//!
//! Each grid cell gets exactly one [`DayCategory`]. Rules are tried in a fixed
//! order and the first match wins, so the ovulation day (which also sits
//! inside the fertile window) is always reported as ovulation.

use std::fmt;

use serde::Serialize;
use siklus_core::types::{CalendarDate, CalendarMonth};

use crate::error::CycleResult;
use crate::estimate::LandmarkSet;
use crate::grid::{DAYS_PER_WEEK, MonthGrid};

/// Cycle phase of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayCategory {
    Ovulation,
    Fertile,
    Safe,
    Period,
    Normal,
}

impl DayCategory {
    /// Every category, in precedence order.
    pub const ALL: [Self; 5] = [
        Self::Ovulation,
        Self::Fertile,
        Self::Safe,
        Self::Period,
        Self::Normal,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ovulation => "ovulation",
            Self::Fertile => "fertile",
            Self::Safe => "safe",
            Self::Period => "period",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for DayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cell of the rendered calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedDay {
    pub date: CalendarDate,
    pub is_in_displayed_month: bool,
    pub is_today: bool,
    pub category: DayCategory,
}

/// ## Summary
/// Returns the category of `date` under `landmarks`, or `Normal` when no
/// landmarks have been computed yet.
#[must_use]
pub fn categorize(date: CalendarDate, landmarks: Option<&LandmarkSet>) -> DayCategory {
    let Some(landmarks) = landmarks else {
        return DayCategory::Normal;
    };

    if date == landmarks.ovulation_date {
        DayCategory::Ovulation
    } else if landmarks.fertile_window.contains(date) {
        DayCategory::Fertile
    } else if landmarks.safe_window.contains(date) {
        DayCategory::Safe
    } else if date == landmarks.next_period_start {
        DayCategory::Period
    } else {
        DayCategory::Normal
    }
}

/// ## Summary
/// Classifies every cell of the week-aligned grid for `visible_month`.
///
/// `today` is supplied by the caller so that the result depends only on the
/// arguments.
#[must_use]
pub fn classify(
    visible_month: CalendarMonth,
    landmarks: Option<&LandmarkSet>,
    today: CalendarDate,
) -> Vec<ClassifiedDay> {
    let grid = MonthGrid::for_month(visible_month);

    let days: Vec<_> = grid
        .days()
        .map(|date| ClassifiedDay {
            date,
            is_in_displayed_month: visible_month.contains(date),
            is_today: date == today,
            category: categorize(date, landmarks),
        })
        .collect();

    tracing::debug!(
        month = %visible_month,
        cells = days.len(),
        has_landmarks = landmarks.is_some(),
        "Classified month grid"
    );

    days
}

/// ## Summary
/// Like [`classify`], but takes the visible month as a `YYYY-MM` (or
/// `YYYY-MM-DD`) marker.
///
/// ## Errors
/// Returns `InvalidInput` if the marker cannot be parsed.
pub fn classify_input(
    visible_month: &str,
    landmarks: Option<&LandmarkSet>,
    today: CalendarDate,
) -> CycleResult<Vec<ClassifiedDay>> {
    let month = CalendarMonth::parse(visible_month)?;
    Ok(classify(month, landmarks, today))
}

/// ## Summary
/// Splits a classified grid into Monday-to-Sunday rows.
#[must_use]
pub fn weeks(days: &[ClassifiedDay]) -> Vec<&[ClassifiedDay]> {
    days.chunks(DAYS_PER_WEEK).collect()
}
