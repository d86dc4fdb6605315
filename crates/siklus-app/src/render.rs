//! Text and JSON presentation of landmarks and calendars.

use std::fmt;

use serde::Serialize;
use siklus_core::types::{CalendarDate, CalendarMonth};
use siklus_cycle::{ClassifiedDay, DayCategory, LandmarkSet, weeks};

use crate::error::AppResult;

const CELL_WIDTH: usize = 5;
const WEEKDAY_HEADER: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One rendered month, as emitted in JSON output.
#[derive(Debug, Serialize)]
pub struct MonthView {
    pub month: CalendarMonth,
    pub weeks: Vec<Vec<ClassifiedDay>>,
}

impl MonthView {
    #[must_use]
    pub fn new(month: CalendarMonth, days: &[ClassifiedDay]) -> Self {
        Self {
            month,
            weeks: weeks(days).into_iter().map(<[ClassifiedDay]>::to_vec).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalendarView {
    pub landmarks: Option<LandmarkSet>,
    pub today: CalendarDate,
    pub months: Vec<MonthView>,
}

const fn marker(category: DayCategory) -> char {
    match category {
        DayCategory::Ovulation => '*',
        DayCategory::Fertile => '+',
        DayCategory::Safe => '~',
        DayCategory::Period => '!',
        DayCategory::Normal => ' ',
    }
}

const fn label(category: DayCategory) -> &'static str {
    match category {
        DayCategory::Ovulation => "ovulation day",
        DayCategory::Fertile => "fertile window",
        DayCategory::Safe => "safe window",
        DayCategory::Period => "next period",
        DayCategory::Normal => "normal day",
    }
}

fn long_date(date: CalendarDate) -> String {
    date.as_naive().format("%A, %d %B %Y").to_string()
}

/// Landmark summary shown after a calculation.
pub struct LandmarksText<'a>(pub &'a LandmarkSet);

impl fmt::Display for LandmarksText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let landmarks = self.0;
        writeln!(f, "Cycle start:     {}", long_date(landmarks.start_date))?;
        writeln!(f, "Cycle length:    {}", landmarks.cycle_length)?;
        writeln!(f, "Next period:     {}", long_date(landmarks.next_period_start))?;
        writeln!(f, "Ovulation:       {}", long_date(landmarks.ovulation_date))?;
        writeln!(
            f,
            "Fertile window:  {} to {}",
            long_date(landmarks.fertile_window.start),
            long_date(landmarks.fertile_window.end)
        )?;
        writeln!(
            f,
            "Safe window:     {} to {}",
            long_date(landmarks.safe_window.start),
            long_date(landmarks.safe_window.end)
        )
    }
}

fn cell(day: ClassifiedDay) -> String {
    let (open, close) = if day.is_today {
        ('[', ']')
    } else if day.is_in_displayed_month {
        (' ', ' ')
    } else {
        ('(', ')')
    };
    format!("{open}{:>2}{}{close}", day.date.day(), marker(day.category))
}

/// One month drawn as a Monday-first grid. Today is bracketed, days outside
/// the month are parenthesised, and each day carries its category marker.
pub struct MonthText<'a> {
    pub month: CalendarMonth,
    pub days: &'a [ClassifiedDay],
}

impl fmt::Display for MonthText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.month.first_day().as_naive().format("%B %Y").to_string();
        let title = format!("{title:^width$}", width = CELL_WIDTH * WEEKDAY_HEADER.len());
        writeln!(f, "{}", title.trim_end())?;

        let header: String = WEEKDAY_HEADER
            .iter()
            .map(|name| format!("{name:^width$}", width = CELL_WIDTH))
            .collect();
        writeln!(f, "{}", header.trim_end())?;

        for row in weeks(self.days) {
            let line: String = row.iter().copied().map(cell).collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

/// ## Summary
/// Lists the marker of every non-normal category.
#[must_use]
pub fn legend_text() -> String {
    DayCategory::ALL
        .into_iter()
        .filter(|category| *category != DayCategory::Normal)
        .map(|category| format!("{} {}", marker(category), label(category)))
        .collect::<Vec<_>>()
        .join("   ")
}

/// ## Summary
/// Serializes any view as pretty JSON.
///
/// ## Errors
/// Returns `JsonError` if serialization fails.
pub fn json<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
