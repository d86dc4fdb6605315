//! Subcommand implementations. Each returns the text to print so the
//! rendering can be checked without a terminal.

use siklus_core::config::{CycleSettings, OutputFormat, Settings};
use siklus_core::types::{CalendarDate, CalendarMonth, CycleLength};
use siklus_cycle::{CalculatorState, estimate_from_input};

use crate::cli::{CalendarArgs, EstimateArgs};
use crate::error::AppResult;
use crate::render::{CalendarView, LandmarksText, MonthText, MonthView, json, legend_text};

/// Everything a subcommand needs besides its own arguments.
pub struct Context {
    pub settings: Settings,
    pub format: OutputFormat,
    pub today: CalendarDate,
}

/// Validates the requested length, falling back to the configured default.
/// Lengths outside the selectable options are accepted with a warning.
fn resolve_cycle_length(cycle: &CycleSettings, requested: Option<i64>) -> AppResult<CycleLength> {
    let length = match requested {
        Some(days) => CycleLength::new(days)?,
        None => cycle.default_cycle_length()?,
    };
    if !cycle.is_option(length.days()) {
        tracing::warn!(
            days = length.days(),
            min = cycle.min_length,
            max = cycle.max_length,
            "Cycle length outside the usual range, estimating anyway"
        );
    }
    Ok(length)
}

/// ## Summary
/// Runs `siklus estimate`.
///
/// ## Errors
/// Returns an error if the start date or cycle length is invalid.
pub fn estimate(ctx: &Context, args: &EstimateArgs) -> AppResult<String> {
    let cycle_length = resolve_cycle_length(&ctx.settings.cycle, args.cycle_length)?;
    let landmarks = estimate_from_input(Some(&args.start), cycle_length.days())?;

    match ctx.format {
        OutputFormat::Text => Ok(LandmarksText(&landmarks).to_string()),
        OutputFormat::Json => json(&landmarks),
    }
}

/// ## Summary
/// Runs `siklus calendar`: optionally estimates a cycle, then classifies
/// `args.months` consecutive months.
///
/// ## Errors
/// Returns an error if any date, month or cycle length argument is invalid.
pub fn calendar(ctx: &Context, args: &CalendarArgs) -> AppResult<String> {
    let cycle_length = resolve_cycle_length(&ctx.settings.cycle, args.cycle_length)?;
    let today = args
        .today
        .as_deref()
        .map_or(Ok(ctx.today), CalendarDate::parse)?;
    let start = args.start.as_deref().map(CalendarDate::parse).transpose()?;
    let first_month = match args.month.as_deref() {
        Some(month) => CalendarMonth::parse(month)?,
        None => start.unwrap_or(today).month()?,
    };

    let mut state = CalculatorState::new(first_month, cycle_length);
    if let Some(start) = start {
        state.calculate(start)?;
    }

    let mut months = Vec::with_capacity(usize::from(args.months));
    for _ in 0..args.months {
        months.push(MonthView::new(state.visible_month(), &state.calendar(today)));
        state.next_month();
    }

    match ctx.format {
        OutputFormat::Text => {
            let mut sections = Vec::new();
            if let Some(landmarks) = state.landmarks() {
                sections.push(LandmarksText(landmarks).to_string());
            }
            for view in &months {
                let days: Vec<_> = view.weeks.concat();
                sections.push(MonthText { month: view.month, days: &days }.to_string());
            }
            sections.push(legend_text());
            Ok(sections.join("\n"))
        }
        OutputFormat::Json => json(&CalendarView {
            landmarks: state.landmarks().copied(),
            today,
            months,
        }),
    }
}

/// ## Summary
/// Runs `siklus options`.
///
/// ## Errors
/// Returns an error if JSON encoding fails.
pub fn options(ctx: &Context) -> AppResult<String> {
    let cycle = &ctx.settings.cycle;

    match ctx.format {
        OutputFormat::Text => Ok(cycle
            .options()
            .into_iter()
            .map(|days| {
                let suffix = if days == cycle.default_length { " (default)" } else { "" };
                format!("{days} days{suffix}")
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => json(&serde_json::json!({
            "options": cycle.options(),
            "default": cycle.default_length,
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(format: OutputFormat) -> Context {
        Context {
            settings: Settings::default(),
            format,
            today: CalendarDate::parse("2024-01-20").expect("valid date"),
        }
    }

    fn calendar_args(start: Option<&str>) -> CalendarArgs {
        CalendarArgs {
            start: start.map(str::to_string),
            cycle_length: None,
            month: None,
            today: None,
            months: 2,
        }
    }

    #[test_log::test]
    fn test_estimate_uses_configured_default_length() {
        let args = EstimateArgs {
            start: "2024-01-01".to_string(),
            cycle_length: None,
        };
        let out = estimate(&context(OutputFormat::Json), &args).expect("estimate");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");

        assert_eq!(value["cycleLength"], 28);
        assert_eq!(value["nextPeriodStart"], "2024-01-29");
    }

    #[test_log::test]
    fn test_estimate_rejects_non_positive_length() {
        let args = EstimateArgs {
            start: "2024-01-01".to_string(),
            cycle_length: Some(0),
        };
        assert!(estimate(&context(OutputFormat::Text), &args).is_err());
    }

    #[test_log::test]
    fn test_cycle_length_validates_before_range_check() {
        let cycle = CycleSettings::default();

        assert_eq!(resolve_cycle_length(&cycle, None).expect("default").days(), 28);
        assert_eq!(resolve_cycle_length(&cycle, Some(45)).expect("unusual but positive").days(), 45);
        assert!(resolve_cycle_length(&cycle, Some(0)).is_err());
        assert!(resolve_cycle_length(&cycle, Some(-5)).is_err());
    }

    #[test_log::test]
    fn test_calendar_text_shows_consecutive_months() {
        let out = calendar(&context(OutputFormat::Text), &calendar_args(Some("2024-01-01")))
            .expect("calendar");

        assert!(out.contains("Next period:"));
        assert!(out.contains("January 2024"));
        assert!(out.contains("February 2024"));
        assert!(out.contains("[20~]"));
        assert!(out.contains("* ovulation day"));
    }

    #[test_log::test]
    fn test_calendar_without_start_is_all_normal() {
        let out = calendar(&context(OutputFormat::Json), &calendar_args(None)).expect("calendar");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");

        assert!(value["landmarks"].is_null());
        assert_eq!(value["months"][0]["month"], "2024-01");
        assert_eq!(value["months"][1]["month"], "2024-02");
        let categories: Vec<_> = value["months"]
            .as_array()
            .into_iter()
            .flatten()
            .flat_map(|m| m["weeks"].as_array().into_iter().flatten())
            .flat_map(|w| w.as_array().into_iter().flatten())
            .map(|d| d["category"].clone())
            .collect();
        assert!(!categories.is_empty());
        assert!(categories.iter().all(|c| c == "normal"));
    }

    #[test_log::test]
    fn test_calendar_rejects_bad_month() {
        let mut args = calendar_args(Some("2024-01-01"));
        args.month = Some("Januari".to_string());
        assert!(calendar(&context(OutputFormat::Text), &args).is_err());
    }

    #[test_log::test]
    fn test_options_marks_default() {
        let out = options(&context(OutputFormat::Text)).expect("options");
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "21 days");
        assert!(lines.contains(&"28 days (default)"));
    }
}
