//! Caller-owned calculator state.

use siklus_core::types::{CalendarDate, CalendarMonth, CycleLength};

use crate::classify::{ClassifiedDay, classify};
use crate::error::CycleResult;
use crate::estimate::{LandmarkSet, estimate};

/// What a calculator front end keeps between interactions: the month on
/// screen, the selected cycle length and the last computed landmarks.
///
/// Landmarks are replaced wholesale on every calculation, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorState {
    visible_month: CalendarMonth,
    cycle_length: CycleLength,
    landmarks: Option<LandmarkSet>,
}

impl CalculatorState {
    /// Starts with no landmarks.
    #[must_use]
    pub const fn new(visible_month: CalendarMonth, cycle_length: CycleLength) -> Self {
        Self {
            visible_month,
            cycle_length,
            landmarks: None,
        }
    }

    #[must_use]
    pub const fn visible_month(&self) -> CalendarMonth {
        self.visible_month
    }

    #[must_use]
    pub const fn cycle_length(&self) -> CycleLength {
        self.cycle_length
    }

    #[must_use]
    pub const fn landmarks(&self) -> Option<&LandmarkSet> {
        self.landmarks.as_ref()
    }

    pub const fn set_cycle_length(&mut self, cycle_length: CycleLength) {
        self.cycle_length = cycle_length;
    }

    /// ## Summary
    /// Recomputes the landmarks for a cycle starting on `start` with the
    /// selected cycle length, replacing any previous result.
    ///
    /// ## Errors
    /// Propagates estimation errors; the state is left unchanged on failure.
    pub fn calculate(&mut self, start: CalendarDate) -> CycleResult<&LandmarkSet> {
        let landmarks = estimate(start, self.cycle_length)?;
        Ok(self.landmarks.insert(landmarks))
    }

    /// Drops the computed landmarks.
    pub fn reset(&mut self) {
        self.landmarks = None;
    }

    pub fn next_month(&mut self) {
        self.visible_month = self.visible_month.next();
        tracing::trace!(month = %self.visible_month, "Moved to next month");
    }

    pub fn prev_month(&mut self) {
        self.visible_month = self.visible_month.prev();
        tracing::trace!(month = %self.visible_month, "Moved to previous month");
    }

    pub fn show_month(&mut self, month: CalendarMonth) {
        self.visible_month = month;
    }

    /// ## Summary
    /// Classifies the visible month against the current landmarks.
    #[must_use]
    pub fn calendar(&self, today: CalendarDate) -> Vec<ClassifiedDay> {
        classify(self.visible_month, self.landmarks.as_ref(), today)
    }
}
