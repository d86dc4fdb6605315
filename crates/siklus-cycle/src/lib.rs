//! Cycle-landmark estimation and month-grid classification.
//!
//! [`estimate`] derives a [`LandmarkSet`] from a cycle start date and a cycle
//! length; [`classify`] maps every cell of a Monday-first month grid onto a
//! [`DayCategory`]. Both are pure: the caller supplies `today` and owns any
//! state between calls, see [`CalculatorState`].

pub mod classify;
pub mod error;
pub mod estimate;
pub mod grid;
pub mod state;

pub use classify::{ClassifiedDay, DayCategory, categorize, classify, classify_input, weeks};
pub use estimate::{LandmarkSet, estimate, estimate_from_input};
pub use grid::MonthGrid;
pub use state::CalculatorState;
