/// Name shared by the binary, the config file and the environment prefix
pub const APP_NAME: &str = "siklus";
pub const ENV_PREFIX: &str = "SIKLUS";
pub const CONFIG_FILE: &str = const_str::concat!(APP_NAME, ".toml");

/// Cycle length preselected by the calculator form
pub const DEFAULT_CYCLE_LENGTH: i64 = 28;
/// Bounds of the cycle-length dropdown. The calculator itself accepts any
/// positive length.
pub const MIN_CYCLE_LENGTH: i64 = 21;
pub const MAX_CYCLE_LENGTH: i64 = 35;

/// Input format of a calendar date (`<input type="date">` value)
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Input format of a month marker
pub const MONTH_FORMAT: &str = "%Y-%m";
