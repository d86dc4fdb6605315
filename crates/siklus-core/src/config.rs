use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE, DEFAULT_CYCLE_LENGTH, ENV_PREFIX, MAX_CYCLE_LENGTH, MIN_CYCLE_LENGTH,
};
use crate::error::{CoreError, CoreResult};
use crate::types::CycleLength;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    pub cycle: CycleSettings,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

/// Cycle-length choices offered to the user.
///
/// The bounds only shape the input form; the estimator accepts any positive
/// length.
#[derive(Debug, Clone, Deserialize)]
pub struct CycleSettings {
    pub default_length: i64,
    pub min_length: i64,
    pub max_length: i64,
}

impl Default for CycleSettings {
    fn default() -> Self {
        Self {
            default_length: DEFAULT_CYCLE_LENGTH,
            min_length: MIN_CYCLE_LENGTH,
            max_length: MAX_CYCLE_LENGTH,
        }
    }
}

impl CycleSettings {
    /// ## Summary
    /// Returns every selectable cycle length, shortest first.
    #[must_use]
    pub fn options(&self) -> Vec<i64> {
        (self.min_length..=self.max_length).collect()
    }

    /// ## Summary
    /// Returns `true` if `days` is one of the selectable lengths.
    #[must_use]
    pub fn is_option(&self, days: i64) -> bool {
        (self.min_length..=self.max_length).contains(&days)
    }

    /// ## Summary
    /// The preselected cycle length.
    ///
    /// ## Errors
    /// Returns `InvalidInput` if the configured default is not positive.
    pub fn default_cycle_length(&self) -> CoreResult<CycleLength> {
        CycleLength::new(self.default_length)
    }

    /// ## Summary
    /// Checks that the bounds are positive and bracket the default.
    ///
    /// ## Errors
    /// Returns `ConfigError` describing the first violated constraint.
    pub fn validate(&self) -> CoreResult<()> {
        if self.min_length <= 0 {
            return Err(CoreError::ConfigError(format!(
                "cycle.min_length must be positive, got {}",
                self.min_length
            )));
        }
        if self.min_length > self.max_length {
            return Err(CoreError::ConfigError(format!(
                "cycle.min_length ({}) exceeds cycle.max_length ({})",
                self.min_length, self.max_length
            )));
        }
        if !self.is_option(self.default_length) {
            return Err(CoreError::ConfigError(format!(
                "cycle.default_length ({}) is outside {}..={}",
                self.default_length, self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CoreError::InvalidInput(format!(
                "unknown output format {other:?}, expected text or json"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `siklus.toml` and
    /// `SIKLUS_*` environment variables (highest precedence), then validates
    /// it.
    ///
    /// Nested keys use a double underscore in the environment, e.g.
    /// `SIKLUS_CYCLE__DEFAULT_LENGTH=30`.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the
    /// configuration fails.
    pub fn load() -> Result<Self> {
        let defaults = CycleSettings::default();
        let settings = Config::builder()
            .set_default("cycle.default_length", defaults.default_length)?
            .set_default("cycle.min_length", defaults.min_length)?
            .set_default("cycle.max_length", defaults.max_length)?
            .set_default("logging.level", LoggingConfig::default().level)?
            .set_default("output.format", OutputFormat::default().as_str())?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            // Env vars
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.cycle.validate()?;

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(settings = ?settings, "Configuration loaded");

    Ok(settings)
}
