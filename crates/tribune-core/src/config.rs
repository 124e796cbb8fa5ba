use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub expansion: ExpansionConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpansionConfig {
    /// Hard bound on generated instances per appointment template.
    pub iteration_cap: u32,
    /// Rolling window, in days, for recurrences without an end date.
    pub window_days: u32,
    /// IANA timezone whose civil days anchor day keys and recurrence steps.
    pub timezone: String,
}

impl ExpansionConfig {
    /// ## Summary
    /// Resolves the configured timezone name against the IANA database.
    ///
    /// ## Errors
    /// Returns an error if the name is not a known IANA timezone.
    pub fn timezone(&self) -> CoreResult<chrono_tz::Tz> {
        self.timezone
            .parse()
            .map_err(|_| CoreError::ConfigError(format!("unknown timezone: {}", self.timezone)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Appointment-type name filling the headline-event slot.
    pub headline_type: String,
    /// Instances shown in the headline slot.
    pub headline_limit: usize,
    /// Instances shown in the regular upcoming list.
    pub upcoming_limit: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default(
                "expansion.iteration_cap",
                i64::from(constants::DEFAULT_ITERATION_CAP),
            )?
            .set_default(
                "expansion.window_days",
                i64::from(constants::DEFAULT_WINDOW_DAYS),
            )?
            .set_default("expansion.timezone", "Europe/Berlin")?
            .set_default("dashboard.headline_type", constants::HEADLINE_TYPE_NAME)?
            .set_default("dashboard.headline_limit", 2)?
            .set_default("dashboard.upcoming_limit", 5)?
            .set_default("logging.level", "debug")?
            // Env file
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
