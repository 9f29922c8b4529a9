//! Generator and path configuration types.

use std::path::PathBuf;

use chrono::{NaiveDate, TimeDelta};
use serde::Deserialize;

use super::ConfigError;

/// Generator parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the simulation random source.
    pub seed: u64,
    /// Number of customers to generate.
    pub customers: usize,
    /// First day of the simulation window.
    pub window_start: NaiveDate,
    /// Last day of the simulation window.
    pub window_end: NaiveDate,
    /// Days kept free at the end of the window when drawing signup dates.
    pub signup_margin_days: i64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            customers: 500,
            window_start: NaiveDate::from_ymd_opt(2023, 7, 1).unwrap_or_default(),
            window_end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            signup_margin_days: 60,
        }
    }
}

impl SimulationConfig {
    /// Last possible signup date. `None` when the margin falls off the calendar.
    pub fn latest_signup(&self) -> Option<NaiveDate> {
        TimeDelta::try_days(self.signup_margin_days)
            .and_then(|margin| self.window_end.checked_sub_signed(margin))
    }

    /// Ensure signups have room for at least one period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signup_margin_days < 0 {
            return Err(ConfigError::InvalidWindow(format!(
                "signup_margin_days must be non-negative, got {}",
                self.signup_margin_days
            )));
        }
        match self.latest_signup() {
            Some(latest) if latest >= self.window_start => Ok(()),
            _ => Err(ConfigError::InvalidWindow(format!(
                "{} to {} leaves no signup days with a {}-day margin",
                self.window_start, self.window_end, self.signup_margin_days
            ))),
        }
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the four generated tables.
    pub data_dir: PathBuf,
    /// Directory for report exports and charts.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
        }
    }
}
